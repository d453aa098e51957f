// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Exact scaled-integer durations.
//!
//! [`Duration`] represents an elapsed time span as
//! `mantissa × factor × 10^exponent` seconds, with an `i128` mantissa, a
//! positive integer factor and a signed decimal exponent.  The scheme covers
//! day counts down to attosecond ticks without floating-point drift:
//!
//! | Unit | factor | exponent |
//! |------|--------|----------|
//! | days | 86 400 | 0 |
//! | hours | 3 600 | 0 |
//! | minutes | 60 | 0 |
//! | seconds | 1 | 0 |
//! | milliseconds | 1 | −3 |
//! | … | 1 | … |
//! | attoseconds | 1 | −18 |
//!
//! Two durations sharing the same `(factor, exponent)` pair are
//! **commensurable** and combine directly on their mantissas.  Everything
//! else requires an explicit [`rescale`](Duration::rescale), which succeeds
//! only when the conversion is an exact integer scaling and fails with
//! [`TimeError::InexactConversion`] otherwise.  There is no implicit
//! normalization and no floating-point path: every operation is
//! integer-exact or fails with an explicit error, and overflow is checked,
//! never wrapped.

use crate::error::{TimeError, TimeResult};
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// TimeUnit
// ═══════════════════════════════════════════════════════════════════════════

/// The fixed enumeration of time-axis units, days through attoseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeUnit {
    /// 86 400 seconds.
    Days,
    /// 3 600 seconds.
    Hours,
    /// 60 seconds.
    Minutes,
    /// The base unit.
    Seconds,
    /// 10^-3 seconds.
    Milliseconds,
    /// 10^-6 seconds.
    Microseconds,
    /// 10^-9 seconds.
    Nanoseconds,
    /// 10^-12 seconds.
    Picoseconds,
    /// 10^-15 seconds.
    Femtoseconds,
    /// 10^-18 seconds.
    Attoseconds,
}

impl TimeUnit {
    /// The unit's scale factor (whole seconds per 10^exponent tick).
    pub const fn factor(self) -> i64 {
        match self {
            TimeUnit::Days => 86_400,
            TimeUnit::Hours => 3_600,
            TimeUnit::Minutes => 60,
            _ => 1,
        }
    }

    /// The unit's decimal exponent.
    pub const fn exponent(self) -> i32 {
        match self {
            TimeUnit::Days | TimeUnit::Hours | TimeUnit::Minutes | TimeUnit::Seconds => 0,
            TimeUnit::Milliseconds => -3,
            TimeUnit::Microseconds => -6,
            TimeUnit::Nanoseconds => -9,
            TimeUnit::Picoseconds => -12,
            TimeUnit::Femtoseconds => -15,
            TimeUnit::Attoseconds => -18,
        }
    }

    /// Plural lowercase name, as written in unit/origin specifications.
    pub const fn name(self) -> &'static str {
        match self {
            TimeUnit::Days => "days",
            TimeUnit::Hours => "hours",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Microseconds => "microseconds",
            TimeUnit::Nanoseconds => "nanoseconds",
            TimeUnit::Picoseconds => "picoseconds",
            TimeUnit::Femtoseconds => "femtoseconds",
            TimeUnit::Attoseconds => "attoseconds",
        }
    }

    /// Parse a unit word.  Singular and plural spellings are both accepted;
    /// anything else fails with [`TimeError::MalformedSpec`].
    pub fn parse(word: &str) -> TimeResult<Self> {
        match word {
            "day" | "days" => Ok(TimeUnit::Days),
            "hour" | "hours" => Ok(TimeUnit::Hours),
            "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "second" | "seconds" => Ok(TimeUnit::Seconds),
            "millisecond" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "microsecond" | "microseconds" => Ok(TimeUnit::Microseconds),
            "nanosecond" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            "picosecond" | "picoseconds" => Ok(TimeUnit::Picoseconds),
            "femtosecond" | "femtoseconds" => Ok(TimeUnit::Femtoseconds),
            "attosecond" | "attoseconds" => Ok(TimeUnit::Attoseconds),
            other => Err(TimeError::malformed(format!("unknown time unit `{other}`"))),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Duration
// ═══════════════════════════════════════════════════════════════════════════

/// An exact signed time span: `mantissa × factor × 10^exponent` seconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Duration {
    mantissa: i128,
    factor: i64,
    exponent: i32,
}

impl Duration {
    /// Build a duration from its raw parts.
    ///
    /// # Panics
    /// Panics if `factor` is not positive; the factor carries the unit's
    /// whole-second scale and a non-positive value has no meaning.
    pub const fn new(mantissa: i128, factor: i64, exponent: i32) -> Self {
        assert!(factor > 0, "duration factor must be positive");
        Self {
            mantissa,
            factor,
            exponent,
        }
    }

    /// A duration of `value` ticks of `unit`.
    pub const fn of(value: i128, unit: TimeUnit) -> Self {
        Self::new(value, unit.factor(), unit.exponent())
    }

    /// `n` days.
    pub const fn days(n: i128) -> Self {
        Self::of(n, TimeUnit::Days)
    }

    /// `n` hours.
    pub const fn hours(n: i128) -> Self {
        Self::of(n, TimeUnit::Hours)
    }

    /// `n` minutes.
    pub const fn minutes(n: i128) -> Self {
        Self::of(n, TimeUnit::Minutes)
    }

    /// `n` seconds.
    pub const fn seconds(n: i128) -> Self {
        Self::of(n, TimeUnit::Seconds)
    }

    /// `n` milliseconds.
    pub const fn milliseconds(n: i128) -> Self {
        Self::of(n, TimeUnit::Milliseconds)
    }

    /// `n` microseconds.
    pub const fn microseconds(n: i128) -> Self {
        Self::of(n, TimeUnit::Microseconds)
    }

    /// `n` nanoseconds.
    pub const fn nanoseconds(n: i128) -> Self {
        Self::of(n, TimeUnit::Nanoseconds)
    }

    /// `n` attoseconds.
    pub const fn attoseconds(n: i128) -> Self {
        Self::of(n, TimeUnit::Attoseconds)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The signed mantissa.
    #[inline]
    pub const fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// The positive scale factor.
    #[inline]
    pub const fn factor(&self) -> i64 {
        self.factor
    }

    /// The decimal exponent.
    #[inline]
    pub const fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Whether the span is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// Whether `self` and `other` share the same `(factor, exponent)` pair
    /// and therefore combine without rescaling.
    #[inline]
    pub const fn is_commensurable_with(&self, other: &Duration) -> bool {
        self.factor == other.factor && self.exponent == other.exponent
    }

    // ── exact conversions ─────────────────────────────────────────────

    /// Re-express this duration with a different `(factor, exponent)` pair.
    ///
    /// Succeeds only when the conversion is an exact integer scaling
    /// (`InexactConversion` otherwise); intermediate overflow is checked
    /// (`Overflow`).
    ///
    /// ```
    /// use tempocal::{Duration, TimeUnit};
    ///
    /// let one_second = Duration::seconds(1);
    /// assert_eq!(one_second.to_unit(TimeUnit::Milliseconds).unwrap().mantissa(), 1000);
    /// assert!(Duration::milliseconds(1500).to_unit(TimeUnit::Seconds).is_err());
    /// ```
    pub fn rescale(&self, factor: i64, exponent: i32) -> TimeResult<Duration> {
        assert!(factor > 0, "duration factor must be positive");
        if self.factor == factor && self.exponent == exponent {
            return Ok(*self);
        }
        let num = self
            .mantissa
            .checked_mul(self.factor as i128)
            .ok_or(TimeError::Overflow)?;
        let shifted = shift_pow10(num, self.exponent - exponent, self.inexact())?;
        if shifted % factor as i128 != 0 {
            return Err(self.inexact());
        }
        Ok(Duration::new(shifted / factor as i128, factor, exponent))
    }

    /// [`rescale`](Duration::rescale) to one of the enumerated units.
    #[inline]
    pub fn to_unit(&self, unit: TimeUnit) -> TimeResult<Duration> {
        self.rescale(unit.factor(), unit.exponent())
    }

    /// The span expressed as a whole number of attoseconds.
    ///
    /// Exact for every duration at or above attosecond resolution; a
    /// sub-attosecond duration with a fractional residue fails with
    /// `InexactConversion`.
    pub(crate) fn total_attoseconds(&self) -> TimeResult<i128> {
        let num = self
            .mantissa
            .checked_mul(self.factor as i128)
            .ok_or(TimeError::Overflow)?;
        shift_pow10(num, self.exponent + 18, self.inexact())
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Exact sum.  A non-commensurable `rhs` is first rescaled to `self`'s
    /// `(factor, exponent)` pair, failing with `InexactConversion` when that
    /// rescale is not exact.
    pub fn checked_add(&self, rhs: &Duration) -> TimeResult<Duration> {
        let rhs = rhs.rescale(self.factor, self.exponent)?;
        let mantissa = self
            .mantissa
            .checked_add(rhs.mantissa)
            .ok_or(TimeError::Overflow)?;
        Ok(Duration::new(mantissa, self.factor, self.exponent))
    }

    /// Exact difference; same commensurability contract as
    /// [`checked_add`](Duration::checked_add).
    pub fn checked_sub(&self, rhs: &Duration) -> TimeResult<Duration> {
        self.checked_add(&rhs.negate()?)
    }

    /// Exact negation.
    pub fn negate(&self) -> TimeResult<Duration> {
        let mantissa = self.mantissa.checked_neg().ok_or(TimeError::Overflow)?;
        Ok(Duration::new(mantissa, self.factor, self.exponent))
    }

    /// Exact scaling by an integer.
    pub fn checked_scale(&self, k: i128) -> TimeResult<Duration> {
        let mantissa = self.mantissa.checked_mul(k).ok_or(TimeError::Overflow)?;
        Ok(Duration::new(mantissa, self.factor, self.exponent))
    }

    /// Value-level comparison across arbitrary scales.
    ///
    /// Both sides are reduced to a common resolution with checked
    /// multiplications only, so the comparison itself is always exact;
    /// it fails with `Overflow` when an intermediate value exceeds the
    /// `i128` range.
    ///
    /// Note that `==`/[`PartialEq`] compare *representations*: one second
    /// and one thousand milliseconds are `compare`-equal but not `==`.
    pub fn compare(&self, other: &Duration) -> TimeResult<Ordering> {
        if self.is_commensurable_with(other) {
            return Ok(self.mantissa.cmp(&other.mantissa));
        }
        let common = self.exponent.min(other.exponent);
        let left = self.reduced_to_exponent(common)?;
        let right = other.reduced_to_exponent(common)?;
        Ok(left.cmp(&right))
    }

    /// The value as a count of `10^exponent`-second ticks, exponent ≤ own.
    fn reduced_to_exponent(&self, exponent: i32) -> TimeResult<i128> {
        let num = self
            .mantissa
            .checked_mul(self.factor as i128)
            .ok_or(TimeError::Overflow)?;
        shift_pow10(num, self.exponent - exponent, self.inexact())
    }

    /// The `InexactConversion` error naming this duration.
    fn inexact(&self) -> TimeError {
        TimeError::InexactConversion {
            mantissa: self.mantissa,
            factor: self.factor,
            exponent: self.exponent,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.factor == 1 && self.exponent == 0 {
            write!(f, "{} s", self.mantissa)
        } else {
            write!(f, "{} x {}e{} s", self.mantissa, self.factor, self.exponent)
        }
    }
}

/// Multiply `num` by `10^shift`, dividing exactly when `shift` is negative.
///
/// `inexact` is the error reported when a negative shift leaves a remainder.
fn shift_pow10(num: i128, shift: i32, inexact: TimeError) -> TimeResult<i128> {
    if num == 0 {
        return Ok(0);
    }
    if shift >= 0 {
        let scale = 10i128
            .checked_pow(shift as u32)
            .ok_or(TimeError::Overflow)?;
        num.checked_mul(scale).ok_or(TimeError::Overflow)
    } else {
        // A divisor beyond 10^38 exceeds i128, so any nonzero numerator
        // would be fractional.
        let scale = match 10i128.checked_pow(shift.unsigned_abs()) {
            Some(s) => s,
            None => return Err(inexact),
        };
        if num % scale != 0 {
            return Err(inexact);
        }
        Ok(num / scale)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

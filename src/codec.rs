// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Numeric time-axis codec.
//!
//! Scientific datasets store time as a bare numeric axis described by a
//! unit/origin string.  This module parses that description and converts
//! between raw axis values and [`Instant`]s:
//!
//! ```text
//! <unit> since <YYYY-MM-DD>[ <HH:MM:SS[.fraction]>]
//! ```
//!
//! `<unit>` is one of the enumerated [`TimeUnit`] words (singular or plural);
//! the origin time defaults to midnight.  Any deviation from the grammar
//! fails with [`TimeError::MalformedSpec`]; an origin date that does not
//! exist under the target calendar fails with [`TimeError::InvalidDate`].
//!
//! [`decode`] and [`encode`] are lazy, restartable, order-preserving
//! iterator adapters; each element is independent, so a caller may fan the
//! work out across threads freely.  Encoding is the exact inverse of
//! decoding: a value that is not an exact multiple of the target unit fails
//! with [`TimeError::InexactConversion`] instead of being rounded — callers
//! wanting lossy behavior round explicitly first.
//!
//! # Quick example
//! ```
//! use tempocal::{decode, encode, Calendar, UnitOriginSpec};
//!
//! let spec = UnitOriginSpec::parse("days since 2000-01-01", Calendar::Standard).unwrap();
//! let instants: Vec<_> = decode([0, 1, 2], &spec, Calendar::Standard).unwrap().collect();
//! let fields = instants[2].to_fields().unwrap();
//! assert_eq!((fields.month(), fields.day()), (1, 3));
//!
//! let raw: Result<Vec<_>, _> = encode(instants, &spec, Calendar::Standard).unwrap().collect();
//! assert_eq!(raw.unwrap(), vec![0, 1, 2]);
//! ```

use crate::calendar::{Calendar, CalendarDate};
use crate::duration::{Duration, TimeUnit};
use crate::error::{TimeError, TimeResult};
use crate::instant::{axis_attoseconds, Instant};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// UnitOriginSpec
// ═══════════════════════════════════════════════════════════════════════════

/// Parsed form of a `<unit> since <origin>` axis description.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitOriginSpec {
    unit: TimeUnit,
    origin: CalendarDate,
}

impl UnitOriginSpec {
    /// Assemble a specification from parts, validating the origin under
    /// `calendar`.
    pub fn new(unit: TimeUnit, origin: CalendarDate, calendar: Calendar) -> TimeResult<Self> {
        calendar.validate(&origin)?;
        Ok(Self { unit, origin })
    }

    /// Parse a `<unit> since <date>[ <time>]` string.
    pub fn parse(spec: &str, calendar: Calendar) -> TimeResult<Self> {
        let mut words = spec.split_whitespace();
        let unit_word = words
            .next()
            .ok_or_else(|| TimeError::malformed("empty specification"))?;
        let unit = TimeUnit::parse(unit_word)?;
        match words.next() {
            Some("since") => {}
            Some(other) => {
                return Err(TimeError::malformed(format!(
                    "expected `since`, found `{other}`"
                )))
            }
            None => return Err(TimeError::malformed("missing `since <origin>`")),
        }
        let date_word = words
            .next()
            .ok_or_else(|| TimeError::malformed("missing origin date"))?;
        let (year, month, day) = parse_date(date_word)?;
        let mut origin = CalendarDate::new(year, month, day);
        if let Some(time_word) = words.next() {
            let (hour, minute, second, attosecond) = parse_time(time_word)?;
            origin = origin
                .with_hms(hour, minute, second)
                .with_attosecond(attosecond);
        }
        if words.next().is_some() {
            return Err(TimeError::malformed("trailing input after origin"));
        }
        Self::new(unit, origin, calendar)
    }

    /// The axis unit.
    #[inline]
    pub const fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// The axis origin.
    #[inline]
    pub const fn origin(&self) -> CalendarDate {
        self.origin
    }
}

impl fmt::Display for UnitOriginSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} since {}", self.unit, self.origin)
    }
}

/// Parse `[-]YYYY-MM-DD`.
fn parse_date(word: &str) -> TimeResult<(i64, u8, u8)> {
    let (negative, rest) = match word.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, word),
    };
    let mut parts = rest.splitn(3, '-');
    let year: i64 = parse_int(next_field(&mut parts, "year")?, "year")?;
    let month: u8 = parse_int(next_field(&mut parts, "month")?, "month")?;
    let day: u8 = parse_int(next_field(&mut parts, "day")?, "day")?;
    Ok((if negative { -year } else { year }, month, day))
}

/// Parse `HH:MM:SS[.fraction]`, the fraction carrying at most 18 digits.
fn parse_time(word: &str) -> TimeResult<(u8, u8, u8, u64)> {
    let mut parts = word.splitn(3, ':');
    let hour: u8 = parse_int(next_field(&mut parts, "hour")?, "hour")?;
    let minute: u8 = parse_int(next_field(&mut parts, "minute")?, "minute")?;
    let second_word = next_field(&mut parts, "second")?;
    let (second_digits, attosecond) = match second_word.split_once('.') {
        Some((whole, frac)) => (whole, parse_fraction(frac)?),
        None => (second_word, 0),
    };
    let second: u8 = parse_int(second_digits, "second")?;
    Ok((hour, minute, second, attosecond))
}

fn next_field<'a>(parts: &mut std::str::SplitN<'a, char>, name: &str) -> TimeResult<&'a str> {
    parts
        .next()
        .ok_or_else(|| TimeError::malformed(format!("origin is missing its {name}")))
}

/// A decimal fraction of a second, scaled to attoseconds.
fn parse_fraction(digits: &str) -> TimeResult<u64> {
    if digits.is_empty() || digits.len() > 18 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::malformed(format!(
            "invalid fractional second `.{digits}`"
        )));
    }
    let value: u64 = parse_int(digits, "fractional second")?;
    Ok(value * 10u64.pow(18 - digits.len() as u32))
}

fn parse_int<T: std::str::FromStr>(digits: &str, name: &str) -> TimeResult<T> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::malformed(format!("invalid {name} `{digits}`")));
    }
    digits
        .parse()
        .map_err(|_| TimeError::malformed(format!("invalid {name} `{digits}`")))
}

// ═══════════════════════════════════════════════════════════════════════════
// Decode
// ═══════════════════════════════════════════════════════════════════════════

/// Decode raw axis values into instants under `spec`.
///
/// Returns a lazy iterator mirroring the input order 1:1.  Each element
/// becomes `origin + value × unit` exactly, so decoding itself cannot fail
/// per element; the origin is validated once up front.
pub fn decode<I>(values: I, spec: &UnitOriginSpec, calendar: Calendar) -> TimeResult<Decode<I::IntoIter>>
where
    I: IntoIterator<Item = i64>,
{
    calendar.validate(&spec.origin)?;
    Ok(Decode {
        values: values.into_iter(),
        calendar,
        unit: spec.unit,
        origin: spec.origin,
    })
}

/// Lazy iterator produced by [`decode`].
#[derive(Debug, Clone)]
pub struct Decode<I> {
    values: I,
    calendar: Calendar,
    unit: TimeUnit,
    origin: CalendarDate,
}

impl<I: Iterator<Item = i64>> Iterator for Decode<I> {
    type Item = Instant;

    fn next(&mut self) -> Option<Instant> {
        let value = self.values.next()?;
        let offset = Duration::of(value as i128, self.unit);
        Some(Instant::from_raw(self.calendar, self.origin, offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Encode
// ═══════════════════════════════════════════════════════════════════════════

/// Encode instants back into raw axis values under `spec`.
///
/// The exact inverse of [`decode`].  Each element yields
/// `(instant − origin) / unit` when that division is exact and
/// [`TimeError::InexactConversion`] otherwise; an instant from a different
/// calendar yields [`TimeError::CalendarMismatch`].  Rounding must be
/// requested explicitly beforehand ([`Instant::round`]); the codec never
/// rounds.
pub fn encode<I>(instants: I, spec: &UnitOriginSpec, calendar: Calendar) -> TimeResult<Encode<I::IntoIter>>
where
    I: IntoIterator<Item = Instant>,
{
    let origin_axis = axis_attoseconds(calendar, &spec.origin)?;
    let unit_attos = Duration::of(1, spec.unit)
        .total_attoseconds()
        .map_err(|_| TimeError::Overflow)?;
    Ok(Encode {
        instants: instants.into_iter(),
        calendar,
        origin_axis,
        unit_attos,
    })
}

/// Lazy iterator produced by [`encode`].
#[derive(Debug, Clone)]
pub struct Encode<I> {
    instants: I,
    calendar: Calendar,
    origin_axis: i128,
    unit_attos: i128,
}

impl<I: Iterator<Item = Instant>> Iterator for Encode<I> {
    type Item = TimeResult<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        let instant = self.instants.next()?;
        Some(self.encode_one(&instant))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.instants.size_hint()
    }
}

impl<I> Encode<I> {
    fn encode_one(&self, instant: &Instant) -> TimeResult<i64> {
        if instant.calendar() != self.calendar {
            return Err(TimeError::CalendarMismatch {
                left: instant.calendar(),
                right: self.calendar,
            });
        }
        let delta = instant
            .axis_attoseconds()?
            .checked_sub(self.origin_axis)
            .ok_or(TimeError::Overflow)?;
        if delta % self.unit_attos != 0 {
            let offset = instant.offset();
            return Err(TimeError::InexactConversion {
                mantissa: offset.mantissa(),
                factor: offset.factor(),
                exponent: offset.exponent(),
            });
        }
        i64::try_from(delta / self.unit_attos).map_err(|_| TimeError::Overflow)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

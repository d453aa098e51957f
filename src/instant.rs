// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-tagged time instants.
//!
//! [`Instant`] is the core type of the crate.  It stores a reference
//! **origin** (a [`CalendarDate`]) plus an exact [`Duration`] offset from
//! that origin, tagged with the [`Calendar`] whose rules give the fields
//! their meaning.  All arithmetic (period addition/subtraction, differences,
//! comparison), the codec, rounding and range generation are built on this
//! one representation — no per-calendar code duplication.
//!
//! Instants are immutable `Copy` value types; every operation produces a new
//! value.  Two instants are comparable or combinable only when they share a
//! calendar: mixing kinds fails with [`TimeError::CalendarMismatch`], an
//! explicit error rather than an always-false comparison.  Differing origins
//! within one calendar are fine — a reconciling duration is computed
//! internally, exactly.
//!
//! # Quick example
//! ```
//! use tempocal::{Duration, Instant};
//!
//! let reform = Instant::standard(1582, 10, 4).unwrap();
//! let next_day = reform.add_period(&Duration::days(1)).unwrap();
//! let fields = next_day.to_fields().unwrap();
//! assert_eq!((fields.year(), fields.month(), fields.day()), (1582, 10, 15));
//! ```

use crate::calendar::{Calendar, CalendarDate, ATTOS_PER_SECOND, SECONDS_PER_DAY};
use crate::duration::{Duration, TimeUnit};
use crate::error::{TimeError, TimeResult};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in time under one calendar: `origin + offset`.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instant {
    calendar: Calendar,
    origin: CalendarDate,
    offset: Duration,
}

impl Instant {
    /// Default axis unit when none is pinned explicitly.
    pub const DEFAULT_UNIT: TimeUnit = TimeUnit::Milliseconds;

    /// Default axis origin when none is pinned explicitly:
    /// 0000-01-01 00:00:00.
    pub const DEFAULT_ORIGIN: CalendarDate = CalendarDate::new(0, 1, 1);

    // ── constructors ──────────────────────────────────────────────────

    /// Build an instant from an already-computed offset.
    ///
    /// Validates the origin under `calendar`; the offset is taken as-is.
    pub fn new(calendar: Calendar, origin: CalendarDate, offset: Duration) -> TimeResult<Self> {
        calendar.validate(&origin)?;
        Ok(Self::from_raw(calendar, origin, offset))
    }

    /// Internal constructor for call sites whose origin is already valid.
    #[inline]
    pub(crate) const fn from_raw(
        calendar: Calendar,
        origin: CalendarDate,
        offset: Duration,
    ) -> Self {
        Self {
            calendar,
            origin,
            offset,
        }
    }

    /// Build an instant from calendar fields, expressed on the axis
    /// `unit` since `origin`.
    ///
    /// Fails with [`TimeError::InvalidDate`] when `date` (or `origin`) is
    /// not valid under `calendar` — including the ten dates removed by the
    /// mixed-calendar switchover — and with
    /// [`TimeError::InexactConversion`] when the fields are finer than
    /// `unit` can represent (no implicit widening: pick a finer unit
    /// instead).
    pub fn from_fields(
        calendar: Calendar,
        date: CalendarDate,
        unit: TimeUnit,
        origin: CalendarDate,
    ) -> TimeResult<Self> {
        Self::from_parts(calendar, date, unit.factor(), unit.exponent(), origin)
    }

    /// [`from_fields`](Instant::from_fields) generalized to a raw
    /// `(factor, exponent)` resolution.
    pub(crate) fn from_parts(
        calendar: Calendar,
        date: CalendarDate,
        factor: i64,
        exponent: i32,
        origin: CalendarDate,
    ) -> TimeResult<Self> {
        calendar.validate(&date)?;
        calendar.validate(&origin)?;
        let delta = axis_attoseconds(calendar, &date)?
            .checked_sub(axis_attoseconds(calendar, &origin)?)
            .ok_or(TimeError::Overflow)?;
        let offset = Duration::attoseconds(delta).rescale(factor, exponent)?;
        Ok(Self::from_raw(calendar, origin, offset))
    }

    /// Midnight instant from year/month/day with the default unit and
    /// origin (milliseconds since 0000-01-01).
    pub fn from_ymd(calendar: Calendar, year: i64, month: u8, day: u8) -> TimeResult<Self> {
        Self::from_fields(
            calendar,
            CalendarDate::new(year, month, day),
            Self::DEFAULT_UNIT,
            Self::DEFAULT_ORIGIN,
        )
    }

    /// Instant from date plus time-of-day with the default unit and origin.
    pub fn from_ymd_hms(
        calendar: Calendar,
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> TimeResult<Self> {
        Self::from_fields(
            calendar,
            CalendarDate::new(year, month, day).with_hms(hour, minute, second),
            Self::DEFAULT_UNIT,
            Self::DEFAULT_ORIGIN,
        )
    }

    /// Midnight instant of the mixed (standard) calendar.
    pub fn standard(year: i64, month: u8, day: u8) -> TimeResult<Self> {
        Self::from_ymd(Calendar::Standard, year, month, day)
    }

    /// Midnight instant of the proleptic Julian calendar.
    pub fn julian(year: i64, month: u8, day: u8) -> TimeResult<Self> {
        Self::from_ymd(Calendar::Julian, year, month, day)
    }

    /// Midnight instant of the proleptic Gregorian calendar.
    pub fn proleptic_gregorian(year: i64, month: u8, day: u8) -> TimeResult<Self> {
        Self::from_ymd(Calendar::ProlepticGregorian, year, month, day)
    }

    /// Midnight instant of the fixed 365-day calendar.
    pub fn noleap(year: i64, month: u8, day: u8) -> TimeResult<Self> {
        Self::from_ymd(Calendar::NoLeap, year, month, day)
    }

    /// Midnight instant of the fixed 366-day calendar.
    pub fn all_leap(year: i64, month: u8, day: u8) -> TimeResult<Self> {
        Self::from_ymd(Calendar::AllLeap, year, month, day)
    }

    /// Midnight instant of the 360-day calendar.
    pub fn day360(year: i64, month: u8, day: u8) -> TimeResult<Self> {
        Self::from_ymd(Calendar::Day360, year, month, day)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The calendar whose rules govern this instant.
    #[inline]
    pub const fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// The axis origin.
    #[inline]
    pub const fn origin(&self) -> CalendarDate {
        self.origin
    }

    /// The exact offset from the origin.
    #[inline]
    pub const fn offset(&self) -> Duration {
        self.offset
    }

    // ── field decomposition ───────────────────────────────────────────

    /// Decompose the instant back into calendar fields.
    ///
    /// The inverse of [`from_fields`](Instant::from_fields): the offset is
    /// split into a day number and a sub-day remainder by exact integer
    /// division at the duration's own resolution, never by rounding.
    pub fn to_fields(&self) -> TimeResult<CalendarDate> {
        let axis = self.axis_attoseconds()?;
        let attos_per_day = SECONDS_PER_DAY as i128 * ATTOS_PER_SECOND;
        let day = axis.div_euclid(attos_per_day);
        let rem = axis.rem_euclid(attos_per_day);
        let day = i64::try_from(day).map_err(|_| TimeError::Overflow)?;
        let date = self.calendar.day_number_to_date(day);
        let secs = (rem / ATTOS_PER_SECOND) as i64;
        let attos = (rem % ATTOS_PER_SECOND) as u64;
        Ok(date
            .with_hms(
                (secs / 3600) as u8,
                (secs / 60 % 60) as u8,
                (secs % 60) as u8,
            )
            .with_attosecond(attos))
    }

    /// Absolute position on the calendar's day axis, in attoseconds since
    /// the calendar's day 0.
    pub(crate) fn axis_attoseconds(&self) -> TimeResult<i128> {
        axis_attoseconds(self.calendar, &self.origin)?
            .checked_add(self.offset.total_attoseconds()?)
            .ok_or(TimeError::Overflow)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Add an elapsed period, preserving calendar, origin and resolution.
    ///
    /// The period must be commensurable with the instant's offset or
    /// exactly rescalable to it (see [`Duration::checked_add`]).
    pub fn add_period(&self, period: &Duration) -> TimeResult<Self> {
        let offset = self.offset.checked_add(period)?;
        Ok(Self::from_raw(self.calendar, self.origin, offset))
    }

    /// Subtract an elapsed period; contract as [`add_period`](Instant::add_period).
    pub fn sub_period(&self, period: &Duration) -> TimeResult<Self> {
        self.add_period(&period.negate()?)
    }

    /// Exact elapsed duration from `other` to `self`.
    ///
    /// Fails with [`TimeError::CalendarMismatch`] when the calendars
    /// differ.  Origins may differ: both instants are reconciled onto the
    /// common day axis first.  The result takes the finer of the two
    /// operand resolutions when the difference is exact at that scale, and
    /// attosecond resolution otherwise — never a rounded value.
    pub fn difference(&self, other: &Self) -> TimeResult<Duration> {
        self.check_calendar(other)?;
        let delta = self
            .axis_attoseconds()?
            .checked_sub(other.axis_attoseconds()?)
            .ok_or(TimeError::Overflow)?;
        let exact = Duration::attoseconds(delta);
        let (factor, exponent) = finer_scale(&self.offset, &other.offset);
        match exact.rescale(factor, exponent) {
            Ok(scaled) => Ok(scaled),
            Err(TimeError::InexactConversion { .. }) => Ok(exact),
            Err(e) => Err(e),
        }
    }

    /// Total-order comparison within one calendar.
    ///
    /// Fails with [`TimeError::CalendarMismatch`] across calendars and
    /// with [`TimeError::Overflow`] when the exact reduction does not fit.
    pub fn compare(&self, other: &Self) -> TimeResult<Ordering> {
        self.check_calendar(other)?;
        Ok(self.axis_attoseconds()?.cmp(&other.axis_attoseconds()?))
    }

    fn check_calendar(&self, other: &Self) -> TimeResult<()> {
        if self.calendar != other.calendar {
            return Err(TimeError::CalendarMismatch {
                left: self.calendar,
                right: other.calendar,
            });
        }
        Ok(())
    }
}

/// Position of an origin date on its calendar's day axis, in attoseconds.
pub(crate) fn axis_attoseconds(calendar: Calendar, date: &CalendarDate) -> TimeResult<i128> {
    let day = calendar.date_to_day_number(date)? as i128;
    day.checked_mul(SECONDS_PER_DAY as i128 * ATTOS_PER_SECOND)
        .and_then(|d| d.checked_add(date.time_of_day_attos()))
        .ok_or(TimeError::Overflow)
}

/// The finer of two duration scales: the `(factor, exponent)` pair whose
/// tick is the smaller span.  Ties keep the left scale.
fn finer_scale(a: &Duration, b: &Duration) -> (i64, i32) {
    // One tick of each scale, compared exactly.
    let tick_a = Duration::new(1, a.factor(), a.exponent());
    let tick_b = Duration::new(1, b.factor(), b.exponent());
    match tick_a.compare(&tick_b) {
        Ok(Ordering::Greater) => (b.factor(), b.exponent()),
        _ => (a.factor(), a.exponent()),
    }
}

// ── equality & ordering ───────────────────────────────────────────────────

/// Equality is *positional*: same calendar and same point on the day axis,
/// regardless of origin or resolution.  Cross-calendar instants are never
/// equal; use [`Instant::compare`] when a mismatch must surface as an error.
impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        matches!(self.compare(other), Ok(Ordering::Equal))
    }
}

/// Ordering delegates to [`Instant::compare`]; instants of different
/// calendars return `None`.
impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

// ── operator sugar ────────────────────────────────────────────────────────

/// Operator form of [`Instant::add_period`].
///
/// # Panics
/// Panics on overflow or an inexact period rescale; use
/// [`Instant::add_period`] for the fallible form.
impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        match self.add_period(&rhs) {
            Ok(instant) => instant,
            Err(e) => panic!("instant + duration failed: {e}"),
        }
    }
}

/// Operator form of [`Instant::sub_period`].
///
/// # Panics
/// Panics on overflow or an inexact period rescale; use
/// [`Instant::sub_period`] for the fallible form.
impl Sub<Duration> for Instant {
    type Output = Instant;

    fn sub(self, rhs: Duration) -> Instant {
        match self.sub_period(&rhs) {
            Ok(instant) => instant,
            Err(e) => panic!("instant - duration failed: {e}"),
        }
    }
}

/// Operator form of [`Instant::difference`].
///
/// # Panics
/// Panics on a calendar mismatch or overflow; use
/// [`Instant::difference`] for the fallible form.
impl Sub for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        match self.difference(&rhs) {
            Ok(duration) => duration,
            Err(e) => panic!("instant - instant failed: {e}"),
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_fields() {
            Ok(fields) => write!(f, "{} {}", self.calendar, fields),
            Err(_) => write!(f, "{} {} since {}", self.calendar, self.offset, self.origin),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

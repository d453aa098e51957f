// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Cross-calendar and host-type conversion.
//!
//! Converting between calendars follows the historical convention: the
//! **field values** are preserved, not the physical instant.  Julian
//! 1900-02-29 reinterpreted as a proleptic-Gregorian date simply does not
//! exist and fails with [`TimeError::InvalidDate`]; Julian 2000-03-01
//! becomes Gregorian 2000-03-01 even though the two dates are thirteen
//! physical days apart.
//!
//! The host conversion target is `chrono::NaiveDateTime` — timezone-naive,
//! proleptic-Gregorian, nanosecond resolution.  Conversions to it fail with
//! [`TimeError::PrecisionLoss`] when the source carries sub-nanosecond
//! information or falls outside chrono's representable range; round first
//! ([`Instant::round`]) when exactness cannot be guaranteed.
//!
//! [`Instant::reinterpret_unit`] and [`Instant::reinterpret_origin`] change
//! the *representation* of an instant (its axis resolution or anchor)
//! without moving the represented point in time; both are exact or fail.

use crate::calendar::{Calendar, CalendarDate};
use crate::duration::{Duration, TimeUnit};
use crate::error::{TimeError, TimeResult};
use crate::instant::{axis_attoseconds, Instant};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Attoseconds per nanosecond.
const ATTOS_PER_NANO: u64 = 1_000_000_000;

impl Instant {
    // ── cross-calendar ────────────────────────────────────────────────

    /// Reinterpret this instant's calendar fields under another calendar.
    ///
    /// Field-preserving, not instant-preserving: the numeric
    /// year/month/day/time values carry over unchanged.  Fails with
    /// [`TimeError::InvalidDate`] when the fields (or the origin's fields)
    /// do not exist under `target`.
    pub fn convert(&self, target: Calendar) -> TimeResult<Instant> {
        let fields = self.to_fields()?;
        Instant::from_parts(
            target,
            fields,
            self.offset().factor(),
            self.offset().exponent(),
            self.origin(),
        )
    }

    /// Re-express the offset at another unit's resolution.
    ///
    /// The represented instant does not move; the conversion must be exact
    /// or it fails with [`TimeError::InexactConversion`].
    pub fn reinterpret_unit(&self, unit: TimeUnit) -> TimeResult<Instant> {
        let offset = self.offset().to_unit(unit)?;
        Ok(Instant::from_raw(self.calendar(), self.origin(), offset))
    }

    /// Re-anchor the offset at another origin.
    ///
    /// The represented instant does not move and the offset keeps its
    /// resolution; fails with [`TimeError::InexactConversion`] when the
    /// shifted offset is no longer representable at that resolution, and
    /// with [`TimeError::InvalidDate`] when `origin` is not valid under
    /// this instant's calendar.
    pub fn reinterpret_origin(&self, origin: CalendarDate) -> TimeResult<Instant> {
        self.calendar().validate(&origin)?;
        let delta = self
            .axis_attoseconds()?
            .checked_sub(axis_attoseconds(self.calendar(), &origin)?)
            .ok_or(TimeError::Overflow)?;
        let offset = Duration::attoseconds(delta)
            .rescale(self.offset().factor(), self.offset().exponent())?;
        Ok(Instant::from_raw(self.calendar(), origin, offset))
    }

    // ── host type ─────────────────────────────────────────────────────

    /// Convert to the host date type, preserving field values.
    ///
    /// Fails with [`TimeError::InvalidDate`] when the fields do not exist
    /// in the host's proleptic-Gregorian calendar (e.g. a 360-day
    /// calendar's February 30) and with [`TimeError::PrecisionLoss`] when
    /// the instant carries sub-nanosecond information or the year falls
    /// outside chrono's range.
    pub fn to_naive(&self) -> TimeResult<NaiveDateTime> {
        let fields = self.to_fields()?;
        Calendar::ProlepticGregorian.validate(&fields)?;
        if fields.attosecond() % ATTOS_PER_NANO != 0 {
            return Err(TimeError::PrecisionLoss);
        }
        let nano = (fields.attosecond() / ATTOS_PER_NANO) as u32;
        let year = i32::try_from(fields.year()).map_err(|_| TimeError::PrecisionLoss)?;
        NaiveDate::from_ymd_opt(year, fields.month() as u32, fields.day() as u32)
            .and_then(|date| {
                date.and_hms_nano_opt(
                    fields.hour() as u32,
                    fields.minute() as u32,
                    fields.second() as u32,
                    nano,
                )
            })
            .ok_or(TimeError::PrecisionLoss)
    }

    /// Build an instant from the host date type, preserving field values.
    ///
    /// The inverse of [`to_naive`](Instant::to_naive): the host fields are
    /// validated under `calendar` (a host February 29 does not exist in
    /// the 365-day calendar, for instance) and expressed on the
    /// `unit`-since-`origin` axis.
    pub fn from_naive(
        calendar: Calendar,
        datetime: NaiveDateTime,
        unit: TimeUnit,
        origin: CalendarDate,
    ) -> TimeResult<Instant> {
        let fields = CalendarDate::new(
            datetime.year() as i64,
            datetime.month() as u8,
            datetime.day() as u8,
        )
        .with_hms(
            datetime.hour() as u8,
            datetime.minute() as u8,
            datetime.second() as u8,
        )
        .with_attosecond(datetime.nanosecond() as u64 * ATTOS_PER_NANO);
        Instant::from_fields(calendar, fields, unit, origin)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_preserves_fields_not_instants() {
        let julian = Instant::julian(2000, 3, 1).unwrap();
        let gregorian = julian.convert(Calendar::ProlepticGregorian).unwrap();
        assert_eq!(
            gregorian.to_fields().unwrap(),
            CalendarDate::new(2000, 3, 1)
        );
        assert_eq!(gregorian.calendar(), Calendar::ProlepticGregorian);
    }

    #[test]
    fn conversion_rejects_nonexistent_fields() {
        // Julian 1900 is a leap year; Gregorian 1900 is not.
        let julian_leap_day = Instant::julian(1900, 2, 29).unwrap();
        assert!(matches!(
            julian_leap_day.convert(Calendar::ProlepticGregorian),
            Err(TimeError::InvalidDate { .. })
        ));
        // A 360-day calendar's January 30 exists everywhere, its
        // February 30 nowhere else.
        let feb30 = Instant::day360(2000, 2, 30).unwrap();
        assert!(matches!(
            feb30.convert(Calendar::Standard),
            Err(TimeError::InvalidDate { .. })
        ));
    }

    #[test]
    fn conversion_round_trips_when_fields_exist_in_both() {
        let noleap = Instant::noleap(1988, 7, 15).unwrap();
        let standard = noleap.convert(Calendar::Standard).unwrap();
        let back = standard.convert(Calendar::NoLeap).unwrap();
        assert_eq!(back.to_fields().unwrap(), CalendarDate::new(1988, 7, 15));
    }

    #[test]
    fn reinterpret_unit_is_exact_or_fails() {
        let instant = Instant::standard(2000, 1, 2).unwrap();
        let in_seconds = instant.reinterpret_unit(TimeUnit::Seconds).unwrap();
        assert_eq!(instant.compare(&in_seconds).unwrap(), std::cmp::Ordering::Equal);
        assert!(in_seconds
            .offset()
            .is_commensurable_with(&Duration::seconds(1)));

        let with_millis = instant.add_period(&Duration::milliseconds(500)).unwrap();
        assert!(matches!(
            with_millis.reinterpret_unit(TimeUnit::Seconds),
            Err(TimeError::InexactConversion { .. })
        ));
    }

    #[test]
    fn reinterpret_origin_keeps_the_instant_fixed() {
        let instant = Instant::standard(2000, 6, 15).unwrap();
        let rebased = instant
            .reinterpret_origin(CalendarDate::new(1970, 1, 1))
            .unwrap();
        assert_eq!(instant.compare(&rebased).unwrap(), std::cmp::Ordering::Equal);
        assert_eq!(rebased.origin(), CalendarDate::new(1970, 1, 1));
        assert_eq!(rebased.to_fields().unwrap(), CalendarDate::new(2000, 6, 15));
    }

    #[test]
    fn reinterpret_origin_rejects_unrepresentable_offsets() {
        // A day-resolution offset cannot absorb a half-day origin shift.
        let instant = Instant::from_fields(
            Calendar::Standard,
            CalendarDate::new(2000, 1, 2),
            TimeUnit::Days,
            CalendarDate::new(2000, 1, 1),
        )
        .unwrap();
        let noon = CalendarDate::new(2000, 1, 1).with_hms(12, 0, 0);
        assert!(matches!(
            instant.reinterpret_origin(noon),
            Err(TimeError::InexactConversion { .. })
        ));
    }

    #[test]
    fn naive_round_trip_at_nanosecond_resolution() {
        let instant = Instant::from_fields(
            Calendar::ProlepticGregorian,
            CalendarDate::new(1999, 12, 31)
                .with_hms(23, 59, 59)
                .with_attosecond(123_456_789 * ATTOS_PER_NANO),
            TimeUnit::Nanoseconds,
            Instant::DEFAULT_ORIGIN,
        )
        .unwrap();
        let naive = instant.to_naive().unwrap();
        assert_eq!(naive.nanosecond(), 123_456_789);
        let back = Instant::from_naive(
            Calendar::ProlepticGregorian,
            naive,
            TimeUnit::Nanoseconds,
            Instant::DEFAULT_ORIGIN,
        )
        .unwrap();
        assert_eq!(back.compare(&instant).unwrap(), std::cmp::Ordering::Equal);
    }

    #[test]
    fn sub_nanosecond_information_is_precision_loss() {
        let instant = Instant::from_fields(
            Calendar::ProlepticGregorian,
            CalendarDate::new(2000, 1, 1).with_attosecond(1),
            TimeUnit::Attoseconds,
            Instant::DEFAULT_ORIGIN,
        )
        .unwrap();
        assert!(matches!(instant.to_naive(), Err(TimeError::PrecisionLoss)));

        // The explicit round-then-convert path succeeds.
        let rounded = instant.round(&Duration::nanoseconds(1)).unwrap();
        assert!(rounded.to_naive().is_ok());
    }

    #[test]
    fn idealized_fields_may_not_exist_in_the_host_calendar() {
        let feb30 = Instant::day360(2000, 2, 30).unwrap();
        assert!(matches!(
            feb30.to_naive(),
            Err(TimeError::InvalidDate { .. })
        ));
        // Day 30 of January converts fine.
        let jan30 = Instant::day360(2000, 1, 30).unwrap();
        assert_eq!(
            jan30.to_naive().unwrap(),
            NaiveDate::from_ymd_opt(2000, 1, 30)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn from_naive_validates_under_the_target_calendar() {
        let leap_day = NaiveDate::from_ymd_opt(2000, 2, 29)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(matches!(
            Instant::from_naive(
                Calendar::NoLeap,
                leap_day,
                TimeUnit::Seconds,
                Instant::DEFAULT_ORIGIN
            ),
            Err(TimeError::InvalidDate { .. })
        ));
        assert!(Instant::from_naive(
            Calendar::Standard,
            leap_day,
            TimeUnit::Seconds,
            Instant::DEFAULT_ORIGIN
        )
        .is_ok());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Crate-wide error type.
//!
//! Every fallible operation in this crate returns [`TimeResult`].  Errors are
//! raised at the point of detection and never downgraded to a default value:
//! the codec never rounds on encode, the calendar rules never clamp an
//! invalid day into range.  Callers needing lossy behavior must invoke an
//! explicit rounding operation first.

use crate::calendar::Calendar;

/// Convenient alias used by every fallible operation in the crate.
pub type TimeResult<T> = Result<T, TimeError>;

/// Error type for all fallible operations in the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// The calendar field combination is not valid under the calendar's
    /// rules.  This includes the ten dates removed by the mixed-calendar
    /// switchover (1582-10-05 through 1582-10-14).
    #[error("invalid date {year:04}-{month:02}-{day:02} for the {calendar} calendar")]
    InvalidDate {
        /// The calendar that rejected the date.
        calendar: Calendar,
        /// Year field of the rejected date.
        year: i64,
        /// Month field of the rejected date.
        month: u8,
        /// Day field of the rejected date.
        day: u8,
    },

    /// A unit/origin string does not match the
    /// `<unit> since <date>[ <time>]` grammar.
    #[error("malformed unit/origin specification: {reason}")]
    MalformedSpec {
        /// What deviated from the grammar.
        reason: String,
    },

    /// An operation mixed two different calendars where a common calendar
    /// is required.
    #[error("calendar mismatch: {left} vs {right}")]
    CalendarMismatch {
        /// Calendar of the left-hand operand.
        left: Calendar,
        /// Calendar of the right-hand operand.
        right: Calendar,
    },

    /// A rescale would lose information and no explicit rounding was
    /// requested.
    #[error("inexact conversion: {mantissa} x {factor}e{exponent} s is not an exact multiple of the target resolution")]
    InexactConversion {
        /// Mantissa of the duration that could not be rescaled.
        mantissa: i128,
        /// Factor of the duration that could not be rescaled.
        factor: i64,
        /// Exponent of the duration that could not be rescaled.
        exponent: i32,
    },

    /// Integer arithmetic on a duration would exceed the representable
    /// range.  Checked, never wrapped.
    #[error("integer overflow in exact duration arithmetic")]
    Overflow,

    /// A range was constructed with a zero step.  There is no implicit
    /// default increment.
    #[error("range step must be nonzero")]
    InvalidStep,

    /// An index beyond the analytic length of a range.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The offending index.
        index: u64,
        /// The range length.
        len: u64,
    },

    /// A conversion to a fixed-resolution target cannot preserve the
    /// source resolution or value range.
    #[error("precision loss converting to a fixed-resolution target")]
    PrecisionLoss,
}

impl TimeError {
    /// Shorthand used by the codec grammar.
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        TimeError::MalformedSpec {
            reason: reason.into(),
        }
    }

    /// Shorthand used by the calendar rules.
    pub(crate) fn invalid_date(calendar: Calendar, year: i64, month: u8, day: u8) -> Self {
        TimeError::InvalidDate {
            calendar,
            year,
            month,
            day,
        }
    }
}

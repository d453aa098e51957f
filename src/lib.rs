// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-Exact Time Module
//!
//! This crate provides exact, calendar-aware time primitives for scientific
//! datasets: instants under multiple historical and idealized calendars,
//! conversion between numeric "`<unit> since <origin>`" time axes and
//! structured calendar fields, and arithmetic, comparison, rounding and
//! range generation over those instants — all in checked integer
//! arithmetic, with no floating-point path and no silent rounding.
//!
//! # Core types
//!
//! - [`Calendar`] — closed enumeration of the six calendar rule sets.
//! - [`CalendarDate`] — structured fields: year through attoseconds.
//! - [`Duration`] — exact span, `mantissa × factor × 10^exponent` seconds.
//! - [`TimeUnit`] — the enumerated axis units, days through attoseconds.
//! - [`Instant`] — a calendar-tagged point: origin date + exact offset.
//! - [`UnitOriginSpec`] — parsed `<unit> since <origin>` axis description.
//! - [`InstantRange`] — lazy, restartable `(start, step, stop)` sequence.
//! - [`TimeError`] / [`TimeResult`] — the crate-wide error surface.
//!
//! # Calendars
//!
//! | Variant | Rule |
//! |---------|------|
//! | [`Calendar::Julian`] | leap year every 4 years |
//! | [`Calendar::ProlepticGregorian`] | Gregorian rules, extended both ways |
//! | [`Calendar::Standard`] | Julian ≤ 1582-10-04, Gregorian ≥ 1582-10-15 |
//! | [`Calendar::NoLeap`] | fixed 365-day years |
//! | [`Calendar::AllLeap`] | fixed 366-day years |
//! | [`Calendar::Day360`] | twelve 30-day months |
//!
//! All calendars are timezone-naive and leap-second-naive: every day is
//! exactly 86 400 seconds.
//!
//! # Exactness
//!
//! Operations either return the mathematically exact result or fail with an
//! explicit error — [`TimeError::InexactConversion`] where a rescale would
//! lose information, [`TimeError::Overflow`] where checked integer
//! arithmetic would wrap.  Lossy behavior is always an explicit request:
//! [`Instant::floor`], [`Instant::ceil`] and [`Instant::round`] to an
//! arbitrary duration grid.
//!
//! # Quick example
//! ```
//! use tempocal::{decode, Calendar, Duration, Instant, InstantRange, UnitOriginSpec};
//!
//! // A numeric axis from a dataset...
//! let spec = UnitOriginSpec::parse("days since 2000-01-01", Calendar::Standard).unwrap();
//! let instants: Vec<_> = decode([0, 31, 60], &spec, Calendar::Standard).unwrap().collect();
//! assert_eq!(instants[2].to_fields().unwrap().month(), 3); // 2000 is a leap year
//!
//! // ...and a daily range across it.
//! let range = InstantRange::new(
//!     instants[0],
//!     Duration::days(1),
//!     Instant::standard(2000, 12, 31).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(range.len(), 366);
//! ```

mod calendar;
mod codec;
mod convert;
mod duration;
mod error;
mod instant;
mod range;
mod rounding;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{Calendar, CalendarDate};
pub use codec::{decode, encode, Decode, Encode, UnitOriginSpec};
pub use duration::{Duration, TimeUnit};
pub use error::{TimeError, TimeResult};
pub use instant::Instant;
pub use range::{InstantRange, Iter as InstantRangeIter};

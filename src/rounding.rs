// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Flooring, ceiling and rounding of instants to a duration grid.
//!
//! The grid is anchored at the instant's own origin: `floor` lands on
//! `origin + k × resolution` with `k` chosen by floor division (toward
//! negative infinity, so pre-origin instants floor downward too), `ceil` is
//! the next grid point when the instant is off-grid, and `round` picks the
//! nearer of the two with ties going away from the floor — uniformly, for
//! negative offsets as well as positive ones.

use crate::duration::Duration;
use crate::error::{TimeError, TimeResult};
use crate::instant::Instant;

impl Instant {
    /// Largest grid multiple of `resolution` not after `self`.
    ///
    /// `resolution` must be a positive span; a zero or negative one fails
    /// with [`TimeError::InvalidStep`].  The result's offset is expressed
    /// at `resolution`'s own scale.
    pub fn floor(&self, resolution: &Duration) -> TimeResult<Instant> {
        let (quotient, _) = self.grid_position(resolution)?;
        self.grid_point(resolution, quotient)
    }

    /// Smallest grid multiple of `resolution` not before `self`.
    pub fn ceil(&self, resolution: &Duration) -> TimeResult<Instant> {
        let (quotient, remainder) = self.grid_position(resolution)?;
        if remainder == 0 {
            self.grid_point(resolution, quotient)
        } else {
            self.grid_point(resolution, quotient + 1)
        }
    }

    /// Nearest grid multiple of `resolution`; ties round away from the
    /// floor value, toward the ceiling.
    pub fn round(&self, resolution: &Duration) -> TimeResult<Instant> {
        let (quotient, remainder) = self.grid_position(resolution)?;
        let step = resolution.total_attoseconds()?;
        let doubled = remainder.checked_mul(2).ok_or(TimeError::Overflow)?;
        if doubled >= step {
            self.grid_point(resolution, quotient + 1)
        } else {
            self.grid_point(resolution, quotient)
        }
    }

    /// Offset decomposed against the grid: `(quotient, remainder)` with a
    /// nonnegative remainder below one resolution step.
    fn grid_position(&self, resolution: &Duration) -> TimeResult<(i128, i128)> {
        let step = resolution.total_attoseconds()?;
        if step <= 0 {
            return Err(TimeError::InvalidStep);
        }
        let offset = self.offset().total_attoseconds()?;
        Ok((offset.div_euclid(step), offset.rem_euclid(step)))
    }

    fn grid_point(&self, resolution: &Duration, quotient: i128) -> TimeResult<Instant> {
        let offset = resolution.checked_scale(quotient)?;
        Ok(Instant::from_raw(self.calendar(), self.origin(), offset))
    }
}

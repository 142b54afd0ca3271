// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day/night boundary resolution.
//!
//! This module provides:
//! - [`Boundary`]: a boundary instant that is either known or explicitly unknown
//! - [`DayBoundaries`]: the `start`/`end` pair for one local day
//! - [`ExtendedBoundaries`]: the pair plus carry-over boundaries from the
//!   adjacent days, anchored to a local midnight
//! - [`BoundaryResolver`]: builds [`ExtendedBoundaries`] from a coordinate,
//!   optional custom times and a [`SolarPositionProvider`]

use chrono::{Datelike, NaiveTime};
use qtty::{Days, Seconds};

use crate::fraction::{self, SECONDS_PER_DAY};
use crate::instant::{Instant, UtcOffset};
use crate::solar::{Coordinate, SolarPositionProvider};

/// Half-width of the window forced by the polar-summer fallback.
const POLAR_SUMMER_WINDOW: Seconds = Seconds::new(48.0 * 3600.0);

// ═══════════════════════════════════════════════════════════════════════════
// Boundary
// ═══════════════════════════════════════════════════════════════════════════

/// One day/night transition instant.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Boundary {
    /// The transition happens at this instant.
    Known(Instant),
    /// No data: no coordinate, or no sunrise/sunset on that date.
    #[default]
    Unknown,
}

impl Boundary {
    /// The instant, if known.
    #[inline]
    pub const fn known(&self) -> Option<Instant> {
        match self {
            Self::Known(instant) => Some(*instant),
            Self::Unknown => None,
        }
    }

    /// `true` for [`Boundary::Known`].
    #[inline]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Shift a known boundary by whole days; unknown stays unknown.
    #[inline]
    pub fn shifted_days(self, days: f64) -> Self {
        match self {
            Self::Known(instant) => Self::Known(instant + Days::new(days)),
            Self::Unknown => Self::Unknown,
        }
    }
}

impl From<Option<Instant>> for Boundary {
    #[inline]
    fn from(value: Option<Instant>) -> Self {
        match value {
            Some(instant) => Self::Known(instant),
            None => Self::Unknown,
        }
    }
}

/// The `start` (rise) and `end` (set) boundaries of one local day.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct DayBoundaries {
    pub start: Boundary,
    pub end: Boundary,
}

impl DayBoundaries {
    /// Both boundaries unknown.
    pub const UNKNOWN: Self = Self {
        start: Boundary::Unknown,
        end: Boundary::Unknown,
    };

    /// Creates a boundary pair.
    pub fn new(start: impl Into<Boundary>, end: impl Into<Boundary>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Both boundaries known.
    pub fn known(start: Instant, end: Instant) -> Self {
        Self::new(Boundary::Known(start), Boundary::Known(end))
    }

    /// `true` when neither boundary is known.
    #[inline]
    pub const fn is_unknown(&self) -> bool {
        !self.start.is_known() && !self.end.is_known()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ExtendedBoundaries
// ═══════════════════════════════════════════════════════════════════════════

/// Boundaries for "today" plus the carry-over boundaries of adjacent days.
///
/// `pre_end` is the previous day's `end` when today's `end` lies tomorrow;
/// `post_start` is the next day's `start` when today's `start` lies yesterday.
/// `day_start` is local midnight of today in `offset`, and every extended
/// fraction is measured from it, so a boundary on the previous local day has
/// a negative fraction and one on the next local day a fraction above 1.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExtendedBoundaries {
    pub day: DayBoundaries,
    pub pre_end: Boundary,
    pub post_start: Boundary,
    pub offset: UtcOffset,
    pub day_start: Instant,
}

impl ExtendedBoundaries {
    /// Boundaries without carry-over for the local day holding `reference`.
    pub fn new(day: DayBoundaries, offset: UtcOffset, reference: Instant) -> Self {
        Self {
            day,
            pre_end: Boundary::Unknown,
            post_start: Boundary::Unknown,
            offset,
            day_start: fraction::start_of_local_day(reference, offset),
        }
    }

    /// No boundary data at all for the local day holding `reference`.
    pub fn unknown(offset: UtcOffset, reference: Instant) -> Self {
        Self::new(DayBoundaries::UNKNOWN, offset, reference)
    }

    /// Adds carry-over boundaries.
    pub fn with_carry_over(mut self, pre_end: Boundary, post_start: Boundary) -> Self {
        self.pre_end = pre_end;
        self.post_start = post_start;
        self
    }

    /// Extended fraction of `instant` relative to today's local midnight.
    ///
    /// Not wrapped: yesterday lies in `[-1, 0)`, tomorrow in `[1, 2)`.
    #[inline]
    pub fn fraction_of(&self, instant: Instant) -> f64 {
        (instant - self.day_start).value() / SECONDS_PER_DAY
    }

    /// Fraction of `boundary`, if known.
    #[inline]
    pub fn fraction_of_boundary(&self, boundary: Boundary) -> Option<f64> {
        boundary.known().map(|instant| self.fraction_of(instant))
    }

    /// Local time of day of `now` in `[0, 1)`.
    ///
    /// Uses the same arithmetic as [`fraction_of`](Self::fraction_of) so
    /// `now == start` yields exactly the start fraction.
    #[inline]
    pub fn now_fraction(&self, now: Instant) -> f64 {
        fraction::wrap_fraction(self.fraction_of(now))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BoundaryResolver
// ═══════════════════════════════════════════════════════════════════════════

/// User overrides for the boundaries, as wall-clock times in the target zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct CustomTimes {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl CustomTimes {
    /// No overrides.
    pub const NONE: Self = Self {
        start: None,
        end: None,
    };

    /// Both overrides, e.g. a 09:00–18:00 working day.
    pub const fn new(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        Self { start, end }
    }

    /// `true` when at least one override is present.
    #[inline]
    pub const fn any(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }
}

/// Where a resolved boundary came from; decides how its neighbour occurrence
/// on an adjacent day is obtained.
#[derive(Debug, Copy, Clone, PartialEq)]
enum Origin {
    Custom,
    Solar,
    Missing,
}

/// Resolves [`ExtendedBoundaries`] for a target zone and reference instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryResolver<P> {
    provider: P,
}

impl<P: SolarPositionProvider> BoundaryResolver<P> {
    /// Wraps a solar provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolves the boundaries of the local day (in `offset`) holding `reference`.
    ///
    /// Custom start and end take priority over the solar defaults
    /// independently of each other. A boundary that does not fall on today is
    /// kept with its extended fraction and its neighbour occurrence becomes a
    /// carry-over boundary. A solar end before the start on the same date is
    /// the previous evening's event: it becomes `pre_end` and the next
    /// occurrence becomes `end` (mirrored for a late start). Never fails: missing data yields
    /// [`Boundary::Unknown`].
    pub fn resolve(
        &self,
        coordinate: Option<Coordinate>,
        custom: CustomTimes,
        offset: UtcOffset,
        reference: Instant,
    ) -> ExtendedBoundaries {
        let (mut start, start_origin) = match custom.start {
            Some(time) => (
                Boundary::Known(fraction::at_time_of_day(time, reference, offset)),
                Origin::Custom,
            ),
            None => self.solar_start(coordinate, offset, reference, 0),
        };
        let (mut end, end_origin) = match custom.end {
            Some(time) => (
                Boundary::Known(fraction::at_time_of_day(time, reference, offset)),
                Origin::Custom,
            ),
            None => self.solar_end(coordinate, offset, reference, 0),
        };

        // A custom end before the start is an overnight schedule ending tomorrow.
        if end_origin == Origin::Custom {
            if let (Some(s), Some(e)) = (start.known(), end.known()) {
                if e <= s {
                    end = end.shifted_days(1.0);
                }
            }
        }

        // A solar event past midnight comes back on the same local date, so
        // an early sunset or a late sunrise shows up before its partner.
        let mut pre_end = Boundary::Unknown;
        let mut post_start = Boundary::Unknown;
        if let (Some(s), Some(e)) = (start.known(), end.known()) {
            if e <= s {
                let day_start = fraction::start_of_local_day(reference, offset);
                let end_wrapped = match (start_origin, end_origin) {
                    (Origin::Solar, Origin::Solar) => {
                        let early = (e - day_start).value() / SECONDS_PER_DAY;
                        let late = (s - day_start).value() / SECONDS_PER_DAY;
                        early < 1.0 - late
                    }
                    (_, origin) => origin == Origin::Solar,
                };
                if end_wrapped {
                    pre_end = end;
                    let next = self.solar_end(coordinate, offset, reference, 1).0;
                    end = match next.known() {
                        Some(n) if n > s && (n - s).value() < SECONDS_PER_DAY => next,
                        _ => end.shifted_days(1.0),
                    };
                } else if start_origin == Origin::Solar {
                    post_start = start;
                    let previous = self.solar_start(coordinate, offset, reference, -1).0;
                    start = match previous.known() {
                        Some(p) if p < e && (e - p).value() < SECONDS_PER_DAY => previous,
                        _ => start.shifted_days(-1.0),
                    };
                }
            }
        }

        // Re-anchor boundaries that landed on the wrong side of today.
        if day_delta(start, reference, offset) > 0 {
            let previous = self.neighbour_start(start, start_origin, coordinate, offset, reference, -1);
            if day_delta(previous, reference, offset) == 0 {
                start = previous;
            }
        }
        if day_delta(end, reference, offset) < 0 {
            let next = self.neighbour_end(end, end_origin, coordinate, offset, reference, 1);
            if day_delta(next, reference, offset) == 0 {
                end = next;
            }
        }

        if !post_start.is_known() && day_delta(start, reference, offset) < 0 {
            post_start = self.neighbour_start(start, start_origin, coordinate, offset, reference, 1);
        }
        if !pre_end.is_known() && day_delta(end, reference, offset) > 0 {
            pre_end = self.neighbour_end(end, end_origin, coordinate, offset, reference, -1);
        }

        let mut day = DayBoundaries { start, end };
        if day.is_unknown() && !custom.any() {
            if let Some(coordinate) = coordinate {
                if is_polar_summer(coordinate, offset, reference) {
                    log::debug!(
                        "no solar events at ({}, {}); assuming polar day",
                        coordinate.latitude(),
                        coordinate.longitude()
                    );
                    day = DayBoundaries::known(
                        reference - POLAR_SUMMER_WINDOW,
                        reference + POLAR_SUMMER_WINDOW,
                    );
                }
            }
        }

        let resolved = ExtendedBoundaries::new(day, offset, reference).with_carry_over(pre_end, post_start);
        log::debug!(
            "day boundaries ({offset}): start={:?} end={:?} pre_end={:?} post_start={:?}",
            resolved.fraction_of_boundary(resolved.day.start),
            resolved.fraction_of_boundary(resolved.day.end),
            resolved.fraction_of_boundary(resolved.pre_end),
            resolved.fraction_of_boundary(resolved.post_start),
        );
        resolved
    }

    fn solar_start(
        &self,
        coordinate: Option<Coordinate>,
        offset: UtcOffset,
        reference: Instant,
        day_delta: i64,
    ) -> (Boundary, Origin) {
        match coordinate {
            Some(coordinate) => {
                let sunrise = local_midnight(offset, reference, day_delta)
                    .and_then(|day| self.provider.civil_sunrise(day, coordinate));
                (sunrise.into(), Origin::Solar)
            }
            None => (Boundary::Unknown, Origin::Missing),
        }
    }

    fn solar_end(
        &self,
        coordinate: Option<Coordinate>,
        offset: UtcOffset,
        reference: Instant,
        day_delta: i64,
    ) -> (Boundary, Origin) {
        match coordinate {
            Some(coordinate) => {
                let sunset = local_midnight(offset, reference, day_delta)
                    .and_then(|day| self.provider.civil_sunset(day, coordinate));
                (sunset.into(), Origin::Solar)
            }
            None => (Boundary::Unknown, Origin::Missing),
        }
    }

    /// The occurrence of a start boundary one local day before (`-1`) or after (`1`).
    fn neighbour_start(
        &self,
        start: Boundary,
        origin: Origin,
        coordinate: Option<Coordinate>,
        offset: UtcOffset,
        reference: Instant,
        direction: i64,
    ) -> Boundary {
        match origin {
            Origin::Custom => start.shifted_days(direction as f64),
            Origin::Solar => self.solar_start(coordinate, offset, reference, direction).0,
            Origin::Missing => Boundary::Unknown,
        }
    }

    /// The occurrence of an end boundary one local day before (`-1`) or after (`1`).
    fn neighbour_end(
        &self,
        end: Boundary,
        origin: Origin,
        coordinate: Option<Coordinate>,
        offset: UtcOffset,
        reference: Instant,
        direction: i64,
    ) -> Boundary {
        match origin {
            Origin::Custom => end.shifted_days(direction as f64),
            Origin::Solar => self.solar_end(coordinate, offset, reference, direction).0,
            Origin::Missing => Boundary::Unknown,
        }
    }
}

/// Local-day distance of a known boundary from `reference`; `0` when unknown.
fn day_delta(boundary: Boundary, reference: Instant, offset: UtcOffset) -> i64 {
    match boundary {
        Boundary::Known(instant) => fraction::local_day_delta(instant, reference, offset),
        Boundary::Unknown => 0,
    }
}

/// Local midnight `day_delta` days away from the day holding `reference`.
fn local_midnight(
    offset: UtcOffset,
    reference: Instant,
    day_delta: i64,
) -> Option<chrono::DateTime<chrono::FixedOffset>> {
    let midnight = fraction::start_of_local_day(reference, offset) + Days::new(day_delta as f64);
    midnight.to_local(offset)
}

/// Coarse polar-summer test: northern hemisphere April–September, southern
/// hemisphere October–March, by the local month of `reference`.
///
/// Intentionally approximate. It only runs when the solar provider reported
/// neither a sunrise nor a sunset, where it picks polar day over polar night.
pub fn is_polar_summer(coordinate: Coordinate, offset: UtcOffset, reference: Instant) -> bool {
    let Some(date) = fraction::local_date(reference, offset) else {
        return false;
    };
    let northern_summer = (4..=9).contains(&date.month());
    if coordinate.is_northern() {
        northern_summer
    } else {
        !northern_summer
    }
}

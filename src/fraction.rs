// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Fraction-of-day arithmetic.
//!
//! A *fraction of day* is a local time of day expressed in `[0, 1)`, with
//! `0` at local midnight. All calendars here are anchored to UTC: an instant
//! is first shifted by the target [`UtcOffset`] and the "start of day" is the
//! UTC midnight of the shifted value. The host's timezone (and its DST rules)
//! never enters the computation.
//!
//! ```
//! use dayline::{fraction, Instant, UtcOffset};
//!
//! // 2024-01-01T06:00:00Z seen from UTC+03:00 is 09:00 local.
//! let t = Instant::from_unix_seconds(1_704_088_800.0);
//! let offset = UtcOffset::new(3 * 3600).unwrap();
//! assert!((fraction::fraction_of_day(t, offset) - 0.375).abs() < 1e-12);
//! ```

use chrono::{NaiveDate, NaiveTime, Timelike};
use qtty::Seconds;

use crate::instant::{Instant, UtcOffset};

/// Length of a (UTC-anchored) day in seconds.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days elapsed since 1970-01-01 for the UTC calendar day holding `instant`.
#[inline]
pub fn utc_day_number(instant: Instant) -> i64 {
    (instant.unix_seconds() / SECONDS_PER_DAY).floor() as i64
}

/// Local calendar day number of `instant` in the zone `offset`.
#[inline]
pub fn local_day_number(instant: Instant, offset: UtcOffset) -> i64 {
    utc_day_number(instant.shifted(offset))
}

/// UTC midnight at or before `instant`.
#[inline]
pub fn start_of_utc_day(instant: Instant) -> Instant {
    Instant::from_unix_seconds(utc_day_number(instant) as f64 * SECONDS_PER_DAY)
}

/// The absolute instant of local midnight, in the zone `offset`, that starts
/// the local day holding `instant`.
#[inline]
pub fn start_of_local_day(instant: Instant, offset: UtcOffset) -> Instant {
    start_of_utc_day(instant.shifted(offset)) - offset.as_seconds()
}

/// Reduce any real value into `[0, 1)` (`f − ⌊f⌋`).
///
/// `1.0` and `0.0` map to the same point. Non-finite input maps to `0.0`.
#[inline]
pub fn wrap_fraction(fraction: f64) -> f64 {
    if !fraction.is_finite() {
        return 0.0;
    }
    let wrapped = fraction - fraction.floor();
    // f − ⌊f⌋ can round up to exactly 1.0 for tiny negative inputs.
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Local time of day of `instant` in the zone `offset`, as a fraction in `[0, 1)`.
pub fn fraction_of_day(instant: Instant, offset: UtcOffset) -> f64 {
    let shifted = instant.shifted(offset);
    let elapsed = shifted - start_of_utc_day(shifted);
    wrap_fraction(elapsed.value() / SECONDS_PER_DAY)
}

/// The instant at `fraction` of the UTC day holding `reference`.
///
/// `fraction` is reduced modulo 1 first. This is the raw inverse used by
/// drag-scrubbing; callers that work in a target zone should use
/// [`instant_from_fraction_in`], which re-applies the offset.
pub fn instant_from_fraction(fraction: f64, reference: Instant) -> Instant {
    start_of_utc_day(reference) + Seconds::new(wrap_fraction(fraction) * SECONDS_PER_DAY)
}

/// The instant whose local time of day in `offset` is `fraction`, on the
/// local day holding `reference`.
///
/// Inverse of [`fraction_of_day`]:
/// `instant_from_fraction_in(fraction_of_day(t, z), t, z) == t`.
pub fn instant_from_fraction_in(fraction: f64, reference: Instant, offset: UtcOffset) -> Instant {
    start_of_local_day(reference, offset) + Seconds::new(wrap_fraction(fraction) * SECONDS_PER_DAY)
}

/// Signed number of local days between `reference`'s day and `instant`'s day.
///
/// `0` means same local day, `-1` yesterday, `1` tomorrow.
#[inline]
pub fn local_day_delta(instant: Instant, reference: Instant, offset: UtcOffset) -> i64 {
    local_day_number(instant, offset) - local_day_number(reference, offset)
}

/// Whether `instant` falls on the same local day as `reference` in `offset`.
#[inline]
pub fn is_today(instant: Instant, reference: Instant, offset: UtcOffset) -> bool {
    local_day_delta(instant, reference, offset) == 0
}

/// Calendar date of `instant` in the zone `offset`.
pub fn local_date(instant: Instant, offset: UtcOffset) -> Option<NaiveDate> {
    Some(instant.shifted(offset).to_utc()?.date_naive())
}

/// Project a wall-clock time of day onto the local day holding `reference`.
pub fn at_time_of_day(time: NaiveTime, reference: Instant, offset: UtcOffset) -> Instant {
    let seconds =
        f64::from(time.num_seconds_from_midnight()) + f64::from(time.nanosecond()) / 1e9;
    start_of_local_day(reference, offset) + Seconds::new(seconds)
}

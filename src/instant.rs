// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Absolute instants and fixed UTC offsets.
//!
//! [`Instant`] stores a single [`Seconds`] quantity counted from the Unix
//! epoch (1970-01-01T00:00:00Z). It knows nothing about calendars or zones;
//! everything zone-related goes through an explicit [`UtcOffset`], never
//! through the host's local timezone.
//!
//! [`UtcOffset`] is the *absolute* offset of a target zone from UTC. The
//! difference between a contact's zone and the viewer's zone is a separate
//! value ([`UtcOffset::difference_from`]) and is only meant for display.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use qtty::{Days, Second, Seconds};
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// An absolute point in time, UTC based.
///
/// The struct is `Copy` and layout-identical to a single `f64`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Instant {
    since_epoch: Seconds,
}

impl Instant {
    /// 1970-01-01T00:00:00Z.
    pub const UNIX_EPOCH: Self = Self::from_unix_seconds(0.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from raw seconds since the Unix epoch.
    #[inline]
    pub const fn from_unix_seconds(seconds: f64) -> Self {
        Self {
            since_epoch: Seconds::new(seconds),
        }
    }

    /// Create from a [`Seconds`] quantity since the Unix epoch.
    #[inline]
    pub const fn from_seconds(since_epoch: Seconds) -> Self {
        Self { since_epoch }
    }

    /// Build an instant from a `chrono::DateTime<Utc>`, keeping sub-second precision.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let whole = datetime.timestamp() as f64;
        let nanos = datetime.timestamp_subsec_nanos() as f64 / 1e9;
        Self::from_unix_seconds(whole + nanos)
    }

    /// Build an instant from a zoned `chrono::DateTime`.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self::from_utc(datetime.with_timezone(&Utc))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Seconds since the Unix epoch as a quantity.
    #[inline]
    pub const fn since_epoch(&self) -> Seconds {
        self.since_epoch
    }

    /// Seconds since the Unix epoch as a scalar.
    #[inline]
    pub const fn unix_seconds(&self) -> f64 {
        self.since_epoch.value()
    }

    // ── chrono helpers ────────────────────────────────────────────────

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let seconds = self.unix_seconds();
        if !seconds.is_finite() {
            return None;
        }
        let secs = seconds.floor() as i64;
        let nanos = ((seconds - secs as f64) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos.min(999_999_999))
    }

    /// Wall-clock view of this instant in the zone `offset`.
    pub fn to_local(&self, offset: UtcOffset) -> Option<DateTime<FixedOffset>> {
        let zone = offset.to_fixed_offset()?;
        Some(self.to_utc()?.with_timezone(&zone))
    }

    /// The same instant re-labelled as if `offset` were UTC.
    ///
    /// This is the "shift by offset" step used by the fraction-of-day math:
    /// the result's UTC calendar fields equal this instant's wall clock in
    /// `offset`.
    #[inline]
    pub fn shifted(self, offset: UtcOffset) -> Self {
        self + offset.as_seconds()
    }
}

impl std::fmt::Display for Instant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_utc() {
            Some(utc) => write!(f, "{}", utc.to_rfc3339()),
            None => write!(f, "Unix {}", self.since_epoch),
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Instant {
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.unix_seconds())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::from_unix_seconds(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Seconds> for Instant {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Seconds) -> Self::Output {
        Self::from_seconds(self.since_epoch + rhs)
    }
}

impl AddAssign<Seconds> for Instant {
    #[inline]
    fn add_assign(&mut self, rhs: Seconds) {
        self.since_epoch += rhs;
    }
}

impl Sub<Seconds> for Instant {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Seconds) -> Self::Output {
        Self::from_seconds(self.since_epoch - rhs)
    }
}

impl SubAssign<Seconds> for Instant {
    #[inline]
    fn sub_assign(&mut self, rhs: Seconds) {
        self.since_epoch -= rhs;
    }
}

impl Add<Days> for Instant {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        self + rhs.to::<Second>()
    }
}

impl Sub<Days> for Instant {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        self - rhs.to::<Second>()
    }
}

impl Sub for Instant {
    type Output = Seconds;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.since_epoch - rhs.since_epoch
    }
}

impl From<DateTime<Utc>> for Instant {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// UtcOffset
// ═══════════════════════════════════════════════════════════════════════════

/// Fixed offset of a zone from UTC, in whole seconds (east positive).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset {
    seconds: i32,
}

impl UtcOffset {
    /// Zero offset.
    pub const UTC: Self = Self { seconds: 0 };

    /// Largest accepted magnitude: 18 hours.
    pub const MAX_SECONDS: i32 = 18 * 3600;

    /// Create an offset, rejecting values beyond ±18 hours.
    pub fn new(seconds: i32) -> Result<Self> {
        if seconds.abs() > Self::MAX_SECONDS {
            return Err(Error::InvalidUtcOffset { seconds });
        }
        Ok(Self { seconds })
    }

    /// Create an offset from (possibly fractional) hours, rounded to the second.
    pub fn from_hours(hours: f64) -> Result<Self> {
        let seconds = (hours * 3600.0).round();
        if !seconds.is_finite() || seconds.abs() > f64::from(Self::MAX_SECONDS) {
            return Err(Error::InvalidUtcOffset {
                seconds: seconds.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32,
            });
        }
        Self::new(seconds as i32)
    }

    /// Offset carried by a chrono `FixedOffset`.
    #[inline]
    pub fn from_fixed_offset(offset: FixedOffset) -> Self {
        Self {
            seconds: offset.local_minus_utc(),
        }
    }

    /// Raw seconds east of UTC.
    #[inline]
    pub const fn seconds(&self) -> i32 {
        self.seconds
    }

    /// The offset as a quantity.
    #[inline]
    pub fn as_seconds(&self) -> Seconds {
        Seconds::new(f64::from(self.seconds))
    }

    /// `self − viewer`: how far this zone is ahead of the viewer's zone.
    ///
    /// Display only. Geometry always works from the absolute offset.
    #[inline]
    pub const fn difference_from(self, viewer: UtcOffset) -> UtcOffset {
        UtcOffset {
            seconds: self.seconds - viewer.seconds,
        }
    }

    /// chrono equivalent; `None` for differences wider than a day.
    #[inline]
    pub fn to_fixed_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.seconds)
    }
}

impl std::fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let abs = self.seconds.unsigned_abs();
        write!(f, "UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
    }
}

#[cfg(feature = "serde")]
impl Serialize for UtcOffset {
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_i32(self.seconds)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for UtcOffset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = i32::deserialize(deserializer)?;
        Self::new(seconds).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_roundtrip() {
        let datetime = DateTime::from_timestamp(946_728_000, 250_000_000).unwrap();
        let instant = Instant::from_utc(datetime);
        let back = instant.to_utc().expect("to_utc");
        let delta_ns =
            back.timestamp_nanos_opt().unwrap() - datetime.timestamp_nanos_opt().unwrap();
        assert!(delta_ns.abs() < 1_000, "roundtrip error: {} ns", delta_ns);
    }

    #[test]
    fn test_from_zoned_datetime() {
        let zoned = "2024-03-10T09:00:00+02:00"
            .parse::<DateTime<FixedOffset>>()
            .unwrap();
        let instant = Instant::from_datetime(&zoned);
        assert_eq!(instant.to_utc().unwrap().to_rfc3339(), "2024-03-10T07:00:00+00:00");
    }

    #[test]
    fn test_arithmetic() {
        let mut t = Instant::from_unix_seconds(1_000.0);
        t += Seconds::new(500.0);
        assert_eq!(t.unix_seconds(), 1_500.0);
        t -= Seconds::new(100.0);
        assert_eq!(t.unix_seconds(), 1_400.0);

        let later = t + Days::new(1.0);
        assert_eq!(later - t, Seconds::new(86_400.0));
        assert_eq!((later - Days::new(1.0)).unix_seconds(), 1_400.0);
    }

    #[test]
    fn test_shifted_matches_local_wall_clock() {
        let offset = UtcOffset::new(9 * 3600).unwrap();
        let t = Instant::from_utc(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        let local = t.to_local(offset).unwrap();
        let shifted = t.shifted(offset).to_utc().unwrap();
        assert_eq!(local.naive_local(), shifted.naive_utc());
    }

    #[test]
    fn test_display() {
        let s = format!("{}", Instant::UNIX_EPOCH);
        assert!(s.starts_with("1970-01-01T00:00:00"));
        assert!(format!("{}", Instant::from_unix_seconds(f64::NAN)).starts_with("Unix"));
    }

    #[test]
    fn test_offset_validation() {
        assert!(UtcOffset::new(14 * 3600).is_ok());
        assert!(UtcOffset::new(-12 * 3600).is_ok());
        assert_eq!(
            UtcOffset::new(19 * 3600),
            Err(Error::InvalidUtcOffset { seconds: 19 * 3600 })
        );
        assert_eq!(UtcOffset::from_hours(5.5).unwrap().seconds(), 19_800);
        assert!(UtcOffset::from_hours(f64::INFINITY).is_err());
    }

    #[test]
    fn test_offset_difference_and_display() {
        let contact = UtcOffset::new(5 * 3600 + 1800).unwrap();
        let viewer = UtcOffset::new(-3600).unwrap();
        let diff = contact.difference_from(viewer);
        assert_eq!(diff.seconds(), 6 * 3600 + 1800);
        assert_eq!(format!("{contact}"), "UTC+05:30");
        assert_eq!(format!("{viewer}"), "UTC-01:00");
    }

    #[test]
    fn test_fixed_offset_roundtrip() {
        let offset = UtcOffset::new(-4 * 3600).unwrap();
        let fixed = offset.to_fixed_offset().unwrap();
        assert_eq!(UtcOffset::from_fixed_offset(fixed), offset);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar day boundaries.
//!
//! The astronomical formula is a black box: [`SolarPositionProvider`] only
//! promises a civil sunrise/sunset instant for a local calendar day, or `None`
//! when the sun never crosses the horizon that day (polar day or night).
//!
//! [`SpaProvider`] backs the trait with the NREL Solar Position Algorithm from
//! the `solar-positioning` crate.

use chrono::{DateTime, FixedOffset};
use solar_positioning::{spa, time::DeltaT, Horizon, SunriseResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::instant::Instant;

/// A validated geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCoordinate"))]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for Coordinate {
    type Error = Error;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::InvalidLatitude { value: latitude });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidLongitude { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees, north positive.
    #[inline]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, east positive.
    #[inline]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether the coordinate lies in the northern hemisphere (equator included).
    #[inline]
    pub fn is_northern(&self) -> bool {
        self.latitude >= 0.0
    }
}

/// Source of civil sunrise/sunset instants.
///
/// `day` is local midnight of the calendar day of interest, carrying the
/// target zone's offset. Returned instants usually fall on that local day but
/// may land on an adjacent one near the poles or for offsets far from the
/// coordinate's solar time; the boundary resolver deals with that.
pub trait SolarPositionProvider {
    /// Civil sunrise for `day` at `coordinate`, `None` if the sun does not rise.
    fn civil_sunrise(&self, day: DateTime<FixedOffset>, coordinate: Coordinate) -> Option<Instant>;

    /// Civil sunset for `day` at `coordinate`, `None` if the sun does not set.
    fn civil_sunset(&self, day: DateTime<FixedOffset>, coordinate: Coordinate) -> Option<Instant>;
}

impl<P: SolarPositionProvider + ?Sized> SolarPositionProvider for &P {
    fn civil_sunrise(&self, day: DateTime<FixedOffset>, coordinate: Coordinate) -> Option<Instant> {
        (**self).civil_sunrise(day, coordinate)
    }

    fn civil_sunset(&self, day: DateTime<FixedOffset>, coordinate: Coordinate) -> Option<Instant> {
        (**self).civil_sunset(day, coordinate)
    }
}

/// [`SolarPositionProvider`] computed with NREL SPA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpaProvider {
    horizon: Horizon,
}

impl Default for SpaProvider {
    fn default() -> Self {
        Self::civil()
    }
}

impl SpaProvider {
    /// Civil twilight boundaries (sun centre 6° below the horizon).
    pub const fn civil() -> Self {
        Self {
            horizon: Horizon::CivilTwilight,
        }
    }

    /// Boundaries for any horizon definition, e.g. [`Horizon::SunriseSunset`].
    pub const fn with_horizon(horizon: Horizon) -> Self {
        Self { horizon }
    }

    /// The horizon used for rise/set events.
    pub const fn horizon(&self) -> Horizon {
        self.horizon
    }

    fn events(
        &self,
        day: DateTime<FixedOffset>,
        coordinate: Coordinate,
    ) -> Option<SunriseResult<DateTime<FixedOffset>>> {
        let delta_t = match DeltaT::estimate_from_date_like(day) {
            Ok(delta_t) => delta_t,
            Err(err) => {
                log::warn!("no ΔT estimate for {day}: {err}");
                return None;
            }
        };
        match spa::sunrise_sunset_for_horizon(
            day,
            coordinate.latitude(),
            coordinate.longitude(),
            delta_t,
            self.horizon,
        ) {
            Ok(result) => Some(result),
            Err(err) => {
                log::warn!(
                    "solar events unavailable at ({}, {}) for {day}: {err}",
                    coordinate.latitude(),
                    coordinate.longitude()
                );
                None
            }
        }
    }
}

impl SolarPositionProvider for SpaProvider {
    fn civil_sunrise(&self, day: DateTime<FixedOffset>, coordinate: Coordinate) -> Option<Instant> {
        match self.events(day, coordinate)? {
            SunriseResult::RegularDay { sunrise, .. } => Some(Instant::from_datetime(&sunrise)),
            SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. } => None,
        }
    }

    fn civil_sunset(&self, day: DateTime<FixedOffset>, coordinate: Coordinate) -> Option<Instant> {
        match self.events(day, coordinate)? {
            SunriseResult::RegularDay { sunset, .. } => Some(Instant::from_datetime(&sunset)),
            SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fraction;
    use crate::instant::UtcOffset;

    fn midnight(s: &str) -> DateTime<FixedOffset> {
        s.parse::<DateTime<FixedOffset>>().unwrap()
    }

    #[test]
    fn coordinate_validation() {
        assert!(Coordinate::new(48.21, 16.37).is_ok());
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(Error::InvalidLatitude { value: 90.5 })
        );
        assert_eq!(
            Coordinate::new(0.0, -181.0),
            Err(Error::InvalidLongitude { value: -181.0 })
        );
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn equator_equinox_has_regular_day() {
        let provider = SpaProvider::default();
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let day = midnight("2024-03-20T00:00:00+00:00");

        let sunrise = provider.civil_sunrise(day, origin).expect("sunrise");
        let sunset = provider.civil_sunset(day, origin).expect("sunset");

        let rise = fraction::fraction_of_day(sunrise, UtcOffset::UTC) * 24.0;
        let set = fraction::fraction_of_day(sunset, UtcOffset::UTC) * 24.0;
        // Civil twilight at (0, 0) is roughly 05:40 and 18:30 UTC.
        assert!((5.0..6.5).contains(&rise), "sunrise at {rise} h");
        assert!((17.5..19.0).contains(&set), "sunset at {set} h");
        assert!(sunrise < sunset);
    }

    #[test]
    fn civil_twilight_is_wider_than_sunrise_sunset() {
        let civil = SpaProvider::civil();
        let geometric = SpaProvider::with_horizon(Horizon::SunriseSunset);
        let vienna = Coordinate::new(48.21, 16.37).unwrap();
        let day = midnight("2024-06-21T00:00:00+02:00");

        assert!(civil.civil_sunrise(day, vienna) < geometric.civil_sunrise(day, vienna));
        assert!(civil.civil_sunset(day, vienna) > geometric.civil_sunset(day, vienna));
    }

    #[test]
    fn polar_dates_have_no_events() {
        let provider = SpaProvider::default();
        let north = Coordinate::new(80.0, 15.0).unwrap();

        let summer = midnight("2024-06-21T00:00:00+01:00");
        assert_eq!(provider.civil_sunrise(summer, north), None);
        assert_eq!(provider.civil_sunset(summer, north), None);

        let winter = midnight("2024-12-21T00:00:00+01:00");
        assert_eq!(provider.civil_sunrise(winter, north), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates() {
        let ok: Coordinate = serde_json::from_str(r#"{"latitude": 48.21, "longitude": 16.37}"#).unwrap();
        assert_eq!(ok, Coordinate::new(48.21, 16.37).unwrap());
        assert!(serde_json::from_str::<Coordinate>(r#"{"latitude": 95.0, "longitude": 0.0}"#).is_err());
    }

    #[test]
    fn reference_provider_forwards() {
        let provider = SpaProvider::default();
        let by_ref: &dyn SolarPositionProvider = &provider;
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let day = midnight("2024-03-20T00:00:00+00:00");
        assert_eq!(
            (&by_ref).civil_sunrise(day, origin),
            provider.civil_sunrise(day, origin)
        );
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for the fallible constructors of this crate.
//!
//! The day-line engine itself never fails: missing data is modelled with
//! [`Boundary::Unknown`](crate::Boundary::Unknown) and handled by fallback
//! branches. Only input validation (coordinates, UTC offsets, style values)
//! returns [`Error`].

use thiserror::Error;

/// Result alias used by every fallible function in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Latitude outside `[-90°, +90°]` or not finite.
    #[error("invalid latitude {value}° (must be between -90° and +90°)")]
    InvalidLatitude {
        /// The rejected latitude.
        value: f64,
    },
    /// Longitude outside `[-180°, +180°]` or not finite.
    #[error("invalid longitude {value}° (must be between -180° and +180°)")]
    InvalidLongitude {
        /// The rejected longitude.
        value: f64,
    },
    /// UTC offset beyond ±18 hours.
    #[error("invalid UTC offset {seconds} s (must be within ±18 hours)")]
    InvalidUtcOffset {
        /// The rejected offset in seconds.
        seconds: i32,
    },
    /// A [`LineStyle`](crate::LineStyle) field is not a positive finite number.
    #[error("invalid line style: `{field}` = {value} (must be positive and finite)")]
    InvalidStyle {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

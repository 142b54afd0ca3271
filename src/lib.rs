// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day Line
//!
//! Geometry for a compact "day line": a curve that rises over a contact's
//! daytime (sunrise to sunset, or custom working hours) and lies flat over
//! night, a marker at the contact's current local time, and a label next to
//! the marker. Everything is computed in the contact's fixed UTC offset,
//! independently of the host's timezone.
//!
//! # Core types
//!
//! - [`Instant`]: absolute UTC-based point in time (seconds since the Unix epoch).
//! - [`UtcOffset`]: validated fixed zone offset (±18 h).
//! - [`Coordinate`]: validated latitude/longitude.
//! - [`Boundary`], [`ExtendedBoundaries`]: day/night transitions with carry-over.
//! - [`DayShape`], [`CurvePath`], [`FrameRect`], [`Point`]: curve geometry.
//! - [`LabelBox`]: placed time label.
//! - [`Clock`]: the shared displayed "now", with scrub override.
//! - [`DayLine`], [`LineModel`]: the end-to-end engine and its output.
//!
//! # Pipeline
//!
//! | Step | Function |
//! |------|----------|
//! | local time of day | [`fraction::fraction_of_day`] |
//! | day boundaries | [`BoundaryResolver::resolve`] |
//! | curve | [`build_curve`] |
//! | marker | [`marker_position`] |
//! | label | [`LabelPlacer::place`] |
//! | texts | [`format::short_time`], [`format::time_difference`] |
//!
//! # Example
//!
//! ```
//! use dayline::{Contact, DayLine, Instant, LineStyle, SpaProvider, UtcOffset};
//!
//! let viewer = UtcOffset::UTC;
//! let line = DayLine::new(SpaProvider::default(), LineStyle::default(), viewer).unwrap();
//!
//! let contact = Contact::new("Office", UtcOffset::new(2 * 3600).unwrap()).with_working_hours();
//! // 2024-06-01T11:30:00Z, 13:30 at the office.
//! let now = Instant::from_unix_seconds(1_717_241_400.0);
//! let model = line.render(&contact, 300.0, 60.0, now);
//!
//! assert_eq!(model.label_text, "1:30 PM");
//! assert_eq!(model.time_difference, "+2HRS");
//! assert!((model.marker.y - model.frame.top()).abs() < 1e-9);
//! ```

pub mod boundary;
pub mod clock;
mod config;
mod contact;
mod error;
pub mod format;
pub mod fraction;
pub mod geometry;
pub(crate) mod instant;
pub mod label;
mod line;
pub mod solar;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use boundary::{Boundary, BoundaryResolver, CustomTimes, DayBoundaries, ExtendedBoundaries};
pub use clock::{Clock, Subscription, SystemTime, TickingClock, TimeSource, TICK_INTERVAL};
pub use config::LineStyle;
pub use contact::Contact;
pub use error::{Error, Result};
pub use format::TimeFormat;
pub use geometry::{
    build_curve, day_shape, marker_position, CurvePath, DayShape, FrameRect, PathSegment, Point,
    Span,
};
pub use instant::{Instant, UtcOffset};
pub use label::{FixedAdvance, LabelBox, LabelPlacer, TextMeasure, TextSize};
pub use line::{DayLine, LineModel};
pub use solar::{Coordinate, SolarPositionProvider, SpaProvider};

/// Re-exported so callers can pick a horizon for [`SpaProvider::with_horizon`].
pub use solar_positioning::Horizon;

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! One contact's day line, end to end.
//!
//! [`DayLine`] ties the pieces together for a renderer: resolve the
//! boundaries of the contact's local day, build the curve, place the marker
//! and its label, and format the texts. Rendering the returned [`LineModel`]
//! (stroking the path, drawing the circle and the text) is up to the host.
//!
//! Scrubbing maps a horizontal drag position back to an instant on the
//! contact's local day and freezes the shared [`Clock`] there until release.

use crate::boundary::{BoundaryResolver, ExtendedBoundaries};
use crate::clock::Clock;
use crate::config::LineStyle;
use crate::contact::Contact;
use crate::error::Result;
use crate::format;
use crate::fraction;
use crate::geometry::{build_curve, marker_position, CurvePath, FrameRect, Point};
use crate::instant::{Instant, UtcOffset};
use crate::label::{FixedAdvance, LabelBox, LabelPlacer, TextMeasure};
use crate::solar::SolarPositionProvider;

/// Everything needed to draw one day line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineModel {
    pub frame: FrameRect,
    pub boundaries: ExtendedBoundaries,
    pub curve: CurvePath,
    pub marker: Point,
    pub marker_radius: f64,
    pub label: LabelBox,
    /// Local time of the contact, e.g. `1:30 PM`.
    pub label_text: String,
    /// Offset from the viewer, e.g. `+2HRS`.
    pub time_difference: String,
}

/// Day-line engine for one viewer.
#[derive(Debug, Clone)]
pub struct DayLine<P, M = FixedAdvance> {
    resolver: BoundaryResolver<P>,
    placer: LabelPlacer<M>,
    style: LineStyle,
    viewer: UtcOffset,
}

impl<P: SolarPositionProvider> DayLine<P, FixedAdvance> {
    /// Engine measuring labels with a [`FixedAdvance`] approximation of the
    /// style's font.
    pub fn new(provider: P, style: LineStyle, viewer: UtcOffset) -> Result<Self> {
        let measure = FixedAdvance::for_font_size(style.font_size);
        Self::with_measure(provider, measure, style, viewer)
    }
}

impl<P: SolarPositionProvider, M: TextMeasure> DayLine<P, M> {
    /// Engine measuring labels with the renderer's own `measure`.
    pub fn with_measure(provider: P, measure: M, style: LineStyle, viewer: UtcOffset) -> Result<Self> {
        style.validate()?;
        Ok(Self {
            resolver: BoundaryResolver::new(provider),
            placer: LabelPlacer::new(measure, &style),
            style,
            viewer,
        })
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    pub fn viewer(&self) -> UtcOffset {
        self.viewer
    }

    /// The viewer's own zone changed.
    pub fn set_viewer(&mut self, viewer: UtcOffset) {
        self.viewer = viewer;
    }

    /// Boundaries of `contact`'s local day holding `reference`.
    pub fn boundaries(&self, contact: &Contact, reference: Instant) -> ExtendedBoundaries {
        self.resolver
            .resolve(contact.coordinate, contact.custom_times(), contact.offset, reference)
    }

    /// Full model for a `width × height` view at `now`.
    pub fn render(&self, contact: &Contact, width: f64, height: f64, now: Instant) -> LineModel {
        let frame = self.style.line_frame(width, height);
        let boundaries = self.boundaries(contact, now);
        let curve = build_curve(frame, &boundaries);
        let marker = marker_position(frame, &boundaries, now);
        let label_text = format::short_time(now, contact.offset, self.style.time_format);
        let label = self.placer.place(frame, marker, &label_text, &boundaries);

        LineModel {
            frame,
            boundaries,
            curve,
            marker,
            marker_radius: self.style.marker_radius(),
            label,
            label_text,
            time_difference: format::time_difference(contact.offset, self.viewer),
        }
    }

    /// Instant under the horizontal position `x` of `frame`, on `contact`'s
    /// local day holding `reference`.
    pub fn instant_at(&self, contact: &Contact, frame: FrameRect, x: f64, reference: Instant) -> Instant {
        fraction::instant_from_fraction_in(frame.fraction_at(x), reference, contact.offset)
    }

    /// Drag to `x`: override `clock` with the instant under the finger.
    pub fn scrub<C: Clock + ?Sized>(&self, clock: &C, contact: &Contact, frame: FrameRect, x: f64) -> Instant {
        let instant = self.instant_at(contact, frame, x, clock.now());
        clock.set_override(instant);
        instant
    }

    /// End of drag: back to live time.
    pub fn release<C: Clock + ?Sized>(&self, clock: &C) {
        clock.clear_override();
    }
}

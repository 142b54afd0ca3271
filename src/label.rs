// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time label placement next to the marker.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::boundary::ExtendedBoundaries;
use crate::config::LineStyle;
use crate::geometry::{curve_height, day_shape, DayShape, FrameRect, Point};

/// Size of a rendered text run.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

/// Measures text in the label font. Supplied by the renderer.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> TextSize;
}

impl<M: TextMeasure + ?Sized> TextMeasure for &M {
    fn measure(&self, text: &str) -> TextSize {
        (**self).measure(text)
    }
}

/// Monospace approximation: every character has the same advance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedAdvance {
    pub advance: f64,
    pub line_height: f64,
}

impl FixedAdvance {
    /// Typical proportions of a UI font at `font_size` points.
    pub fn for_font_size(font_size: f64) -> Self {
        Self {
            advance: font_size * 0.6,
            line_height: font_size * 1.2,
        }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::for_font_size(LineStyle::default().font_size)
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&self, text: &str) -> TextSize {
        TextSize {
            width: text.chars().count() as f64 * self.advance,
            height: self.line_height,
        }
    }
}

/// Where the label goes, in the coordinates of the view holding the frame.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LabelBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Places the time label so it never hides the curve or leaves the view.
#[derive(Debug, Clone, Copy)]
pub struct LabelPlacer<M> {
    measure: M,
    lift: f64,
    overflow_lift: f64,
    padding: f64,
}

impl<M: TextMeasure> LabelPlacer<M> {
    pub fn new(measure: M, style: &LineStyle) -> Self {
        Self {
            measure,
            lift: style.label_lift,
            overflow_lift: style.label_overflow_lift,
            padding: style.label_padding,
        }
    }

    pub fn measure(&self) -> &M {
        &self.measure
    }

    /// Box for `text` next to `marker`.
    ///
    /// Left of the span middle the label sits left of the marker, otherwise
    /// right of it. It is lifted above the curve at its edge nearest the
    /// middle, or above the frame when it would spill past the view. `x` is
    /// finally clamped into `[0, frame.width − box width]`.
    pub fn place(
        &self,
        frame: FrameRect,
        marker: Point,
        text: &str,
        boundaries: &ExtendedBoundaries,
    ) -> LabelBox {
        let size = self.measure.measure(text);
        let width = size.width + self.padding;
        let height = size.height + self.padding;

        let shape = day_shape(boundaries);
        let middle = match shape {
            DayShape::Span(span) => frame.x_at(span.middle()),
            DayShape::Night | DayShape::Day => frame.x_at(0.5),
        };

        let left = marker.x < middle;
        let (raw_x, overflow) = if left {
            let x = marker.x - size.width;
            (x, x < 0.0)
        } else {
            (marker.x, marker.x + width > frame.width)
        };
        let x = raw_x.min(frame.width - width).max(0.0);

        let y = if overflow {
            frame.y - self.overflow_lift
        } else {
            let edge = if left { x + size.width } else { x };
            curve_height(frame, &shape, frame.fraction_at(edge)) - self.lift
        };

        LabelBox {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::DayBoundaries;
    use crate::geometry::marker_position;
    use crate::instant::{Instant, UtcOffset};
    use qtty::Seconds;

    const FRAME: FrameRect = FrameRect::new(2.0, 0.0, 296.0, 25.0);

    fn midnight() -> Instant {
        Instant::from_unix_seconds(1_717_200_000.0)
    }

    fn at_hours(h: f64) -> Instant {
        midnight() + Seconds::new(h * 3600.0)
    }

    fn bounds(start: f64, end: f64) -> ExtendedBoundaries {
        ExtendedBoundaries::new(
            DayBoundaries::known(at_hours(start), at_hours(end)),
            UtcOffset::UTC,
            midnight(),
        )
    }

    fn placer() -> LabelPlacer<FixedAdvance> {
        LabelPlacer::new(FixedAdvance::default(), &LineStyle::default())
    }

    #[test]
    fn fixed_advance_counts_chars() {
        let m = FixedAdvance {
            advance: 10.0,
            line_height: 18.0,
        };
        assert_eq!(
            m.measure("9:41 AM"),
            TextSize {
                width: 70.0,
                height: 18.0
            }
        );
    }

    #[test]
    fn morning_label_goes_left_of_marker() {
        let b = bounds(6.0, 18.0);
        let marker = marker_position(FRAME, &b, at_hours(10.0));
        let text = "10:00 AM";
        let label = placer().place(FRAME, marker, text, &b);
        let text_width = FixedAdvance::default().measure(text).width;
        assert!((label.x - (marker.x - text_width)).abs() < 1e-9);
        assert!((label.y - (marker.y - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn afternoon_label_goes_right_of_marker() {
        let b = bounds(6.0, 18.0);
        let marker = marker_position(FRAME, &b, at_hours(14.0));
        let label = placer().place(FRAME, marker, "2:00 PM", &b);
        assert_eq!(label.x, marker.x);
        assert!((label.y - (marker.y - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn overflow_lifts_label_above_frame() {
        let b = bounds(6.0, 18.0);
        let early = marker_position(FRAME, &b, at_hours(0.5));
        let label = placer().place(FRAME, early, "12:30 AM", &b);
        assert_eq!(label.x, 0.0);
        assert_eq!(label.y, FRAME.y - 25.0);

        let late = marker_position(FRAME, &b, at_hours(23.5));
        let label = placer().place(FRAME, late, "11:30 PM", &b);
        assert_eq!(label.y, FRAME.y - 25.0);
        assert!((label.x - (FRAME.width - label.width)).abs() < 1e-9);
    }

    #[test]
    fn marker_within_padding_of_right_edge_overflows() {
        let b = bounds(6.0, 18.0);
        let text = "2:00 PM";
        let text_width = FixedAdvance::default().measure(text).width;
        // The bare text fits, the padded box does not.
        let marker = Point::new(FRAME.width - text_width - 2.0, 10.0);
        let label = placer().place(FRAME, marker, text, &b);
        assert_eq!(label.y, FRAME.y - 25.0);
        assert!((label.x - (FRAME.width - label.width)).abs() < 1e-9);
    }

    #[test]
    fn night_uses_frame_middle() {
        let b = ExtendedBoundaries::unknown(UtcOffset::UTC, midnight());
        let marker = marker_position(FRAME, &b, at_hours(9.0));
        let label = placer().place(FRAME, marker, "9:00 AM", &b);
        // Left of the middle, on the baseline.
        assert!(label.x < marker.x);
        assert!((label.y - (FRAME.baseline() - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn label_box_is_padded() {
        let b = bounds(6.0, 18.0);
        let marker = marker_position(FRAME, &b, at_hours(12.0));
        let size = FixedAdvance::default().measure("12:00 PM");
        let label = placer().place(FRAME, marker, "12:00 PM", &b);
        assert_eq!(label.width, size.width + 5.0);
        assert_eq!(label.height, size.height + 5.0);
    }
}

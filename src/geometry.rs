// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Day curve and marker geometry.
//!
//! The horizontal axis is the local day: `x = frame.x + fraction · frame.width`.
//! The vertical axis has the night baseline at the bottom of the frame
//! (`frame.y + frame.height`) and the curve peak at the top (`frame.y`).
//!
//! | Shape               | Curve                        | Marker               |
//! |---------------------|------------------------------|----------------------|
//! | [`DayShape::Night`] | flat baseline                | on the baseline      |
//! | [`DayShape::Day`]   | flat line at the top         | at the top           |
//! | [`DayShape::Span`]  | baseline, two Béziers, baseline | parabola inside the span |
//!
//! The Bézier path is what gets drawn; the marker height comes from a
//! parabola with the same roots and peak, cheap to evaluate every second.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::boundary::{Boundary, ExtendedBoundaries};
use crate::instant::Instant;

// ═══════════════════════════════════════════════════════════════════════════
// Primitives
// ═══════════════════════════════════════════════════════════════════════════

/// A point in drawing coordinates (y grows downward).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle the curve is drawn into.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FrameRect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge: the curve peak.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge: the night baseline.
    #[inline]
    pub fn baseline(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Horizontal position of a (possibly extended) day fraction.
    #[inline]
    pub fn x_at(&self, fraction: f64) -> f64 {
        self.x + self.width * fraction
    }

    /// Day fraction under the horizontal position `x`; `0` for an empty frame.
    #[inline]
    pub fn fraction_at(&self, x: f64) -> f64 {
        if self.width > 0.0 {
            (x - self.x) / self.width
        } else {
            0.0
        }
    }
}

/// One drawing command of a [`CurvePath`].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bézier from the current point.
    CurveTo {
        to: Point,
        control1: Point,
        control2: Point,
    },
}

impl PathSegment {
    /// End point of the segment.
    #[inline]
    pub const fn end(&self) -> Point {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => *p,
            Self::CurveTo { to, .. } => *to,
        }
    }
}

/// A renderer-agnostic vector path.
///
/// Segments may extend horizontally past the frame when a boundary lies on
/// an adjacent day; renderers are expected to clip to the frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurvePath {
    segments: Vec<PathSegment>,
}

impl CurvePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, to: Point) {
        self.segments.push(PathSegment::MoveTo(to));
    }

    pub fn line_to(&mut self, to: Point) {
        self.segments.push(PathSegment::LineTo(to));
    }

    pub fn curve_to(&mut self, to: Point, control1: Point, control2: Point) {
        self.segments.push(PathSegment::CurveTo {
            to,
            control1,
            control2,
        });
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Current point, i.e. the end of the last segment.
    pub fn current(&self) -> Option<Point> {
        self.segments.last().map(PathSegment::end)
    }

    /// Every point in the path, control points included.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().flat_map(|segment| {
            let points: [Option<Point>; 3] = match *segment {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => [Some(p), None, None],
                PathSegment::CurveTo {
                    to,
                    control1,
                    control2,
                } => [Some(control1), Some(control2), Some(to)],
            };
            points.into_iter().flatten()
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Shape classification
// ═══════════════════════════════════════════════════════════════════════════

/// A drawable day span in extended fractions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Span {
    pub start: f64,
    pub end: f64,
    /// Previous day's end, when it falls inside `(0, start]`.
    pub pre_end: Option<f64>,
    /// Next day's start, when it falls inside `[end, 1)`.
    pub post_start: Option<f64>,
}

impl Span {
    /// Midpoint of the main span.
    #[inline]
    pub fn middle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// How a day renders, derived from [`ExtendedBoundaries`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DayShape {
    /// Flat baseline: unknown boundaries or an empty span.
    Night,
    /// Flat line at the top: the span covers the whole visible day.
    Day,
    Span(Span),
}

/// Classify the boundaries.
///
/// Unknown, non-finite or inverted boundaries give [`DayShape::Night`]; a
/// span starting before and ending after today gives [`DayShape::Day`].
pub fn day_shape(boundaries: &ExtendedBoundaries) -> DayShape {
    let (start, end) = match (boundaries.day.start, boundaries.day.end) {
        (Boundary::Known(s), Boundary::Known(e)) => {
            (boundaries.fraction_of(s), boundaries.fraction_of(e))
        }
        _ => return DayShape::Night,
    };
    if !start.is_finite() || !end.is_finite() {
        return DayShape::Night;
    }
    if start < 0.0 && end > 1.0 {
        return DayShape::Day;
    }
    if end <= start {
        return DayShape::Night;
    }

    let pre_end = boundaries
        .fraction_of_boundary(boundaries.pre_end)
        .filter(|pe| *pe > 0.0 && *pe <= start);
    let post_start = boundaries
        .fraction_of_boundary(boundaries.post_start)
        .filter(|ps| *ps >= end && *ps < 1.0);

    DayShape::Span(Span {
        start,
        end,
        pre_end,
        post_start,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Curve
// ═══════════════════════════════════════════════════════════════════════════

/// Build the day/night curve inside `frame`.
///
/// Every point of the path, control points included, has `y` within
/// `[frame.top(), frame.baseline()]`.
pub fn build_curve(frame: FrameRect, boundaries: &ExtendedBoundaries) -> CurvePath {
    let mut path = CurvePath::new();
    let top = frame.top();
    let base = frame.baseline();

    match day_shape(boundaries) {
        DayShape::Night => {
            path.move_to(Point::new(frame.x, base));
            path.line_to(Point::new(frame.max_x(), base));
        }
        DayShape::Day => {
            path.move_to(Point::new(frame.x, top));
            path.line_to(Point::new(frame.max_x(), top));
        }
        DayShape::Span(span) => {
            let x = |fraction: f64| frame.x_at(fraction);
            let (s, e) = (span.start, span.end);

            // Tail of the previous day's curve, mirrored around the left edge.
            match span.pre_end {
                Some(pe) => {
                    path.move_to(Point::new(x(0.0), top));
                    path.curve_to(
                        Point::new(x(pe), base),
                        Point::new(x(0.6 * pe), top),
                        Point::new(x(pe), base),
                    );
                }
                None => path.move_to(Point::new(x(s.min(0.0)), base)),
            }
            if path.current().is_some_and(|p| p.x < x(s)) {
                path.line_to(Point::new(x(s), base));
            }

            let width = e - s;
            path.curve_to(
                Point::new(x(s + width / 2.0), top),
                Point::new(x(s), base),
                Point::new(x(s + width / 5.0), top),
            );
            path.curve_to(
                Point::new(x(e), base),
                Point::new(x(s + width * 4.0 / 5.0), top),
                Point::new(x(e), base),
            );

            // Head of the next day's curve, mirrored around the right edge.
            match span.post_start {
                Some(ps) => {
                    if ps > e {
                        path.line_to(Point::new(x(ps), base));
                    }
                    path.curve_to(
                        Point::new(x(1.0), top),
                        Point::new(x(ps), base),
                        Point::new(x(ps + 0.4 * (1.0 - ps)), top),
                    );
                }
                None if e < 1.0 => path.line_to(Point::new(x(1.0), base)),
                None => {}
            }
        }
    }
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// Marker
// ═══════════════════════════════════════════════════════════════════════════

/// Height of a parabola through the baseline at `anchor` and `anchor + span`
/// (fractions) with its vertex on the frame top, evaluated at `t`.
///
/// Degenerate spans give the baseline. The result is clamped into the frame.
pub fn parabola_height(frame: FrameRect, anchor: f64, span: f64, t: f64) -> f64 {
    let base = frame.baseline();
    let w = frame.width * span;
    if !w.is_finite() || w <= 0.0 {
        return base;
    }
    let x1 = frame.width * anchor;
    let c = base;
    let b = -4.0 * frame.height / w;
    let a = -b / w;
    let x = frame.width * t - x1;
    let y = a * x * x + b * x + c;
    if y.is_nan() {
        return base;
    }
    y.max(frame.top()).min(base)
}

/// Curve height for the day fraction `t` of a classified shape.
pub fn curve_height(frame: FrameRect, shape: &DayShape, t: f64) -> f64 {
    match shape {
        DayShape::Night => frame.baseline(),
        DayShape::Day => frame.top(),
        DayShape::Span(span) => {
            if t > span.start && t < span.end {
                parabola_height(frame, span.start, span.end - span.start, t)
            } else if let Some(pe) = span.pre_end.filter(|pe| t < *pe) {
                parabola_height(frame, -pe, 2.0 * pe, t)
            } else if let Some(ps) = span.post_start.filter(|ps| t > *ps) {
                parabola_height(frame, ps, 2.0 * (1.0 - ps), t)
            } else {
                frame.baseline()
            }
        }
    }
}

/// Position of the "now" marker.
///
/// `x = frame.x + frame.width · t` with `t` the local time of day of `now`;
/// on the curve inside a day span, on the baseline otherwise.
pub fn marker_position(frame: FrameRect, boundaries: &ExtendedBoundaries, now: Instant) -> Point {
    let t = boundaries.now_fraction(now);
    let shape = day_shape(boundaries);
    Point::new(frame.x_at(t), curve_height(frame, &shape, t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::DayBoundaries;
    use crate::instant::UtcOffset;
    use qtty::Seconds;

    const FRAME: FrameRect = FrameRect::new(2.0, 0.0, 296.0, 25.0);

    /// Midnight of 2024-06-01 UTC.
    fn midnight() -> Instant {
        Instant::from_unix_seconds(1_717_200_000.0)
    }

    fn at_hours(h: f64) -> Instant {
        midnight() + Seconds::new(h * 3600.0)
    }

    fn bounds(start: Option<f64>, end: Option<f64>) -> ExtendedBoundaries {
        ExtendedBoundaries::new(
            DayBoundaries::new(start.map(at_hours), end.map(at_hours)),
            UtcOffset::UTC,
            midnight(),
        )
    }

    fn assert_within_frame(path: &CurvePath) {
        for p in path.points() {
            assert!(
                p.y >= FRAME.top() - 1e-9 && p.y <= FRAME.baseline() + 1e-9,
                "{p:?} escapes the frame"
            );
        }
    }

    #[test]
    fn unknown_boundaries_draw_flat_baseline() {
        for b in [bounds(None, None), bounds(Some(6.0), None), bounds(None, Some(18.0))] {
            let path = build_curve(FRAME, &b);
            assert!(path.points().all(|p| p.y == FRAME.baseline()));
            let marker = marker_position(FRAME, &b, at_hours(12.0));
            assert_eq!(marker.y, FRAME.baseline());
        }
    }

    #[test]
    fn inverted_span_is_night() {
        let b = bounds(Some(18.0), Some(6.0));
        assert_eq!(day_shape(&b), DayShape::Night);
        let equal = bounds(Some(12.0), Some(12.0));
        assert_eq!(day_shape(&equal), DayShape::Night);
    }

    #[test]
    fn full_day_is_flat_at_top() {
        let b = bounds(Some(-30.0), Some(60.0));
        assert_eq!(day_shape(&b), DayShape::Day);
        let path = build_curve(FRAME, &b);
        assert!(path.points().all(|p| p.y == FRAME.y));
        assert_eq!(marker_position(FRAME, &b, at_hours(3.0)).y, FRAME.y);
    }

    #[test]
    fn regular_day_curve_shape() {
        let b = bounds(Some(6.0), Some(18.0));
        let path = build_curve(FRAME, &b);
        assert_within_frame(&path);

        let segments = path.segments();
        assert_eq!(segments[0], PathSegment::MoveTo(Point::new(FRAME.x, FRAME.baseline())));
        assert_eq!(
            segments[1],
            PathSegment::LineTo(Point::new(FRAME.x_at(0.25), FRAME.baseline()))
        );
        match segments[2] {
            PathSegment::CurveTo { to, control1, control2 } => {
                assert_eq!(to, Point::new(FRAME.x_at(0.5), FRAME.top()));
                assert_eq!(control1, Point::new(FRAME.x_at(0.25), FRAME.baseline()));
                assert!((control2.x - FRAME.x_at(0.25 + 0.5 / 5.0)).abs() < 1e-9);
            }
            other => panic!("expected rising curve, got {other:?}"),
        }
        assert_eq!(
            segments.last(),
            Some(&PathSegment::LineTo(Point::new(FRAME.max_x(), FRAME.baseline())))
        );
    }

    #[test]
    fn marker_peaks_mid_span_and_touches_baseline_at_edges() {
        let b = bounds(Some(6.0), Some(18.0));
        let noon = marker_position(FRAME, &b, at_hours(12.0));
        assert!((noon.y - FRAME.top()).abs() < 1e-9);
        assert!((noon.x - FRAME.x_at(0.5)).abs() < 1e-9);

        assert_eq!(marker_position(FRAME, &b, at_hours(6.0)).y, FRAME.baseline());
        assert_eq!(marker_position(FRAME, &b, at_hours(18.0)).y, FRAME.baseline());
        assert_eq!(marker_position(FRAME, &b, at_hours(3.0)).y, FRAME.baseline());

        let morning = marker_position(FRAME, &b, at_hours(9.0));
        assert!(morning.y > FRAME.top() && morning.y < FRAME.baseline());
    }

    #[test]
    fn working_day_marker_at_one_thirty() {
        // 09:00–18:00, now 13:30: exactly mid-span.
        let b = bounds(Some(9.0), Some(18.0));
        let marker = marker_position(FRAME, &b, at_hours(13.5));
        assert!((marker.x - FRAME.x_at(0.5625)).abs() < 1e-9);
        assert!((marker.y - FRAME.top()).abs() < 1e-9);
    }

    #[test]
    fn carry_over_on_both_sides() {
        let b = bounds(Some(8.0), Some(26.0)).with_carry_over(
            Boundary::Known(at_hours(2.0)),
            Boundary::Unknown,
        );
        let shape = day_shape(&b);
        let DayShape::Span(span) = shape else {
            panic!("expected a span, got {shape:?}");
        };
        assert!((span.pre_end.unwrap() - 2.0 / 24.0).abs() < 1e-12);
        assert_eq!(span.post_start, None);

        let path = build_curve(FRAME, &b);
        assert_within_frame(&path);
        assert_eq!(path.segments()[0], PathSegment::MoveTo(Point::new(FRAME.x, FRAME.top())));

        // At midnight the previous day's curve is at its peak.
        let midnight_marker = marker_position(FRAME, &b, midnight());
        assert!((midnight_marker.y - FRAME.top()).abs() < 1e-9);
        // Between the carried-over end and today's start: night.
        assert_eq!(marker_position(FRAME, &b, at_hours(5.0)).y, FRAME.baseline());
    }

    #[test]
    fn post_start_ends_at_top_right() {
        let b = bounds(Some(-2.0), Some(10.0)).with_carry_over(
            Boundary::Unknown,
            Boundary::Known(at_hours(22.0)),
        );
        let path = build_curve(FRAME, &b);
        assert_within_frame(&path);
        assert_eq!(
            path.current(),
            Some(Point::new(FRAME.max_x(), FRAME.top()))
        );
        let late = marker_position(FRAME, &b, at_hours(23.0));
        assert!(late.y < FRAME.baseline());
    }

    #[test]
    fn out_of_window_carry_over_is_ignored() {
        let b = bounds(Some(6.0), Some(18.0)).with_carry_over(
            Boundary::Known(at_hours(-5.0)),
            Boundary::Known(at_hours(30.0)),
        );
        let DayShape::Span(span) = day_shape(&b) else {
            panic!("expected a span");
        };
        assert_eq!(span.pre_end, None);
        assert_eq!(span.post_start, None);
    }

    #[test]
    fn parabola_guards_degenerate_spans() {
        assert_eq!(parabola_height(FRAME, 0.3, 0.0, 0.3), FRAME.baseline());
        assert_eq!(parabola_height(FRAME, 0.3, f64::NAN, 0.3), FRAME.baseline());
        let empty = FrameRect::new(0.0, 0.0, 0.0, 25.0);
        assert_eq!(parabola_height(empty, 0.2, 0.5, 0.4), empty.baseline());
        // Outside the roots the parabola is clamped back onto the baseline.
        assert_eq!(parabola_height(FRAME, 0.25, 0.5, 0.9), FRAME.baseline());
    }

    #[test]
    fn fraction_at_inverts_x_at() {
        assert!((FRAME.fraction_at(FRAME.x_at(0.3)) - 0.3).abs() < 1e-12);
        assert_eq!(FrameRect::default().fraction_at(10.0), 0.0);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Visual constants of a day line.
//!
//! [`LineStyle`] groups every tunable of the renderer. With the `serde`
//! feature it can be loaded from a settings file; missing fields take the
//! defaults below.
//!
//! | Field                 | Default | Meaning                                    |
//! |-----------------------|---------|--------------------------------------------|
//! | `line_width`          | 2       | stroke width, also the frame inset         |
//! | `max_height`          | 25      | tallest curve, in points                   |
//! | `font_size`           | 15      | label font                                 |
//! | `label_lift`          | 20      | gap between curve and label                |
//! | `label_overflow_lift` | 25      | label offset above the frame on overflow   |
//! | `label_padding`       | 5       | extra width/height of the label box        |
//! | `time_format`         | 12 h    | label clock style                          |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::format::TimeFormat;
use crate::geometry::FrameRect;

/// Rendering constants.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LineStyle {
    pub line_width: f64,
    pub max_height: f64,
    pub font_size: f64,
    pub label_lift: f64,
    pub label_overflow_lift: f64,
    pub label_padding: f64,
    pub time_format: TimeFormat,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            max_height: 25.0,
            font_size: 15.0,
            label_lift: 20.0,
            label_overflow_lift: 25.0,
            label_padding: 5.0,
            time_format: TimeFormat::TwelveHour,
        }
    }
}

impl LineStyle {
    /// Reject non-finite or non-positive sizes.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("line_width", self.line_width),
            ("max_height", self.max_height),
            ("font_size", self.font_size),
            ("label_lift", self.label_lift),
            ("label_overflow_lift", self.label_overflow_lift),
            ("label_padding", self.label_padding),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidStyle { field, value });
            }
        }
        Ok(())
    }

    /// Curve frame inside a view of `width × height`.
    ///
    /// Inset by the line width horizontally; the curve height is capped at
    /// `max_height` and centred vertically once the cap applies.
    pub fn line_frame(&self, width: f64, height: f64) -> FrameRect {
        let inset = self.line_width;
        let length = (width - 2.0 * inset).max(0.0);
        let curve_height = (height - 2.0 * inset).min(self.max_height).max(0.0);
        let y = if curve_height >= self.max_height {
            (height - curve_height) / 2.0
        } else {
            inset
        };
        FrameRect::new(inset, y, length, curve_height)
    }

    /// Radius of the "now" marker circle.
    #[inline]
    pub fn marker_radius(&self) -> f64 {
        self.line_width * 1.5
    }
}

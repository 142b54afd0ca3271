// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Text shown around a day line: the local time label and the offset
//! difference from the viewer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::instant::{Instant, UtcOffset};

/// Clock style of the time label.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeFormat {
    /// `1:30 PM`
    #[default]
    TwelveHour,
    /// `13:30`
    TwentyFourHour,
}

impl TimeFormat {
    const fn pattern(self) -> &'static str {
        match self {
            Self::TwelveHour => "%-I:%M %p",
            Self::TwentyFourHour => "%H:%M",
        }
    }
}

/// Short local time of `instant` in the zone `offset`.
///
/// Empty when the instant cannot be represented as a calendar date.
pub fn short_time(instant: Instant, offset: UtcOffset, format: TimeFormat) -> String {
    match instant.to_local(offset) {
        Some(local) => local.format(format.pattern()).to_string(),
        None => String::new(),
    }
}

/// Signed hour difference of `offset` relative to `viewer`, e.g. `+2HRS`,
/// `-3.5HRS`, `+0HRS`. Rounded to two significant digits.
pub fn time_difference(offset: UtcOffset, viewer: UtcOffset) -> String {
    let seconds = offset.difference_from(viewer).seconds();
    let hours = f64::from(seconds) / 3600.0;
    let sign = if seconds < 0 { "-" } else { "+" };
    format!("{sign}{}HRS", significant(hours.abs(), 2))
}

/// `value` (non-negative) with at most `digits` significant digits and no
/// trailing zeros.
fn significant(value: f64, digits: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_owned();
    }
    let magnitude = value.log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    let text = format!("{value:.decimals$}");
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        text
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The record a day line is drawn for.

use chrono::NaiveTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::boundary::CustomTimes;
use crate::instant::UtcOffset;
use crate::solar::Coordinate;

/// A person or place: a zone, optionally a position and custom day times.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contact {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location_name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub coordinate: Option<Coordinate>,
    pub offset: UtcOffset,
    /// Local wall-clock time the day starts, overriding sunrise.
    #[cfg_attr(feature = "serde", serde(default))]
    pub custom_start: Option<NaiveTime>,
    /// Local wall-clock time the day ends, overriding sunset.
    #[cfg_attr(feature = "serde", serde(default))]
    pub custom_end: Option<NaiveTime>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub favorite: bool,
}

impl Contact {
    pub fn new(name: impl Into<String>, offset: UtcOffset) -> Self {
        Self {
            name: name.into(),
            location_name: None,
            coordinate: None,
            offset,
            custom_start: None,
            custom_end: None,
            tags: Vec::new(),
            favorite: false,
        }
    }

    pub fn with_location(mut self, name: impl Into<String>, coordinate: Coordinate) -> Self {
        self.location_name = Some(name.into());
        self.coordinate = Some(coordinate);
        self
    }

    pub fn with_custom_times(mut self, start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        self.custom_start = start;
        self.custom_end = end;
        self
    }

    /// The default working day, 09:00 to 18:00.
    pub fn with_working_hours(self) -> Self {
        self.with_custom_times(NaiveTime::from_hms_opt(9, 0, 0), NaiveTime::from_hms_opt(18, 0, 0))
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    #[inline]
    pub fn custom_times(&self) -> CustomTimes {
        CustomTimes::new(self.custom_start, self.custom_end)
    }

    /// `true` when the contact carries a tag, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

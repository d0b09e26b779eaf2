use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::services::format::DisplayZone;
use crate::source::Reading;

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Report time-range selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
}

impl TimeRange {
    pub const ALL: [Self; 3] = [Self::Day, Self::Week, Self::Month];

    /// Trailing window length in days.
    #[must_use]
    pub fn days(self) -> i64 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Day => "24h",
            Self::Week => "7d",
            Self::Month => "30d",
        }
    }

    /// Label shown in the selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Past 24 Hours",
            Self::Week => "Past 7 Days",
            Self::Month => "Past 30 Days",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid range: {0}. Must be one of: 24h, 7d, 30d")]
pub struct InvalidRange(pub String);

impl FromStr for TimeRange {
    type Err = InvalidRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.key() == s)
            .ok_or_else(|| InvalidRange(s.to_string()))
    }
}

/// Readings within `window_days` of the last reading, in their original order.
///
/// The window is anchored at the last element's timestamp and spans
/// `[latest - window_days, latest]`, both edges inclusive. Readings whose
/// timestamp cannot be parsed never match; if the last one cannot be parsed
/// the result is empty. A window reaching past the representable range of
/// instants has no lower edge.
#[must_use]
pub fn filter_by_window(readings: &[Reading], window_days: i64, zone: &DisplayZone) -> Vec<Reading> {
    let Some(latest) = readings.last().and_then(|r| zone.parse(&r.timestamp)) else {
        return Vec::new();
    };
    let window_start = window_days
        .checked_mul(MILLIS_PER_DAY)
        .and_then(TimeDelta::try_milliseconds)
        .and_then(|span| latest.checked_sub_signed(span));

    readings
        .iter()
        .filter(|r| {
            zone.parse(&r.timestamp)
                .is_some_and(|ts| window_start.is_none_or(|start| ts >= start) && ts <= latest)
        })
        .cloned()
        .collect()
}

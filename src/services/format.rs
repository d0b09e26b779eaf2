//! Timestamp parsing and label formatting.
//!
//! All wall-clock arithmetic happens in an explicit [`DisplayZone`] so labels
//! do not depend on the host's local time zone.

use chrono::{
    Datelike, DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc,
};

use crate::services::window::TimeRange;

/// Placeholder produced for timestamps that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Fixed UTC offset used to render wall-clock labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayZone(FixedOffset);

impl Default for DisplayZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl DisplayZone {
    #[must_use]
    pub fn new(offset: FixedOffset) -> Self {
        Self(offset)
    }

    #[must_use]
    pub fn utc() -> Self {
        Self(Utc.fix())
    }

    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.0
    }

    /// Parse a source timestamp into an instant expressed in this zone.
    ///
    /// Timestamps carrying an offset are converted; naive date-times are
    /// taken as wall-clock time in this zone; bare dates are UTC midnight.
    #[must_use]
    pub fn parse(&self, ts: &str) -> Option<DateTime<FixedOffset>> {
        let ts = ts.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
            return Some(dt.with_timezone(&self.0));
        }

        // Minute precision with an offset, which RFC 3339 rejects
        if let Ok(dt) = DateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M%#z") {
            return Some(dt.with_timezone(&self.0));
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(ts, format) {
                return self.0.from_local_datetime(&naive).single();
            }
        }

        NaiveDate::parse_from_str(ts, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(&self.0))
    }

    /// `"1:05 PM, 3 Jun"`: 12-hour clock, padded minutes, unpadded day.
    #[must_use]
    pub fn format_long(&self, ts: &str) -> String {
        let Some(dt) = self.parse(ts) else {
            return INVALID_DATE.to_string();
        };

        let (is_pm, hour12) = dt.hour12();
        format!(
            "{}:{:02} {}, {} {}",
            hour12,
            dt.minute(),
            if is_pm { "PM" } else { "AM" },
            dt.day(),
            dt.format("%b")
        )
    }

    /// Axis label for the given range: `"13:05"` for 24h, `"3 Jun"` otherwise.
    #[must_use]
    pub fn format_short(&self, ts: &str, range: TimeRange) -> String {
        let Some(dt) = self.parse(ts) else {
            return INVALID_DATE.to_string();
        };

        match range {
            TimeRange::Day => format!("{}:{:02}", dt.hour(), dt.minute()),
            TimeRange::Week | TimeRange::Month => format!("{} {}", dt.day(), dt.format("%b")),
        }
    }
}

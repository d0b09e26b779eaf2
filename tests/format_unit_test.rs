//! Unit tests for timestamp parsing and label formatting.
//!
//! Run with: cargo test --test format_unit_test

use chrono::FixedOffset;

use enviro_dash::services::format::{DisplayZone, INVALID_DATE};
use enviro_dash::services::TimeRange;

fn zone(offset_secs: i32) -> DisplayZone {
    DisplayZone::new(FixedOffset::east_opt(offset_secs).unwrap())
}

#[test]
fn long_format_uses_twelve_hour_clock() {
    let utc = DisplayZone::utc();

    assert_eq!(utc.format_long("2024-06-03T13:05:00"), "1:05 PM, 3 Jun");
    assert_eq!(utc.format_long("2024-06-03T00:07:00"), "12:07 AM, 3 Jun");
    assert_eq!(utc.format_long("2024-06-03T12:00:00"), "12:00 PM, 3 Jun");
    assert_eq!(utc.format_long("2024-12-25T09:30:00Z"), "9:30 AM, 25 Dec");
}

#[test]
fn short_format_depends_on_range() {
    let utc = DisplayZone::utc();

    assert_eq!(utc.format_short("2024-06-03T13:05:00", TimeRange::Day), "13:05");
    assert_eq!(utc.format_short("2024-06-03T09:05:00", TimeRange::Day), "9:05");
    assert_eq!(utc.format_short("2024-06-03T00:00:00", TimeRange::Day), "0:00");
    assert_eq!(utc.format_short("2024-06-03T13:05:00", TimeRange::Week), "3 Jun");
    assert_eq!(utc.format_short("2024-06-03T13:05:00", TimeRange::Month), "3 Jun");
}

#[test]
fn offset_timestamps_are_shown_in_display_zone() {
    let cest = zone(2 * 3600);

    assert_eq!(cest.format_long("2024-06-03T11:05:00Z"), "1:05 PM, 3 Jun");
    assert_eq!(cest.format_long("2024-06-03T11:05:00.000+00:00"), "1:05 PM, 3 Jun");
    // Late evening UTC rolls over to the next day
    assert_eq!(cest.format_short("2024-06-03T23:30:00Z", TimeRange::Week), "4 Jun");
}

#[test]
fn minute_precision_offset_timestamps_are_parsed() {
    let utc = DisplayZone::utc();
    let cest = zone(2 * 3600);

    assert_eq!(utc.format_long("2024-06-03T13:05Z"), "1:05 PM, 3 Jun");
    assert_eq!(utc.format_short("2024-06-03T15:05+02:00", TimeRange::Day), "13:05");
    assert_eq!(cest.format_long("2024-06-03T11:05Z"), "1:05 PM, 3 Jun");
}

#[test]
fn naive_timestamps_are_wall_clock_in_display_zone() {
    let cest = zone(2 * 3600);

    assert_eq!(cest.format_long("2024-06-03T13:05:00"), "1:05 PM, 3 Jun");
    assert_eq!(cest.format_long("2024-06-03 13:05"), "1:05 PM, 3 Jun");

    let parsed = cest.parse("2024-06-03T13:05:00").unwrap();
    assert_eq!(parsed.to_rfc3339(), "2024-06-03T13:05:00+02:00");
}

#[test]
fn date_only_timestamps_are_utc_midnight() {
    let eastern = zone(-5 * 3600);

    assert_eq!(eastern.format_long("2024-06-03"), "7:00 PM, 2 Jun");
    assert_eq!(DisplayZone::utc().format_long("2024-06-03"), "12:00 AM, 3 Jun");
}

#[test]
fn unparsable_timestamps_format_as_invalid_date() {
    let utc = DisplayZone::utc();

    assert!(utc.parse("t1").is_none());
    assert!(utc.parse("").is_none());
    assert_eq!(utc.format_long("t1"), INVALID_DATE);
    assert_eq!(utc.format_short("not a date", TimeRange::Day), INVALID_DATE);
    assert_eq!(utc.format_short("2024-13-40T00:00:00", TimeRange::Week), INVALID_DATE);
}

//! Unit tests for time-range selection and window filtering.
//!
//! Run with: cargo test --test window_unit_test

use chrono::{DateTime, TimeDelta, Utc};

use enviro_dash::services::window::{filter_by_window, TimeRange, MILLIS_PER_DAY};
use enviro_dash::services::DisplayZone;
use enviro_dash::source::Reading;

fn reading(timestamp: &str, humidity: f64) -> Reading {
    Reading::new(timestamp, humidity, 20.0, 30.0)
}

/// One reading every six hours for `days` days, ending 2024-06-30T12:00Z.
fn six_hourly(days: i64) -> Vec<Reading> {
    let end: DateTime<Utc> = "2024-06-30T12:00:00Z".parse().unwrap();
    let count = days * 4;
    (0..=count)
        .map(|i| {
            let ts = end - TimeDelta::hours(6 * (count - i));
            reading(&ts.to_rfc3339(), i as f64)
        })
        .collect()
}

fn is_subsequence(inner: &[Reading], outer: &[Reading]) -> bool {
    let mut outer = outer.iter();
    inner.iter().all(|r| outer.any(|o| o == r))
}

#[test]
fn millis_per_day_is_explicit() {
    assert_eq!(MILLIS_PER_DAY, 86_400_000);
    assert_eq!(TimeDelta::milliseconds(MILLIS_PER_DAY), TimeDelta::days(1));
}

#[test]
fn empty_input_yields_empty_output() {
    let zone = DisplayZone::utc();
    for range in TimeRange::ALL {
        assert!(filter_by_window(&[], range.days(), &zone).is_empty());
    }
}

#[test]
fn lower_edge_is_inclusive() {
    let readings = vec![
        reading("2024-06-02T11:59:59.999Z", 1.0),
        reading("2024-06-02T12:00:00.000Z", 2.0),
        reading("2024-06-03T12:00:00Z", 3.0),
    ];

    let filtered = filter_by_window(&readings, 1, &DisplayZone::utc());

    assert_eq!(filtered, readings[1..].to_vec());
}

#[test]
fn latest_reading_is_always_included() {
    let readings = vec![reading("2024-06-03T12:00:00Z", 7.0)];

    assert_eq!(filter_by_window(&readings, 1, &DisplayZone::utc()), readings);
}

#[test]
fn windows_nest_and_stay_within_bounds() {
    let zone = DisplayZone::utc();
    let readings = six_hourly(40);
    let latest = zone.parse(&readings.last().unwrap().timestamp).unwrap();

    let day = filter_by_window(&readings, 1, &zone);
    let week = filter_by_window(&readings, 7, &zone);
    let month = filter_by_window(&readings, 30, &zone);

    assert_eq!(day.len(), 5);
    assert_eq!(week.len(), 29);
    assert_eq!(month.len(), 121);

    assert!(is_subsequence(&day, &week));
    assert!(is_subsequence(&week, &month));
    assert!(is_subsequence(&month, &readings));

    for (days, window) in [(1, &day), (7, &week), (30, &month)] {
        let start = latest - TimeDelta::days(days);
        for r in window {
            let ts = zone.parse(&r.timestamp).unwrap();
            assert!(ts >= start && ts <= latest, "{} outside {days}d window", r.timestamp);
        }
    }
}

#[test]
fn order_is_preserved_without_duplicates() {
    let readings = six_hourly(3);
    let filtered = filter_by_window(&readings, 7, &DisplayZone::utc());

    assert_eq!(filtered, readings);
}

#[test]
fn readings_after_latest_are_excluded() {
    let readings = vec![
        reading("2024-06-03T18:00:00Z", 1.0),
        reading("2024-06-03T10:00:00Z", 2.0),
        reading("2024-06-03T12:00:00Z", 3.0),
    ];

    let filtered = filter_by_window(&readings, 1, &DisplayZone::utc());

    assert_eq!(filtered, readings[1..].to_vec());
}

#[test]
fn unparsable_timestamps_are_excluded() {
    let zone = DisplayZone::utc();
    let readings = vec![
        reading("2024-06-03T10:00:00Z", 1.0),
        reading("garbage", 2.0),
        reading("2024-06-03T12:00:00Z", 3.0),
    ];

    let filtered = filter_by_window(&readings, 1, &zone);
    assert_eq!(filtered, vec![readings[0].clone(), readings[2].clone()]);

    // Without a parsable anchor there is no window
    let unanchored = vec![reading("2024-06-03T10:00:00Z", 1.0), reading("t1", 2.0)];
    assert!(filter_by_window(&unanchored, 30, &zone).is_empty());
}

#[test]
fn time_range_keys_round_trip() {
    assert_eq!(TimeRange::default(), TimeRange::Day);
    assert_eq!("24h".parse::<TimeRange>().unwrap(), TimeRange::Day);
    assert_eq!("7d".parse::<TimeRange>().unwrap(), TimeRange::Week);
    assert_eq!("30d".parse::<TimeRange>().unwrap(), TimeRange::Month);
    assert!("1y".parse::<TimeRange>().is_err());
    assert!("7D".parse::<TimeRange>().is_err());

    assert_eq!(
        TimeRange::ALL.map(TimeRange::days),
        [1, 7, 30]
    );
    assert_eq!(TimeRange::Week.label(), "Past 7 Days");
    assert_eq!(serde_json::to_string(&TimeRange::Month).unwrap(), r#""30d""#);
}

#[test]
fn oversized_window_keeps_everything_up_to_latest() {
    let zone = DisplayZone::utc();
    let readings = vec![
        reading("2024-06-01T10:00:00Z", 1.0),
        reading("2024-06-03T12:00:00Z", 2.0),
        reading("2024-06-05T00:00:00Z", 9.0),
        reading("2024-06-03T12:00:00Z", 3.0),
    ];
    let expected = vec![readings[0].clone(), readings[1].clone(), readings[3].clone()];

    // Past the range of representable instants
    assert_eq!(filter_by_window(&readings, 100_000_000, &zone), expected);
    // Overflows the millisecond count itself
    assert_eq!(filter_by_window(&readings, i64::MAX, &zone), expected);
}

//! Tests for decoding and fetching readings from the sensor source.
//!
//! Run with: cargo test --test source_unit_test

mod common;

use axum::http::StatusCode;
use tokio_test::{assert_err, assert_ok};

use enviro_dash::source::{parse_envelope, FetchAnomaly, Reading, ReadingSource, SourceClient};

#[test]
fn envelope_with_one_reading() {
    let body = r#"{"data":[{"timestamp":"t1","humidity":40,"temperature":22,"moisture":30}]}"#;

    let readings = assert_ok!(parse_envelope(body));

    assert_eq!(readings, vec![Reading::new("t1", 40.0, 22.0, 30.0)]);
}

#[test]
fn empty_data_array_is_valid() {
    let readings = assert_ok!(parse_envelope(r#"{"data":[]}"#));
    assert!(readings.is_empty());
}

#[test]
fn data_must_be_an_array() {
    let err = assert_err!(parse_envelope(r#"{"data": "not-an-array"}"#));
    assert!(matches!(err, FetchAnomaly::Envelope(_)), "{err:?}");
    assert!(err.to_string().contains("a string"));

    assert!(matches!(
        parse_envelope(r#"{"data": {"timestamp": "t1"}}"#),
        Err(FetchAnomaly::Envelope(_))
    ));
    assert!(matches!(
        parse_envelope(r#"{"status": "ok"}"#),
        Err(FetchAnomaly::Envelope(_))
    ));
    assert!(matches!(
        parse_envelope(r#"{"data": null}"#),
        Err(FetchAnomaly::Envelope(_))
    ));
}

#[test]
fn body_must_be_json() {
    assert!(matches!(
        parse_envelope("<html>Service unavailable</html>"),
        Err(FetchAnomaly::Body(_))
    ));
    assert!(matches!(
        parse_envelope(r#"{"data":[1, 2]}"#),
        Err(FetchAnomaly::Body(_))
    ));
}

#[test]
fn sensor_values_are_decoded_leniently() {
    let body = r#"{"data":[
        {"timestamp":"2024-06-03T13:05:00Z","humidity":"41.5","temperature":null,"extra":true},
        {"timestamp":"2024-06-03T13:10:00Z","humidity":"n/a","temperature":-3.25,"moisture":12}
    ]}"#;

    let readings = assert_ok!(parse_envelope(body));

    assert_eq!(
        readings,
        vec![
            Reading::new("2024-06-03T13:05:00Z", 41.5, 0.0, 0.0),
            Reading::new("2024-06-03T13:10:00Z", 0.0, -3.25, 12.0),
        ]
    );
}

#[tokio::test]
async fn fetches_readings_from_source() {
    let url = common::spawn_source(StatusCode::OK, common::THREE_READINGS).await;
    let client = SourceClient::new(&common::test_config(url)).unwrap();

    let readings = client.fetch_readings().await;

    assert_eq!(readings.len(), 3);
    assert_eq!(
        readings.last(),
        Some(&Reading::new("2024-06-03T13:05:00Z", 40.0, 22.0, 30.0))
    );
}

#[tokio::test]
async fn error_status_yields_empty_sequence() {
    let url = common::spawn_source(StatusCode::INTERNAL_SERVER_ERROR, common::THREE_READINGS).await;
    let client = SourceClient::new(&common::test_config(url)).unwrap();

    let err = assert_err!(client.try_fetch_readings().await);
    assert!(
        matches!(err, FetchAnomaly::Status(code) if code == StatusCode::INTERNAL_SERVER_ERROR),
        "{err:?}"
    );
    assert!(client.fetch_readings().await.is_empty());
}

#[tokio::test]
async fn malformed_envelope_yields_empty_sequence() {
    let url = common::spawn_source(StatusCode::OK, r#"{"data": "not-an-array"}"#).await;
    let client = SourceClient::new(&common::test_config(url)).unwrap();

    let err = assert_err!(client.try_fetch_readings().await);
    assert!(matches!(err, FetchAnomaly::Envelope(_)), "{err:?}");
    assert!(client.fetch_readings().await.is_empty());
}

#[tokio::test]
async fn unreachable_source_yields_empty_sequence() {
    let url = common::unreachable_source().await;
    let client = SourceClient::new(&common::test_config(url)).unwrap();

    let err = assert_err!(client.try_fetch_readings().await);
    assert!(matches!(err, FetchAnomaly::Network(_)), "{err:?}");
    assert!(client.fetch_readings().await.is_empty());
}

use axum::{
    extract::{Query, State},
    http::header::{self, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::ReceiverStream;
use utoipa::{IntoParams, ToSchema};

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::services::format::DisplayZone;
use crate::services::window::{filter_by_window, TimeRange};
use crate::source::{Reading, ReadingSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Json,
    Ndjson,
    Csv,
}

fn default_format() -> String {
    "json".to_string()
}

/// A reading as fetched, decorated with its display timestamp.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadingResponse {
    pub timestamp: String,
    /// `"1:05 PM, 3 Jun"` style label in the configured display offset
    pub formatted_timestamp: String,
    pub humidity: f64,
    pub temperature: f64,
    pub moisture: f64,
}

impl ReadingResponse {
    fn from_reading(reading: Reading, zone: &DisplayZone) -> Self {
        Self {
            formatted_timestamp: zone.format_long(&reading.timestamp),
            timestamp: reading.timestamp,
            humidity: reading.humidity,
            temperature: reading.temperature,
            moisture: reading.moisture,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReadingsResponse {
    /// Window applied, null when all readings are returned
    pub range: Option<TimeRange>,
    pub count: usize,
    pub readings: Vec<ReadingResponse>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReadingsQuery {
    /// Optional trailing window: 24h, 7d or 30d. Omit for every reading.
    pub range: Option<String>,
    /// Response format: json (default), ndjson, csv
    #[serde(default = "default_format")]
    pub format: String,
}

fn determine_format(query_format: &str, headers: &HeaderMap) -> AppResult<ExportFormat> {
    // Query parameter takes precedence
    match query_format.to_lowercase().as_str() {
        "json" => {}
        "ndjson" => return Ok(ExportFormat::Ndjson),
        "csv" => return Ok(ExportFormat::Csv),
        other => {
            return Err(AppError::BadRequest(format!(
                "Invalid format: {other}. Must be one of: json, ndjson, csv"
            )));
        }
    }

    if let Some(accept) = headers.get(header::ACCEPT)
        && let Ok(accept_str) = accept.to_str()
    {
        if accept_str.contains("application/x-ndjson") {
            return Ok(ExportFormat::Ndjson);
        }
        if accept_str.contains("text/csv") {
            return Ok(ExportFormat::Csv);
        }
    }

    Ok(ExportFormat::Json)
}

fn build_csv_response(readings: &[ReadingResponse]) -> AppResult<Response> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for reading in readings {
        writer
            .serialize(reading)
            .map_err(|e| AppError::Internal(e.to_string()))?;
    }
    let body = writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Response::builder()
        .header(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"))
        .body(axum::body::Body::from(body))
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn build_ndjson_response(readings: Vec<ReadingResponse>) -> AppResult<Response> {
    let (tx, rx) = tokio::sync::mpsc::channel::<Result<String, std::io::Error>>(100);

    tokio::spawn(async move {
        for reading in readings {
            let line = match serde_json::to_string(&reading) {
                Ok(json) => format!("{json}\n"),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize reading");
                    continue;
                }
            };
            if tx.send(Ok(line)).await.is_err() {
                break;
            }
        }
    });

    let stream = ReceiverStream::new(rx);
    let body = axum::body::Body::from_stream(stream);

    Response::builder()
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-ndjson"),
        )
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Get readings
///
/// Fetches the reading sequence from the sensor source once and returns it,
/// optionally restricted to a trailing window ending at the latest reading.
/// A failed fetch returns an empty list. Supports JSON, CSV, and NDJSON.
#[utoipa::path(
    get,
    path = "/api/readings",
    params(ReadingsQuery),
    responses(
        (status = 200, description = "Readings retrieved", body = ReadingsResponse),
        (status = 400, description = "Invalid query parameters"),
    ),
    tag = "readings"
)]
pub async fn get_readings(
    State(state): State<AppState>,
    Query(query): Query<ReadingsQuery>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let range = query
        .range
        .as_deref()
        .map(str::parse::<TimeRange>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let format = determine_format(&query.format, &headers)?;

    let mut readings = state.source.fetch_readings().await;
    if let Some(range) = range {
        readings = filter_by_window(&readings, range.days(), &state.zone);
    }

    let readings: Vec<ReadingResponse> = readings
        .into_iter()
        .map(|r| ReadingResponse::from_reading(r, &state.zone))
        .collect();

    match format {
        ExportFormat::Csv => build_csv_response(&readings),
        ExportFormat::Ndjson => build_ndjson_response(readings),
        ExportFormat::Json => Ok(Json(ReadingsResponse {
            range,
            count: readings.len(),
            readings,
        })
        .into_response()),
    }
}

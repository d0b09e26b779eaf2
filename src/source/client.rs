use reqwest::{Client, StatusCode, Url};
use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppResult;
use crate::source::models::{Envelope, Reading};

/// Anything that can go wrong between issuing the request and holding a
/// reading sequence. Never leaves this module as an error: callers of
/// [`SourceClient::fetch_readings`] only ever see an empty sequence.
#[derive(Debug, thiserror::Error)]
pub enum FetchAnomaly {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("Failed to parse response: {0}")]
    Body(#[from] serde_json::Error),

    #[error("Invalid data format: {0}")]
    Envelope(String),
}

/// Where views get their readings from.
pub trait ReadingSource {
    /// Fetch the full reading sequence once. Failures yield an empty sequence.
    fn fetch_readings(&self) -> impl Future<Output = Vec<Reading>> + Send;
}

pub struct SourceClient {
    http_client: Client,
    url: Url,
}

impl SourceClient {
    /// Build a client for the configured source.
    ///
    /// # Errors
    ///
    /// Returns `AppError::HttpClient` if the TLS backend cannot be initialised.
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.source_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http_client: builder.build()?,
            url: config.source_url.clone(),
        })
    }

    fn host(&self) -> &str {
        self.url.host_str().unwrap_or("<unknown>")
    }

    /// Single attempt at fetching and validating the reading sequence.
    ///
    /// # Errors
    ///
    /// Returns a `FetchAnomaly` on network failure, non-2xx status, a body
    /// that is not JSON, or an envelope whose `data` is not an array.
    pub async fn try_fetch_readings(&self) -> Result<Vec<Reading>, FetchAnomaly> {
        let response = self.http_client.get(self.url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(FetchAnomaly::Status(response.status()));
        }

        let text = response.text().await?;

        parse_envelope(&text).inspect_err(|e| {
            tracing::error!(
                error = %e,
                body_preview = %text.chars().take(500).collect::<String>(),
                "Invalid data format"
            );
        })
    }
}

impl ReadingSource for SourceClient {
    async fn fetch_readings(&self) -> Vec<Reading> {
        match self.try_fetch_readings().await {
            Ok(readings) => {
                tracing::debug!(host = %self.host(), count = readings.len(), "Readings fetched");
                readings
            }
            Err(e) => {
                tracing::error!(host = %self.host(), error = %e, "Error fetching readings");
                Vec::new()
            }
        }
    }
}

/// Decode a response body into a reading sequence.
///
/// # Errors
///
/// Returns `FetchAnomaly::Body` if the body is not valid JSON or an element
/// is not a reading object, and `FetchAnomaly::Envelope` if `data` is
/// missing or not an array.
pub fn parse_envelope(body: &str) -> Result<Vec<Reading>, FetchAnomaly> {
    let envelope: Envelope = serde_json::from_str(body)?;

    match envelope.data {
        Some(data @ serde_json::Value::Array(_)) => Ok(serde_json::from_value(data)?),
        Some(other) => Err(FetchAnomaly::Envelope(format!(
            "expected `data` to be an array, got {}",
            json_kind(&other)
        ))),
        None => Err(FetchAnomaly::Envelope("missing `data` field".to_string())),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

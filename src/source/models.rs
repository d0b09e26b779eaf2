use serde::{Deserialize, Deserializer, Serialize};

/// One sensor sample as delivered by the source.
///
/// The timestamp is kept verbatim; it is only parsed when a view needs to
/// window or label it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub moisture: f64,
}

impl Reading {
    #[must_use]
    pub fn new(timestamp: impl Into<String>, humidity: f64, temperature: f64, moisture: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            humidity,
            temperature,
            moisture,
        }
    }
}

/// Response envelope: `{ "data": [...] }`.
///
/// `data` is kept as raw JSON so a non-array payload can be reported as an
/// anomaly instead of a generic decode failure.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// Raw representation for sensor values.
/// Spreadsheet-backed sources send numbers, numeric strings or nulls.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Null,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => n,
        RawNumber::Text(s) => s.trim().parse().unwrap_or(0.0),
        RawNumber::Null => 0.0,
    };
    // NaN displays as 0, the same as a missing value
    Ok(if value.is_finite() { value } else { 0.0 })
}

use chrono::{FixedOffset, Offset, Utc};
use reqwest::Url;
use std::env;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Sensor source
    pub source_url: Url,
    pub source_timeout_seconds: Option<u64>,

    // Presentation
    pub display_utc_offset: FixedOffset,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Rate limiting
    pub disable_rate_limiting: bool,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,

    // Application metadata
    pub log_format: LogFormat,
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `SOURCE_URL` is not set and
    /// `ConfigError::Invalid` if it or `DISPLAY_UTC_OFFSET` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let source_url = env::var("SOURCE_URL").map_err(|_| ConfigError::Missing("SOURCE_URL"))?;
        let display_utc_offset =
            env::var("DISPLAY_UTC_OFFSET").unwrap_or_else(|_| "+00:00".to_string());

        Ok(Self {
            // Sensor source
            source_url: source_url
                .parse()
                .map_err(|e| ConfigError::Invalid("SOURCE_URL", format!("{e}")))?,
            source_timeout_seconds: env::var("SOURCE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|secs| *secs > 0),

            // Presentation
            display_utc_offset: display_utc_offset
                .parse()
                .map_err(|e| ConfigError::Invalid("DISPLAY_UTC_OFFSET", format!("{e}")))?,

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // Rate limiting
            disable_rate_limiting: env::var("DISABLE_RATE_LIMITING")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            rate_limit_per_second: env::var("RATE_LIMIT_PER_SECOND")
                .unwrap_or_else(|_| "2".to_string())
                .parse()
                .unwrap_or(2),
            rate_limit_burst: env::var("RATE_LIMIT_BURST")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            // Application metadata
            log_format: LogFormat::from_str(
                &env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            ),
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    /// Configuration for a given source with every other setting at its default.
    #[must_use]
    pub fn with_source(source_url: Url) -> Self {
        Self {
            source_url,
            source_timeout_seconds: None,
            display_utc_offset: Utc.fix(),
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            disable_rate_limiting: false,
            rate_limit_per_second: 2,
            rate_limit_burst: 30,
            log_format: LogFormat::Text,
            deployment: Deployment::Local,
        }
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Host of the sensor source, safe to log (the URL carries an API key).
    #[must_use]
    pub fn source_host(&self) -> &str {
        self.source_url.host_str().unwrap_or("<unknown>")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable {0}: {1}")]
    Invalid(&'static str, String),
}

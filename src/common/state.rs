use std::sync::Arc;

use crate::config::Config;
use crate::services::format::DisplayZone;
use crate::source::SourceClient;

/// Shared across requests. Holds no reading data: every view fetches its own.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<SourceClient>,
    pub zone: DisplayZone,
}

impl AppState {
    pub fn new(config: Config, source: SourceClient) -> Self {
        let zone = DisplayZone::new(config.display_utc_offset);

        Self {
            config: Arc::new(config),
            source: Arc::new(source),
            zone,
        }
    }
}

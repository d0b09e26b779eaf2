pub mod dashboard;
pub mod health;
pub mod layout;
mod rate_limit;
pub mod readings;
pub mod report;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use rate_limit::ClientIpKeyExtractor;

use crate::common::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        readings::get_readings,
        dashboard::get_dashboard,
        report::get_report,
    ),
    components(
        schemas(
            readings::ReadingsResponse,
            readings::ReadingResponse,
            crate::services::view::DashboardSnapshot,
            crate::services::view::ReportSnapshot,
            crate::services::view::CurrentValues,
            crate::services::view::SeriesSet,
            crate::services::view::LoadState,
            crate::services::window::TimeRange,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "readings", description = "Sensor readings from the source"),
        (name = "views", description = "Dashboard and report snapshots"),
    ),
    info(
        title = "Enviro Dash API",
        description = "Environmental sensor dashboard for humidity, temperature and soil moisture",
        version = "0.1.0"
    )
)]
struct ApiDoc;

pub fn build_router(state: AppState) -> Router {
    let config = &state.config;

    // Every page view and API call triggers one request to the sensor source
    let source_routes_base = Router::new()
        .route("/", get(dashboard::dashboard_page))
        .route("/report", get(report::report_page))
        .route("/api/readings", get(readings::get_readings))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/report", get(report::get_report));

    let limiter = if config.disable_rate_limiting {
        tracing::warn!("Rate limiting DISABLED");
        None
    } else {
        let limiter = GovernorConfigBuilder::default()
            .key_extractor(ClientIpKeyExtractor)
            .per_second(config.rate_limit_per_second)
            .burst_size(config.rate_limit_burst)
            .finish();
        match &limiter {
            Some(_) => tracing::info!(
                rate = %format!("{}/s burst {}", config.rate_limit_per_second, config.rate_limit_burst),
                "Rate limiting configured"
            ),
            None => tracing::warn!(
                per_second = config.rate_limit_per_second,
                burst = config.rate_limit_burst,
                "Invalid rate limit settings, rate limiting DISABLED"
            ),
        }
        limiter
    };

    let source_routes = match limiter {
        Some(limiter) => source_routes_base.layer(GovernorLayer {
            config: Arc::new(limiter),
        }),
        None => source_routes_base,
    }
    .layer(RequestBodyLimitLayer::new(64 * 1024));

    // Health check routes (NO rate limiting)
    let health_routes = Router::new().route("/healthz", get(health::healthz));

    // OpenAPI documentation
    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .merge(source_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

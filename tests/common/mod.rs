//! Shared fixtures: a stub sensor source and router construction.

#![allow(dead_code)]

use axum::{http::StatusCode, routing::get, Router};
use reqwest::Url;
use tokio::net::TcpListener;

use enviro_dash::common::AppState;
use enviro_dash::config::Config;
use enviro_dash::source::SourceClient;

pub const THREE_READINGS: &str = r#"{"data":[
    {"timestamp":"2024-06-01T10:00:00Z","humidity":35,"temperature":20,"moisture":28},
    {"timestamp":"2024-06-03T12:30:00Z","humidity":38,"temperature":21.5,"moisture":29},
    {"timestamp":"2024-06-03T13:05:00Z","humidity":40,"temperature":22,"moisture":30}
]}"#;

/// Serve `body` with `status` on a random local port, like the sensor source.
pub async fn spawn_source(status: StatusCode, body: &str) -> Url {
    let body = body.to_string();
    let app = Router::new().route(
        "/exec",
        get(move || {
            let body = body.clone();
            async move { (status, [("content-type", "application/json")], body) }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/exec?apiKey=secret&deviceId=device_1")
        .parse()
        .unwrap()
}

/// A URL nothing listens on.
pub async fn unreachable_source() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/exec").parse().unwrap()
}

pub fn test_config(source_url: Url) -> Config {
    let mut config = Config::with_source(source_url);
    config.disable_rate_limiting = true;
    config
}

pub fn test_router(source_url: Url) -> Router {
    let config = test_config(source_url);
    let source = SourceClient::new(&config).unwrap();
    enviro_dash::routes::build_router(AppState::new(config, source))
}

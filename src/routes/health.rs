use axum::http::StatusCode;

/// Health check endpoint
///
/// Returns 200 OK if the service is running. Does not contact the sensor
/// source and is not rate-limited.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "health"
)]
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

use axum::http::StatusCode;

/// Liveness check. Touches no backend.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

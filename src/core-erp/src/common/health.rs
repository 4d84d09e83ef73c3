use axum::http::StatusCode;

/// Liveness probe mounted at `/health`.
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "healthy")
}

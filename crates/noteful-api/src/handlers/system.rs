//! Health check and fallback handlers.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{ApiError, AppState};

/// Report whether the database answers.
///
/// # Returns
/// - 200 OK with `{"status": "ok"}`
/// - 503 Service Unavailable when the database cannot be reached
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    noteful_db::log_pool_metrics(state.db.pool());

    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => {
            tracing::warn!(subsystem = "api", error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "version": env!("CARGO_PKG_VERSION"),
                })),
            )
        }
    }
}

/// 404 for any unrouted path.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness. Degraded mode is reported but is not a failure.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let assistant = if state.ai.is_available() {
        "available"
    } else {
        "degraded"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "fishgpt-web",
            "version": env!("CARGO_PKG_VERSION"),
            "assistant": assistant,
        })),
    )
}

pub async fn readiness_check() -> StatusCode {
    StatusCode::OK
}

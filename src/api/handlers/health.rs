/*
 * Responsibility
 * - GET /health (liveness; needs a valid Approov token, binding-exempt by default)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

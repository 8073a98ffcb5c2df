/*
 * Responsibility
 * - GET / (protected by token check + token binding)
 */
use axum::Json;
use serde_json::{Value, json};

use crate::api::extractors::ApproovCtx;

pub async fn hello(ApproovCtx(_claims): ApproovCtx) -> Json<Value> {
    Json(json!({"message": "Hello, World!"}))
}

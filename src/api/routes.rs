/*
 * Responsibility
 * - URL layout
 * - every route here is wrapped by `middleware::approov::apply` in app.rs
 */
use axum::{Router, routing::get};

use crate::api::handlers::{auth::status, health::health, hello::hello};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .route("/auth/status", get(status))
}

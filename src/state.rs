/*
 * Responsibility
 * - Shared context handed to the Router (AppState)
 * - Clone is cheap (Arc inside)
 */
use std::sync::Arc;

use crate::services::approov::ApproovGuard;

#[derive(Clone, Debug)]
pub struct AppState {
    pub approov: Arc<ApproovGuard>,
}

impl AppState {
    pub fn new(approov: Arc<ApproovGuard>) -> Self {
        Self { approov }
    }
}

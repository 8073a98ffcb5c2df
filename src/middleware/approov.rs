//! Approov token check (+ token binding) -> ApproovClaims in request extensions.
//!
//! Every request routed through this layer is either rejected with the generic
//! 401 or forwarded with `ApproovClaims` inserted. The rejection reason is only
//! logged; tokens, claims and header values never are.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::approov::ApproovGuard;

/// Put the Approov guard in front of every route of `router`, fallback included.
///
/// Call it after `fallback`, otherwise unmatched paths bypass the guard.
/// Must be the outermost auth-related layer: nothing that spends resources on
/// behalf of the client (rate limiting, body parsing) should run before it.
pub fn apply<S>(router: Router<S>, guard: Arc<ApproovGuard>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(guard, approov_middleware))
}

async fn approov_middleware(
    State(guard): State<Arc<ApproovGuard>>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = original_uri.path();

    let bound = match guard.authenticate(req.headers(), path) {
        Ok(bound) => bound,
        Err(err) => {
            tracing::warn!(reason = err.code(), path = %path, "approov check failed");
            return Err(AppError::Unauthorized);
        }
    };

    // middleware -> extractor
    req.extensions_mut().insert(bound.into_claims());

    Ok(next.run(req).await)
}

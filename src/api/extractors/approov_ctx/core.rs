use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::approov::ApproovClaims;

/// Extractor for the claims the Approov middleware stored in request extensions.
///
/// Absence means the request did not pass the Approov layer (or the layer is
/// not mounted on this route); it is treated as unauthenticated.
pub struct ApproovCtx(pub ApproovClaims);

impl<S> FromRequestParts<S> for ApproovCtx
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ApproovClaims>()
            .cloned()
            .map(ApproovCtx)
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use serde_json::json;

    fn parts() -> Parts {
        Request::builder().uri("/").body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_claims_are_unauthorized() {
        let mut parts = parts();
        let result = ApproovCtx::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn claims_from_extensions_are_returned() {
        let mut parts = parts();
        let claims: ApproovClaims = serde_json::from_value(json!({"exp": 10})).unwrap();
        parts.extensions.insert(claims.clone());

        let ApproovCtx(found) = ApproovCtx::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(found, claims);
    }
}

/*
 * Responsibility
 * - GET /auth/status (token check only; binding-exempt by default)
 * - Reports when the presented Approov token expires
 */
use axum::Json;
use chrono::DateTime;

use crate::api::dto::status::AttestationStatus;
use crate::api::extractors::ApproovCtx;
use crate::error::AppError;

pub async fn status(ApproovCtx(claims): ApproovCtx) -> Result<Json<AttestationStatus>, AppError> {
    // exp is guaranteed by the verifier; a value chrono cannot represent is a server bug.
    let token_expires_at = claims
        .exp()
        .and_then(|exp| i64::try_from(exp).ok())
        .and_then(|exp| DateTime::from_timestamp(exp, 0))
        .ok_or(AppError::Internal)?;

    Ok(Json(AttestationStatus {
        attested: true,
        token_bound: claims.pay().is_some(),
        token_expires_at,
    }))
}

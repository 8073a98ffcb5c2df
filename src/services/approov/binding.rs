//! Approov token binding.
//!
//! The mobile app hashes a request header (by default `Authorization`) into
//! the `pay` claim before the token is signed. Here we recompute that hash
//! from the incoming header and require an exact match, so a token lifted
//! from one session cannot be replayed with another.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use sha2::{Digest, Sha256};

use super::claims::ApproovClaims;
use super::error::AuthError;

/// base64(SHA-256(material)), standard alphabet with padding.
///
/// Must stay byte-for-byte identical to what the token issuer computes.
pub fn binding_hash(material: &[u8]) -> String {
    STANDARD.encode(Sha256::digest(material))
}

/// Check the `pay` claim of an already verified token against the binding header.
pub fn validate_binding(claims: &ApproovClaims, material: Option<&[u8]>) -> Result<(), AuthError> {
    let pay = claims.pay().ok_or(AuthError::MissingBindingClaim)?;

    let material = material
        .filter(|m| !m.is_empty())
        .ok_or(AuthError::MissingBindingHeader)?;

    let expected = binding_hash(material);

    match pay {
        Value::String(claimed) if *claimed == expected => Ok(()),
        _ => Err(AuthError::BindingMismatch),
    }
}

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, get_current_timestamp};

use super::claims::ApproovClaims;
use super::error::AuthError;
use super::secret::ApproovSecret;

/// HS256 verifier for Approov tokens.
///
/// - Only `HS256` is accepted; a token declaring any other `alg` fails as a bad signature.
/// - `exp` is mandatory and enforced. `aud`, `iss` and `nbf` are not checked.
/// - A token is expired from the second `exp` names onwards (`now >= exp + leeway`).
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

/// Upper bound for the `exp` leeway. Larger values are clamped.
pub const MAX_LEEWAY_SECONDS: u64 = 300;

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &ApproovSecret, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256];
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        // jsonwebtoken subtracts the leeway from `now` in u64.
        validation.leeway = leeway_seconds.min(MAX_LEEWAY_SECONDS);

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify the signature and mandatory claims, returning the decoded payload.
    ///
    /// Signature and algorithm are checked before any claim, so a forged token
    /// always reports `InvalidSignature` whatever its payload says.
    pub fn verify(&self, token: &str) -> Result<ApproovClaims, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let data =
            jsonwebtoken::decode::<ApproovClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| map_jwt_error(e.kind()))?;

        // jsonwebtoken only rejects `exp < now - leeway`; the last second is expired too.
        if data
            .claims
            .exp_seconds()
            .is_some_and(|exp| expired(exp, get_current_timestamp(), self.validation.leeway))
        {
            return Err(AuthError::TokenExpired);
        }

        Ok(data.claims)
    }
}

fn expired(exp: f64, now: u64, leeway: u64) -> bool {
    now as f64 >= exp + leeway as f64
}

fn map_jwt_error(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::MissingRequiredClaim(claim) if claim == "exp" => {
            AuthError::MissingExpirationClaim
        }
        // Wrong key, wrong alg, tampered or malformed segments: all look the same to callers.
        _ => AuthError::InvalidSignature,
    }
}

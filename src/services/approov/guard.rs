//! Approov request pipeline: token verification, then token binding.
//!
//! ```text
//! START --verify--> Verified --bind--> Bound      (forward to handler)
//!   |                  |
//!   +------------------+-------------> AuthError  (401)
//! ```
//!
//! `Verified` can only be obtained from `ApproovGuard::verify`, and `bind`
//! consumes it, so the binding check can never run for a request whose token
//! was not verified first.

use axum::http::{HeaderMap, HeaderName};

use super::binding::validate_binding;
use super::claims::ApproovClaims;
use super::error::AuthError;
use super::policy::BindingPolicy;
use super::token::TokenVerifier;

/// Output of a successful token verification.
#[derive(Debug)]
pub struct Verified {
    claims: ApproovClaims,
}

/// Terminal success state: the request may reach business logic.
#[derive(Debug)]
pub struct Bound {
    claims: ApproovClaims,
}

impl Bound {
    pub fn into_claims(self) -> ApproovClaims {
        self.claims
    }
}

impl Verified {
    #[cfg(test)]
    pub(crate) fn claims(&self) -> &ApproovClaims {
        &self.claims
    }

    /// Second stage. Skipped when binding is disabled or `path` is exempt.
    pub fn bind(
        self,
        policy: &BindingPolicy,
        headers: &HeaderMap,
        path: &str,
    ) -> Result<Bound, AuthError> {
        if policy.applies_to(path) {
            let material = headers.get(&policy.header).map(|v| v.as_bytes());
            validate_binding(&self.claims, material)?;
        }

        Ok(Bound {
            claims: self.claims,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ApproovGuard {
    token_header: HeaderName,
    verifier: TokenVerifier,
    binding: BindingPolicy,
}

impl ApproovGuard {
    pub fn new(token_header: HeaderName, verifier: TokenVerifier, binding: BindingPolicy) -> Self {
        Self {
            token_header,
            verifier,
            binding,
        }
    }

    #[cfg(test)]
    pub(crate) fn binding_policy(&self) -> &BindingPolicy {
        &self.binding
    }

    /// First stage: read the token header and verify it.
    pub fn verify(&self, headers: &HeaderMap) -> Result<Verified, AuthError> {
        let raw = headers
            .get(&self.token_header)
            .ok_or(AuthError::MissingToken)?;

        // A header value that is not visible ASCII cannot be a compact JWS.
        let token = raw.to_str().map_err(|_| AuthError::InvalidSignature)?;

        let claims = self.verifier.verify(token)?;
        Ok(Verified { claims })
    }

    /// Run both stages for one request.
    pub fn authenticate(&self, headers: &HeaderMap, path: &str) -> Result<Bound, AuthError> {
        self.verify(headers)?.bind(&self.binding, headers, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::approov::binding::binding_hash;
    use crate::services::approov::policy::RoutePatterns;
    use crate::services::approov::secret::ApproovSecret;
    use crate::services::approov::test_support::{mint, now};
    use axum::http::{HeaderValue, header};
    use serde_json::{Value, json};

    const SECRET: &[u8] = b"approov-shared-secret";

    fn guard(binding_enabled: bool) -> ApproovGuard {
        ApproovGuard::new(
            HeaderName::from_static("approov-token"),
            TokenVerifier::new(&ApproovSecret::from_bytes(SECRET), 0),
            BindingPolicy {
                enabled: binding_enabled,
                header: header::AUTHORIZATION,
                exempt: RoutePatterns::parse("/auth/*"),
            },
        )
    }

    fn headers(token: Option<&str>, authorization: Option<&str>) -> HeaderMap {
        let mut h = HeaderMap::new();
        if let Some(t) = token {
            h.insert("approov-token", HeaderValue::from_str(t).unwrap());
        }
        if let Some(a) = authorization {
            h.insert(header::AUTHORIZATION, HeaderValue::from_str(a).unwrap());
        }
        h
    }

    fn bound_token(authorization: &str) -> (String, Value) {
        let payload = json!({"exp": now() + 3600, "pay": binding_hash(authorization.as_bytes())});
        (mint(SECRET, &payload), payload)
    }

    #[test]
    fn bound_request_reaches_bound_with_payload() {
        let (token, payload) = bound_token("Bearer xyz");
        let bound = guard(true)
            .authenticate(&headers(Some(&token), Some("Bearer xyz")), "/")
            .unwrap();

        assert_eq!(
            serde_json::to_value(bound.into_claims().as_map()).unwrap(),
            payload
        );
    }

    #[test]
    fn changed_authorization_header_is_a_mismatch() {
        let (token, _) = bound_token("Bearer xyz");
        let err = guard(true)
            .authenticate(&headers(Some(&token), Some("Bearer abc")), "/")
            .unwrap_err();
        assert_eq!(err, AuthError::BindingMismatch);
    }

    #[test]
    fn missing_token_rejects_before_binding() {
        // Neither the token nor the binding header is present: the verifier error wins.
        let err = guard(true).authenticate(&headers(None, None), "/").unwrap_err();
        assert_eq!(err, AuthError::MissingToken);
    }

    #[test]
    fn empty_token_header_is_missing() {
        let err = guard(true)
            .authenticate(&headers(Some(""), Some("Bearer xyz")), "/")
            .unwrap_err();
        assert_eq!(err, AuthError::MissingToken);
    }

    #[test]
    fn expired_token_rejects_before_binding() {
        let token = mint(SECRET, &json!({"exp": now() - 10}));
        // No pay claim and no binding header: binding would fail, but it never runs.
        let err = guard(true)
            .authenticate(&headers(Some(&token), None), "/")
            .unwrap_err();
        assert_eq!(err, AuthError::TokenExpired);
    }

    #[test]
    fn forged_token_rejects_before_binding() {
        let token = mint(b"attacker", &json!({"exp": now() + 3600}));
        let err = guard(true)
            .authenticate(&headers(Some(&token), None), "/")
            .unwrap_err();
        assert_eq!(err, AuthError::InvalidSignature);
    }

    #[test]
    fn exempt_route_skips_binding() {
        let token = mint(SECRET, &json!({"exp": now() + 3600}));
        let bound = guard(true).authenticate(&headers(Some(&token), None), "/auth/login");
        assert!(bound.is_ok());
    }

    #[test]
    fn exempt_route_still_requires_a_valid_token() {
        let err = guard(true)
            .authenticate(&headers(None, None), "/auth/login")
            .unwrap_err();
        assert_eq!(err, AuthError::MissingToken);
    }

    #[test]
    fn missing_pay_claim_on_protected_route() {
        let token = mint(SECRET, &json!({"exp": now() + 3600}));
        let err = guard(true)
            .authenticate(&headers(Some(&token), Some("Bearer xyz")), "/")
            .unwrap_err();
        assert_eq!(err, AuthError::MissingBindingClaim);
    }

    #[test]
    fn missing_binding_header_on_protected_route() {
        let (token, _) = bound_token("Bearer xyz");
        let err = guard(true)
            .authenticate(&headers(Some(&token), None), "/")
            .unwrap_err();
        assert_eq!(err, AuthError::MissingBindingHeader);
    }

    #[test]
    fn binding_disabled_only_verifies() {
        let token = mint(SECRET, &json!({"exp": now() + 3600}));
        assert!(
            guard(false)
                .authenticate(&headers(Some(&token), None), "/")
                .is_ok()
        );
    }

    #[test]
    fn stages_can_be_driven_separately() {
        let (token, _) = bound_token("Bearer xyz");
        let g = guard(true);
        let h = headers(Some(&token), Some("Bearer xyz"));

        let verified = g.verify(&h).unwrap();
        assert!(verified.claims().pay().is_some());
        assert!(verified.bind(g.binding_policy(), &h, "/").is_ok());
    }

    #[test]
    fn custom_binding_header_is_used() {
        let g = ApproovGuard::new(
            HeaderName::from_static("approov-token"),
            TokenVerifier::new(&ApproovSecret::from_bytes(SECRET), 0),
            BindingPolicy {
                enabled: true,
                header: HeaderName::from_static("x-session-id"),
                exempt: RoutePatterns::default(),
            },
        );
        let payload = json!({"exp": now() + 3600, "pay": binding_hash(b"session-42")});
        let token = mint(SECRET, &payload);

        let mut h = headers(Some(&token), Some("Bearer unrelated"));
        h.insert("x-session-id", HeaderValue::from_static("session-42"));

        assert!(g.authenticate(&h, "/").is_ok());
    }
}

/// Reasons a request fails the Approov pipeline.
///
/// Every variant surfaces to the client as the same 401; the variant is only
/// used for internal diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing Approov token")]
    MissingToken,
    #[error("invalid Approov token signature")]
    InvalidSignature,
    #[error("missing exp claim")]
    MissingExpirationClaim,
    #[error("Approov token expired")]
    TokenExpired,
    #[error("missing pay claim")]
    MissingBindingClaim,
    #[error("missing token binding header")]
    MissingBindingHeader,
    #[error("token binding mismatch")]
    BindingMismatch,
}

impl AuthError {
    /// Stable identifier for logs.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::MissingExpirationClaim => "missing_exp_claim",
            AuthError::TokenExpired => "token_expired",
            AuthError::MissingBindingClaim => "missing_pay_claim",
            AuthError::MissingBindingHeader => "missing_binding_header",
            AuthError::BindingMismatch => "binding_mismatch",
        }
    }
}

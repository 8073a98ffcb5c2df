//! Approov token verification and token binding.
//!
//! - `secret`: base64 shared secret, decoded once at startup
//! - `token`: HS256 verification, `exp` required
//! - `binding`: `pay` claim vs base64(SHA-256(binding header))
//! - `guard`: the two stages in order, independent of axum middleware

pub mod binding;
pub mod claims;
pub mod error;
pub mod factory;
pub mod guard;
pub mod policy;
pub mod secret;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use claims::ApproovClaims;
pub use error::AuthError;
pub use factory::build_approov_guard;
pub use guard::ApproovGuard;
pub use policy::{BindingPolicy, RoutePatterns};
pub use secret::ApproovSecret;
pub use token::{MAX_LEEWAY_SECONDS, TokenVerifier};

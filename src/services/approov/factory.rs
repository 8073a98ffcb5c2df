/// Factory: build `ApproovGuard` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::approov::{ApproovGuard, BindingPolicy, TokenVerifier};

pub fn build_approov_guard(config: &Config) -> Arc<ApproovGuard> {
    let verifier = TokenVerifier::new(&config.approov_secret, config.approov_token_leeway_seconds);

    let binding = BindingPolicy {
        enabled: config.token_binding_enabled,
        header: config.token_binding_header.clone(),
        exempt: config.binding_exempt_routes.clone(),
    };

    Arc::new(ApproovGuard::new(
        config.approov_token_header.clone(),
        verifier,
        binding,
    ))
}

/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config -> Approov guard -> AppState -> Router
 * - Layer order: Approov check wraps every route and the fallback, CORS and HTTP layers outermost
 * - axum::serve()
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::services::approov::build_approov_guard;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,approov_guard=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so the panic is noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();

    // Missing or malformed APPROOV_BASE64_SECRET stops the process here.
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        env = ?config.app_env,
        addr = %config.addr,
        token_header = %config.approov_token_header,
        binding_enabled = config.token_binding_enabled,
        binding_header = %config.token_binding_header,
        "starting Approov protected API"
    );

    let state = AppState::new(build_approov_guard(&config));
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState, config: &Config) -> Router {
    // Layered after the fallback: unknown paths get the same 401 as known ones.
    let router = api::routes().fallback(|| async { AppError::NotFound });
    let router = middleware::approov::apply(router, state.approov.clone()).with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}

/*
 * Responsibility
 * - Config読み込み → 依存生成 (GatePolicy / IdentityProvider) → Router 組み立て
 * - Middleware の適用 (gate / security headers / CORS / HTTP)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::gate::build_gate_policy;
use crate::services::identity::build_identity_provider;
use crate::state::AppState;
use crate::{api, middleware};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,access_gate=debug,tower_http=debug cargo run
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

        // Development: crash the whole process so the panic is not missed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting access gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_state(config: &Config) -> Result<AppState> {
    let gate = build_gate_policy(&config.gate)?;
    let identity = build_identity_provider(&config.identity)?;

    tracing::info!(
        provider = identity.name(),
        protected = ?config.gate.protected_routes,
        "access gate configured"
    );

    Ok(AppState::new(gate, identity, config.site_url.clone()))
}

/// Application routes behind the access gate, without the HTTP plumbing.
pub fn router(state: AppState) -> Router {
    let routes = middleware::gate::apply(api::routes(), state.clone());
    routes.with_state(state)
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = router(state);
    let router = middleware::security_headers::apply(router, config);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}

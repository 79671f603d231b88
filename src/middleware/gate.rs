//! Access gate: resolve the caller → apply `GatePolicy` → redirect / challenge / continue.
//!
//! Order per request:
//! 1. static assets skip the gate entirely
//! 2. unclassified paths continue without consulting the identity provider
//! 3. otherwise resolve the identity and act on `GatePolicy::evaluate`
//!
//! A resolved `Identity` is stored in request extensions for the extractors.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};

use crate::error::AppError;
use crate::gate::GateAction;
use crate::state::AppState;

/// Put the access gate in front of every route of `router` (fallback included).
///
/// ```ignore
/// let router = api::routes();
/// let router = middleware::gate::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn gate_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_owned();

    if state.gate.is_static_asset(&path) || !state.gate.requires_identity(&path) {
        return Ok(next.run(req).await);
    }

    let identity = match state.identity.resolve(req.headers()).await {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(
                error = %err,
                provider = state.identity.name(),
                path = %path,
                "identity resolution failed"
            );
            return Err(err.into());
        }
    };

    match state.gate.evaluate(&path, identity.as_ref()) {
        GateAction::Redirect { location } => {
            tracing::debug!(path = %path, location = %location, "authenticated caller redirected");
            return Ok(Redirect::temporary(&location).into_response());
        }
        GateAction::Challenge => {
            tracing::debug!(path = %path, "anonymous caller on protected route");
            return Ok(state.identity.challenge(req.uri(), req.headers()));
        }
        GateAction::Continue => {}
    }

    if let Some(identity) = identity {
        // middleware → extractor への受け渡し
        req.extensions_mut().insert(identity);
    }

    Ok(next.run(req).await)
}

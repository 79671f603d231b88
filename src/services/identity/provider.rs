//! Identity provider interface consumed by the access gate.
use async_trait::async_trait;
use axum::http::{HeaderMap, Uri};
use axum::response::{IntoResponse, Response};

use super::types::{Identity, IdentityError};
use crate::error::AppError;

/// Resolve/enforce primitives of an external identity provider.
///
/// Implementations must be cheap to share (`Arc<dyn IdentityProvider>` lives in `AppState`).
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    // Provider name (for logging).
    fn name(&self) -> &'static str;

    // Resolve the caller from request headers/cookies.
    //
    // Returns:
    // - Ok(Some(_)) => authenticated caller
    // - Ok(None)    => anonymous caller (no session, or an invalid one)
    // - Err(_)      => provider failure; the gate propagates it as-is
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Identity>, IdentityError>;

    /// Response for an anonymous caller on a protected route.
    fn challenge(&self, _uri: &Uri, _headers: &HeaderMap) -> Response {
        AppError::Unauthorized.into_response()
    }
}

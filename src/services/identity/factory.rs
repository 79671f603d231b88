/// Factory: build the identity provider from application `Config`.
use std::sync::Arc;

use crate::config::IdentitySettings;
use crate::services::identity::{IdentityError, IdentityProvider, SessionJwtProvider};

pub fn build_identity_provider(
    settings: &IdentitySettings,
) -> Result<Arc<dyn IdentityProvider>, IdentityError> {
    let provider = SessionJwtProvider::new(
        &settings.jwt_public_key_pem,
        &settings.jwt_algorithm,
        &settings.issuer,
        settings.leeway_seconds,
    )?
    .with_authorized_parties(settings.authorized_parties.clone())
    .with_session_cookie(settings.session_cookie.clone())
    .with_sign_in_url(settings.sign_in_url.clone());

    tracing::debug!(?provider, "identity provider built");

    Ok(Arc::new(provider))
}

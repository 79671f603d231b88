use async_trait::async_trait;
use axum::http::{HeaderMap, Uri, header};
use axum::response::{IntoResponse, Redirect, Response};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;

use super::provider::IdentityProvider;
use super::types::{Identity, IdentityError};
use crate::error::AppError;

/// Session token claims issued by the identity provider.
///
/// NOTE:
/// - `iss/exp/nbf` are checked by `jsonwebtoken::Validation`.
/// - Session tokens carry no `aud`; `azp` (authorized party) is checked instead when configured.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub azp: Option<String>,
    #[serde(default)]
    pub org_id: Option<String>,
}

/// Verifies provider-issued session tokens locally with the provider's public key.
///
/// - Token source: `Authorization: Bearer` first, then the session cookie.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct SessionJwtProvider {
    decoding_key: DecodingKey,
    validation: Validation,
    authorized_parties: Vec<String>,
    session_cookie: String,
    sign_in_url: String,
}

impl std::fmt::Debug for SessionJwtProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionJwtProvider")
            .field("validation", &self.validation)
            .field("authorized_parties", &self.authorized_parties)
            .field("session_cookie", &self.session_cookie)
            .field("sign_in_url", &self.sign_in_url)
            .finish()
    }
}

impl SessionJwtProvider {
    pub fn new(
        public_key_pem: &str,
        algorithm: &str,
        issuer: &str,
        leeway_seconds: u64,
    ) -> Result<Self, IdentityError> {
        let (algorithm, decoding_key) = match algorithm {
            "RS256" => (
                Algorithm::RS256,
                DecodingKey::from_rsa_pem(public_key_pem.as_bytes()),
            ),
            "EdDSA" => (
                Algorithm::EdDSA,
                DecodingKey::from_ed_pem(public_key_pem.as_bytes()),
            ),
            other => {
                return Err(IdentityError::Misconfigured(format!(
                    "unsupported session token algorithm: {other}"
                )));
            }
        };
        let decoding_key = decoding_key
            .map_err(|e| IdentityError::Misconfigured(format!("invalid public key pem: {e}")))?;

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_aud = false;
        validation.validate_nbf = true;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
            authorized_parties: Vec::new(),
            session_cookie: "__session".to_string(),
            sign_in_url: "/sign-in".to_string(),
        })
    }

    pub fn with_authorized_parties(mut self, parties: Vec<String>) -> Self {
        self.authorized_parties = parties;
        self
    }

    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }

    pub fn with_sign_in_url(mut self, url: impl Into<String>) -> Self {
        self.sign_in_url = url.into();
        self
    }

    /// Verify a session token.
    ///
    /// Invalid, expired, or foreign tokens yield `Ok(None)`; only provider-side key
    /// failures are errors.
    pub fn verify(&self, token: &str) -> Result<Option<Identity>, IdentityError> {
        let claims =
            match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            {
                Ok(data) => data.claims,
                Err(err) => {
                    return match err.kind() {
                        ErrorKind::InvalidKeyFormat => {
                            Err(IdentityError::Misconfigured(err.to_string()))
                        }
                        _ => {
                            tracing::debug!(error = ?err, "session token rejected");
                            Ok(None)
                        }
                    };
                }
            };

        if claims.sub.trim().is_empty() {
            tracing::debug!("session token without subject");
            return Ok(None);
        }

        if let Some(azp) = claims.azp.as_deref() {
            if !self.authorized_parties.is_empty()
                && !self.authorized_parties.iter().any(|p| p == azp)
            {
                tracing::debug!(azp, "session token from unauthorized party");
                return Ok(None);
            }
        }

        Ok(Some(Identity {
            user_id: claims.sub,
            session_id: claims.sid,
            org_id: claims.org_id,
        }))
    }

    fn session_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        bearer.or_else(|| cookie_value(headers, &self.session_cookie))
    }
}

#[async_trait]
impl IdentityProvider for SessionJwtProvider {
    fn name(&self) -> &'static str {
        "session-jwt"
    }

    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<Identity>, IdentityError> {
        match self.session_token(headers) {
            Some(token) => self.verify(token),
            None => Ok(None),
        }
    }

    /// Browser navigations are sent to the sign-in page; everything else gets a 401.
    fn challenge(&self, uri: &Uri, headers: &HeaderMap) -> Response {
        if accepts_html(headers) {
            let location = sign_in_location(&self.sign_in_url, uri);
            return Redirect::temporary(&location).into_response();
        }
        AppError::Unauthorized.into_response()
    }
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/html"))
}

fn sign_in_location(sign_in_url: &str, uri: &Uri) -> String {
    let return_to = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect_url", return_to)
        .finish();
    let separator = if sign_in_url.contains('?') { '&' } else { '?' };

    format!("{sign_in_url}{separator}{query}")
}

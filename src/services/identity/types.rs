/*
 * Responsibility
 * - identity provider が解決した「呼び出し元」の型
 * - gate middleware が request extensions に格納し、handler は extractor 経由で受け取る
 *
 * Notes
 * - user_id は provider 側の不透明な ID (例: "user_2abc...")。ここでは解釈しない
 */
use serde::Serialize;
use thiserror::Error;

/// Caller identity as resolved by the identity provider for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: String,
    pub session_id: Option<String>,
    pub org_id: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: None,
            org_id: None,
        }
    }
}

/// Failures of the provider itself. An invalid or missing session is not an error: it
/// resolves to an anonymous caller.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
    #[error("identity provider misconfigured: {0}")]
    Misconfigured(String),
}

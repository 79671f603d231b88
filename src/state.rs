/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - gate: GatePolicy, identity: IdentityProvider, site_url
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::gate::GatePolicy;
use crate::services::identity::IdentityProvider;

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<GatePolicy>,
    pub identity: Arc<dyn IdentityProvider>,
    pub site_url: Arc<str>,
}

impl AppState {
    pub fn new(
        gate: Arc<GatePolicy>,
        identity: Arc<dyn IdentityProvider>,
        site_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            gate,
            identity,
            site_url: site_url.into(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("gate", &self.gate)
            .field("identity", &self.identity.name())
            .field("site_url", &self.site_url)
            .finish()
    }
}

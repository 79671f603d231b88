/// Factory: build `GatePolicy` from application `Config`.
use std::sync::Arc;

use crate::config::{ConfigError, GateSettings};
use crate::gate::{AssetBypass, GatePolicy, RouteMatcher};
use crate::i18n::Locale;

pub fn build_gate_policy(settings: &GateSettings) -> Result<Arc<GatePolicy>, ConfigError> {
    let protected =
        RouteMatcher::new(&settings.protected_routes).map_err(|source| {
            ConfigError::InvalidPattern {
                key: "GATE_PROTECTED_ROUTES",
                source,
            }
        })?;

    let policy = GatePolicy::new(&settings.public_root, &settings.workspace_root, protected)?
        .with_locales(Locale::ALL.iter().map(|l| l.as_str()))
        .with_asset_bypass(AssetBypass::new(settings.static_prefixes.iter().cloned()));

    tracing::debug!(
        public_root = policy.public_root(),
        workspace_root = policy.workspace_root(),
        protected = ?settings.protected_routes,
        "gate policy built"
    );

    Ok(Arc::new(policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{GateError, RouteClass};

    #[test]
    fn builds_default_policy() {
        let policy = build_gate_policy(&GateSettings::default()).unwrap();
        assert_eq!(policy.classify("/es/dashboard"), RouteClass::Protected);
        assert_eq!(policy.classify("/trpc/query"), RouteClass::Protected);
        assert!(policy.is_static_asset("/_next/static/app.js"));
    }

    #[test]
    fn invalid_pattern_names_the_variable() {
        let settings = GateSettings {
            protected_routes: vec!["dashboard".to_string()],
            ..GateSettings::default()
        };
        let err = build_gate_policy(&settings).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPattern {
                key: "GATE_PROTECTED_ROUTES",
                ..
            }
        ));
    }

    #[test]
    fn protected_public_root_is_rejected() {
        let settings = GateSettings {
            protected_routes: vec!["/(.*)".to_string()],
            ..GateSettings::default()
        };
        assert!(matches!(
            build_gate_policy(&settings),
            Err(ConfigError::Gate(GateError::ProtectedPublicRoot(_)))
        ));
    }
}

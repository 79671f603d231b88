/*
 * Responsibility
 * - 環境変数や設定の読み込み (gate のルート定義、identity provider、CORS など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::gate::{GateError, PatternError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("invalid configuration: {key}: {source}")]
    InvalidPattern {
        key: &'static str,
        #[source]
        source: PatternError,
    },
    #[error("invalid gate configuration: {0}")]
    Gate(#[from] GateError),
}

/// Route policy inputs. Patterns are parsed later by `gate::build_gate_policy`.
#[derive(Debug, Clone)]
pub struct GateSettings {
    pub public_root: String,
    pub workspace_root: String,
    pub protected_routes: Vec<String>,
    pub static_prefixes: Vec<String>,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            public_root: "/".to_string(),
            workspace_root: "/dashboard".to_string(),
            protected_routes: vec![
                "/dashboard/**".to_string(),
                "/api/**".to_string(),
                "/trpc/**".to_string(),
            ],
            static_prefixes: vec!["/_next".to_string(), "/assets".to_string()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct IdentitySettings {
    pub issuer: String,
    pub jwt_public_key_pem: String,
    pub jwt_algorithm: String,
    pub authorized_parties: Vec<String>,
    pub leeway_seconds: u64,
    pub session_cookie: String,
    pub sign_in_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub site_url: String,
    pub cors_allowed_origins: Vec<String>,

    pub request_timeout_seconds: u64,
    pub request_body_limit_bytes: usize,

    pub gate: GateSettings,
    pub identity: IdentitySettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same rules as `from_env`, reading values through `lookup` instead of the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port: u16 = lookup("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV").as_deref());

        let site_url = var("SITE_URL", "https://banktobook.com")
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&site_url).map_err(|_| ConfigError::Invalid("SITE_URL"))?;

        let cors_allowed_origins = list_var(&lookup, "CORS_ALLOWED_ORIGINS").unwrap_or_default();

        let request_timeout_seconds =
            parsed_var(&lookup, "REQUEST_TIMEOUT_SECONDS")?.unwrap_or(30);
        let request_body_limit_bytes =
            parsed_var(&lookup, "REQUEST_BODY_LIMIT_BYTES")?.unwrap_or(1024 * 1024);

        let defaults = GateSettings::default();
        let gate = GateSettings {
            public_root: var("GATE_PUBLIC_ROOT", &defaults.public_root),
            workspace_root: var("GATE_WORKSPACE_ROOT", &defaults.workspace_root),
            protected_routes: list_var(&lookup, "GATE_PROTECTED_ROUTES")
                .unwrap_or(defaults.protected_routes),
            static_prefixes: list_var(&lookup, "GATE_STATIC_PREFIXES")
                .unwrap_or(defaults.static_prefixes),
        };

        let issuer = lookup("IDENTITY_ISSUER").ok_or(ConfigError::Missing("IDENTITY_ISSUER"))?;

        let jwt_public_key_pem = lookup("IDENTITY_JWT_PUBLIC_KEY_PEM")
            .ok_or(ConfigError::Missing("IDENTITY_JWT_PUBLIC_KEY_PEM"))?
            .replace("\\n", "\n");

        let identity = IdentitySettings {
            issuer,
            jwt_public_key_pem,
            jwt_algorithm: var("IDENTITY_JWT_ALGORITHM", "RS256"),
            authorized_parties: list_var(&lookup, "IDENTITY_AUTHORIZED_PARTIES")
                .unwrap_or_default(),
            leeway_seconds: parsed_var(&lookup, "IDENTITY_LEEWAY_SECONDS")?.unwrap_or(5),
            session_cookie: var("IDENTITY_SESSION_COOKIE", "__session"),
            sign_in_url: var("IDENTITY_SIGN_IN_URL", "/sign-in"),
        };

        Ok(Self {
            addr,
            app_env,
            site_url,
            cors_allowed_origins,
            request_timeout_seconds,
            request_body_limit_bytes,
            gate,
            identity,
        })
    }
}

/// Comma-separated list. `None` when the variable is unset, so callers can fall back to defaults.
fn list_var<F>(lookup: &F, key: &'static str) -> Option<Vec<String>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|v| split_list(&v))
}

fn parsed_var<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().parse::<T>().map_err(|_| ConfigError::Invalid(key)))
        .transpose()
}

pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn split_list_trims_and_drops_empty_entries() {
        assert_eq!(
            split_list(" /dashboard/** , /api/**,, "),
            vec!["/dashboard/**".to_string(), "/api/**".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("IDENTITY_ISSUER", "https://clerk.example.test"),
        (
            "IDENTITY_JWT_PUBLIC_KEY_PEM",
            "-----BEGIN PUBLIC KEY-----\\nAAAA\\n-----END PUBLIC KEY-----",
        ),
    ];

    fn with_required(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        REQUIRED.iter().chain(extra).copied().collect()
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.site_url, "https://banktobook.com");
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(config.identity.jwt_algorithm, "RS256");
        assert_eq!(config.identity.leeway_seconds, 5);
        assert_eq!(config.identity.session_cookie, "__session");
        assert_eq!(config.gate.protected_routes, GateSettings::default().protected_routes);
    }

    #[test]
    fn missing_identity_settings_fail() {
        assert!(matches!(
            load(&REQUIRED[1..]),
            Err(ConfigError::Missing("IDENTITY_ISSUER"))
        ));
        assert!(matches!(
            load(&REQUIRED[..1]),
            Err(ConfigError::Missing("IDENTITY_JWT_PUBLIC_KEY_PEM"))
        ));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        assert!(matches!(
            load(&with_required(&[("REQUEST_TIMEOUT_SECONDS", "soon")])),
            Err(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))
        ));
        assert!(matches!(
            load(&with_required(&[("IDENTITY_LEEWAY_SECONDS", "-1")])),
            Err(ConfigError::Invalid("IDENTITY_LEEWAY_SECONDS"))
        ));
        assert!(matches!(
            load(&with_required(&[("REQUEST_BODY_LIMIT_BYTES", "1MB")])),
            Err(ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))
        ));
    }

    #[test]
    fn invalid_site_url_is_rejected() {
        assert!(matches!(
            load(&with_required(&[("SITE_URL", "banktobook")])),
            Err(ConfigError::Invalid("SITE_URL"))
        ));
        let config = load(&with_required(&[("SITE_URL", "https://example.test/")])).unwrap();
        assert_eq!(config.site_url, "https://example.test");
    }

    #[test]
    fn escaped_newlines_in_pem_are_restored() {
        let config = load(&REQUIRED).unwrap();
        assert_eq!(
            config.identity.jwt_public_key_pem,
            "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----"
        );
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = load(&with_required(&[
            ("APP_ENV", "PROD"),
            ("PORT", "8080"),
            ("GATE_PROTECTED_ROUTES", "/app/**, /api(.*)"),
            ("IDENTITY_AUTHORIZED_PARTIES", "https://banktobook.com,"),
            ("REQUEST_TIMEOUT_SECONDS", " 10 "),
        ]))
        .unwrap();
        assert!(config.app_env.is_production());
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.gate.protected_routes, vec!["/app/**", "/api(.*)"]);
        assert_eq!(config.gate.workspace_root, "/dashboard");
        assert_eq!(
            config.identity.authorized_parties,
            vec!["https://banktobook.com"]
        );
        assert_eq!(config.request_timeout_seconds, 10);
    }

    #[test]
    fn default_gate_settings_protect_workspace_and_api() {
        let gate = GateSettings::default();
        assert_eq!(gate.public_root, "/");
        assert_eq!(gate.workspace_root, "/dashboard");
        assert!(gate.protected_routes.iter().any(|p| p == "/api/**"));
    }
}

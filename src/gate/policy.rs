use thiserror::Error;

use super::assets::AssetBypass;
use super::pattern::{RouteMatcher, path_segments};
use crate::services::identity::Identity;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("{name} must be an absolute path: {value}")]
    NotAbsolute { name: &'static str, value: String },
    #[error("public root and workspace root must differ: {0}")]
    SameRoots(String),
    #[error("public root {0} is covered by a protected route pattern")]
    ProtectedPublicRoot(String),
}

/// Exactly one class per path. `PublicRoot` wins over `Protected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    PublicRoot,
    Protected,
    Unclassified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    Continue,
    Redirect { location: String },
    /// Hand the request to the identity provider's enforcement primitive.
    Challenge,
}

/// Immutable routing policy of the access gate.
///
/// Built once from configuration and shared between requests. Every method is a pure
/// function of the policy and its arguments.
#[derive(Debug, Clone)]
pub struct GatePolicy {
    public_root: String,
    workspace_root: String,
    protected: RouteMatcher,
    locales: Vec<String>,
    assets: AssetBypass,
}

struct Route<'a> {
    locale: Option<&'a str>,
    // Path with the locale prefix removed.
    path: String,
    full: String,
}

impl GatePolicy {
    pub fn new(
        public_root: &str,
        workspace_root: &str,
        protected: RouteMatcher,
    ) -> Result<Self, GateError> {
        if !public_root.starts_with('/') {
            return Err(GateError::NotAbsolute {
                name: "public root",
                value: public_root.to_string(),
            });
        }
        if !workspace_root.starts_with('/') {
            return Err(GateError::NotAbsolute {
                name: "workspace root",
                value: workspace_root.to_string(),
            });
        }

        let public_root = normalize(public_root);
        let workspace_root = normalize(workspace_root);

        if public_root == workspace_root {
            return Err(GateError::SameRoots(public_root));
        }
        if protected.matches(&public_root) {
            return Err(GateError::ProtectedPublicRoot(public_root));
        }

        Ok(Self {
            public_root,
            workspace_root,
            protected,
            locales: Vec::new(),
            assets: AssetBypass::default(),
        })
    }

    /// Leading path segments that are stripped before classification (`/pt/dashboard`).
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_asset_bypass(mut self, assets: AssetBypass) -> Self {
        self.assets = assets;
        self
    }

    pub fn public_root(&self) -> &str {
        &self.public_root
    }

    pub fn workspace_root(&self) -> &str {
        &self.workspace_root
    }

    /// Static assets skip the gate, unless the path is protected.
    pub fn is_static_asset(&self, path: &str) -> bool {
        self.assets.is_static(path) && self.classify(path) != RouteClass::Protected
    }

    pub fn classify(&self, path: &str) -> RouteClass {
        self.classify_route(&self.route(path))
    }

    /// Whether evaluating `path` depends on the caller's identity at all.
    pub fn requires_identity(&self, path: &str) -> bool {
        self.classify(path) != RouteClass::Unclassified
    }

    /// Home redirect first, then protection enforcement.
    pub fn evaluate(&self, path: &str, identity: Option<&Identity>) -> GateAction {
        let route = self.route(path);

        match (self.classify_route(&route), identity) {
            (RouteClass::PublicRoot, Some(_)) => GateAction::Redirect {
                location: self.workspace_location(route.locale),
            },
            (RouteClass::Protected, None) => GateAction::Challenge,
            _ => GateAction::Continue,
        }
    }

    fn classify_route(&self, route: &Route<'_>) -> RouteClass {
        if route.path == self.public_root {
            RouteClass::PublicRoot
        } else if self.protected.matches(&route.path) || self.protected.matches(&route.full) {
            RouteClass::Protected
        } else {
            RouteClass::Unclassified
        }
    }

    fn route(&self, path: &str) -> Route<'_> {
        let segments = path_segments(path).collect::<Vec<_>>();
        let full = join(&segments);

        if let Some((first, rest)) = segments.split_first() {
            if let Some(locale) = self.locales.iter().find(|l| l.as_str() == *first) {
                return Route {
                    locale: Some(locale.as_str()),
                    path: join(rest),
                    full,
                };
            }
        }

        Route {
            locale: None,
            path: full.clone(),
            full,
        }
    }

    fn workspace_location(&self, locale: Option<&str>) -> String {
        match locale {
            Some(locale) if self.workspace_root == "/" => format!("/{locale}"),
            Some(locale) => format!("/{locale}{}", self.workspace_root),
            None => self.workspace_root.clone(),
        }
    }
}

fn normalize(path: &str) -> String {
    join(&path_segments(path).collect::<Vec<_>>())
}

fn join(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> GatePolicy {
        let protected = RouteMatcher::new(["/dashboard/**", "/api/**"]).unwrap();
        GatePolicy::new("/", "/dashboard", protected)
            .unwrap()
            .with_locales(["en", "pt", "es", "fr", "de"])
    }

    fn user() -> Identity {
        Identity::new("user_2abc")
    }

    #[test]
    fn classifies_each_path_once() {
        let p = policy();
        assert_eq!(p.classify("/"), RouteClass::PublicRoot);
        assert_eq!(p.classify(""), RouteClass::PublicRoot);
        assert_eq!(p.classify("/dashboard"), RouteClass::Protected);
        assert_eq!(p.classify("/dashboard/settings"), RouteClass::Protected);
        assert_eq!(p.classify("/api/metrics"), RouteClass::Protected);
        assert_eq!(p.classify("/sign-in"), RouteClass::Unclassified);
        assert_eq!(p.classify("/terms"), RouteClass::Unclassified);
    }

    #[test]
    fn anonymous_root_continues() {
        assert_eq!(policy().evaluate("/", None), GateAction::Continue);
    }

    #[test]
    fn authenticated_root_redirects_to_workspace() {
        assert_eq!(
            policy().evaluate("/", Some(&user())),
            GateAction::Redirect {
                location: "/dashboard".into()
            }
        );
    }

    #[test]
    fn anonymous_protected_is_challenged() {
        assert_eq!(
            policy().evaluate("/dashboard/reports", None),
            GateAction::Challenge
        );
        assert_eq!(policy().evaluate("/api/metrics", None), GateAction::Challenge);
    }

    #[test]
    fn authenticated_protected_continues() {
        assert_eq!(
            policy().evaluate("/api/metrics", Some(&user())),
            GateAction::Continue
        );
        assert_eq!(
            policy().evaluate("/dashboard", Some(&user())),
            GateAction::Continue
        );
    }

    #[test]
    fn unclassified_continues_for_everyone() {
        let p = policy();
        for identity in [None, Some(user())] {
            assert_eq!(p.evaluate("/sign-in", identity.as_ref()), GateAction::Continue);
            assert_eq!(p.evaluate("/pricing", identity.as_ref()), GateAction::Continue);
        }
        assert!(!p.requires_identity("/sign-in"));
        assert!(p.requires_identity("/"));
        assert!(p.requires_identity("/api/me"));
    }

    #[test]
    fn locale_prefix_is_stripped_and_kept_in_redirect() {
        let p = policy();
        assert_eq!(p.classify("/pt"), RouteClass::PublicRoot);
        assert_eq!(p.classify("/de/dashboard/x"), RouteClass::Protected);
        assert_eq!(
            p.evaluate("/pt/", Some(&user())),
            GateAction::Redirect {
                location: "/pt/dashboard".into()
            }
        );
        assert_eq!(p.evaluate("/fr/dashboard", None), GateAction::Challenge);
        // Not a configured locale.
        assert_eq!(p.classify("/it"), RouteClass::Unclassified);
    }

    #[test]
    fn protected_paths_are_never_static_assets() {
        let p = policy().with_asset_bypass(AssetBypass::new(["/_next"]));
        assert!(p.is_static_asset("/favicon.ico"));
        assert!(p.is_static_asset("/_next/static/app.js"));
        assert!(!p.is_static_asset("/dashboard/export.csv"));
        assert!(!p.is_static_asset("/pt/dashboard/report.xlsx"));
        assert!(!p.is_static_asset("//api/report.csv"));
    }

    #[test]
    fn trailing_slashes_are_ignored() {
        let p = policy();
        assert_eq!(p.classify("/dashboard/"), RouteClass::Protected);
        assert_eq!(p.classify("//"), RouteClass::PublicRoot);
    }

    #[test]
    fn custom_roots() {
        let protected = RouteMatcher::new(["/app/**"]).unwrap();
        let p = GatePolicy::new("/welcome/", "/app/home", protected).unwrap();
        assert_eq!(p.public_root(), "/welcome");
        assert_eq!(p.classify("/"), RouteClass::Unclassified);
        assert_eq!(
            p.evaluate("/welcome", Some(&user())),
            GateAction::Redirect {
                location: "/app/home".into()
            }
        );
    }

    #[test]
    fn rejects_inconsistent_configuration() {
        let everything = RouteMatcher::new(["/**"]).unwrap();
        assert_eq!(
            GatePolicy::new("/", "/dashboard", everything).unwrap_err(),
            GateError::ProtectedPublicRoot("/".into())
        );
        assert_eq!(
            GatePolicy::new("/", "/", RouteMatcher::default()).unwrap_err(),
            GateError::SameRoots("/".into())
        );
        assert!(matches!(
            GatePolicy::new("dashboard", "/dashboard", RouteMatcher::default()),
            Err(GateError::NotAbsolute { .. })
        ));
    }
}

//! Static asset bypass: requests for build artifacts and static files skip the gate.
use super::pattern::{has_path_prefix, path_segments};

const STATIC_EXTENSIONS: &[&str] = &[
    "html",
    "htm",
    "css",
    "js",
    "jpg",
    "jpeg",
    "webp",
    "png",
    "gif",
    "svg",
    "ttf",
    "woff",
    "woff2",
    "ico",
    "csv",
    "doc",
    "docx",
    "xls",
    "xlsx",
    "zip",
    "webmanifest",
];

// API routes always go through the gate, whatever they look like.
const ALWAYS_GATED: &[&str] = &["/api", "/trpc"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetBypass {
    prefixes: Vec<String>,
}

impl AssetBypass {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(Into::into)
                .filter(|p: &String| !p.trim().is_empty())
                .collect(),
        }
    }

    /// Extension/prefix check only. `GatePolicy::is_static_asset` also keeps protected
    /// paths out of the bypass.
    pub fn is_static(&self, path: &str) -> bool {
        let segments = path_segments(path).collect::<Vec<_>>();
        let path = format!("/{}", segments.join("/"));

        if ALWAYS_GATED.iter().any(|p| has_path_prefix(&path, p)) {
            return false;
        }

        if self.prefixes.iter().any(|p| has_path_prefix(&path, p)) {
            return true;
        }

        segments
            .last()
            .and_then(|last| last.rsplit_once('.'))
            .is_some_and(|(stem, ext)| {
                !stem.is_empty() && STATIC_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bypass() -> AssetBypass {
        AssetBypass::new(["/_next", "/assets"])
    }

    #[test]
    fn build_output_prefixes_are_static() {
        let b = bypass();
        assert!(b.is_static("/_next/static/chunks/app.js"));
        assert!(b.is_static("/_next/data/build/page"));
        assert!(b.is_static("/assets/logo"));
        assert!(!b.is_static("/_nextish"));
    }

    #[test]
    fn known_extensions_are_static() {
        let b = bypass();
        assert!(b.is_static("/favicon.ico"));
        assert!(b.is_static("/img/hero.WEBP"));
        assert!(b.is_static("/site.webmanifest"));
        assert!(b.is_static("/downloads/export.csv"));
        assert!(!b.is_static("/data.json"));
        assert!(!b.is_static("/sitemap.xml"));
        assert!(!b.is_static("/.css"));
    }

    #[test]
    fn api_paths_are_never_static() {
        let b = AssetBypass::new(["/api"]);
        assert!(!b.is_static("/api/report.csv"));
        assert!(!b.is_static("/api"));
        assert!(!b.is_static("/trpc/app.js"));
        assert!(!b.is_static("//api/report.csv"));
        assert!(!b.is_static("/api//report.csv"));
    }

    #[test]
    fn empty_segments_are_ignored_for_prefixes() {
        assert!(bypass().is_static("//_next/static/page"));
    }

    #[test]
    fn pages_are_not_static() {
        let b = bypass();
        assert!(!b.is_static("/"));
        assert!(!b.is_static("/dashboard"));
        assert!(!b.is_static("/sign-in"));
    }
}

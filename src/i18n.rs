//! Supported locales and `Accept-Language` negotiation.
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Pt,
    Es,
    Fr,
    De,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl Locale {
    pub const ALL: [Locale; 5] = [Self::En, Self::Pt, Self::Es, Self::Fr, Self::De];
    pub const DEFAULT: Locale = Self::En;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pt => "pt",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the best supported locale for an `Accept-Language` header value.
///
/// Entries are ranked by `q` (missing = 1.0, unparsable = 0) with ties kept in header
/// order. Only the base language is compared, so `pt-BR` selects `pt`.
pub fn match_locale(accept_language: Option<&str>) -> Locale {
    let Some(header) = accept_language else {
        return Locale::DEFAULT;
    };

    let mut preferences = header
        .split(',')
        .map(|part| {
            let mut pieces = part.split(';');
            let lang = pieces.next().unwrap_or_default().trim();
            let q = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .map(|v| v.trim().parse::<f32>().unwrap_or(0.0))
                .unwrap_or(1.0);
            (lang, q)
        })
        .filter(|(lang, _)| !lang.is_empty())
        .collect::<Vec<_>>();

    preferences.sort_by(|a, b| b.1.total_cmp(&a.1));

    preferences
        .into_iter()
        .find_map(|(lang, _)| {
            let base = lang.split('-').next().unwrap_or_default();
            base.to_ascii_lowercase().parse::<Locale>().ok()
        })
        .unwrap_or(Locale::DEFAULT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_empty_header_uses_default() {
        assert_eq!(match_locale(None), Locale::En);
        assert_eq!(match_locale(Some("")), Locale::En);
    }

    #[test]
    fn highest_quality_supported_language_wins() {
        assert_eq!(
            match_locale(Some("en-US,en;q=0.9,pt-BR;q=0.8,pt;q=0.7")),
            Locale::En
        );
        assert_eq!(match_locale(Some("it;q=1.0,pt-BR;q=0.8,de;q=0.9")), Locale::De);
        assert_eq!(match_locale(Some("fr-CA;q=0.5, ES;q=0.6")), Locale::Es);
    }

    #[test]
    fn ties_keep_header_order() {
        assert_eq!(match_locale(Some("fr, de")), Locale::Fr);
    }

    #[test]
    fn unsupported_languages_fall_back() {
        assert_eq!(match_locale(Some("ja,zh-CN;q=0.8,*;q=0.1")), Locale::En);
    }

    #[test]
    fn unparsable_quality_ranks_last() {
        assert_eq!(match_locale(Some("de;q=abc,pt;q=0.2")), Locale::Pt);
    }

    #[test]
    fn parses_only_lowercase_codes() {
        assert_eq!("pt".parse::<Locale>(), Ok(Locale::Pt));
        assert_eq!("PT".parse::<Locale>(), Err(UnknownLocale("PT".into())));
        assert_eq!(Locale::De.to_string(), "de");
    }
}

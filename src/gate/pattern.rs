//! Protected-route pattern language.
//!
//! Patterns are matched against request paths segment by segment:
//! - literal segment: matches itself
//! - `*`: exactly one segment
//! - `**`: zero or more segments (`/dashboard/**` covers `/dashboard` and everything below it)
//!
//! The identity provider's own suffix form `(.*)` is accepted too. `/api(.*)` is a plain
//! string-prefix match, so it also covers `/apis`.
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("route pattern is empty")]
    Empty,
    #[error("route pattern must start with '/': {0}")]
    MissingLeadingSlash(String),
    #[error("unsupported segment '{segment}' in route pattern {pattern}")]
    Unsupported { pattern: String, segment: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Any,
    Rest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Matcher {
    Segments(Vec<Segment>),
    Prefix(String),
}

/// A single parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    matcher: Matcher,
}

impl RoutePattern {
    pub fn matches(&self, path: &str) -> bool {
        match &self.matcher {
            Matcher::Prefix(prefix) => path.starts_with(prefix.as_str()),
            Matcher::Segments(pattern) => {
                let segments = path_segments(path).collect::<Vec<_>>();
                match_segments(pattern, &segments)
            }
        }
    }
}

impl FromStr for RoutePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(PatternError::Empty);
        }
        if !raw.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(raw.to_string()));
        }

        if let Some(prefix) = raw.strip_suffix("(.*)") {
            if let Some(bad) = prefix.chars().find(|c| matches!(c, '*' | '(' | ')')) {
                return Err(PatternError::Unsupported {
                    pattern: raw.to_string(),
                    segment: bad.to_string(),
                });
            }
            return Ok(Self {
                raw: raw.to_string(),
                matcher: Matcher::Prefix(prefix.to_string()),
            });
        }

        let segments = path_segments(raw)
            .map(|segment| match segment {
                "**" => Ok(Segment::Rest),
                "*" => Ok(Segment::Any),
                s if s.contains(['*', '(', ')']) => Err(PatternError::Unsupported {
                    pattern: raw.to_string(),
                    segment: s.to_string(),
                }),
                s => Ok(Segment::Literal(s.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            matcher: Matcher::Segments(segments),
        })
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Ordered set of protected-route patterns. A path is protected when any pattern matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMatcher {
    patterns: Vec<RoutePattern>,
}

impl RouteMatcher {
    pub fn new<I, S>(patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().parse::<RoutePattern>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}

pub(crate) fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// `path` equals `prefix` or lies below it (segment boundary, not string prefix).
pub(crate) fn has_path_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((Segment::Rest, rest)) => (0..=path.len()).any(|i| match_segments(rest, &path[i..])),
        Some((Segment::Any, rest)) => !path.is_empty() && match_segments(rest, &path[1..]),
        Some((Segment::Literal(lit), rest)) => {
            path.first().is_some_and(|s| s == lit) && match_segments(rest, &path[1..])
        }
    }
}

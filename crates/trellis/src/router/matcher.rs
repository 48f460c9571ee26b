//! Route template matching.
//!
//! Templates are literal paths whose segments may be dynamic:
//! `/user/{id}/posts` matches `/user/7/posts` and captures `id = "7"`.
//! The legacy wildcard marker `:*` is rejected as unsupported.

use crate::error::{Error, Result};
use crate::view::PathSegments;

/// Strip a single trailing slash.
///
/// Applied to both registered templates and navigated paths, so `/about`
/// and `/about/` resolve to the same route. The root path `/` maps to the
/// empty string on both sides, which keeps lookups consistent.
pub(crate) fn normalize_path(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// The result of matching one path against one template.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum MatchOutcome {
    /// The template does not match the path.
    NoMatch,
    /// The template matches; dynamic segments captured by name.
    Match(PathSegments),
}

/// Match `path` against a dynamic `template`.
///
/// Callers are expected to try an exact lookup first; this only handles
/// templates containing `{name}` placeholders. A template without any
/// placeholder never matches here.
pub(crate) fn match_template(path: &str, template: &str) -> Result<MatchOutcome> {
    if template.contains(":*") {
        return Err(Error::UnsupportedPattern {
            template: template.to_string(),
        });
    }

    if !template.contains('{') || !template.contains('}') {
        return Ok(MatchOutcome::NoMatch);
    }

    let path_segments: Vec<&str> = path.split('/').collect();
    let template_segments: Vec<&str> = template.split('/').collect();
    if path_segments.len() != template_segments.len() {
        return Ok(MatchOutcome::NoMatch);
    }

    let mut captured = PathSegments::new();
    for (actual, expected) in path_segments.iter().zip(&template_segments) {
        match expected
            .strip_prefix('{')
            .and_then(|name| name.strip_suffix('}'))
        {
            Some(name) => {
                captured.insert(name.to_string(), (*actual).to_string());
            }
            None if actual == expected => {}
            None => return Ok(MatchOutcome::NoMatch),
        }
    }

    Ok(MatchOutcome::Match(captured))
}

//! Glob-style matching of package paths
//!
//! `*` matches within one `/`-separated segment and `**` matches across
//! segments. Matching never fails: a malformed pattern simply matches
//! nothing.

use glob::{MatchOptions, Pattern};

const PACKAGE_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Check whether `path` matches the glob `pattern`
pub fn matches(pattern: &str, path: &str) -> bool {
    match Pattern::new(pattern) {
        Ok(compiled) => compiled.matches_with(path, PACKAGE_MATCH_OPTIONS),
        Err(err) => {
            tracing::debug!(pattern, error = %err, "malformed pattern treated as no match");
            false
        }
    }
}

/// Check whether `path` matches at least one of `patterns`
pub fn matches_any<S: AsRef<str>>(patterns: &[S], path: &str) -> bool {
    patterns.iter().any(|pattern| matches(pattern.as_ref(), path))
}

/// Return the patterns that do not compile, with the reason
pub fn invalid_patterns<S: AsRef<str>>(patterns: &[S]) -> Vec<(String, String)> {
    patterns
        .iter()
        .filter_map(|pattern| {
            Pattern::new(pattern.as_ref())
                .err()
                .map(|err| (pattern.as_ref().to_string(), err.to_string()))
        })
        .collect()
}

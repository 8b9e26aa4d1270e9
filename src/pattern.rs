//! Wildcard route patterns.
//!
//! A `*` in a route key stands for one or more arbitrary characters, `/`
//! included; every other character is literal. Captured segments are put back
//! into the `*` positions of the localized pattern, left to right.

use regex::Regex;

/// Placeholder for a variable portion of a route key or pattern.
pub const WILDCARD: char = '*';

/// Returns true if `key` contains at least one wildcard.
#[must_use]
pub fn is_wildcard(key: &str) -> bool {
    key.contains(WILDCARD)
}

/// A route key compiled into an anchored matcher.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compiles `pattern`.
    ///
    /// Returns `None` for keys without a wildcard, and for the (size-limit)
    /// cases the regex engine refuses; the latter are logged and never match.
    #[must_use]
    pub fn compile(pattern: &str) -> Option<Self> {
        if !is_wildcard(pattern) {
            return None;
        }

        match Regex::new(&regex_source(pattern)) {
            Ok(regex) => Some(Self { source: pattern.to_string(), regex }),
            Err(e) => {
                tracing::warn!(pattern = %pattern, "Skipping uncompilable wildcard pattern: {e}");
                None
            }
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// Segments of `key` covered by each wildcard, or `None` if `key` does not match.
    ///
    /// Earlier wildcards take as few characters as possible.
    #[must_use]
    pub fn captures<'k>(&self, key: &'k str) -> Option<Vec<&'k str>> {
        let caps = self.regex.captures(key)?;
        Some(caps.iter().skip(1).flatten().map(|m| m.as_str()).collect())
    }
}

/// `blog/*/page` → `^(?s)blog/(.+?)/page$`
fn regex_source(pattern: &str) -> String {
    let body = pattern.split(WILDCARD).map(regex::escape).collect::<Vec<_>>().join("(.+?)");
    format!("^(?s){body}$")
}

/// Replaces the wildcards of `template` with `segments`, in order.
///
/// Surplus segments are dropped; wildcards without a segment stay as `*`.
#[must_use]
pub fn substitute(template: &str, segments: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut segments = segments.iter();

    for ch in template.chars() {
        if ch == WILDCARD
            && let Some(segment) = segments.next()
        {
            result.push_str(segment);
        } else {
            result.push(ch);
        }
    }

    result
}

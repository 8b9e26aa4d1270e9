//! Per-locale route maps and key resolution.

use indexmap::IndexMap;

use crate::pattern::{
    WildcardPattern,
    substitute,
};

/// Route key → localized pattern, in source order.
pub type RouteMap = IndexMap<String, String>;

/// A locale's route map prepared for lookups.
///
/// Wildcard keys are compiled once, in map order, so that the first
/// registered pattern wins.
#[derive(Debug, Clone, Default)]
pub struct LocaleRoutes {
    map: RouteMap,
    wildcards: Vec<(WildcardPattern, String)>,
}

impl LocaleRoutes {
    #[must_use]
    pub fn new(map: RouteMap) -> Self {
        let wildcards = map
            .iter()
            .filter_map(|(key, translation)| {
                WildcardPattern::compile(key).map(|pattern| (pattern, translation.clone()))
            })
            .collect();

        Self { map, wildcards }
    }

    #[must_use]
    pub const fn map(&self) -> &RouteMap {
        &self.map
    }

    /// Resolves `key`: exact entry first, then the first matching wildcard.
    #[must_use]
    pub fn resolve(&self, key: &str) -> Option<String> {
        if let Some(translation) = self.map.get(key) {
            return Some(translation.clone());
        }

        self.wildcards.iter().find_map(|(pattern, translation)| {
            let segments = pattern.captures(key)?;
            tracing::trace!(key = %key, pattern = %pattern.as_str(), "Wildcard route match");
            Some(substitute(translation, &segments))
        })
    }

    /// Like [`Self::resolve`], falling back to `key` itself.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        self.resolve(key).unwrap_or_else(|| key.to_string())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Approximate heap bytes held by keys and patterns.
    #[must_use]
    pub fn approximate_size(&self) -> usize {
        self.map.iter().map(|(key, value)| key.len() + value.len()).sum()
    }
}

impl From<RouteMap> for LocaleRoutes {
    fn from(map: RouteMap) -> Self {
        Self::new(map)
    }
}

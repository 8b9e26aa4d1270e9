//! Static route data held in memory.

use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use indexmap::IndexMap;

use super::{
    RouteSource,
    SourceError,
};
use crate::routes::RouteMap;

/// Route maps supplied directly by the embedding application.
///
/// Counts loads, which makes cache behaviour observable.
#[derive(Debug, Default)]
pub struct MemoryRouteSource {
    routes: IndexMap<String, RouteMap>,
    loads: AtomicUsize,
}

impl MemoryRouteSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a source from a combined `locale → routes` mapping.
    #[must_use]
    pub fn from_combined(routes: IndexMap<String, RouteMap>) -> Self {
        Self { routes, loads: AtomicUsize::new(0) }
    }

    #[must_use]
    pub fn with_locale<K, V>(
        mut self,
        locale: &str,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(locale, entries);
        self
    }

    /// Replaces the routes of `locale`.
    pub fn insert<K, V>(&mut self, locale: &str, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.routes.insert(locale.to_string(), map);
    }

    /// Number of times a route map was loaded.
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    #[must_use]
    pub const fn all(&self) -> &IndexMap<String, RouteMap> {
        &self.routes
    }
}

impl RouteSource for MemoryRouteSource {
    fn try_load(&self, locale: &str) -> Result<RouteMap, SourceError> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        Ok(self.routes.get(locale).cloned().unwrap_or_default())
    }
}

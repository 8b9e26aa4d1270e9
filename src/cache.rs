//! Two-tier route map cache.
//!
//! [`TranslationCache`] keeps resolved route maps in memory for the lifetime of
//! the translator. When a persistent [`CacheStore`] is attached, loads go through
//! it first (`translated_routes.<locale>`, with expiry) and evictions are
//! mirrored to it so the two tiers never disagree. Failed loads stay in memory
//! only and never reach the persistent tier.

/// File-backed persistent store
mod file;
/// In-process store with expiry
mod memory;

use std::collections::HashMap;
use std::fmt;
use std::sync::{
    Arc,
    PoisonError,
    RwLock,
};
use std::time::Duration;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::routes::{
    LocaleRoutes,
    RouteMap,
};
use crate::source::SourceError;

/// Prefix of persistent cache keys.
pub const CACHE_KEY_PREFIX: &str = "translated_routes";

/// Persistent cache key for `locale`.
#[must_use]
pub fn cache_key(locale: &str) -> String {
    format!("{CACHE_KEY_PREFIX}.{locale}")
}

/// Key-value store holding route maps with an expiry.
///
/// Implementations treat their own failures as misses and log them.
pub trait CacheStore: Send + Sync + fmt::Debug {
    /// Returns the stored map if present and not expired.
    fn get(&self, key: &str) -> Option<RouteMap>;

    /// Stores `routes` under `key` for `ttl`.
    fn put(&self, key: &str, routes: &RouteMap, ttl: Duration);

    /// Removes `key`. Returns true if something was removed.
    fn forget(&self, key: &str) -> bool;

    /// Returns the stored map, or computes, stores and returns it.
    ///
    /// A failed computation is returned as is and nothing is stored.
    ///
    /// # Errors
    /// Returns the error of `compute`.
    fn remember(
        &self,
        key: &str,
        ttl: Duration,
        compute: &dyn Fn() -> Result<RouteMap, SourceError>,
    ) -> Result<RouteMap, SourceError> {
        if let Some(routes) = self.get(key) {
            tracing::debug!(key = %key, "Persistent cache hit");
            return Ok(routes);
        }

        tracing::debug!(key = %key, "Persistent cache miss");
        let routes = compute()?;
        self.put(key, &routes, ttl);
        Ok(routes)
    }
}

/// Resolved route maps per locale, optionally mirrored by a persistent store.
#[derive(Debug)]
pub struct TranslationCache {
    resolved: RwLock<HashMap<String, Arc<LocaleRoutes>>>,
    store: Option<Arc<dyn CacheStore>>,
    ttl: Duration,
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl TranslationCache {
    #[must_use]
    pub fn new(store: Option<Arc<dyn CacheStore>>, ttl: Duration) -> Self {
        Self { resolved: RwLock::new(HashMap::new()), store, ttl }
    }

    /// A cache without a persistent tier.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(None, Duration::ZERO)
    }

    #[must_use]
    pub fn store(&self) -> Option<&Arc<dyn CacheStore>> {
        self.store.as_ref()
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the resolved routes of `locale`, loading them on a cold cache.
    ///
    /// A load always replaces the whole entry. A failed load is logged and
    /// resolves to an empty map, kept in memory until the locale is cleared.
    pub fn get_or_load(
        &self,
        locale: &str,
        load: &dyn Fn() -> Result<RouteMap, SourceError>,
    ) -> Arc<LocaleRoutes> {
        if let Some(routes) = self.read().get(locale) {
            return Arc::clone(routes);
        }

        tracing::debug!(locale = %locale, "Route cache miss");
        let loaded = match &self.store {
            Some(store) => store.remember(&cache_key(locale), self.ttl, load),
            None => load(),
        };
        let map = loaded.unwrap_or_else(|e| {
            tracing::warn!(locale = %locale, "Ignoring unreadable route data: {e}");
            RouteMap::new()
        });
        let routes = Arc::new(LocaleRoutes::new(map));

        self.write().insert(locale.to_string(), Arc::clone(&routes));
        routes
    }

    #[must_use]
    pub fn is_warm(&self, locale: &str) -> bool {
        self.read().contains_key(locale)
    }

    /// Locales currently resident in memory, sorted.
    #[must_use]
    pub fn warm_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.read().keys().cloned().collect();
        locales.sort();
        locales
    }

    /// Evicts one locale from both tiers.
    pub fn forget(&self, locale: &str) {
        if let Some(store) = &self.store {
            store.forget(&cache_key(locale));
        }
        self.write().remove(locale);
        tracing::debug!(locale = %locale, "Route cache cleared");
    }

    /// Evicts the persistent entry of every locale in `locales` and empties memory.
    pub fn flush<'a>(&self, locales: impl IntoIterator<Item = &'a str>) {
        if let Some(store) = &self.store {
            for locale in locales {
                store.forget(&cache_key(locale));
            }
        }
        self.write().clear();
        tracing::debug!("Route cache flushed");
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<LocaleRoutes>>> {
        self.resolved.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<LocaleRoutes>>> {
        self.resolved.write().unwrap_or_else(PoisonError::into_inner)
    }
}

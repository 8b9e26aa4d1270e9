use std::collections::HashMap;
use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError,
};
use std::time::{
    Duration,
    Instant,
};

use super::CacheStore;
use crate::routes::RouteMap;

#[derive(Debug, Clone)]
struct Entry {
    routes: RouteMap,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// Process-local store. Entries expire `ttl` after they were put.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock().values().filter(|entry| !entry.is_expired(now)).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<RouteMap> {
        let mut entries = self.lock();
        let entry = entries.get(key)?;
        if entry.is_expired(Instant::now()) {
            entries.remove(key);
            return None;
        }
        Some(entry.routes.clone())
    }

    fn put(&self, key: &str, routes: &RouteMap, ttl: Duration) {
        // A ttl too large to represent never expires.
        let expires_at = Instant::now().checked_add(ttl);
        self.lock().insert(key.to_string(), Entry { routes: routes.clone(), expires_at });
    }

    fn forget(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::source::SourceError;

    fn routes() -> RouteMap {
        [("about".to_string(), "hakkimizda".to_string())].into_iter().collect()
    }

    #[googletest::test]
    fn put_then_get() {
        let store = MemoryStore::new();

        store.put("k", &routes(), Duration::from_secs(60));

        expect_that!(store.get("k"), some(eq(&routes())));
        expect_that!(store.len(), eq(1));
    }

    #[googletest::test]
    fn zero_ttl_expires_immediately() {
        let store = MemoryStore::new();

        store.put("k", &routes(), Duration::ZERO);

        expect_that!(store.get("k"), none());
        expect_that!(store.is_empty(), eq(true));
    }

    #[googletest::test]
    fn forget_reports_removal() {
        let store = MemoryStore::new();
        store.put("k", &routes(), Duration::from_secs(60));

        expect_that!(store.forget("k"), eq(true));
        expect_that!(store.forget("k"), eq(false));
        expect_that!(store.get("k"), none());
    }

    #[googletest::test]
    fn remember_computes_on_miss_only() {
        let store = MemoryStore::new();
        let calls = std::cell::Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            Ok(routes())
        };

        let first = store.remember("k", Duration::from_secs(60), &compute).unwrap();
        let second = store.remember("k", Duration::from_secs(60), &compute).unwrap();

        expect_that!(first, eq(&second));
        expect_that!(calls.get(), eq(1));
    }

    #[googletest::test]
    fn remember_does_not_store_failures() {
        let store = MemoryStore::new();
        let failing =
            || Err(SourceError::Parse { path: "routes.json".into(), message: String::new() });

        let result = store.remember("k", Duration::from_secs(60), &failing);

        expect_that!(result.is_err(), eq(true));
        expect_that!(store.is_empty(), eq(true));
    }
}

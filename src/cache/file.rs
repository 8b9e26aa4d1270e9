//! Persistent store keeping one JSON file per key.
//!
//! Shared by every process pointing at the same directory, which lets the CLI
//! clear the cache of a running application.

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};
use std::time::Duration;

use chrono::Utc;
use serde::{
    Deserialize,
    Serialize,
};

use super::CacheStore;
use crate::routes::RouteMap;

/// On-disk entry.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    /// Unix timestamp (seconds) after which the entry is stale.
    expires_at: i64,
    routes: RouteMap,
}

#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// File holding `key`. Path separators in the key are neutralised.
    #[must_use]
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let file_name: String =
            key.chars().map(|c| if matches!(c, '/' | '\\') { '_' } else { c }).collect();
        self.directory.join(format!("{file_name}.json"))
    }

    fn read_entry(path: &Path) -> Option<StoredEntry> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read cache entry {:?}: {e}", path);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Discarding corrupt cache entry {:?}: {e}", path);
                None
            }
        }
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Option<RouteMap> {
        let path = self.entry_path(key);
        let entry = Self::read_entry(&path)?;

        if Utc::now().timestamp() >= entry.expires_at {
            tracing::debug!(key = %key, "Cache entry expired");
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::debug!("Failed to remove expired cache entry {:?}: {e}", path);
            }
            return None;
        }

        Some(entry.routes)
    }

    fn put(&self, key: &str, routes: &RouteMap, ttl: Duration) {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let expires_at = Utc::now().timestamp().saturating_add(ttl_secs);
        let entry = StoredEntry { expires_at, routes: routes.clone() };

        let content = match serde_json::to_string(&entry) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(key = %key, "Failed to serialize cache entry: {e}");
                return;
            }
        };

        if let Err(e) = std::fs::create_dir_all(&self.directory) {
            tracing::warn!("Failed to create cache directory {:?}: {e}", self.directory);
            return;
        }

        let path = self.entry_path(key);
        if let Err(e) = std::fs::write(&path, content) {
            tracing::warn!("Failed to write cache entry {:?}: {e}", path);
        }
    }

    fn forget(&self, key: &str) -> bool {
        let path = self.entry_path(key);
        match std::fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!("Failed to remove cache entry {:?}: {e}", path);
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;

    fn routes() -> RouteMap {
        [("about", "hakkimizda"), ("blog/*", "makale/*")]
            .into_iter()
            .map(|(key, pattern)| (key.to_string(), pattern.to_string()))
            .collect()
    }

    #[rstest]
    fn put_then_get_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("cache"));

        store.put("translated_routes.tr", &routes(), Duration::from_secs(60));
        let loaded = store.get("translated_routes.tr").unwrap();

        let keys: Vec<String> = loaded.keys().cloned().collect();
        assert_that!(keys, elements_are![eq("about"), eq("blog/*")]);
        assert_that!(store.entry_path("translated_routes.tr").is_file(), eq(true));
    }

    #[rstest]
    fn shared_directory_is_visible_to_other_instances() {
        let temp_dir = TempDir::new().unwrap();
        let writer = FileStore::new(temp_dir.path());
        let reader = FileStore::new(temp_dir.path());

        writer.put("k", &routes(), Duration::from_secs(60));

        assert_that!(reader.get("k"), some(eq(&routes())));
        assert_that!(reader.forget("k"), eq(true));
        assert_that!(writer.get("k"), none());
    }

    #[rstest]
    fn expired_entry_is_a_miss_and_removed() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.put("k", &routes(), Duration::ZERO);

        assert_that!(store.get("k"), none());
        assert_that!(store.entry_path("k").exists(), eq(false));
    }

    #[rstest]
    fn corrupt_entry_is_a_miss() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        std::fs::write(store.entry_path("k"), "garbage").unwrap();

        assert_that!(store.get("k"), none());
    }

    #[rstest]
    fn forget_missing_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert_that!(store.forget("missing"), eq(false));
    }

    #[rstest]
    fn entry_path_neutralises_separators() {
        let store = FileStore::new("/cache");

        assert_that!(store.entry_path("a/b\\c"), eq(&PathBuf::from("/cache/a_b_c.json")));
    }
}

//! Route map sources.
//!
//! A source resolves a locale to its [`RouteMap`]. It knows nothing about
//! caching; the translator layers the cache on top.

/// Route files on disk
mod file;
/// In-memory route data
mod memory;

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

pub use file::{
    COMBINED_FILE_NAME,
    FileRouteSource,
    LOCALE_FILE_NAME,
};
pub use memory::MemoryRouteSource;

use crate::routes::RouteMap;

/// Loads a locale's route map.
pub trait RouteSource: Send + Sync + fmt::Debug {
    /// An unknown locale or a missing file yields an empty map.
    ///
    /// # Errors
    /// Returns an error if existing route data cannot be read.
    fn try_load(&self, locale: &str) -> Result<RouteMap, SourceError>;

    /// Like [`Self::try_load`], but logs a failure and yields an empty map.
    fn load(&self, locale: &str) -> RouteMap {
        self.try_load(locale).unwrap_or_else(|e| {
            tracing::warn!(locale = %locale, "Ignoring unreadable route data: {e}");
            RouteMap::new()
        })
    }
}

impl<T: RouteSource + ?Sized> RouteSource for std::sync::Arc<T> {
    fn try_load(&self, locale: &str) -> Result<RouteMap, SourceError> {
        (**self).try_load(locale)
    }
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read route file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse route file '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(
        "Route file '{}' must contain a JSON object{}",
        path.display(),
        format_context(context.as_deref())
    )]
    NotAnObject { path: PathBuf, context: Option<String> },
}

fn format_context(context: Option<&str>) -> String {
    context.map_or_else(String::new, |c| format!(" at '{c}'"))
}

/// Converts a JSON object into a route map, keeping key order.
///
/// Non-string values are rendered as their JSON text.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use translated_routes::source::route_map_from_value;
///
/// let routes = route_map_from_value(&json!({"about": "hakkimizda", "count": 3})).unwrap();
/// assert_eq!(routes.get("about"), Some(&"hakkimizda".to_string()));
/// assert_eq!(routes.get("count"), Some(&"3".to_string()));
/// ```
#[must_use]
pub fn route_map_from_value(value: &Value) -> Option<RouteMap> {
    let object = value.as_object()?;
    Some(
        object
            .iter()
            .map(|(key, value)| {
                let pattern = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), pattern)
            })
            .collect(),
    )
}

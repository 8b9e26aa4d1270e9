//! Route files under the language directory.
//!
//! Two layouts are supported, checked in this order:
//! - `<lang>/routes.json`: one file holding every locale (`{"en": {...}, "tr": {...}}`)
//! - `<lang>/<locale>/routes.json`: one file per locale
//!
//! When the combined file exists the per-locale files are never read.
//! Files are parsed as JSONC, so comments and trailing commas are accepted.

use std::path::{
    Path,
    PathBuf,
};

use indexmap::IndexMap;
use jsonc_parser::ParseOptions;
use serde_json::Value;

use super::{
    RouteSource,
    SourceError,
    route_map_from_value,
};
use crate::config::RouteSettings;
use crate::routes::RouteMap;

/// File name of the combined multi-locale route file.
pub const COMBINED_FILE_NAME: &str = "routes.json";

/// File name of a per-locale route file.
pub const LOCALE_FILE_NAME: &str = "routes.json";

#[derive(Debug, Clone)]
pub struct FileRouteSource {
    lang_path: PathBuf,
}

impl FileRouteSource {
    #[must_use]
    pub fn new(lang_path: impl Into<PathBuf>) -> Self {
        Self { lang_path: lang_path.into() }
    }

    /// Uses the language directory configured for the project at `root`.
    #[must_use]
    pub fn from_settings(settings: &RouteSettings, root: &Path) -> Self {
        Self::new(settings.resolve_lang_path(root))
    }

    #[must_use]
    pub fn lang_path(&self) -> &Path {
        &self.lang_path
    }

    #[must_use]
    pub fn combined_path(&self) -> PathBuf {
        self.lang_path.join(COMBINED_FILE_NAME)
    }

    #[must_use]
    pub fn locale_path(&self, locale: &str) -> PathBuf {
        self.lang_path.join(locale).join(LOCALE_FILE_NAME)
    }

    #[must_use]
    pub fn has_combined(&self) -> bool {
        self.combined_path().is_file()
    }

    /// Reads one locale's routes.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be read or is not a JSON object.
    pub fn read_locale(&self, locale: &str) -> Result<RouteMap, SourceError> {
        let combined_path = self.combined_path();
        if combined_path.is_file() {
            let Some(document) = read_document(&combined_path)? else {
                return Ok(RouteMap::new());
            };
            let Some(locales) = document.as_object() else {
                return Err(SourceError::NotAnObject { path: combined_path, context: None });
            };
            return match locales.get(locale) {
                Some(value) => route_map_from_value(value).ok_or_else(|| {
                    SourceError::NotAnObject {
                        path: combined_path.clone(),
                        context: Some(locale.to_string()),
                    }
                }),
                None => Ok(RouteMap::new()),
            };
        }

        let locale_path = self.locale_path(locale);
        if !locale_path.is_file() {
            tracing::debug!("Route file not found: {:?}", locale_path);
            return Ok(RouteMap::new());
        }

        match read_document(&locale_path)? {
            Some(document) => route_map_from_value(&document)
                .ok_or(SourceError::NotAnObject { path: locale_path, context: None }),
            None => Ok(RouteMap::new()),
        }
    }

    /// Reads every available locale.
    ///
    /// With a combined file, all locales it contains are returned in file order,
    /// whatever `locales` says. Otherwise each of `locales` that has a file is read.
    ///
    /// # Errors
    /// Same as [`Self::read_locale`].
    pub fn read_all<'a>(
        &self,
        locales: impl IntoIterator<Item = &'a str>,
    ) -> Result<IndexMap<String, RouteMap>, SourceError> {
        let combined_path = self.combined_path();
        if combined_path.is_file() {
            let Some(document) = read_document(&combined_path)? else {
                return Ok(IndexMap::new());
            };
            let Some(locales) = document.as_object() else {
                return Err(SourceError::NotAnObject { path: combined_path, context: None });
            };
            return locales
                .iter()
                .map(|(locale, value)| {
                    route_map_from_value(value).map(|routes| (locale.clone(), routes)).ok_or_else(
                        || SourceError::NotAnObject {
                            path: combined_path.clone(),
                            context: Some(locale.clone()),
                        },
                    )
                })
                .collect();
        }

        let mut all = IndexMap::new();
        for locale in locales {
            if self.locale_path(locale).is_file() {
                all.insert(locale.to_string(), self.read_locale(locale)?);
            }
        }
        Ok(all)
    }

    /// Writes `<lang>/<locale>/routes.json`, creating directories as needed.
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written.
    pub fn write_locale(&self, locale: &str, routes: &RouteMap) -> Result<PathBuf, SourceError> {
        let path = self.locale_path(locale);
        let io_error = |source| SourceError::Io { path: path.clone(), source };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let mut content = serde_json::to_string_pretty(routes)
            .map_err(|e| io_error(std::io::Error::other(e)))?;
        content.push('\n');
        std::fs::write(&path, content).map_err(io_error)?;

        Ok(path)
    }
}

impl RouteSource for FileRouteSource {
    fn try_load(&self, locale: &str) -> Result<RouteMap, SourceError> {
        let routes = self.read_locale(locale)?;
        tracing::debug!(locale = %locale, count = routes.len(), "Loaded route map");
        Ok(routes)
    }
}

/// Reads and parses a JSONC document. An empty document yields `None`.
fn read_document(path: &Path) -> Result<Option<Value>, SourceError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;

    jsonc_parser::parse_to_serde_value(&content, &ParseOptions::default())
        .map_err(|e| SourceError::Parse { path: path.to_path_buf(), message: e.to_string() })
}

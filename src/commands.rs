//! Operator commands behind the `translated-routes` binary.
//!
//! Each command computes a plain report first and renders it separately to a
//! [`Write`](std::io::Write), so the computation is testable without a terminal.

/// Cache clearing
mod clear;
/// Route file export for frontend code
mod export;
/// Example route file generation
mod install;
/// Translated route listing
mod list;
/// Translation benchmarks
mod profile;
/// Route file consistency checks
mod validate;

use std::path::{
    Path,
    PathBuf,
};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

pub use clear::{
    ClearOutcome,
    clear,
    render_clear,
};
pub use export::{
    ExportFormat,
    default_output,
    export,
    render_export,
};
pub use install::{
    InstallReport,
    example_routes,
    install,
    render_install,
};
pub use list::{
    ListedRoute,
    fallback_route_table,
    list_routes,
    render_list,
};
pub use profile::{
    ProfileReport,
    Recommendation,
    format_bytes,
    profile,
    render_profile,
};
pub use validate::{
    KeyDrift,
    ValidationReport,
    render_validation,
    validate,
};

use crate::adapter::RouteDefinition;
use crate::config::{
    ConfigError,
    ConfigManager,
    RouteSettings,
};
use crate::routes::RouteMap;
use crate::source::{
    FileRouteSource,
    SourceError,
};
use crate::translator::Translator;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Locale '{0}' is not supported.")]
    UnsupportedLocale(String),

    #[error("No supported locales found in config file.")]
    NoLocales,

    #[error("Unsupported format: {0} (expected json, js or ts)")]
    UnsupportedFormat(String),

    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to serialize routes: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// A project on disk: its root directory and effective settings.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub settings: RouteSettings,
}

impl Project {
    /// Loads `.translated-routes.json` from `root`, with environment overrides.
    ///
    /// # Errors
    /// Returns an error if the configuration file is unreadable or invalid.
    pub fn load(root: &Path) -> Result<Self, CommandError> {
        let mut manager = ConfigManager::new();
        manager.load_settings(Some(root.to_path_buf()))?;
        Ok(Self { root: root.to_path_buf(), settings: manager.get_settings().clone() })
    }

    #[must_use]
    pub fn new(root: impl Into<PathBuf>, settings: RouteSettings) -> Self {
        Self { root: root.into(), settings }
    }

    #[must_use]
    pub fn source(&self) -> FileRouteSource {
        FileRouteSource::from_settings(&self.settings, &self.root)
    }

    #[must_use]
    pub fn translator(&self) -> Translator {
        Translator::from_settings(&self.settings, &self.root)
    }

    /// Codes of the supported locales, in configuration order.
    #[must_use]
    pub fn locale_codes(&self) -> Vec<String> {
        self.settings.supported_locales.keys().cloned().collect()
    }

    /// Route maps of every locale that has route data.
    ///
    /// # Errors
    /// Returns an error if an existing route file is unreadable.
    pub fn read_translations(&self) -> Result<IndexMap<String, RouteMap>, CommandError> {
        let codes = self.locale_codes();
        Ok(self.source().read_all(codes.iter().map(String::as_str))?)
    }
}

/// One row of a host routing table file.
#[derive(Debug, Deserialize)]
struct RouteTableEntry {
    uri: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    methods: Vec<String>,
}

/// Reads a host routing table: a JSON array of `{"uri", "name"?, "methods"?}`.
///
/// # Errors
/// Returns an error if the file is unreadable or malformed.
pub fn read_route_table(path: &Path) -> Result<Vec<RouteDefinition>, CommandError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| CommandError::Io { path: path.to_path_buf(), source })?;
    let entries: Vec<RouteTableEntry> = serde_json::from_str(&content)?;

    Ok(entries
        .into_iter()
        .map(|entry| {
            let mut route = RouteDefinition::new(entry.uri);
            route.name = entry.name;
            if !entry.methods.is_empty() {
                route.methods = entry.methods;
            }
            route
        })
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn read_route_table_applies_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("routes.json");
        fs::write(
            &path,
            r#"[{"uri": "about", "name": "about"}, {"uri": "contact", "methods": ["POST"]}]"#,
        )
        .unwrap();

        let routes = read_route_table(&path).unwrap();

        assert_that!(routes.len(), eq(2));
        assert_that!(routes[0].methods, elements_are![eq("GET"), eq("HEAD")]);
        assert_that!(routes[1].name, none());
        assert_that!(routes[1].methods, elements_are![eq("POST")]);
    }

    #[rstest]
    fn read_route_table_missing_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = read_route_table(&temp_dir.path().join("missing.json"));

        assert!(matches!(result, Err(CommandError::Io { .. })));
    }

    #[rstest]
    fn project_load_without_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let project = Project::load(temp_dir.path()).unwrap();

        assert_that!(project.locale_codes(), elements_are![eq("en"), eq("tr")]);
    }

    #[rstest]
    fn project_reads_per_locale_translations() {
        let temp_dir = TempDir::new().unwrap();
        let project = Project::new(temp_dir.path(), RouteSettings::default());
        let source = project.source();
        let routes: RouteMap =
            [("about".to_string(), "hakkimizda".to_string())].into_iter().collect();
        source.write_locale("tr", &routes).unwrap();

        let translations = project.read_translations().unwrap();

        let locales: Vec<String> = translations.keys().cloned().collect();
        assert_that!(locales, elements_are![eq("tr")]);
    }
}

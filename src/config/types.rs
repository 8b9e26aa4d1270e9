use std::path::{
    Path,
    PathBuf,
};
use std::time::Duration;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::LocaleRegistry;

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = ".translated-routes.json";

/// Environment variable that toggles the persistent cache layer.
pub const CACHE_ENABLED_ENV: &str = "TRANSLATED_ROUTES_CACHE";

/// Environment variable that overrides the cache expiry in seconds.
pub const CACHE_TTL_ENV: &str = "TRANSLATED_ROUTES_CACHE_TTL";

/// Default cache expiry (one day).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 86_400;

/// Locale used as `default` in locale snapshots when none is configured.
pub const DEFAULT_FALLBACK_LOCALE: &str = "en";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "supportedLocales.en")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid JSON in '{}': {message}", path.display())]
    SyntaxError { path: PathBuf, message: String },
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display metadata for one supported locale.
///
/// Both fields fall back to the locale code when omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocaleProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
}

impl LocaleProperties {
    #[must_use]
    pub fn new(name: impl Into<String>, native: impl Into<String>) -> Self {
        Self { name: Some(name.into()), native: Some(native.into()) }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteSettings {
    /// Supported locales in display order. The first entry is the registry default.
    pub supported_locales: IndexMap<String, LocaleProperties>,

    /// Whether resolved route maps are mirrored into the persistent cache.
    pub cache_enabled: bool,

    /// Persistent cache expiry in seconds.
    pub cache_ttl: u64,

    /// Reported as `default` in locale snapshots.
    pub fallback_locale: String,

    /// Directory holding the route files.
    /// If unset, `lang/` is used when it exists, otherwise `resources/lang/`.
    pub lang_path: Option<PathBuf>,

    /// Directory of the file-backed cache store.
    pub cache_path: Option<PathBuf>,
}

impl Default for RouteSettings {
    fn default() -> Self {
        let mut supported_locales = IndexMap::new();
        supported_locales.insert("en".to_string(), LocaleProperties::new("English", "English"));
        supported_locales.insert("tr".to_string(), LocaleProperties::new("Turkish", "Türkçe"));

        Self {
            supported_locales,
            cache_enabled: true,
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            fallback_locale: DEFAULT_FALLBACK_LOCALE.to_string(),
            lang_path: None,
            cache_path: None,
        }
    }
}

impl RouteSettings {
    /// # Errors
    /// - No supported locale
    /// - Empty locale code or a code containing `/` or `*`
    /// - Empty fallback locale
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.supported_locales.is_empty() {
            errors.push(ValidationError::new(
                "supportedLocales",
                "At least one locale is required. Example: {\"en\": {\"name\": \"English\"}}",
            ));
        }

        for code in self.supported_locales.keys() {
            if code.trim().is_empty() {
                errors.push(ValidationError::new(
                    "supportedLocales",
                    "Locale codes cannot be empty",
                ));
            } else if code.contains(['/', '*']) {
                errors.push(ValidationError::new(
                    format!("supportedLocales.{code}"),
                    format!("Locale code '{code}' cannot contain '/' or '*'"),
                ));
            }
        }

        if self.fallback_locale.trim().is_empty() {
            errors.push(ValidationError::new(
                "fallbackLocale",
                "The fallback locale cannot be empty. Example: \"en\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Applies `TRANSLATED_ROUTES_CACHE` and `TRANSLATED_ROUTES_CACHE_TTL`.
    ///
    /// `lookup` resolves an environment variable name to its value.
    ///
    /// # Errors
    /// Returns the offending variables when a value cannot be parsed.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), Vec<ValidationError>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut errors = Vec::new();

        if let Some(raw) = lookup(CACHE_ENABLED_ENV) {
            match parse_bool(&raw) {
                Some(enabled) => self.cache_enabled = enabled,
                None => errors.push(ValidationError::new(
                    CACHE_ENABLED_ENV,
                    format!("Expected a boolean (true/false/1/0), got '{raw}'"),
                )),
            }
        }

        if let Some(raw) = lookup(CACHE_TTL_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(ttl) => self.cache_ttl = ttl,
                Err(e) => errors.push(ValidationError::new(
                    CACHE_TTL_ENV,
                    format!("Expected a number of seconds, got '{raw}': {e}"),
                )),
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    #[must_use]
    pub const fn cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Builds the locale registry from `supportedLocales`.
    #[must_use]
    pub fn registry(&self) -> LocaleRegistry {
        LocaleRegistry::from_properties(&self.supported_locales)
    }

    /// Resolves the route file directory relative to the project root.
    #[must_use]
    pub fn resolve_lang_path(&self, root: &Path) -> PathBuf {
        if let Some(path) = &self.lang_path {
            return root.join(path);
        }

        let lang = root.join("lang");
        if lang.is_dir() { lang } else { root.join("resources").join("lang") }
    }

    #[must_use]
    pub fn resolve_cache_path(&self, root: &Path) -> PathBuf {
        self.cache_path
            .as_ref()
            .map_or_else(|| root.join(".translated-routes-cache"), |path| root.join(path))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

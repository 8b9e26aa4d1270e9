//! Project configuration: supported locales, cache settings, file locations.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use types::{
    CACHE_ENABLED_ENV,
    CACHE_TTL_ENV,
    CONFIG_FILE_NAME,
    ConfigError,
    DEFAULT_CACHE_TTL_SECS,
    DEFAULT_FALLBACK_LOCALE,
    LocaleProperties,
    RouteSettings,
    ValidationError,
};

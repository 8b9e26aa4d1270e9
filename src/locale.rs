//! Locale registry: the configured locales and their display metadata.

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::config::LocaleProperties;

/// One supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LocaleDescriptor {
    pub code: String,
    pub name: String,
    pub native: String,
}

impl LocaleDescriptor {
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        native: impl Into<String>,
    ) -> Self {
        Self { code: code.into(), name: name.into(), native: native.into() }
    }

    /// Missing `name`/`native` fall back to the code itself.
    #[must_use]
    pub fn from_properties(code: &str, properties: &LocaleProperties) -> Self {
        Self {
            code: code.to_string(),
            name: properties.name.clone().unwrap_or_else(|| code.to_string()),
            native: properties.native.clone().unwrap_or_else(|| code.to_string()),
        }
    }
}

/// Ordered, read-only table of supported locales.
///
/// Iteration follows configuration order and the first entry is the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleRegistry {
    locales: IndexMap<String, LocaleDescriptor>,
}

impl LocaleRegistry {
    /// A later descriptor with an already-seen code replaces the earlier one in place.
    #[must_use]
    pub fn new(descriptors: impl IntoIterator<Item = LocaleDescriptor>) -> Self {
        let locales = descriptors.into_iter().map(|d| (d.code.clone(), d)).collect();
        Self { locales }
    }

    #[must_use]
    pub fn from_properties(properties: &IndexMap<String, LocaleProperties>) -> Self {
        Self::new(
            properties.iter().map(|(code, props)| LocaleDescriptor::from_properties(code, props)),
        )
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&LocaleDescriptor> {
        self.locales.get(code)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.locales.contains_key(code)
    }

    /// First configured locale.
    #[must_use]
    pub fn default_locale(&self) -> Option<&LocaleDescriptor> {
        self.locales.first().map(|(_, descriptor)| descriptor)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleDescriptor> {
        self.locales.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// Code → display name, in registry order.
    #[must_use]
    pub fn display_names(&self) -> IndexMap<String, String> {
        self.locales.iter().map(|(code, d)| (code.clone(), d.name.clone())).collect()
    }

    /// Projects the registry for a client-side rendering layer.
    #[must_use]
    pub fn snapshot(&self, current: &str, default: &str) -> LocaleInfoSnapshot {
        let supported = self
            .locales
            .iter()
            .map(|(code, d)| {
                let info = LocaleInfo {
                    code: code.clone(),
                    name: d.name.clone(),
                    native: d.native.clone(),
                    active: code == current,
                };
                (code.clone(), info)
            })
            .collect();

        LocaleInfoSnapshot { current: current.to_string(), default: default.to_string(), supported }
    }
}

/// A supported locale as seen by the current request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocaleInfo {
    pub code: String,
    pub name: String,
    pub native: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LocaleInfoSnapshot {
    pub current: String,
    pub default: String,
    pub supported: IndexMap<String, LocaleInfo>,
}

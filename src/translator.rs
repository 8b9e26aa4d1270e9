//! Route translator: the public face of the engine.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;

use crate::cache::{
    CacheStore,
    FileStore,
    TranslationCache,
};
use crate::config::{
    DEFAULT_CACHE_TTL_SECS,
    DEFAULT_FALLBACK_LOCALE,
    RouteSettings,
};
use crate::locale::{
    LocaleInfoSnapshot,
    LocaleRegistry,
};
use crate::routes::{
    LocaleRoutes,
    RouteMap,
};
use crate::source::{
    FileRouteSource,
    RouteSource,
};
use crate::url::LocaleStripper;

/// Translates route keys into localized URIs and back.
///
/// Lookups never fail: an unknown key or locale comes back unchanged.
///
/// # Examples
/// ```
/// use translated_routes::locale::{LocaleDescriptor, LocaleRegistry};
/// use translated_routes::source::MemoryRouteSource;
/// use translated_routes::Translator;
///
/// let registry = LocaleRegistry::new([
///     LocaleDescriptor::new("en", "English", "English"),
///     LocaleDescriptor::new("tr", "Turkish", "Türkçe"),
/// ]);
/// let source = MemoryRouteSource::new()
///     .with_locale("tr", [("about", "hakkimizda"), ("blog/*", "makale/*")]);
/// let translator = Translator::builder(registry, source).build();
///
/// assert_eq!(translator.translate("about", "tr"), "hakkimizda");
/// assert_eq!(translator.translate("blog/hello", "tr"), "makale/hello");
/// assert_eq!(translator.translate("pricing", "tr"), "pricing");
/// assert_eq!(translator.get_non_localized_url("/tr/about-us"), "/about-us");
/// ```
#[derive(Debug)]
pub struct Translator {
    registry: LocaleRegistry,
    fallback_locale: String,
    source: Box<dyn RouteSource>,
    cache: TranslationCache,
    stripper: LocaleStripper,
}

impl Translator {
    #[must_use]
    pub fn builder(
        registry: LocaleRegistry,
        source: impl RouteSource + 'static,
    ) -> TranslatorBuilder {
        TranslatorBuilder::new(registry, Box::new(source))
    }

    /// Wires a translator for the project at `root`: route files from the
    /// language directory and, when caching is enabled, a file-backed store.
    #[must_use]
    pub fn from_settings(settings: &RouteSettings, root: &Path) -> Self {
        let mut builder = Self::builder(
            settings.registry(),
            FileRouteSource::from_settings(settings, root),
        )
        .fallback_locale(settings.fallback_locale.clone())
        .cache_ttl(settings.cache_ttl_duration());

        if settings.cache_enabled {
            builder = builder.store(Arc::new(FileStore::new(settings.resolve_cache_path(root))));
        }

        builder.build()
    }

    /// Translates `key` for `locale`.
    ///
    /// Exact entries win; otherwise the first wildcard entry (in source order)
    /// matching `key` is used, with the captured segments substituted into its
    /// pattern. Without any match `key` is returned as is.
    #[must_use]
    pub fn translate(&self, key: &str, locale: &str) -> String {
        self.locale_routes(locale).translate(key)
    }

    /// Like [`Self::translate`], but reports a missing translation as `None`.
    #[must_use]
    pub fn try_translate(&self, key: &str, locale: &str) -> Option<String> {
        self.locale_routes(locale).resolve(key)
    }

    /// Locale metadata for a client-side rendering layer.
    #[must_use]
    pub fn get_locale_data(&self, current_locale: &str) -> LocaleInfoSnapshot {
        self.registry.snapshot(current_locale, &self.fallback_locale)
    }

    /// Removes supported locale segments from `url`.
    #[must_use]
    pub fn get_non_localized_url(&self, url: &str) -> String {
        self.stripper.strip(url)
    }

    /// Clears the cache of `locale`, or of every supported locale.
    ///
    /// Always returns true; clearing a cold cache is not an error.
    pub fn clear_cache(&self, locale: Option<&str>) -> bool {
        match locale {
            Some(locale) => self.cache.forget(locale),
            None => self.cache.flush(self.registry.codes()),
        }
        true
    }

    /// The resolved (cached) routes of `locale`.
    ///
    /// An unsupported locale has no routes and is neither loaded nor cached.
    #[must_use]
    pub fn locale_routes(&self, locale: &str) -> Arc<LocaleRoutes> {
        if !self.registry.contains(locale) {
            tracing::debug!(locale = %locale, "Unsupported locale; routes left untranslated");
            return Arc::new(LocaleRoutes::default());
        }
        self.cache.get_or_load(locale, &|| self.source.try_load(locale))
    }

    /// The route map of `locale`.
    #[must_use]
    pub fn routes(&self, locale: &str) -> RouteMap {
        self.locale_routes(locale).map().clone()
    }

    #[must_use]
    pub fn is_warm(&self, locale: &str) -> bool {
        self.cache.is_warm(locale)
    }

    #[must_use]
    pub const fn supported_locales(&self) -> &LocaleRegistry {
        &self.registry
    }

    #[must_use]
    pub fn is_supported(&self, locale: &str) -> bool {
        self.registry.contains(locale)
    }

    /// Code → display name of every supported locale.
    #[must_use]
    pub fn display_names(&self) -> IndexMap<String, String> {
        self.registry.display_names()
    }

    #[must_use]
    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    #[must_use]
    pub const fn cache(&self) -> &TranslationCache {
        &self.cache
    }
}

#[derive(Debug)]
pub struct TranslatorBuilder {
    registry: LocaleRegistry,
    source: Box<dyn RouteSource>,
    fallback_locale: String,
    store: Option<Arc<dyn CacheStore>>,
    cache_ttl: Duration,
}

impl TranslatorBuilder {
    fn new(registry: LocaleRegistry, source: Box<dyn RouteSource>) -> Self {
        Self {
            registry,
            source,
            fallback_locale: DEFAULT_FALLBACK_LOCALE.to_string(),
            store: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }

    #[must_use]
    pub fn fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = locale.into();
        self
    }

    /// Attaches a persistent cache tier.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub const fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    #[must_use]
    pub fn build(self) -> Translator {
        let stripper = LocaleStripper::new(self.registry.codes());
        Translator {
            registry: self.registry,
            fallback_locale: self.fallback_locale,
            source: self.source,
            cache: TranslationCache::new(self.store, self.cache_ttl),
            stripper,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::*;
    use tempfile::TempDir;

    use super::*;
    use crate::cache::MemoryStore;
    use crate::test_utils::{
        sample_registry,
        sample_source,
    };

    fn translator() -> Translator {
        Translator::builder(sample_registry(), sample_source()).build()
    }

    #[rstest]
    #[case::exact_tr("about", "tr", "hakkimizda")]
    #[case::exact_en("about", "en", "about-us")]
    #[case::template("blog/{slug}", "tr", "makale/{slug}")]
    #[case::multi_wildcard("products/7/reviews/2", "tr", "urunler/7/yorumlar/2")]
    #[case::wildcard("blog/hello-world", "tr", "makale/hello-world")]
    #[case::wildcard_en("blog/hello-world", "en", "blog/hello-world")]
    #[case::unknown_key("pricing", "tr", "pricing")]
    #[case::unknown_locale("about", "de", "about")]
    fn translate_cases(#[case] key: &str, #[case] locale: &str, #[case] expected: &str) {
        assert_that!(translator().translate(key, locale), eq(expected));
    }

    #[rstest]
    fn try_translate_distinguishes_missing() {
        let translator = translator();

        assert_that!(translator.try_translate("pricing", "tr"), none());
        assert_that!(translator.try_translate("contact", "tr"), some(eq("iletisim")));
    }

    #[rstest]
    fn translate_warms_only_requested_locale() {
        let translator = translator();

        let _ = translator.translate("about", "tr");

        assert_that!(translator.is_warm("tr"), eq(true));
        assert_that!(translator.is_warm("en"), eq(false));
    }

    #[rstest]
    fn warm_cache_does_not_reload() {
        let source = Arc::new(sample_source());
        let translator = Translator::builder(sample_registry(), Arc::clone(&source)).build();

        let _ = translator.translate("about", "tr");
        let _ = translator.translate("contact", "tr");
        let _ = translator.translate("blog/x", "tr");

        assert_that!(source.load_count(), eq(1));
    }

    #[rstest]
    fn clear_all_forces_reload_with_same_answer() {
        let source = Arc::new(sample_source());
        let translator = Translator::builder(sample_registry(), Arc::clone(&source)).build();
        let before = translator.translate("blog/hello", "tr");

        assert_that!(translator.clear_cache(None), eq(true));
        let after = translator.translate("blog/hello", "tr");

        assert_that!(after, eq(&before));
        assert_that!(source.load_count(), eq(2));
    }

    #[rstest]
    fn clear_one_locale_keeps_others_warm() {
        let source = Arc::new(sample_source());
        let translator = Translator::builder(sample_registry(), Arc::clone(&source)).build();
        let _ = translator.translate("about", "en");
        let _ = translator.translate("about", "tr");

        assert_that!(translator.clear_cache(Some("en")), eq(true));
        let _ = translator.translate("about", "tr");

        assert_that!(source.load_count(), eq(2));
        assert_that!(translator.is_warm("en"), eq(false));
        assert_that!(translator.is_warm("tr"), eq(true));
    }

    #[rstest]
    fn clear_cold_cache_is_fine() {
        let translator = translator();

        assert_that!(translator.clear_cache(Some("tr")), eq(true));
        assert_that!(translator.clear_cache(Some("xx")), eq(true));
        assert_that!(translator.clear_cache(None), eq(true));
    }

    #[rstest]
    fn clear_cache_evicts_persistent_tier() {
        let store = Arc::new(MemoryStore::new());
        let translator = Translator::builder(sample_registry(), sample_source())
            .store(Arc::clone(&store) as Arc<dyn CacheStore>)
            .build();
        let _ = translator.translate("about", "en");
        let _ = translator.translate("about", "tr");
        assert_that!(store.len(), eq(2));

        translator.clear_cache(Some("tr"));
        assert_that!(store.len(), eq(1));

        translator.clear_cache(None);
        assert_that!(store.is_empty(), eq(true));
    }

    #[rstest]
    fn persistent_tier_answers_after_memory_reset() {
        let store: Arc<dyn CacheStore> = Arc::new(MemoryStore::new());
        let source = Arc::new(sample_source());
        let translator = Translator::builder(sample_registry(), Arc::clone(&source))
            .store(Arc::clone(&store))
            .build();
        let _ = translator.translate("about", "tr");

        // A second process sharing the store starts cold in memory only.
        let other_source = Arc::new(sample_source());
        let other = Translator::builder(sample_registry(), Arc::clone(&other_source))
            .store(store)
            .build();

        assert_that!(other.translate("about", "tr"), eq("hakkimizda"));
        assert_that!(source.load_count(), eq(1));
        assert_that!(other_source.load_count(), eq(0));
    }

    #[rstest]
    fn unsupported_locales_skip_both_tiers() {
        let store = Arc::new(MemoryStore::new());
        let source = Arc::new(sample_source().with_locale("xx", [("about", "xx-about")]));
        let translator = Translator::builder(sample_registry(), Arc::clone(&source))
            .store(Arc::clone(&store) as Arc<dyn CacheStore>)
            .build();

        for locale in ["xx", "yy", "../tr"] {
            assert_that!(translator.translate("about", locale), eq("about"));
        }

        assert_that!(source.load_count(), eq(0));
        assert_that!(translator.cache().warm_locales(), is_empty());
        assert_that!(store.is_empty(), eq(true));
    }

    #[rstest]
    fn broken_route_file_is_not_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let lang = temp_dir.path().join("lang").join("tr");
        fs::create_dir_all(&lang).unwrap();
        fs::write(lang.join("routes.json"), r#"{"about": "hakki"#).unwrap();
        let settings = RouteSettings::default();

        let first = Translator::from_settings(&settings, temp_dir.path());
        assert_that!(first.translate("about", "tr"), eq("about"));
        let entry =
            temp_dir.path().join(".translated-routes-cache").join("translated_routes.tr.json");
        assert_that!(entry.exists(), eq(false));

        fs::write(lang.join("routes.json"), r#"{"about": "hakkimizda"}"#).unwrap();
        let second = Translator::from_settings(&settings, temp_dir.path());

        assert_that!(second.translate("about", "tr"), eq("hakkimizda"));
        // the first translator keeps its in-memory answer until cleared
        assert_that!(first.translate("about", "tr"), eq("about"));
        first.clear_cache(Some("tr"));
        assert_that!(first.translate("about", "tr"), eq("hakkimizda"));
    }

    #[rstest]
    fn get_locale_data_uses_fallback_as_default() {
        let translator =
            Translator::builder(sample_registry(), sample_source()).fallback_locale("tr").build();

        let data = translator.get_locale_data("en");

        assert_that!(data.current, eq("en"));
        assert_that!(data.default, eq("tr"));
        assert_that!(data.supported.get("en").map(|info| info.active), some(eq(true)));
        assert_that!(data.supported.get("tr").map(|info| info.active), some(eq(false)));
    }

    #[rstest]
    fn non_localized_url_uses_registry() {
        let translator = translator();

        assert_that!(translator.get_non_localized_url("/tr/about-us"), eq("/about-us"));
        assert_that!(translator.get_non_localized_url("/de/about-us"), eq("/de/about-us"));
    }

    #[rstest]
    fn display_names_follow_registry() {
        let names = translator().display_names();

        let entries: Vec<(String, String)> = names.into_iter().collect();
        assert_that!(
            entries,
            elements_are![
                eq(&("en".to_string(), "English".to_string())),
                eq(&("tr".to_string(), "Turkish".to_string()))
            ]
        );
    }

    #[rstest]
    fn from_settings_reads_files_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let lang = temp_dir.path().join("lang").join("tr");
        fs::create_dir_all(&lang).unwrap();
        fs::write(lang.join("routes.json"), r#"{"about": "hakkimizda"}"#).unwrap();
        let settings = RouteSettings::default();

        let translator = Translator::from_settings(&settings, temp_dir.path());

        assert_that!(translator.translate("about", "tr"), eq("hakkimizda"));
        let entry =
            temp_dir.path().join(".translated-routes-cache").join("translated_routes.tr.json");
        assert_that!(entry.is_file(), eq(true));
    }

    #[rstest]
    fn from_settings_without_cache_skips_store() {
        let temp_dir = TempDir::new().unwrap();
        let settings = RouteSettings { cache_enabled: false, ..RouteSettings::default() };

        let translator = Translator::from_settings(&settings, temp_dir.path());
        let _ = translator.translate("about", "tr");

        assert_that!(translator.cache().store().is_none(), eq(true));
        assert_that!(temp_dir.path().join(".translated-routes-cache").exists(), eq(false));
    }
}

//! Thin glue for web frameworks.
//!
//! Everything here goes through the four core operations of [`Translator`].

use serde_json::{
    Map,
    Value,
};

use crate::translator::Translator;

/// Key under which the locale snapshot is shared with the view layer.
pub const LOCALE_DATA_KEY: &str = "locale";

/// A route as registered with the host router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDefinition {
    pub uri: String,
    pub name: Option<String>,
    pub methods: Vec<String>,
}

impl RouteDefinition {
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into(), name: None, methods: vec!["GET".to_string(), "HEAD".to_string()] }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn methods<S: Into<String>>(mut self, methods: impl IntoIterator<Item = S>) -> Self {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }
}

/// Replaces the URI of `route` with its translation for `locale`.
pub fn translate_route(translator: &Translator, route: &mut RouteDefinition, locale: &str) {
    let translated = translator.translate(&route.uri, locale);
    if translated != route.uri {
        tracing::debug!(from = %route.uri, to = %translated, "Route translated");
        route.uri = translated;
    }
}

/// Translates every route registered at or after index `start`.
///
/// Used around group registration: record `routes.len()` before registering
/// the group, then pass it as `start`.
pub fn translate_routes_from(
    translator: &Translator,
    routes: &mut [RouteDefinition],
    start: usize,
    locale: &str,
) {
    for route in routes.iter_mut().skip(start) {
        translate_route(translator, route, locale);
    }
}

/// Receiver of per-request data for a client-side rendering layer.
pub trait SharedDataSink {
    fn share(&mut self, key: &str, value: Value);
}

impl SharedDataSink for Map<String, Value> {
    fn share(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }
}

/// Shares the locale snapshot of `current_locale` under [`LOCALE_DATA_KEY`].
///
/// Without a sink there is nothing to do. Returns whether data was shared.
pub fn share_locale_data(
    translator: &Translator,
    current_locale: &str,
    sink: Option<&mut dyn SharedDataSink>,
) -> bool {
    let Some(sink) = sink else {
        return false;
    };

    match serde_json::to_value(translator.get_locale_data(current_locale)) {
        Ok(value) => {
            sink.share(LOCALE_DATA_KEY, value);
            true
        }
        Err(e) => {
            tracing::warn!("Failed to serialize locale data: {e}");
            false
        }
    }
}

/// Strips locale segments from `url`.
#[must_use]
pub fn non_localized_url(translator: &Translator, url: &str) -> String {
    translator.get_non_localized_url(url)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{
        sample_registry,
        sample_source,
    };

    #[fixture]
    fn translator() -> Translator {
        Translator::builder(sample_registry(), sample_source()).build()
    }

    #[rstest]
    fn translate_route_rewrites_uri(translator: Translator) {
        let mut route = RouteDefinition::new("about").named("about");

        translate_route(&translator, &mut route, "tr");

        assert_that!(route.uri, eq("hakkimizda"));
        assert_that!(route.name, some(eq("about")));
    }

    #[rstest]
    fn translate_routes_from_leaves_earlier_routes(translator: Translator) {
        let mut routes = vec![RouteDefinition::new("about")];
        let start = routes.len();
        routes.push(RouteDefinition::new("contact"));
        routes.push(RouteDefinition::new("blog/first-post"));

        translate_routes_from(&translator, &mut routes, start, "tr");

        let uris: Vec<String> = routes.into_iter().map(|route| route.uri).collect();
        assert_that!(uris, elements_are![eq("about"), eq("iletisim"), eq("makale/first-post")]);
    }

    #[rstest]
    fn share_locale_data_without_sink(translator: Translator) {
        assert_that!(share_locale_data(&translator, "tr", None), eq(false));
    }

    #[rstest]
    fn share_locale_data_into_map(translator: Translator) {
        let mut shared = Map::new();

        let done = share_locale_data(&translator, "tr", Some(&mut shared));

        assert_that!(done, eq(true));
        let locale = &shared[LOCALE_DATA_KEY];
        assert_that!(locale["current"], eq(&json!("tr")));
        assert_that!(locale["supported"]["tr"]["active"], eq(&json!(true)));
        assert_that!(locale["supported"]["en"]["native"], eq(&json!("English")));
    }

    #[rstest]
    fn non_localized_url_helper(translator: Translator) {
        assert_that!(non_localized_url(&translator, "/tr/hakkimizda"), eq("/hakkimizda"));
    }
}

//! Removal of locale segments from URLs.

use regex::Regex;

/// Strips supported locale codes from URL paths.
///
/// Codes are applied one after another, in registry order, each against the
/// result of the previous one.
#[derive(Debug, Clone, Default)]
pub struct LocaleStripper {
    /// `(^/<code>(/|$), /<code>(/|$))` per locale
    rules: Vec<(Regex, Regex)>,
}

impl LocaleStripper {
    #[must_use]
    pub fn new<'a>(codes: impl IntoIterator<Item = &'a str>) -> Self {
        let rules = codes
            .into_iter()
            .filter_map(|code| {
                let escaped = regex::escape(code);
                let leading = Regex::new(&format!("^/{escaped}(/|$)"));
                let embedded = Regex::new(&format!("/{escaped}(/|$)"));
                match (leading, embedded) {
                    (Ok(leading), Ok(embedded)) => Some((leading, embedded)),
                    (Err(e), _) | (_, Err(e)) => {
                        tracing::warn!(locale = %code, "Cannot build locale strip rule: {e}");
                        None
                    }
                }
            })
            .collect();

        Self { rules }
    }

    /// Removes locale segments from `url`.
    ///
    /// Every match collapses to a single `/`. The result has no trailing `/`,
    /// except that a fully stripped URL becomes `/`.
    #[must_use]
    pub fn strip(&self, url: &str) -> String {
        let mut url = url.to_string();

        for (leading, embedded) in &self.rules {
            url = leading.replace(&url, "/").into_owned();
            url = embedded.replace_all(&url, "/").into_owned();
        }

        let trimmed = url.trim_end_matches('/');
        if trimmed.is_empty() { "/".to_string() } else { trimmed.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn stripper() -> LocaleStripper {
        LocaleStripper::new(["en", "tr"])
    }

    #[rstest]
    #[case::leading("/tr/about-us", "/about-us")]
    #[case::leading_other("/en/contact", "/contact")]
    #[case::bare_locale("/tr", "/")]
    #[case::bare_locale_slash("/tr/", "/")]
    #[case::no_locale("/about", "/about")]
    #[case::embedded("/shop/tr/items", "/shop/items")]
    #[case::embedded_end("/shop/en", "/shop")]
    #[case::prefix_only_word("/travel", "/travel")]
    #[case::inside_word("/about/entry", "/about/entry")]
    #[case::trailing_slash("/about/", "/about")]
    #[case::root("/", "/")]
    #[case::empty("", "/")]
    #[case::both_locales("/en/tr/page", "/page")]
    #[case::repeated("/tr/tr/x", "/x")]
    fn strip_cases(stripper: LocaleStripper, #[case] url: &str, #[case] expected: &str) {
        assert_that!(stripper.strip(url), eq(expected));
    }

    #[rstest]
    fn strip_is_idempotent(stripper: LocaleStripper) {
        let once = stripper.strip("/tr/blog/en/post/");

        assert_that!(stripper.strip(&once), eq(&once));
    }

    #[rstest]
    fn codes_with_regex_metacharacters_are_literal() {
        let stripper = LocaleStripper::new(["zh.hk"]);

        assert_that!(stripper.strip("/zh.hk/news"), eq("/news"));
        assert_that!(stripper.strip("/zhxhk/news"), eq("/zhxhk/news"));
    }

    #[rstest]
    fn without_locales_only_trims() {
        let stripper = LocaleStripper::default();

        assert_that!(stripper.strip("/tr/about/"), eq("/tr/about"));
    }
}

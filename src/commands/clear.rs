use std::io::Write;

use colored::Colorize;

use super::CommandError;
use crate::translator::Translator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    Locale(String),
    All,
}

/// Clears the cache of one supported locale, or of all of them.
///
/// # Errors
/// Returns [`CommandError::UnsupportedLocale`] for a locale outside the registry.
pub fn clear(translator: &Translator, locale: Option<&str>) -> Result<ClearOutcome, CommandError> {
    match locale {
        Some(locale) if !translator.is_supported(locale) => {
            Err(CommandError::UnsupportedLocale(locale.to_string()))
        }
        Some(locale) => {
            translator.clear_cache(Some(locale));
            Ok(ClearOutcome::Locale(locale.to_string()))
        }
        None => {
            translator.clear_cache(None);
            Ok(ClearOutcome::All)
        }
    }
}

/// # Errors
/// Returns an error if writing to `out` fails.
pub fn render_clear(outcome: &ClearOutcome, out: &mut dyn Write) -> std::io::Result<()> {
    match outcome {
        ClearOutcome::Locale(locale) => {
            writeln!(out, "{} Cache cleared for locale: {locale}", "✓".green())
        }
        ClearOutcome::All => writeln!(out, "{} Cache cleared for all locales", "✓".green()),
    }
}

use std::io::Write;
use std::path::PathBuf;

use colored::Colorize;

use super::{
    CommandError,
    Project,
};
use crate::routes::RouteMap;

/// Files touched by [`install`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub created: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Example routes for a freshly installed locale.
///
/// Only `en` and `tr` have their own examples; other locales start from `en`.
#[must_use]
pub fn example_routes(locale: &str) -> RouteMap {
    let entries: [(&str, &str); 3] = match locale {
        "tr" => [("about", "hakkimizda"), ("contact", "iletisim"), ("blog", "blog/{slug}")],
        _ => [("about", "about"), ("contact", "contact"), ("blog", "blog/{slug}")],
    };
    entries.into_iter().map(|(key, pattern)| (key.to_string(), pattern.to_string())).collect()
}

/// Writes an example route file for every supported locale.
///
/// Existing files are left alone unless `force` is set.
///
/// # Errors
/// - No supported locale is configured
/// - A route file cannot be written
pub fn install(project: &Project, force: bool) -> Result<InstallReport, CommandError> {
    if project.settings.supported_locales.is_empty() {
        return Err(CommandError::NoLocales);
    }

    let source = project.source();
    let mut report = InstallReport::default();

    for locale in project.settings.supported_locales.keys() {
        let path = source.locale_path(locale);
        if path.exists() && !force {
            tracing::debug!("Keeping existing route file {:?}", path);
            report.skipped.push(path);
            continue;
        }

        report.created.push(source.write_locale(locale, &example_routes(locale))?);
    }

    Ok(report)
}

/// # Errors
/// Returns an error if writing to `out` fails.
pub fn render_install(report: &InstallReport, out: &mut dyn Write) -> std::io::Result<()> {
    for path in &report.created {
        writeln!(out, "{} Created: {}", "✓".green(), path.display())?;
    }
    for path in &report.skipped {
        writeln!(
            out,
            "{} Skipped existing file: {} (use --force to overwrite)",
            "-".yellow(),
            path.display()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Route translation files created successfully!".green())
}

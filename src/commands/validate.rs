use std::collections::HashSet;
use std::io::Write;

use colored::Colorize;
use indexmap::{
    IndexMap,
    IndexSet,
};

use crate::adapter::RouteDefinition;
use crate::pattern::is_wildcard;
use crate::routes::RouteMap;

/// Key set differences of one locale against the base locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDrift {
    pub locale: String,
    pub base: String,
    /// Keys only this locale has.
    pub extra: Vec<String>,
    /// Keys only the base locale has.
    pub missing: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Per locale, keys some other locale defines but this one lacks.
    pub missing: IndexMap<String, Vec<String>>,
    pub drift: Vec<KeyDrift>,
    /// Non-wildcard keys no host route uses. Informational only.
    pub unused: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.missing.is_empty() || !self.drift.is_empty()
    }
}

/// Checks route maps for consistency across `locales`.
///
/// Locales without route data count as empty. The first of `locales` is the
/// base for the drift check. `host_routes`, when given, enables the unused key
/// check.
#[must_use]
pub fn validate(
    translations: &IndexMap<String, RouteMap>,
    locales: &[String],
    host_routes: Option<&[RouteDefinition]>,
) -> ValidationReport {
    let empty = RouteMap::new();
    let routes_of = |locale: &str| translations.get(locale).unwrap_or(&empty);

    let all_keys: IndexSet<&String> =
        translations.values().flat_map(|routes| routes.keys()).collect();

    let missing = locales
        .iter()
        .filter_map(|locale| {
            let routes = routes_of(locale);
            let absent: Vec<String> = all_keys
                .iter()
                .filter(|key| !routes.contains_key(key.as_str()))
                .map(|key| (*key).clone())
                .collect();
            (!absent.is_empty()).then(|| (locale.clone(), absent))
        })
        .collect();

    let drift = match locales.split_first() {
        Some((base, rest)) => {
            let base_routes = routes_of(base);
            rest.iter()
                .filter_map(|locale| {
                    let routes = routes_of(locale);
                    let extra = sorted_difference(routes, base_routes);
                    let missing = sorted_difference(base_routes, routes);
                    (!extra.is_empty() || !missing.is_empty()).then(|| KeyDrift {
                        locale: locale.clone(),
                        base: base.clone(),
                        extra,
                        missing,
                    })
                })
                .collect()
        }
        None => Vec::new(),
    };

    let unused = host_routes.map_or_else(Vec::new, |host_routes| {
        let used: HashSet<&str> = host_routes
            .iter()
            .map(|route| route.uri.as_str())
            .filter(|uri| *uri != "/")
            .collect();
        all_keys
            .iter()
            .filter(|key| !is_wildcard(key) && !used.contains(key.as_str()))
            .map(|key| (*key).clone())
            .collect()
    });

    ValidationReport { missing, drift, unused }
}

/// Keys of `left` absent from `right`, sorted.
fn sorted_difference(left: &RouteMap, right: &RouteMap) -> Vec<String> {
    let mut keys: Vec<String> =
        left.keys().filter(|key| !right.contains_key(*key)).cloned().collect();
    keys.sort();
    keys
}

/// # Errors
/// Returns an error if writing to `out` fails.
pub fn render_validation(report: &ValidationReport, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", "Validating route translations...".cyan())?;
    writeln!(out)?;

    for (locale, keys) in &report.missing {
        writeln!(out, "{}", format!("Missing translations in locale '{locale}':").yellow())?;
        for key in keys {
            writeln!(out, "  - {key}")?;
        }
        writeln!(out)?;
    }

    for drift in &report.drift {
        if !drift.extra.is_empty() {
            let heading = format!("Extra keys in '{}' (not in '{}'):", drift.locale, drift.base);
            writeln!(out, "{}", heading.yellow())?;
            for key in &drift.extra {
                writeln!(out, "  + {key}")?;
            }
            writeln!(out)?;
        }
        if !drift.missing.is_empty() {
            let heading =
                format!("Missing keys in '{}' (present in '{}'):", drift.locale, drift.base);
            writeln!(out, "{}", heading.yellow())?;
            for key in &drift.missing {
                writeln!(out, "  - {key}")?;
            }
            writeln!(out)?;
        }
    }

    if !report.unused.is_empty() {
        writeln!(out, "{}", "Keys not used by any registered route (warning):".yellow())?;
        for key in &report.unused {
            writeln!(out, "  ? {key}")?;
        }
        writeln!(out)?;
    }

    if report.has_errors() {
        writeln!(out, "{}", "✗ Validation failed with errors".red())
    } else {
        writeln!(out, "{}", "✓ All translations are valid!".green())
    }
}

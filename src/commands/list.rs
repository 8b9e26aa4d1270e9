use std::io::Write;

use colored::Colorize;
use indexmap::{
    IndexMap,
    IndexSet,
};

use crate::adapter::RouteDefinition;
use crate::pattern::is_wildcard;
use crate::routes::RouteMap;
use crate::translator::Translator;

/// Column headers of the route table.
const HEADERS: [&str; 4] = ["Method", "URI", "Name", "Locale"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedRoute {
    pub method: String,
    pub uri: String,
    pub name: String,
    pub locale: String,
}

impl ListedRoute {
    fn columns(&self) -> [&str; 4] {
        [&self.method, &self.uri, &self.name, &self.locale]
    }
}

/// Translates every host route for each of `locales`.
///
/// The root route `/` is skipped. Rows are sorted by locale, then URI.
#[must_use]
pub fn list_routes(
    translator: &Translator,
    locales: &[String],
    host_routes: &[RouteDefinition],
) -> Vec<ListedRoute> {
    let mut rows: Vec<ListedRoute> = host_routes
        .iter()
        .filter(|route| route.uri != "/")
        .flat_map(|route| {
            locales.iter().map(move |locale| ListedRoute {
                method: route.methods.join("|"),
                uri: translator.translate(&route.uri, locale),
                name: route.name.clone().unwrap_or_else(|| "-".to_string()),
                locale: locale.clone(),
            })
        })
        .collect();

    rows.sort_by(|a, b| a.locale.cmp(&b.locale).then_with(|| a.uri.cmp(&b.uri)));
    rows
}

/// Stand-in host table when none is supplied: every non-wildcard route key,
/// unnamed.
#[must_use]
pub fn fallback_route_table(translations: &IndexMap<String, RouteMap>) -> Vec<RouteDefinition> {
    let keys: IndexSet<&String> = translations
        .values()
        .flat_map(|routes| routes.keys())
        .filter(|key| !is_wildcard(key))
        .collect();

    keys.into_iter().map(RouteDefinition::new).collect()
}

/// # Errors
/// Returns an error if writing to `out` fails.
pub fn render_list(rows: &[ListedRoute], out: &mut dyn Write) -> std::io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "{}", "No translated routes found.".cyan());
    }

    let mut widths = HEADERS.map(str::len);
    for row in rows {
        for (width, column) in widths.iter_mut().zip(row.columns()) {
            *width = (*width).max(column.chars().count());
        }
    }

    let separator = widths.iter().map(|width| "-".repeat(width + 2)).collect::<Vec<_>>().join("+");
    let separator = format!("+{separator}+");

    writeln!(out, "{separator}")?;
    write_row(out, &HEADERS, &widths, true)?;
    writeln!(out, "{separator}")?;
    for row in rows {
        write_row(out, &row.columns(), &widths, false)?;
    }
    writeln!(out, "{separator}")
}

fn write_row(
    out: &mut dyn Write,
    columns: &[&str; 4],
    widths: &[usize; 4],
    header: bool,
) -> std::io::Result<()> {
    write!(out, "|")?;
    for (column, width) in columns.iter().zip(widths) {
        let padding = " ".repeat(width - column.chars().count());
        if header {
            write!(out, " {}{padding} |", column.bold())?;
        } else {
            write!(out, " {column}{padding} |")?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::test_utils::{
        sample_registry,
        sample_source,
    };

    fn locales() -> Vec<String> {
        vec!["tr".to_string(), "en".to_string()]
    }

    #[rstest]
    fn list_translates_and_sorts() {
        let translator = Translator::builder(sample_registry(), sample_source()).build();
        let host = vec![
            RouteDefinition::new("/"),
            RouteDefinition::new("contact").named("contact"),
            RouteDefinition::new("about").named("about").methods(["GET"]),
        ];

        let rows = list_routes(&translator, &locales(), &host);

        let summary: Vec<String> =
            rows.iter().map(|row| format!("{} {} {}", row.locale, row.uri, row.method)).collect();
        assert_that!(
            summary,
            elements_are![
                eq("en about-us GET"),
                eq("en contact GET|HEAD"),
                eq("tr hakkimizda GET"),
                eq("tr iletisim GET|HEAD")
            ]
        );
    }

    #[rstest]
    fn unnamed_routes_show_dash() {
        let translator = Translator::builder(sample_registry(), sample_source()).build();

        let rows = list_routes(&translator, &["tr".to_string()], &[RouteDefinition::new("about")]);

        assert_that!(rows[0].name, eq("-"));
    }

    #[rstest]
    fn fallback_table_uses_plain_keys_once() {
        let source = sample_source();

        let table = fallback_route_table(source.all());

        let uris: Vec<String> = table.into_iter().map(|route| route.uri).collect();
        assert_that!(uris, elements_are![eq("about"), eq("contact")]);
    }

    #[rstest]
    fn render_aligns_columns() {
        colored::control::set_override(false);
        let rows = vec![ListedRoute {
            method: "GET|HEAD".to_string(),
            uri: "hakkimizda".to_string(),
            name: "about".to_string(),
            locale: "tr".to_string(),
        }];
        let mut out = Vec::new();

        render_list(&rows, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_that!(lines.len(), eq(5));
        assert_that!(lines[1], eq("| Method   | URI        | Name  | Locale |"));
        assert_that!(lines[3], eq("| GET|HEAD | hakkimizda | about | tr     |"));
    }

    #[rstest]
    fn render_empty() {
        colored::control::set_override(false);
        let mut out = Vec::new();

        render_list(&[], &mut out).unwrap();

        assert_that!(String::from_utf8(out).unwrap(), eq("No translated routes found.\n"));
    }
}

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};
use std::str::FromStr;

use indexmap::IndexMap;

use super::{
    CommandError,
    Project,
};
use crate::routes::RouteMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    JavaScript,
    TypeScript,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::JavaScript => "js",
            Self::TypeScript => "ts",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "js" => Ok(Self::JavaScript),
            "ts" => Ok(Self::TypeScript),
            other => Err(CommandError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `<root>/public/translations/routes.<ext>`
#[must_use]
pub fn default_output(root: &Path, format: ExportFormat) -> PathBuf {
    root.join("public").join("translations").join(format!("routes.{}", format.extension()))
}

/// Renders every locale's routes in `format`.
///
/// The generated modules expose `translatedRoutes`, a `getRoute(key, locale)`
/// accessor defaulting to `default_locale`, and a default export.
///
/// # Errors
/// Returns an error if the routes cannot be serialized.
pub fn render_export(
    translations: &IndexMap<String, RouteMap>,
    format: ExportFormat,
    default_locale: &str,
    generated_at: &str,
) -> Result<String, CommandError> {
    let content = match format {
        ExportFormat::Json => serde_json::to_string_pretty(translations)?,
        ExportFormat::JavaScript => {
            let json = serde_json::to_string(translations)?;
            let default_locale = quote(default_locale);
            format!(
                "// Auto-generated translated routes
// Generated at: {generated_at}

export const translatedRoutes = {json};

export function getRoute(key, locale = {default_locale}) {{
  return translatedRoutes[locale]?.[key] || key;
}}

export default translatedRoutes;
"
            )
        }
        ExportFormat::TypeScript => {
            let json = serde_json::to_string(translations)?;
            let default_locale = quote(default_locale);
            // Key union from the first locale
            let key_type = match translations.values().next() {
                Some(routes) if !routes.is_empty() => union(routes.keys()),
                _ => "string".to_string(),
            };
            let locale_type = if translations.is_empty() {
                "string".to_string()
            } else {
                union(translations.keys())
            };

            format!(
                "// Auto-generated translated routes
// Generated at: {generated_at}

export type RouteKey = {key_type};

export type Locale = {locale_type};

export interface TranslatedRoutes {{
  [locale: string]: {{
    [key: string]: string;
  }};
}}

export const translatedRoutes: TranslatedRoutes = {json};

export function getRoute(key: RouteKey, locale: Locale = {default_locale}): string {{
  return translatedRoutes[locale]?.[key] || key;
}}

export default translatedRoutes;
"
            )
        }
    };

    Ok(content)
}

/// `'a' | 'b' | ...`
fn union<'a>(values: impl Iterator<Item = &'a String>) -> String {
    values.map(|value| quote(value)).collect::<Vec<_>>().join(" | ")
}

/// Single-quoted JavaScript string literal.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

/// Writes the export of `project` to `output`, or to [`default_output`].
///
/// # Errors
/// - A route file is unreadable
/// - The output directory or file cannot be written
pub fn export(
    project: &Project,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<PathBuf, CommandError> {
    let output = output.map_or_else(|| default_output(&project.root, format), Path::to_path_buf);
    let translations = project.read_translations()?;
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let content =
        render_export(&translations, format, &project.settings.fallback_locale, &generated_at)?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|source| CommandError::Io { path: parent.to_path_buf(), source })?;
    }
    std::fs::write(&output, content)
        .map_err(|source| CommandError::Io { path: output.clone(), source })?;

    tracing::debug!("Exported {} locales to {:?}", translations.len(), output);
    Ok(output)
}

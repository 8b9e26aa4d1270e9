//! Entry point for the `translated-routes` operator tool.

use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use translated_routes::commands::{
    self,
    CommandError,
    ExportFormat,
    Project,
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "TRANSLATED_ROUTES_LOG";

#[derive(Debug, Parser)]
#[command(name = "translated-routes")]
#[command(version)]
#[command(about = "Manage localized route translations")]
struct Cli {
    /// Project root holding .translated-routes.json and the language directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create route files for all supported locales
    Install {
        /// Overwrite existing route files
        #[arg(long)]
        force: bool,
    },

    /// Clear the route cache
    Clear {
        /// Locale to clear (default: all)
        #[arg(value_name = "LOCALE")]
        locale: Option<String>,
    },

    /// Check route files for consistency
    Validate {
        /// Host routing table (JSON array of {"uri", "name", "methods"})
        #[arg(long)]
        routes: Option<PathBuf>,
    },

    /// List translated routes
    List {
        /// Only this locale
        #[arg(long)]
        locale: Option<String>,

        /// Host routing table (JSON array of {"uri", "name", "methods"})
        #[arg(long)]
        routes: Option<PathBuf>,
    },

    /// Export route translations for frontend code
    Export {
        /// json, js or ts
        #[arg(long, default_value = "json")]
        format: ExportFormat,

        /// Output file (default: public/translations/routes.<ext>)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Benchmark translation performance
    Profile {
        #[arg(long, default_value_t = 100)]
        iterations: u32,
    },

    /// Translate one route key
    Translate {
        #[arg(value_name = "KEY")]
        key: String,

        /// Target locale (default: fallback locale)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Remove locale segments from a URL
    Strip {
        #[arg(value_name = "URL")]
        url: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut stdout = std::io::stdout().lock();
    match run(cli.command, &cli.root, &mut stdout) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            let mut stderr = std::io::stderr().lock();
            let _ = writeln!(stderr, "{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Runs one command. `Ok(false)` means the command completed but found problems.
fn run(command: Command, root: &Path, out: &mut dyn Write) -> Result<bool, CommandError> {
    let project = Project::load(root)?;

    match command {
        Command::Install { force } => {
            let report = commands::install(&project, force)?;
            commands::render_install(&report, out).map_err(CommandError::Output)?;
        }
        Command::Clear { locale } => {
            let outcome = commands::clear(&project.translator(), locale.as_deref())?;
            commands::render_clear(&outcome, out).map_err(CommandError::Output)?;
        }
        Command::Validate { routes } => {
            let translations = project.read_translations()?;
            let host_routes = routes.as_deref().map(commands::read_route_table).transpose()?;
            let report =
                commands::validate(&translations, &project.locale_codes(), host_routes.as_deref());
            commands::render_validation(&report, out).map_err(CommandError::Output)?;
            return Ok(!report.has_errors());
        }
        Command::List { locale, routes } => {
            let translator = project.translator();
            let locales = match locale {
                Some(locale) if !translator.is_supported(&locale) => {
                    return Err(CommandError::UnsupportedLocale(locale));
                }
                Some(locale) => vec![locale],
                None => project.locale_codes(),
            };
            let host_routes = match routes {
                Some(path) => commands::read_route_table(&path)?,
                None => commands::fallback_route_table(&project.read_translations()?),
            };
            let rows = commands::list_routes(&translator, &locales, &host_routes);
            commands::render_list(&rows, out).map_err(CommandError::Output)?;
        }
        Command::Export { format, output } => {
            let path = commands::export(&project, format, output.as_deref())?;
            writeln!(out, "{} Translations exported to: {}", "✓".green(), path.display())
                .map_err(CommandError::Output)?;
        }
        Command::Profile { iterations } => {
            writeln!(out, "{}", "Running performance profiling...".cyan())
                .map_err(CommandError::Output)?;
            let report = commands::profile(&project.translator(), iterations);
            commands::render_profile(&report, out).map_err(CommandError::Output)?;
        }
        Command::Translate { key, locale } => {
            let translator = project.translator();
            let locale = locale.unwrap_or_else(|| translator.fallback_locale().to_string());
            writeln!(out, "{}", translator.translate(&key, &locale)).map_err(CommandError::Output)?;
        }
        Command::Strip { url } => {
            let translator = project.translator();
            writeln!(out, "{}", translator.get_non_localized_url(&url))
                .map_err(CommandError::Output)?;
        }
    }

    Ok(true)
}

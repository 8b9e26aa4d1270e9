use std::io::Write;
use std::time::{
    Duration,
    Instant,
};

use colored::Colorize;
use indexmap::IndexMap;

use crate::translator::Translator;

/// Keys translated by the warm benchmark.
const BENCHMARK_KEYS: [&str; 3] = ["about", "contact", "blog/{slug}"];

const COLD_START_LIMIT: Duration = Duration::from_millis(5);
const WARM_LIMIT: Duration = Duration::from_micros(100);
const SIZE_LIMIT: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileReport {
    pub locale: String,
    pub iterations: u32,
    /// First translation after a full clear.
    pub cold_start: Duration,
    /// Average of one warm translation.
    pub warm_average: Duration,
    /// Approximate bytes of route data per locale.
    pub locale_sizes: IndexMap<String, usize>,
}

impl ProfileReport {
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.locale_sizes.values().sum()
    }

    /// How many times faster a warm translation is than a cold one.
    #[must_use]
    pub fn speedup(&self) -> u128 {
        self.cold_start.as_nanos() / self.warm_average.as_nanos().max(1)
    }

    #[must_use]
    pub fn recommendations(&self) -> Vec<Recommendation> {
        vec![
            if self.cold_start > COLD_START_LIMIT {
                Recommendation::warn("Cold start time is high. Consider enabling the cache.")
            } else {
                Recommendation::ok("Cold start performance is good.")
            },
            if self.warm_average > WARM_LIMIT {
                Recommendation::warn("Warm cache time could be better. Check cache configuration.")
            } else {
                Recommendation::ok("Warm cache performance is excellent.")
            },
            if self.total_size() > SIZE_LIMIT {
                Recommendation::warn("Memory usage is high. Consider optimizing route files.")
            } else {
                Recommendation::ok("Memory usage is optimal.")
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub ok: bool,
    pub message: String,
}

impl Recommendation {
    fn ok(message: &str) -> Self {
        Self { ok: true, message: message.to_string() }
    }

    fn warn(message: &str) -> Self {
        Self { ok: false, message: message.to_string() }
    }
}

/// Benchmarks translation against the default locale.
///
/// Clears every cache first, so the cold start includes loading the route map
/// from its source.
#[must_use]
pub fn profile(translator: &Translator, iterations: u32) -> ProfileReport {
    let locale = translator
        .supported_locales()
        .default_locale()
        .map_or_else(|| translator.fallback_locale().to_string(), |d| d.code.clone());
    let iterations = iterations.max(1);

    translator.clear_cache(None);
    let start = Instant::now();
    let _ = translator.translate("about", &locale);
    let cold_start = start.elapsed();

    let start = Instant::now();
    for _ in 0..iterations {
        for key in BENCHMARK_KEYS {
            let _ = translator.translate(key, &locale);
        }
    }
    let warm_average = start.elapsed() / iterations.saturating_mul(3);

    let locale_sizes = translator
        .supported_locales()
        .codes()
        .map(|code| (code.to_string(), translator.locale_routes(code).approximate_size()))
        .collect();

    ProfileReport { locale, iterations, cold_start, warm_average, locale_sizes }
}

/// `1536` → `1.50 KB`
#[must_use]
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut unit = 0;
    let mut scale = 1;
    while bytes / scale >= 1024 && unit < UNITS.len() - 1 {
        scale *= 1024;
        unit += 1;
    }

    let hundredths = bytes * 100 / scale;
    let name = UNITS.get(unit).copied().unwrap_or("B");
    format!("{}.{:02} {name}", hundredths / 100, hundredths % 100)
}

/// # Errors
/// Returns an error if writing to `out` fails.
pub fn render_profile(report: &ProfileReport, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", "Performance Results:".cyan())?;
    writeln!(out)?;
    writeln!(out, "  Cold start (first load): {:?}", report.cold_start)?;
    writeln!(out, "  Warm cache (avg):        {:?}", report.warm_average)?;
    writeln!(out, "  Cache speedup:           {}x faster", report.speedup())?;
    writeln!(out)?;

    writeln!(out, "  Route data:")?;
    for (locale, size) in &report.locale_sizes {
        writeln!(out, "    {locale}: {}", format_bytes(*size))?;
    }
    writeln!(out, "    total: {}", format_bytes(report.total_size()))?;
    writeln!(out)?;

    writeln!(out, "{}", "Recommendations:".cyan())?;
    for recommendation in report.recommendations() {
        if recommendation.ok {
            writeln!(out, "  {} {}", "✓".green(), recommendation.message)?;
        } else {
            writeln!(out, "  {} {}", "⚠".yellow(), recommendation.message.yellow())?;
        }
    }
    writeln!(out)?;
    writeln!(
        out,
        "Tested with {} iterations per benchmark (locale: {}).",
        report.iterations, report.locale
    )
}

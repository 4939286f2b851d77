//! Route generation binary.
//!
//! Usage:
//!   locale-routes          # ROUTE_MODE (defaults to dev): patterns over the canonical pages
//!   locale-routes build    # Materialize per-locale pages, then generate patterns
//!   locale-routes clean    # Remove materialized pages (when CLEAR_TEMP_PAGES is true)
//!
//! Patterns are logged and written to stdout as JSON:
//! `[{"pattern": "/fr/a-propos", "entrypoint": "src/routes/about.astro"}, ...]`

use anyhow::{Context, Result};
use locale_routes::config::Config;
use locale_routes::routes::{generate_patterns, remove_working_dir, RouteMode};
use locale_routes::TranslationTable;
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging on stderr; stdout carries the patterns
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_routes=info".parse()?),
        )
        .init();

    let mut config = Config::from_env()?;

    match std::env::args().nth(1).as_deref() {
        Some("clean") => {
            if config.clear_temp_pages {
                remove_working_dir(&config.temp_pages_dir);
            } else {
                info!("CLEAR_TEMP_PAGES is false, keeping {}", config.temp_pages_dir.display());
            }
            return Ok(());
        }
        Some(mode) => config.mode = mode.parse()?,
        None => {}
    }

    let registry = config.locale_registry()?;
    let table = TranslationTable::from_file(&config.translations_file, &registry)
        .context("Failed to load route translations")?;

    info!("Generating {} routes from {}", config.mode, config.routes_dir.display());
    let generated = generate_patterns(&config, &registry, &table)?;

    for route in &generated.patterns {
        info!("✅ {}", route.pattern);
    }
    info!("Injecting {} routes", generated.patterns.len());

    // The host build reads the materialized pages after this process exits;
    // `locale-routes clean` removes them afterwards.
    let (patterns, working_dir) = generated.persist();
    if let (RouteMode::Materialized, Some(dir)) = (config.mode, working_dir) {
        info!("Materialized pages kept at {}", dir.display());
    }

    let json = serde_json::to_string_pretty(&patterns)?;
    println!("{}", json);
    Ok(())
}

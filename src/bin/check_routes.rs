//! Route translation checker.
//!
//! Validates the configured `routes.json` against the locale settings and
//! prints every route key's path in every locale. URLs passed as arguments
//! are resolved back to their route keys.
//!
//! Usage:
//!   check-routes                          # Validate and print the path table
//!   check-routes /fr/a-propos /about      # Also resolve these URLs
//!
//! Uses the same environment variables as `locale-routes`.

use anyhow::{bail, Context, Result};
use locale_routes::config::Config;
use locale_routes::i18n::{Messages, RawTable, TableValidator, TranslationTable};
use locale_routes::routes::PathTranslator;
use std::collections::BTreeSet;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_routes=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let registry = config.locale_registry()?;

    let contents = std::fs::read_to_string(&config.translations_file).with_context(|| {
        format!(
            "Failed to read route translations at {}",
            config.translations_file.display()
        )
    })?;
    let raw: RawTable =
        serde_json::from_str(&contents).context("Failed to parse route translations")?;

    let report = TableValidator::validate(&registry, &raw);
    println!("\n========== ROUTE TRANSLATIONS ==========");
    println!("File: {}", config.translations_file.display());
    for error in &report.errors {
        println!("❌ {}", error);
    }
    for warning in &report.warnings {
        println!("⚠️  {}", warning);
    }
    if report.has_errors() {
        bail!("{} error(s) in route translations", report.errors.len());
    }
    if report.is_clean() {
        println!("✅ No problems found");
    }

    let table = TranslationTable::from_raw(raw, &registry)?;
    let translator = PathTranslator::new(&registry, &table);

    let keys: BTreeSet<&str> = registry
        .codes()
        .flat_map(|locale| table.routes_for(locale.as_str()).map(|(key, _)| key.as_str()))
        .collect();

    println!("\n--- Paths ---");
    for key in std::iter::once("/").chain(keys) {
        println!("{}", key);
        for locale_config in registry.list() {
            println!(
                "    {:<6} {}",
                locale_config.code,
                translator.translate_path(key, &locale_config.code)
            );
        }
    }

    if config.messages_dir.is_dir() {
        let messages = Messages::from_dir(&config.messages_dir, &registry)
            .context("Failed to load message catalogs")?;
        println!("\n--- Messages ---");
        for locale_config in registry.list() {
            let count = messages
                .catalog(locale_config.code.as_str())
                .map_or(0, |catalog| catalog.len());
            println!("    {:<6} {} messages", locale_config.code, count);
        }
    }

    let urls: Vec<String> = std::env::args().skip(1).collect();
    if !urls.is_empty() {
        println!("\n--- Resolved ---");
        for url in &urls {
            match translator.resolve_route_key(url) {
                Some(key) => println!(
                    "{} -> {} ({})",
                    url,
                    key,
                    translator.locale_from_url(url)
                ),
                None => println!("{} -> (no route)", url),
            }
        }
    }
    println!();

    Ok(())
}

use crate::i18n::{LocaleConfig, LocaleRegistry};
use crate::routes::{RouteMode, DEFAULT_PAGE_EXTENSION};
use anyhow::{Context, Result};
use std::path::PathBuf;

const DEFAULT_LOCALES: &str = "en:English,fr:French,es:Spanish,de:German";

#[derive(Debug, Clone)]
pub struct Config {
    // Page trees
    pub routes_dir: PathBuf,
    pub temp_pages_dir: PathBuf,
    pub page_extension: String,

    // Translations
    pub translations_file: PathBuf,
    pub messages_dir: PathBuf,

    // Locales
    pub locales: Vec<LocaleConfig>,
    pub default_locale: String,
    pub show_default_locale: bool,

    // Generation
    pub mode: RouteMode,
    pub clear_temp_pages: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let flag = |key: &str, default: bool| -> Result<bool> {
            match lookup(key) {
                Some(v) => v
                    .trim()
                    .parse()
                    .with_context(|| format!("{} must be 'true' or 'false', got '{}'", key, v)),
                None => Ok(default),
            }
        };

        Ok(Self {
            // Page trees
            routes_dir: lookup("ROUTES_DIR")
                .unwrap_or_else(|| "src/routes".to_string())
                .into(),
            temp_pages_dir: lookup("TEMP_PAGES_DIR")
                .unwrap_or_else(|| "src/pages".to_string())
                .into(),
            page_extension: lookup("PAGE_EXTENSION")
                .unwrap_or_else(|| DEFAULT_PAGE_EXTENSION.to_string()),

            // Translations
            translations_file: lookup("TRANSLATIONS_FILE")
                .unwrap_or_else(|| "src/i18n/translations/routes.json".to_string())
                .into(),
            messages_dir: lookup("MESSAGES_DIR")
                .unwrap_or_else(|| "src/i18n/translations".to_string())
                .into(),

            // Locales
            locales: LocaleConfig::parse_list(
                &lookup("LOCALES").unwrap_or_else(|| DEFAULT_LOCALES.to_string()),
            )
            .context("LOCALES is invalid")?,
            default_locale: lookup("DEFAULT_LOCALE").unwrap_or_else(|| "en".to_string()),
            show_default_locale: flag("SHOW_DEFAULT_LOCALE", false)?,

            // Generation
            mode: lookup("ROUTE_MODE")
                .map(|v| v.parse::<RouteMode>())
                .transpose()
                .context("ROUTE_MODE is invalid")?
                .unwrap_or_default(),
            clear_temp_pages: flag("CLEAR_TEMP_PAGES", true)?,
        })
    }

    /// Validate the locale settings into a registry.
    pub fn locale_registry(&self) -> crate::Result<LocaleRegistry> {
        LocaleRegistry::new(
            self.locales.clone(),
            &self.default_locale,
            self.show_default_locale,
        )
    }
}

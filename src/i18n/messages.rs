//! UI message catalogs: one flat `{ key: text }` JSON file per locale.
//!
//! Catalogs live next to `routes.json` as `{dir}/{locale}.json`. Their values
//! are the localized strings that [`interpolate`] and [`sanitize`] work on.

use crate::error::{Error, Result};
use crate::i18n::{Locale, LocaleRegistry, TableValidator};
use crate::markup::{interpolate, sanitize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// One locale's messages.
pub type Catalog = BTreeMap<String, String>;

/// Catalogs keyed by locale code, as read from disk.
pub type RawCatalogs = BTreeMap<String, Catalog>;

/// Validated message catalogs for every supported locale.
#[derive(Debug, Clone)]
pub struct Messages {
    catalogs: BTreeMap<Locale, Catalog>,
    default_locale: Locale,
}

impl Messages {
    /// Build from already-parsed catalogs.
    ///
    /// # Returns
    /// * `Err(Error::InvalidMessages)` if a supported locale has no catalog or
    ///   a catalog belongs to an unsupported locale. Missing or extra keys
    ///   are logged as warnings.
    pub fn from_catalogs(raw: RawCatalogs, registry: &LocaleRegistry) -> Result<Self> {
        let report = TableValidator::validate_catalogs(registry, &raw);
        for warning in &report.warnings {
            warn!("Messages: {}", warning);
        }
        if report.has_errors() {
            return Err(Error::InvalidMessages(report));
        }

        let catalogs = raw
            .into_iter()
            .filter_map(|(code, catalog)| registry.locale(&code).map(|l| (l.clone(), catalog)))
            .collect();

        Ok(Self {
            catalogs,
            default_locale: registry.default_locale().clone(),
        })
    }

    /// Load `{dir}/{locale}.json` for every supported locale.
    pub fn from_dir(dir: impl AsRef<Path>, registry: &LocaleRegistry) -> Result<Self> {
        let dir = dir.as_ref();
        let mut raw = RawCatalogs::new();

        for locale in registry.codes() {
            let path = dir.join(format!("{}.json", locale));
            let contents = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            let catalog: Catalog =
                serde_json::from_str(&contents).map_err(|source| Error::TranslationParse {
                    path: path.clone(),
                    source,
                })?;
            raw.insert(locale.as_str().to_string(), catalog);
        }

        let messages = Self::from_catalogs(raw, registry)?;
        info!(
            "Loaded messages for {} locales from {}",
            messages.catalogs.len(),
            dir.display()
        );
        Ok(messages)
    }

    pub fn catalog(&self, locale: &str) -> Option<&Catalog> {
        self.catalogs.get(locale)
    }

    /// Exact text for `key` in `locale`, without fallback.
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.catalog(locale)
            .and_then(|catalog| catalog.get(key))
            .map(String::as_str)
    }

    /// Text for `key` in `locale`.
    ///
    /// Falls back to the default locale's text, then to the key itself with a
    /// warning.
    pub fn text<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        if let Some(text) = self.get(locale, key) {
            return text;
        }
        if let Some(text) = self.get(self.default_locale.as_str(), key) {
            debug!(
                "Message '{}' missing for '{}', using '{}'",
                key, locale, self.default_locale
            );
            return text;
        }
        warn!("Message key '{}' not found for '{}'", key, locale);
        key
    }

    /// Text for `key` with numbered placeholder tags filled in from the
    /// default locale's text, then sanitized.
    pub fn rich(&self, locale: &str, key: &str) -> String {
        let localized = self.text(locale, key);
        let reference = self
            .get(self.default_locale.as_str(), key)
            .unwrap_or(localized);

        if reference.contains('<') {
            sanitize(&interpolate(localized, reference))
        } else {
            sanitize(localized)
        }
    }

    /// Bind the catalogs to `locale`.
    pub fn for_locale<'a>(&'a self, locale: &'a Locale) -> LocaleMessages<'a> {
        LocaleMessages {
            messages: self,
            locale,
        }
    }
}

/// [`Messages`] bound to the locale of the page being rendered.
#[derive(Debug, Clone, Copy)]
pub struct LocaleMessages<'a> {
    messages: &'a Messages,
    locale: &'a Locale,
}

impl<'a> LocaleMessages<'a> {
    pub fn locale(&self) -> &'a Locale {
        self.locale
    }

    pub fn t(&self, key: &'a str) -> &'a str {
        self.messages.text(self.locale.as_str(), key)
    }

    pub fn rich(&self, key: &str) -> String {
        self.messages.rich(self.locale.as_str(), key)
    }
}

//! Locale registry: the supported locales and the default-locale policy.
//!
//! The registry is built once at startup from configuration and passed by
//! reference to every component that needs it. It is immutable thereafter.

use crate::error::{Error, Result};
use crate::i18n::Locale;
use regex::Regex;
use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Locale code as it appears in URLs (e.g., "en", "fr")
    pub code: Locale,

    /// Human-readable name (e.g., "English", "French")
    pub name: String,
}

static LOCALE_CODE_REGEX: OnceLock<Regex> = OnceLock::new();

fn locale_code_regex() -> &'static Regex {
    LOCALE_CODE_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*$").unwrap())
}

impl LocaleConfig {
    pub fn new(code: &str, name: impl Into<String>) -> Result<Self> {
        if !locale_code_regex().is_match(code) {
            return Err(Error::InvalidRegistry(format!(
                "'{}' is not a valid locale code",
                code
            )));
        }
        Ok(Self {
            code: Locale::new(code),
            name: name.into(),
        })
    }

    /// Parse a locale list of the form `en:English,fr:French`.
    ///
    /// Entries without a display name use the code as their name. Order is
    /// preserved.
    pub fn parse_list(spec: &str) -> Result<Vec<LocaleConfig>> {
        spec.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once(':') {
                Some((code, name)) => LocaleConfig::new(code.trim(), name.trim()),
                None => LocaleConfig::new(entry, entry),
            })
            .collect()
    }
}

/// The set of supported locales plus the default-locale policy.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
    default_locale: Locale,
    show_default_locale: bool,
}

impl LocaleRegistry {
    /// Build a registry.
    ///
    /// # Arguments
    /// * `locales` - Supported locales, in the order patterns are generated
    /// * `default_locale` - Code of the default locale; must be in `locales`
    /// * `show_default_locale` - Whether the default locale is prefixed in URLs
    ///
    /// # Returns
    /// * `Err(Error::InvalidRegistry)` if the list is empty, contains a
    ///   duplicate code, or does not contain the default locale
    pub fn new(
        locales: Vec<LocaleConfig>,
        default_locale: &str,
        show_default_locale: bool,
    ) -> Result<Self> {
        if locales.is_empty() {
            return Err(Error::InvalidRegistry(
                "at least one locale must be configured".to_string(),
            ));
        }

        for (i, config) in locales.iter().enumerate() {
            if locales[..i].iter().any(|prev| prev.code == config.code) {
                return Err(Error::InvalidRegistry(format!(
                    "locale '{}' is configured more than once",
                    config.code
                )));
            }
        }

        let default_locale = locales
            .iter()
            .find(|config| config.code == default_locale)
            .map(|config| config.code.clone())
            .ok_or_else(|| {
                Error::InvalidRegistry(format!(
                    "default locale '{}' is not a supported locale",
                    default_locale
                ))
            })?;

        Ok(Self {
            locales,
            default_locale,
            show_default_locale,
        })
    }

    /// Get a locale configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|config| config.code == code)
    }

    /// Get the validated `Locale` for a code, if supported.
    pub fn locale(&self, code: &str) -> Option<&Locale> {
        self.get_by_code(code).map(|config| &config.code)
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }

    /// All supported locales in configuration order.
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    pub fn codes(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter().map(|config| &config.code)
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    pub fn show_default_locale(&self) -> bool {
        self.show_default_locale
    }

    /// Whether URLs for `locale` omit the locale prefix.
    ///
    /// True only for the default locale when it is not shown in URLs.
    pub fn is_unprefixed(&self, locale: &Locale) -> bool {
        !self.show_default_locale && *locale == self.default_locale
    }

    /// Display name for a locale code, falling back to the code itself.
    pub fn display_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.get_by_code(code)
            .map(|config| config.name.as_str())
            .unwrap_or(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> Vec<LocaleConfig> {
        LocaleConfig::parse_list("en:English,fr:French,es:Spanish,de:German")
            .expect("Should parse")
    }

    // ==================== parse_list Tests ====================

    #[test]
    fn test_parse_list_preserves_order_and_names() {
        let parsed = locales();
        let codes: Vec<&str> = parsed.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["en", "fr", "es", "de"]);
        assert_eq!(parsed[1].name, "French");
    }

    #[test]
    fn test_parse_list_without_names_uses_code() {
        let parsed = LocaleConfig::parse_list(" en , pt-BR ").expect("Should parse");
        assert_eq!(parsed[1].code, "pt-BR");
        assert_eq!(parsed[1].name, "pt-BR");
    }

    #[test]
    fn test_parse_list_rejects_invalid_code() {
        let result = LocaleConfig::parse_list("en:English,f/r:French");
        assert!(matches!(result, Err(Error::InvalidRegistry(_))));
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_new_valid_registry() {
        let registry = LocaleRegistry::new(locales(), "en", false).expect("Should build");
        assert_eq!(registry.default_locale(), &"en");
        assert!(!registry.show_default_locale());
        assert_eq!(registry.list().len(), 4);
    }

    #[test]
    fn test_new_rejects_unknown_default() {
        let result = LocaleRegistry::new(locales(), "it", false);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("'it'"));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert!(LocaleRegistry::new(vec![], "en", false).is_err());
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let dupes = LocaleConfig::parse_list("en,fr,en").expect("Should parse");
        let err = LocaleRegistry::new(dupes, "en", false).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_lookup_by_code() {
        let registry = LocaleRegistry::new(locales(), "en", false).unwrap();
        assert!(registry.is_supported("fr"));
        assert!(!registry.is_supported("it"));
        assert_eq!(registry.locale("es").map(Locale::as_str), Some("es"));
        assert_eq!(registry.display_name("de"), "German");
        assert_eq!(registry.display_name("it"), "it");
    }

    #[test]
    fn test_is_unprefixed_follows_show_default() {
        let hidden = LocaleRegistry::new(locales(), "en", false).unwrap();
        let en = hidden.locale("en").unwrap();
        let fr = hidden.locale("fr").unwrap();
        assert!(hidden.is_unprefixed(en));
        assert!(!hidden.is_unprefixed(fr));

        let shown = LocaleRegistry::new(locales(), "en", true).unwrap();
        assert!(!shown.is_unprefixed(shown.default_locale()));
    }
}

//! Route translation table: per-locale mapping of route keys to path segments.

use crate::error::{Error, Result};
use crate::i18n::{Locale, LocaleRegistry, RouteKey, TableValidator};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{info, warn};

/// The `routes.json` shape: `{ locale: { route key: localized segment } }`.
pub type RawTable = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, Default)]
struct LocaleRoutes {
    forward: BTreeMap<RouteKey, String>,
    reverse: HashMap<String, RouteKey>,
}

/// Validated route translations for every supported locale.
///
/// Every registry locale has an entry (possibly empty) and segments are unique
/// per locale, so reverse lookup is unambiguous.
#[derive(Debug, Clone)]
pub struct TranslationTable {
    routes: BTreeMap<Locale, LocaleRoutes>,
}

impl TranslationTable {
    /// Build a table from already-parsed data.
    ///
    /// # Returns
    /// * `Err(Error::InvalidTranslationTable)` if validation reports errors.
    ///   Warnings are logged and the table still loads.
    pub fn from_raw(raw: RawTable, registry: &LocaleRegistry) -> Result<Self> {
        let report = TableValidator::validate(registry, &raw);
        for warning in &report.warnings {
            warn!("Route translations: {}", warning);
        }
        if report.has_errors() {
            return Err(Error::InvalidTranslationTable(report));
        }

        let mut routes = BTreeMap::new();
        for (code, entries) in raw {
            let Some(locale) = registry.locale(&code) else {
                continue;
            };
            let mut locale_routes = LocaleRoutes::default();
            for (key, segment) in entries {
                let key = RouteKey::new(key);
                locale_routes.reverse.insert(segment.clone(), key.clone());
                locale_routes.forward.insert(key, segment);
            }
            routes.insert(locale.clone(), locale_routes);
        }

        Ok(Self { routes })
    }

    /// Parse and validate a table from a JSON string.
    pub fn from_json(json: &str, registry: &LocaleRegistry) -> Result<Self> {
        let raw: RawTable = serde_json::from_str(json)?;
        Self::from_raw(raw, registry)
    }

    /// Load a table from a `routes.json` file.
    pub fn from_file(path: impl AsRef<Path>, registry: &LocaleRegistry) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let raw: RawTable =
            serde_json::from_str(&contents).map_err(|source| Error::TranslationParse {
                path: path.to_path_buf(),
                source,
            })?;
        let table = Self::from_raw(raw, registry)?;

        info!(
            "Loaded route translations for {} locales from {}",
            table.routes.len(),
            path.display()
        );
        Ok(table)
    }

    /// Localized segment for `key` in `locale`, if one is defined.
    pub fn segment(&self, locale: &str, key: &str) -> Option<&str> {
        self.routes
            .get(locale)
            .and_then(|routes| routes.forward.get(key))
            .map(String::as_str)
    }

    /// Route key whose segment in `locale` is exactly `segment`.
    pub fn key_for_segment(&self, locale: &str, segment: &str) -> Option<&RouteKey> {
        self.routes
            .get(locale)
            .and_then(|routes| routes.reverse.get(segment))
    }

    /// All translations for one locale, ordered by route key.
    pub fn routes_for(&self, locale: &str) -> impl Iterator<Item = (&RouteKey, &str)> {
        self.routes
            .get(locale)
            .into_iter()
            .flat_map(|routes| routes.forward.iter().map(|(k, v)| (k, v.as_str())))
    }

    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.routes.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::LocaleConfig;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ROUTES_JSON: &str = r#"{
        "en": {"about": "about", "blog/posts": "blog/posts"},
        "fr": {"about": "a-propos", "blog/posts": "blog/articles"}
    }"#;

    fn registry() -> LocaleRegistry {
        let locales = LocaleConfig::parse_list("en:English,fr:French").unwrap();
        LocaleRegistry::new(locales, "en", false).unwrap()
    }

    // ==================== Loading Tests ====================

    #[test]
    fn test_from_json_valid() {
        let table = TranslationTable::from_json(ROUTES_JSON, &registry()).expect("Should load");
        let locales: Vec<&str> = table.locales().map(Locale::as_str).collect();
        assert_eq!(locales, vec!["en", "fr"]);
    }

    #[test]
    fn test_from_json_rejects_nested_values() {
        let json = r#"{"en": {"blog": {"posts": "posts"}}, "fr": {}}"#;
        let result = TranslationTable::from_json(json, &registry());
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"{"en": {}, "fr": {"about": "a-propos", "team": "a-propos"}}"#;
        let result = TranslationTable::from_json(json, &registry());
        match result {
            Err(Error::InvalidTranslationTable(report)) => assert_eq!(report.errors.len(), 1),
            other => panic!("Expected InvalidTranslationTable, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().expect("Should create temp file");
        file.write_all(ROUTES_JSON.as_bytes()).unwrap();

        let table = TranslationTable::from_file(file.path(), &registry()).expect("Should load");
        assert_eq!(table.segment("fr", "about"), Some("a-propos"));
    }

    #[test]
    fn test_from_file_parse_error_names_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();

        let err = TranslationTable::from_file(file.path(), &registry()).unwrap_err();
        assert!(matches!(err, Error::TranslationParse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_from_file_missing() {
        let err = TranslationTable::from_file("/nonexistent/routes.json", &registry()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_forward_lookup() {
        let table = TranslationTable::from_json(ROUTES_JSON, &registry()).unwrap();
        assert_eq!(table.segment("fr", "blog/posts"), Some("blog/articles"));
        assert_eq!(table.segment("fr", "contact"), None);
        assert_eq!(table.segment("de", "about"), None);
    }

    #[test]
    fn test_reverse_lookup() {
        let table = TranslationTable::from_json(ROUTES_JSON, &registry()).unwrap();
        assert_eq!(
            table.key_for_segment("fr", "a-propos").map(RouteKey::as_str),
            Some("about")
        );
        assert_eq!(table.key_for_segment("en", "a-propos"), None);
    }

    #[test]
    fn test_routes_for_locale() {
        let table = TranslationTable::from_json(ROUTES_JSON, &registry()).unwrap();
        let fr: Vec<(&str, &str)> = table
            .routes_for("fr")
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        assert_eq!(fr, vec![("about", "a-propos"), ("blog/posts", "blog/articles")]);
        assert_eq!(table.routes_for("it").count(), 0);
    }
}

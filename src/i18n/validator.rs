//! Translation table validation.
//!
//! Checks a raw `routes.json` table against the locale registry before it is
//! used. Reverse lookup (URL to route key) relies on every localized segment
//! being unique within its locale, so duplicates are rejected here rather than
//! resolved arbitrarily at request time.

use crate::i18n::{LocaleRegistry, RawCatalogs, RawTable};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the table unusable
    pub errors: Vec<String>,

    /// Suspicious entries that still load
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translation tables.
pub struct TableValidator;

// One or more `/`-separated parts, none empty, no whitespace, `?` or `#`
static SEGMENT_REGEX: OnceLock<Regex> = OnceLock::new();

impl TableValidator {
    /// Validate a raw table against the registry.
    ///
    /// Errors:
    /// - a supported locale has no table
    /// - a table exists for a locale that is not supported
    /// - two keys of one locale map to the same segment
    /// - a segment is not a valid relative URL path
    ///
    /// Warnings:
    /// - a segment starts with a supported locale code, so a URL built from
    ///   it would look locale-prefixed
    pub fn validate(registry: &LocaleRegistry, raw: &RawTable) -> ValidationReport {
        let mut report = ValidationReport::new();

        for locale in registry.codes() {
            if !raw.contains_key(locale.as_str()) {
                report
                    .errors
                    .push(format!("locale '{}' has no route translations", locale));
            }
        }

        for (locale, entries) in raw {
            if !registry.is_supported(locale) {
                report.errors.push(format!(
                    "route translations found for unsupported locale '{}'",
                    locale
                ));
                continue;
            }

            let mut seen: HashMap<&str, &str> = HashMap::new();
            for (key, segment) in entries {
                if let Some(previous) = seen.insert(segment.as_str(), key.as_str()) {
                    report.errors.push(format!(
                        "locale '{}': segment '{}' is used by both '{}' and '{}'",
                        locale, segment, previous, key
                    ));
                }

                if !Self::is_valid_segment(segment) {
                    report.errors.push(format!(
                        "locale '{}': key '{}' has invalid path segment '{}'",
                        locale, key, segment
                    ));
                    continue;
                }

                let first = segment.split('/').next().unwrap_or_default();
                if registry.is_supported(first) {
                    report.warnings.push(format!(
                        "locale '{}': segment '{}' for key '{}' starts with locale code '{}'",
                        locale, segment, key, first
                    ));
                }
            }
        }

        report
    }

    /// Validate UI message catalogs against the registry.
    ///
    /// Errors: a supported locale has no catalog, or a catalog exists for an
    /// unsupported locale. Warnings: a key of the default locale's catalog is
    /// missing elsewhere, or a key exists only outside the default catalog.
    pub fn validate_catalogs(registry: &LocaleRegistry, raw: &RawCatalogs) -> ValidationReport {
        let mut report = ValidationReport::new();

        for locale in registry.codes() {
            if !raw.contains_key(locale.as_str()) {
                report
                    .errors
                    .push(format!("locale '{}' has no messages", locale));
            }
        }

        let default_locale = registry.default_locale();
        let reference = raw.get(default_locale.as_str());

        for (locale, catalog) in raw {
            if !registry.is_supported(locale) {
                report
                    .errors
                    .push(format!("messages found for unsupported locale '{}'", locale));
                continue;
            }
            let Some(reference) = reference else {
                continue;
            };
            if locale == default_locale.as_str() {
                continue;
            }

            for key in reference.keys().filter(|key| !catalog.contains_key(*key)) {
                report.warnings.push(format!(
                    "locale '{}': message '{}' is missing, '{}' text is used",
                    locale, key, default_locale
                ));
            }
            for key in catalog.keys().filter(|key| !reference.contains_key(*key)) {
                report.warnings.push(format!(
                    "locale '{}': message '{}' does not exist in '{}'",
                    locale, key, default_locale
                ));
            }
        }

        report
    }

    fn is_valid_segment(segment: &str) -> bool {
        let regex = SEGMENT_REGEX
            .get_or_init(|| Regex::new(r"^[^/\s?#]+(?:/[^/\s?#]+)*$").unwrap());
        regex.is_match(segment)
    }
}

//! Path translation between route keys and localized URL paths.

use crate::i18n::{Locale, LocaleRegistry, RouteKey, TranslationTable};
use std::borrow::Cow;
use tracing::{debug, warn};
use url::Url;

/// Link target that is never translated (placeholder links).
pub const WILDCARD: &str = "#";

/// Forward and reverse path translation for one registry and table.
#[derive(Debug, Clone, Copy)]
pub struct PathTranslator<'a> {
    registry: &'a LocaleRegistry,
    table: &'a TranslationTable,
}

impl<'a> PathTranslator<'a> {
    pub fn new(registry: &'a LocaleRegistry, table: &'a TranslationTable) -> Self {
        Self { registry, table }
    }

    pub fn registry(&self) -> &'a LocaleRegistry {
        self.registry
    }

    /// URL path of `route_key` in `locale`.
    ///
    /// - `"#"` and `""` are returned unchanged
    /// - the root key maps to `/` for the unprefixed default locale and to
    ///   `/{locale}` otherwise
    /// - other keys map to `/{segment}` or `/{locale}/{segment}`, where the
    ///   segment comes from the translation table, or is the key itself (with
    ///   a warning) when the table has no entry
    pub fn translate_path(&self, route_key: &str, locale: &Locale) -> String {
        if route_key == WILDCARD || route_key.is_empty() {
            return route_key.to_string();
        }

        let prefix = if self.registry.is_unprefixed(locale) {
            None
        } else {
            Some(locale)
        };
        self.build_path(route_key, locale, prefix)
    }

    /// Path for `route_key` using `segment_locale`'s translations and an
    /// optional locale prefix.
    pub(crate) fn build_path(
        &self,
        route_key: &str,
        segment_locale: &Locale,
        prefix: Option<&Locale>,
    ) -> String {
        if route_key == RouteKey::ROOT {
            return match prefix {
                Some(locale) => format!("/{}", locale),
                None => RouteKey::ROOT.to_string(),
            };
        }

        let segment = self.localized_segment(route_key, segment_locale);
        match prefix {
            Some(locale) => format!("/{}/{}", locale, segment),
            None => format!("/{}", segment),
        }
    }

    fn localized_segment(&self, route_key: &str, locale: &Locale) -> Cow<'a, str> {
        match self.table.segment(locale.as_str(), route_key) {
            Some(segment) => Cow::Borrowed(segment),
            None => {
                warn!(
                    "Route key '{}' not found in route translations for '{}'",
                    route_key, locale
                );
                Cow::Owned(route_key.trim_matches('/').to_string())
            }
        }
    }

    /// Route key addressed by `url`, or `None` if no translation matches.
    ///
    /// `url` may be absolute (`https://example.com/fr/a-propos`) or a bare
    /// path (`/fr/a-propos`); query, fragment and trailing slashes are
    /// ignored. A locale prefix selects the table to search, otherwise the
    /// default locale's table is used. A single unprefixed segment that no
    /// translation matches is returned as-is.
    pub fn resolve_route_key(&self, url: &str) -> Option<RouteKey> {
        let segments = match url_segments(url) {
            Some(segments) => segments,
            None => {
                debug!("Cannot resolve route for malformed URL {:?}", url);
                return None;
            }
        };

        let Some(first) = segments.first() else {
            return Some(RouteKey::root());
        };

        if let Some(locale) = self.registry.locale(first) {
            if segments.len() == 1 {
                return Some(RouteKey::root());
            }
            let path = segments[1..].join("/");
            return self.table.key_for_segment(locale.as_str(), &path).cloned();
        }

        let default_locale = self.registry.default_locale().as_str();
        let path = segments.join("/");
        match self.table.key_for_segment(default_locale, &path) {
            Some(key) => Some(key.clone()),
            None if segments.len() == 1 => Some(RouteKey::new(path)),
            None => None,
        }
    }

    /// Locale named by the first path segment of `url`, or the default locale.
    pub fn locale_from_url(&self, url: &str) -> &'a Locale {
        url_segments(url)
            .and_then(|segments| {
                segments
                    .first()
                    .and_then(|first| self.registry.locale(first))
            })
            .unwrap_or_else(|| self.registry.default_locale())
    }

    /// Bind this translator to `locale`.
    pub fn localized(&self, locale: &'a Locale) -> LocalizedPaths<'a> {
        LocalizedPaths {
            translator: *self,
            locale,
        }
    }
}

/// A [`PathTranslator`] bound to the locale of the page being rendered.
#[derive(Debug, Clone, Copy)]
pub struct LocalizedPaths<'a> {
    translator: PathTranslator<'a>,
    locale: &'a Locale,
}

impl<'a> LocalizedPaths<'a> {
    pub fn locale(&self) -> &'a Locale {
        self.locale
    }

    /// Path of `route_key` in the bound locale.
    pub fn path(&self, route_key: &str) -> String {
        self.translator.translate_path(route_key, self.locale)
    }

    /// Path of `route_key` in another locale, e.g. for a language switcher.
    pub fn path_in(&self, route_key: &str, locale: &Locale) -> String {
        self.translator.translate_path(route_key, locale)
    }
}

/// Decoded, non-empty path segments of an absolute URL or a bare path.
fn url_segments(url: &str) -> Option<Vec<String>> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse("http://localhost/").ok()?;
            base.join(url).ok()?
        }
        Err(_) => return None,
    };

    Some(
        parsed
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(percent_decode)
            .collect(),
    )
}

/// Decode `%XX` escapes. Invalid escapes are kept literally; a segment that
/// does not decode to UTF-8 is returned unchanged.
fn percent_decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| segment.to_string())
}

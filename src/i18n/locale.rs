//! Value types shared by every component: locale codes and route keys.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// A supported locale code (e.g. "en", "fr").
///
/// Values are only handed out by [`LocaleRegistry`](crate::i18n::LocaleRegistry),
/// so holding a `Locale` means the code was validated against the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub(crate) fn new(code: impl Into<String>) -> Self {
        Locale(code.into())
    }

    /// The locale code as written in URLs.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Locale {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Locale {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Locale {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Canonical, locale-independent page identifier.
///
/// Derived from a page's path relative to the routes directory, with `/` as
/// the separator. The root page is the literal `"/"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteKey(String);

impl RouteKey {
    pub const ROOT: &'static str = "/";

    pub fn new(key: impl Into<String>) -> Self {
        RouteKey(key.into())
    }

    pub fn root() -> Self {
        RouteKey(Self::ROOT.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments of the key. The root key has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for RouteKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RouteKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteKey {
    fn from(key: &str) -> Self {
        RouteKey::new(key)
    }
}

impl From<String> for RouteKey {
    fn from(key: String) -> Self {
        RouteKey(key)
    }
}

impl PartialEq<str> for RouteKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RouteKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_root_key() {
        let root = RouteKey::root();
        assert!(root.is_root());
        assert_eq!(root, "/");
        assert_eq!(root.segments().count(), 0);
    }

    #[test]
    fn test_nested_key_segments() {
        let key = RouteKey::from("blog/posts");
        assert!(!key.is_root());
        assert_eq!(key.segments().collect::<Vec<_>>(), vec!["blog", "posts"]);
    }

    #[test]
    fn test_locale_borrow_allows_str_lookup() {
        let mut map = BTreeMap::new();
        map.insert(Locale::new("fr"), 1);
        assert_eq!(map.get("fr"), Some(&1));
        assert_eq!(map.get("de"), None);
    }

    #[test]
    fn test_route_key_serializes_as_plain_string() {
        let json = serde_json::to_string(&RouteKey::from("about")).expect("Should serialize");
        assert_eq!(json, "\"about\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(Locale::new("de").to_string(), "de");
        assert_eq!(RouteKey::from("blog").to_string(), "blog");
    }
}

//! Locale-aware route resolution.
//!
//! Discovers page routes from a file tree, maps canonical route keys to
//! localized URL paths (and back), generates the per-locale URL patterns a
//! file-based router should serve, and merges or sanitizes markup inside
//! translated strings.

pub mod config;
pub mod error;
pub mod i18n;
pub mod markup;
pub mod routes;

pub use error::{Error, Result};
pub use i18n::{Locale, LocaleRegistry, Messages, RouteKey, TranslationTable};
pub use markup::{interpolate, sanitize};
pub use routes::{
    discover, generate_patterns, LocaleSegment, PathTranslator, RouteDescriptor, RouteMode,
    RoutePattern,
};

//! Locale configuration and route translation data.
//!
//! # Architecture
//!
//! - `locale`: `Locale` and `RouteKey` value types
//! - `registry`: the supported locales, their display names and the default locale
//! - `messages`: per-locale UI message catalogs (`en.json`, `fr.json`, ...)
//! - `table`: per-locale route key to path segment mapping, loaded from `routes.json`
//! - `validator`: load-time integrity checks for translation tables
//!
//! # Example
//!
//! ```rust,ignore
//! use locale_routes::i18n::{LocaleConfig, LocaleRegistry, TranslationTable};
//!
//! let locales = LocaleConfig::parse_list("en:English,fr:French")?;
//! let registry = LocaleRegistry::new(locales, "en", false)?;
//! let table = TranslationTable::from_file("src/i18n/translations/routes.json", &registry)?;
//! ```

mod locale;
mod messages;
mod registry;
mod table;
mod validator;

pub use locale::{Locale, RouteKey};
pub use messages::{Catalog, LocaleMessages, Messages, RawCatalogs};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use table::{RawTable, TranslationTable};
pub use validator::{TableValidator, ValidationReport};

//! Diagnostic logging tests
//!
//! Each test installs a scoped subscriber that counts WARN events, so these
//! live in their own test binary.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use locale_routes::i18n::{LocaleConfig, LocaleRegistry, TranslationTable};
use locale_routes::interpolate;
use locale_routes::routes::PathTranslator;

struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&count)));
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, count.load(Ordering::SeqCst))
}

fn setup() -> (LocaleRegistry, TranslationTable) {
    let locales = LocaleConfig::parse_list("en:English,fr:French").unwrap();
    let registry = LocaleRegistry::new(locales, "en", false).unwrap();
    let table = TranslationTable::from_json(
        r#"{"en": {"about": "about"}, "fr": {"about": "a-propos"}}"#,
        &registry,
    )
    .unwrap();
    (registry, table)
}

#[test]
fn test_missing_translation_warns_once() {
    let (registry, table) = setup();
    let translator = PathTranslator::new(&registry, &table);
    let fr = registry.locale("fr").unwrap();

    let (path, warnings) = count_warnings(|| translator.translate_path("contact", fr));

    assert_eq!(path, "/fr/contact");
    assert_eq!(warnings, 1);
}

#[test]
fn test_known_translation_is_silent() {
    let (registry, table) = setup();
    let translator = PathTranslator::new(&registry, &table);
    let fr = registry.locale("fr").unwrap();

    let (path, warnings) = count_warnings(|| translator.translate_path("about", fr));

    assert_eq!(path, "/fr/a-propos");
    assert_eq!(warnings, 0);
}

#[test]
fn test_interpolate_without_reference_tags_warns() {
    let (output, warnings) = count_warnings(|| interpolate("Hello <0>world</0>", "Hello world"));

    assert_eq!(output, "Hello <0>world</0>");
    assert_eq!(warnings, 1);
}

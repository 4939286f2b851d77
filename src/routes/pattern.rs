//! Route pattern generation: (locale x route) URL patterns for the host router.

use crate::i18n::{Locale, LocaleRegistry, RouteKey, TranslationTable};
use crate::routes::{PathTranslator, RouteDescriptor};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A URL pattern and the page template that serves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePattern {
    pub pattern: String,
    pub entrypoint: PathBuf,
}

/// One locale's share of the generated patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass<'a> {
    /// No locale prefix; paths use the default locale's translations
    Unprefixed,
    Prefixed(&'a Locale),
}

/// Generates router patterns from discovered routes.
#[derive(Debug, Clone, Copy)]
pub struct PatternGenerator<'a> {
    translator: PathTranslator<'a>,
    registry: &'a LocaleRegistry,
}

impl<'a> PatternGenerator<'a> {
    pub fn new(registry: &'a LocaleRegistry, table: &'a TranslationTable) -> Self {
        Self {
            translator: PathTranslator::new(registry, table),
            registry,
        }
    }

    /// The unprefixed pass first, then every locale whose URLs carry a prefix,
    /// in registry order.
    fn passes(&self) -> Vec<Pass<'a>> {
        let registry = self.registry;
        std::iter::once(Pass::Unprefixed)
            .chain(
                registry
                    .codes()
                    .filter(|locale| !registry.is_unprefixed(locale))
                    .map(Pass::Prefixed),
            )
            .collect()
    }

    fn pattern_for(&self, pass: Pass<'a>, route_key: &str) -> String {
        match pass {
            Pass::Unprefixed => {
                self.translator
                    .build_path(route_key, self.registry.default_locale(), None)
            }
            Pass::Prefixed(locale) => self.translator.build_path(route_key, locale, Some(locale)),
        }
    }

    /// Dynamic mode: every discovered route in every pass.
    ///
    /// `routes` come from a single discovery of the canonical page tree and
    /// every entrypoint is `entry_root` joined with the route's source file.
    pub fn generate_dynamic(&self, routes: &[RouteDescriptor], entry_root: &Path) -> Vec<RoutePattern> {
        let mut emitter = Emitter::default();
        for pass in self.passes() {
            for route in routes {
                let pattern = self.pattern_for(pass, route.route_key.as_str());
                emitter.push(pattern, entry_root.join(&route.source));
            }
        }
        emitter.into_patterns()
    }

    /// Materialized mode: each route belongs to the pass of its locale hint.
    ///
    /// `routes` come from discovery over the materialized working tree, where
    /// each prefixed locale has its own copy of the pages. Routes without a
    /// hint (the root copy) form the unprefixed pass. Entrypoints point into
    /// the working tree.
    pub fn generate_materialized(
        &self,
        routes: &[RouteDescriptor],
        entry_root: &Path,
    ) -> Vec<RoutePattern> {
        let mut emitter = Emitter::default();
        for pass in self.passes() {
            for route in routes.iter().filter(|route| self.pass_of(route) == pass) {
                let route_key = without_locale(route);
                let pattern = self.pattern_for(pass, route_key);
                emitter.push(pattern, entry_root.join(&route.source));
            }
        }
        emitter.into_patterns()
    }

    fn pass_of(&self, route: &RouteDescriptor) -> Pass<'a> {
        match self.registry.locale(route.locale_hint.as_ref().map_or("", Locale::as_str)) {
            Some(locale) if !self.registry.is_unprefixed(locale) => Pass::Prefixed(locale),
            _ => Pass::Unprefixed,
        }
    }
}

/// Route key with the hinted locale segment removed, if still present.
fn without_locale(route: &RouteDescriptor) -> &str {
    let key = route.route_key.as_str();
    let Some(locale) = &route.locale_hint else {
        return key;
    };
    match key.strip_prefix(locale.as_str()) {
        Some("") => RouteKey::ROOT,
        Some(rest) => rest.strip_prefix('/').unwrap_or(key),
        None => key,
    }
}

/// Collects patterns in order, dropping repeats.
#[derive(Default)]
struct Emitter {
    seen: HashSet<String>,
    patterns: Vec<RoutePattern>,
}

impl Emitter {
    fn push(&mut self, pattern: String, entrypoint: PathBuf) {
        if !self.seen.insert(pattern.clone()) {
            debug!(
                "Skipping duplicate pattern {} for {}",
                pattern,
                entrypoint.display()
            );
            return;
        }
        self.patterns.push(RoutePattern {
            pattern,
            entrypoint,
        });
    }

    fn into_patterns(self) -> Vec<RoutePattern> {
        self.patterns
    }
}

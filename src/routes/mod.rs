//! Route discovery, path translation and router pattern generation.
//!
//! The pipeline is strictly sequential:
//!
//! 1. check that the routes directory exists (fatal otherwise)
//! 2. materialize the per-locale working tree (build mode only)
//! 3. discover routes
//! 4. generate one pattern per (locale, route) pair
//! 5. release the working tree

mod discovery;
mod pattern;
mod translate;
mod workspace;

pub use discovery::{discover, Discovery, LocaleSegment, RouteDescriptor, DEFAULT_PAGE_EXTENSION};
pub use pattern::{PatternGenerator, RoutePattern};
pub use translate::{LocalizedPaths, PathTranslator, WILDCARD};
pub use workspace::{remove_working_dir, WorkingTree};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::i18n::{LocaleRegistry, TranslationTable};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// How patterns are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RouteMode {
    /// Every locale pattern points at the canonical page file.
    #[default]
    Dynamic,
    /// Pages are copied per locale first and patterns point at the copies.
    Materialized,
}

impl FromStr for RouteMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "dynamic" => Ok(RouteMode::Dynamic),
            "build" | "materialized" => Ok(RouteMode::Materialized),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteMode::Dynamic => f.write_str("dev"),
            RouteMode::Materialized => f.write_str("build"),
        }
    }
}

/// Patterns produced by [`generate_patterns`].
///
/// In build mode this also owns the working tree the entrypoints point into;
/// it is removed (if configured) when this value is dropped or finished.
#[derive(Debug)]
pub struct GeneratedRoutes {
    pub patterns: Vec<RoutePattern>,
    working_tree: Option<WorkingTree>,
}

impl GeneratedRoutes {
    /// Directory the entrypoints live in, when pages were materialized.
    pub fn working_dir(&self) -> Option<&std::path::Path> {
        self.working_tree.as_ref().map(WorkingTree::path)
    }

    /// Release the working tree now.
    pub fn finish(self) {
        drop(self);
    }

    /// Keep the working tree on disk regardless of the cleanup setting.
    pub fn persist(mut self) -> (Vec<RoutePattern>, Option<PathBuf>) {
        let dir = self.working_tree.take().map(WorkingTree::persist);
        (self.patterns, dir)
    }
}

/// Run the whole pipeline for `config.mode`.
///
/// # Returns
/// * `Err(Error::MissingRoutesDir)` if `config.routes_dir` does not exist
/// * `Err` if the working tree cannot be materialized (build mode)
pub fn generate_patterns(
    config: &Config,
    registry: &LocaleRegistry,
    table: &TranslationTable,
) -> Result<GeneratedRoutes> {
    if !config.routes_dir.is_dir() {
        return Err(Error::MissingRoutesDir(config.routes_dir.clone()));
    }

    let generator = PatternGenerator::new(registry, table);
    let discovery = Discovery::new(registry).with_extension(&config.page_extension);

    match config.mode {
        RouteMode::Dynamic => {
            info!("Generating routes...");
            let routes = discovery.discover(&config.routes_dir);
            let patterns = generator.generate_dynamic(&routes, &config.routes_dir);
            Ok(GeneratedRoutes {
                patterns,
                working_tree: None,
            })
        }
        RouteMode::Materialized => {
            info!("Loading routes...");
            let tree = WorkingTree::materialize(
                &config.routes_dir,
                &config.temp_pages_dir,
                registry,
                config.clear_temp_pages,
            )?;
            let routes = discovery
                .with_locale_segment(LocaleSegment::Strip)
                .discover(tree.path());
            let patterns = generator.generate_materialized(&routes, tree.path());
            Ok(GeneratedRoutes {
                patterns,
                working_tree: Some(tree),
            })
        }
    }
}

//! Route discovery: page files on disk to canonical route keys.

use crate::i18n::{Locale, LocaleRegistry, RouteKey};
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Extension of routable page templates.
pub const DEFAULT_PAGE_EXTENSION: &str = "astro";

/// Files starting with this marker are private templates and never routed.
const PRIVATE_PREFIX: char = '_';

const INDEX_SEGMENT: &str = "index";

/// What to do with a leading path segment that names a supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocaleSegment {
    /// Record it as the locale hint and keep it in the route key
    /// (`fr/about` stays `fr/about`).
    #[default]
    Keep,
    /// Record it as the locale hint and remove it from the route key
    /// (`fr/about` becomes `about`, `fr/index` becomes `/`).
    Strip,
}

/// A routable page found on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    /// Path of the page relative to the discovery root
    pub source: PathBuf,
    pub route_key: RouteKey,
    /// Supported locale named by the first path segment, if any
    pub locale_hint: Option<Locale>,
}

/// Configured route discovery over a page tree.
#[derive(Debug, Clone)]
pub struct Discovery<'a> {
    registry: &'a LocaleRegistry,
    extension: &'a str,
    locale_segment: LocaleSegment,
}

impl<'a> Discovery<'a> {
    pub fn new(registry: &'a LocaleRegistry) -> Self {
        Self {
            registry,
            extension: DEFAULT_PAGE_EXTENSION,
            locale_segment: LocaleSegment::default(),
        }
    }

    /// Set the page extension (without the leading dot)
    pub fn with_extension(mut self, extension: &'a str) -> Self {
        self.extension = extension.trim_start_matches('.');
        self
    }

    pub fn with_locale_segment(mut self, locale_segment: LocaleSegment) -> Self {
        self.locale_segment = locale_segment;
        self
    }

    /// Discover every routable page below `root`.
    ///
    /// Pages are returned in a stable order: directory entries are visited
    /// sorted by name. If `root` cannot be read the failure is logged and no
    /// routes are returned; unreadable subdirectories are skipped.
    pub fn discover(&self, root: &Path) -> Vec<RouteDescriptor> {
        let mut files = Vec::new();
        if let Err(e) = collect_files(root, &mut files) {
            error!("Failed to read directory at path: {}: {}", root.display(), e);
            return Vec::new();
        }

        let routes: Vec<RouteDescriptor> = files
            .iter()
            .filter_map(|path| self.describe(root, path))
            .collect();

        debug!("Discovered {} routes under {}", routes.len(), root.display());
        routes
    }

    fn describe(&self, root: &Path, path: &Path) -> Option<RouteDescriptor> {
        let file_name = path.file_name()?.to_str()?;
        if file_name.starts_with(PRIVATE_PREFIX) {
            return None;
        }
        if path.extension() != Some(OsStr::new(self.extension)) {
            return None;
        }

        let relative = path.strip_prefix(root).ok()?;
        let Some(url) = route_path(relative, self.extension) else {
            warn!("Skipping page with non UTF-8 path: {}", relative.display());
            return None;
        };

        let first = url.split('/').next().unwrap_or_default();
        let locale_hint = self.registry.locale(first).cloned();

        let route_key = match (&locale_hint, self.locale_segment) {
            (Some(_), LocaleSegment::Strip) => strip_first_segment(&url),
            _ => RouteKey::new(url),
        };

        Some(RouteDescriptor {
            source: relative.to_path_buf(),
            route_key,
            locale_hint,
        })
    }
}

/// Discover routes below `root` with the default extension, keeping locale
/// segments in the keys.
pub fn discover(root: &Path, registry: &LocaleRegistry) -> Vec<RouteDescriptor> {
    Discovery::new(registry).discover(root)
}

/// Route path for a page path relative to the routes root.
///
/// `index` maps to `/`; a trailing `index` segment is dropped so
/// `blog/index` maps to `blog`.
fn route_path(relative: &Path, extension: &str) -> Option<String> {
    let segments = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<&str>>>()?;
    let joined = segments.join("/");
    let url = joined
        .strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(&joined);

    if url == INDEX_SEGMENT {
        return Some(RouteKey::ROOT.to_string());
    }
    match url.rsplit_once('/') {
        Some((parent, INDEX_SEGMENT)) => Some(parent.to_string()),
        _ => Some(url.to_string()),
    }
}

fn strip_first_segment(url: &str) -> RouteKey {
    match url.split_once('/') {
        Some((_, rest)) if !rest.is_empty() => RouteKey::new(rest),
        _ => RouteKey::root(),
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };

        if file_type.is_dir() {
            if let Err(e) = collect_files(&path, files) {
                warn!("Failed to read directory at path: {}: {}", path.display(), e);
            }
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

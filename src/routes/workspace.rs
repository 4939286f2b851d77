//! Materialized working tree for ahead-of-time route generation.
//!
//! The canonical page tree is copied once to the working directory root and
//! once into `<working dir>/<locale>` for every locale whose URLs carry a
//! prefix. The copy lives as long as the [`WorkingTree`] guard; dropping the
//! guard removes it when cleanup is enabled.

use crate::error::{Error, Result};
use crate::i18n::LocaleRegistry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Guard over a materialized copy of the page tree.
#[derive(Debug)]
pub struct WorkingTree {
    root: PathBuf,
    cleanup: bool,
}

impl WorkingTree {
    /// Empty `working_dir` and fill it with per-locale copies of `routes_dir`.
    ///
    /// # Arguments
    /// * `routes_dir` - The canonical page tree
    /// * `working_dir` - Destination; any previous content is removed first
    /// * `registry` - Decides which locales get their own copy
    /// * `cleanup` - Remove `working_dir` when the guard is dropped
    ///
    /// If copying fails the partially written tree is removed (when `cleanup`
    /// is set) before the error is returned.
    ///
    /// # Returns
    /// * `Err(Error::Io)` if `routes_dir` does not exist
    /// * `Err(Error::NestedWorkingTree)` if either directory contains the
    ///   other, after resolving symlinks and relative components
    pub fn materialize(
        routes_dir: &Path,
        working_dir: &Path,
        registry: &LocaleRegistry,
        cleanup: bool,
    ) -> Result<Self> {
        let canonical_routes =
            fs::canonicalize(routes_dir).map_err(|e| Error::io(routes_dir, e))?;
        let canonical_working = resolve_target(working_dir)?;
        if canonical_working.starts_with(&canonical_routes)
            || canonical_routes.starts_with(&canonical_working)
        {
            return Err(Error::NestedWorkingTree {
                working_dir: working_dir.to_path_buf(),
                routes_dir: routes_dir.to_path_buf(),
            });
        }

        empty_dir(working_dir)?;
        let tree = Self {
            root: working_dir.to_path_buf(),
            cleanup,
        };

        copy_dir_all(routes_dir, &tree.root)?;
        for config in registry.list() {
            if !registry.is_unprefixed(&config.code) {
                copy_dir_all(routes_dir, &tree.root.join(config.code.as_str()))?;
            }
            info!("✅ Loaded {} pages!", config.name);
        }

        Ok(tree)
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Keep the tree on disk after the guard is dropped.
    pub fn persist(mut self) -> PathBuf {
        self.cleanup = false;
        self.root.clone()
    }
}

impl Drop for WorkingTree {
    fn drop(&mut self) {
        if self.cleanup {
            remove_working_dir(&self.root);
        }
    }
}

/// Remove a working directory. Missing directories are not an error.
pub fn remove_working_dir(path: &Path) {
    info!("Cleaning up...");
    match fs::remove_dir_all(path) {
        Ok(()) => info!("✅ Removed {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Nothing to clean at {}", path.display())
        }
        Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
    }
}

/// Canonical form of a path that may not exist yet: its deepest existing
/// ancestor is canonicalized and the missing components are appended.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| Error::io(path, e))?
            .join(path)
    };

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    loop {
        match fs::canonicalize(existing) {
            Ok(canonical) => {
                return Ok(missing
                    .iter()
                    .rev()
                    .fold(canonical, |acc: PathBuf, part| acc.join(part)));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                match (existing.parent(), existing.file_name()) {
                    (Some(parent), Some(name)) => {
                        missing.push(name.to_os_string());
                        existing = parent;
                    }
                    _ => return Err(Error::io(path, e)),
                }
            }
            Err(e) => return Err(Error::io(path, e)),
        }
    }
}

fn empty_dir(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(Error::io(path, e)),
    }
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| Error::io(dst, e))?;

    for entry in fs::read_dir(src).map_err(|e| Error::io(src, e))? {
        let entry = entry.map_err(|e| Error::io(src, e))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        // Follows symlinks, so a linked directory is copied as a directory
        let metadata = fs::metadata(&from).map_err(|e| Error::io(&from, e))?;

        if metadata.is_dir() {
            copy_dir_all(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| Error::io(&from, e))?;
        }
    }
    Ok(())
}

//! Buildpack cache persistence
//!
//! The platform hands the compile step two directories: the build dir the
//! droplet is made from, and a cache dir that survives between builds.
//! Each cacheable installer owns one fixed subdirectory name that exists
//! in both; NuGet packages live in `.nuget`.
//!
//! | Entry | Build dir | Cache dir |
//! |-------|-----------|-----------|
//! | `.dotnet` | installed SDK | SDK + `VERSION` marker |
//! | `libunwind`, `.node`, `.bower` | unpacked archive | same |
//! | `.nuget` | restored packages | same, unless disabled |

pub mod copier;

pub use copier::copy_dir;

use crate::error::{BuildpackError, BuildpackResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// NuGet package cache directory name
pub const NUGET_CACHE_DIR: &str = ".nuget";

/// Named directories shared between the build dir and the cache dir
#[derive(Debug, Clone)]
pub struct CacheStore {
    build_dir: PathBuf,
    cache_dir: PathBuf,
}

impl CacheStore {
    /// Create a store over the two roots
    pub fn new(build_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
            cache_dir: cache_dir.into(),
        }
    }

    /// The build directory
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Path of an entry in the cache dir
    pub fn cached_path(&self, name: &str) -> PathBuf {
        self.cache_dir.join(name)
    }

    /// Path of an entry in the build dir
    pub fn build_path(&self, name: &str) -> PathBuf {
        self.build_dir.join(name)
    }

    /// Whether the cache dir holds the entry
    pub fn is_cached(&self, name: &str) -> bool {
        self.cached_path(name).exists()
    }

    /// Whether the build dir holds the entry
    pub fn is_built(&self, name: &str) -> bool {
        self.build_path(name).exists()
    }

    /// Copy an entry from the cache dir into the build dir
    pub fn restore(&self, name: &str) -> BuildpackResult<()> {
        debug!("Restoring {} from cache", name);
        copy_dir(&self.cached_path(name), &self.build_dir)
    }

    /// Copy an entry from the build dir into the cache dir
    pub fn save(&self, name: &str) -> BuildpackResult<()> {
        debug!("Saving {} to cache", name);
        copy_dir(&self.build_path(name), &self.cache_dir)
    }

    /// Delete an entry from the cache dir, if present
    pub fn remove(&self, name: &str) -> BuildpackResult<()> {
        let path = self.cached_path(name);
        let Ok(metadata) = path.symlink_metadata() else {
            return Ok(());
        };
        debug!("Removing cached {}", path.display());
        let removed = if metadata.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        removed.map_err(|e| BuildpackError::io(format!("removing {}", path.display()), e))
    }
}

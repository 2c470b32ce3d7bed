//! Source tree scanning
//!
//! Finds the directories holding project descriptors. Hidden directories
//! and the NuGet package cache are never descended into, so restored
//! packages that ship their own `project.json` are not mistaken for app
//! projects.

use crate::cache::NUGET_CACHE_DIR;
use crate::error::{BuildpackError, BuildpackResult};
use std::collections::BTreeSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Whether a directory entry is excluded from scans
fn is_excluded(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.') || name == NUGET_CACHE_DIR
}

fn is_scanned(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !is_excluded(entry.file_name())
}

/// Find every directory under `root` containing a file whose name ends
/// with `suffix`.
///
/// Paths are relative to `root`, sorted and deduplicated. A match in the
/// root itself is reported as `.`.
pub fn find_with_extension(root: &Path, suffix: &str) -> BuildpackResult<Vec<PathBuf>> {
    find_dirs(root, suffix, |name| name.ends_with(suffix))
}

/// Like [`find_with_extension`], but the file name must equal `file_name`
pub fn find_with_file_name(root: &Path, file_name: &str) -> BuildpackResult<Vec<PathBuf>> {
    find_dirs(root, file_name, |name| name == file_name)
}

fn find_dirs(
    root: &Path,
    label: &str,
    matches: impl Fn(&str) -> bool,
) -> BuildpackResult<Vec<PathBuf>> {
    let mut dirs = BTreeSet::new();

    for entry in WalkDir::new(root).into_iter().filter_entry(is_scanned) {
        let entry = entry.map_err(|e| BuildpackError::Walk {
            root: root.to_path_buf(),
            source: e,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        // Patterns are ASCII, so a lossy view of the name is enough to match.
        if !matches(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let Some(parent) = entry.path().parent() else {
            continue;
        };
        let relative = parent.strip_prefix(root).unwrap_or(parent);
        if relative.as_os_str().is_empty() {
            dirs.insert(PathBuf::from("."));
        } else {
            dirs.insert(relative.to_path_buf());
        }
    }

    debug!(
        "Found {} directories with {} under {}",
        dirs.len(),
        label,
        root.display()
    );
    Ok(dirs.into_iter().collect())
}

/// Find the base names of `*<suffix>` files directly in `root`
pub fn find_in_root(root: &Path, suffix: &str) -> BuildpackResult<Vec<String>> {
    let mut names: Vec<String> = list_entries(root, |t| t.is_file())?
        .into_iter()
        .filter_map(|name| {
            let base = name.to_str()?.strip_suffix(suffix)?;
            (!base.is_empty()).then(|| base.to_string())
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Names of the directories directly in `root`, sorted
pub fn subdirectories(root: &Path) -> BuildpackResult<Vec<String>> {
    let mut names: Vec<String> = list_entries(root, |t| t.is_dir())?
        .into_iter()
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}

fn list_entries(
    root: &Path,
    keep: impl Fn(&std::fs::FileType) -> bool,
) -> BuildpackResult<Vec<OsString>> {
    let listing_error =
        |e: std::io::Error| BuildpackError::io(format!("listing {}", root.display()), e);

    let mut names = Vec::new();
    for entry in std::fs::read_dir(root).map_err(listing_error)? {
        let entry = entry.map_err(listing_error)?;
        if keep(&entry.file_type().map_err(listing_error)?) {
            names.push(entry.file_name());
        }
    }
    Ok(names)
}

//! Installed-version marker files
//!
//! Every install directory carries a `VERSION` file listing the versions
//! unpacked into it, one per line. A cached directory is reused when its
//! marker lists the wanted version.

use crate::error::{BuildpackError, BuildpackResult};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Marker file name inside an install directory
pub const VERSION_FILE: &str = "VERSION";

/// Versions recorded in `dir`, oldest first
///
/// A missing directory or marker reads as empty.
pub fn recorded_versions(dir: &Path) -> BuildpackResult<Vec<String>> {
    let path = dir.join(VERSION_FILE);
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let content = crate::text::read_text(&path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Whether `dir` records `version`
pub fn contains_version(dir: &Path, version: &str) -> BuildpackResult<bool> {
    Ok(recorded_versions(dir)?.iter().any(|v| v == version))
}

/// Append `version` to the marker in `dir`
pub fn record_version(dir: &Path, version: &str) -> BuildpackResult<()> {
    fs::create_dir_all(dir)
        .map_err(|e| BuildpackError::io(format!("creating {}", dir.display()), e))?;

    let path = dir.join(VERSION_FILE);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| BuildpackError::io(format!("opening {}", path.display()), e))?;
    writeln!(file, "{}", version)
        .map_err(|e| BuildpackError::io(format!("writing {}", path.display()), e))?;

    debug!("Recorded version {} in {}", version, path.display());
    Ok(())
}

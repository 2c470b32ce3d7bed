//! `.deployment` file parsing
//!
//! The file is INI-like:
//!
//! ```text
//! [config]
//! project = src/MyApp
//! ```
//!
//! `project` may name a directory or a `.xproj`/`.csproj` file, in which
//! case the file's directory is used.

use crate::error::{BuildpackError, BuildpackResult};
use crate::text::read_text;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the deployment override file at the app root
pub const DEPLOYMENT_FILE: &str = ".deployment";

const CONFIG_SECTION: &str = "config";
const PROJECT_KEY: &str = "project";

/// Collect every `project` value from the `[config]` section
///
/// Keys before the first section header count as well.
pub fn project_entries(content: &str) -> Vec<String> {
    let mut section: Option<String> = None;
    let mut entries = Vec::new();

    for line in crate::text::strip_bom(content).lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = Some(name.trim().to_ascii_lowercase());
            continue;
        }

        let in_config = section.as_deref().map_or(true, |s| s == CONFIG_SECTION);
        if !in_config {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            if key.trim() == PROJECT_KEY {
                entries.push(unquote(value.trim()).to_string());
            }
        }
    }

    entries
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Whether the path names a project file rather than a directory
fn is_project_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("xproj") | Some("csproj")
    )
}

/// Resolve the project named by the `.deployment` file under `root`
///
/// Returns `None` when the file is absent, names a directory that does
/// not exist, or names an empty or absolute path. A file without a `project` key, or with more than one, is a
/// configuration error.
pub fn resolve(root: &Path) -> BuildpackResult<Option<PathBuf>> {
    let path = root.join(DEPLOYMENT_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    let entries = project_entries(&read_text(&path)?);
    let value = match entries.as_slice() {
        [] => {
            return Err(BuildpackError::DeploymentConfig {
                path,
                reason: "must have project key".to_string(),
            })
        }
        [value] => value,
        _ => {
            return Err(BuildpackError::DeploymentConfig {
                path,
                reason: "must only contain one project key".to_string(),
            })
        }
    };

    let named = PathBuf::from(value);
    if value.is_empty() || named.is_absolute() {
        debug!("Deployment file project {:?} is not inside the app", value);
        return Ok(None);
    }

    let project_dir = if is_project_file(&named) {
        match named.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    } else {
        named
    };

    if root.join(&project_dir).is_dir() {
        debug!("Deployment file selects {}", project_dir.display());
        Ok(Some(project_dir))
    } else {
        debug!(
            "Deployment file names missing project {}",
            project_dir.display()
        );
        Ok(None)
    }
}

//! Directory tree copying between the build dir and the buildpack cache

use crate::error::{BuildpackError, BuildpackResult};
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Copy `src` into `dest_parent`, producing `dest_parent/<name of src>`.
///
/// Existing files are overwritten; files only present in the destination
/// are kept.
pub fn copy_dir(src: &Path, dest_parent: &Path) -> BuildpackResult<()> {
    let Some(name) = src.file_name() else {
        return Err(BuildpackError::PathNotFound(src.to_path_buf()));
    };
    let dest = dest_parent.join(name);
    debug!("Copying {} to {}", src.display(), dest.display());

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| BuildpackError::Walk {
            root: src.to_path_buf(),
            source: e,
        })?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| BuildpackError::io(format!("creating {}", target.display()), e))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| {
                BuildpackError::io(
                    format!("copying {} to {}", entry.path().display(), target.display()),
                    e,
                )
            })?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> BuildpackResult<()> {
    let pointee = fs::read_link(link)
        .map_err(|e| BuildpackError::io(format!("reading link {}", link.display()), e))?;
    if target.symlink_metadata().is_ok() {
        fs::remove_file(target)
            .map_err(|e| BuildpackError::io(format!("replacing {}", target.display()), e))?;
    }
    std::os::unix::fs::symlink(&pointee, target)
        .map_err(|e| BuildpackError::io(format!("linking {}", target.display()), e))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> BuildpackResult<()> {
    fs::copy(link, target)
        .map(|_| ())
        .map_err(|e| BuildpackError::io(format!("copying {}", link.display()), e))
}

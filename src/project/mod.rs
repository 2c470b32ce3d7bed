//! Application layout discovery
//!
//! Works out which project descriptors an app contains, which project is
//! the one to run, and whether the app was already published.

pub mod deployment;
pub mod scan;

pub use deployment::DEPLOYMENT_FILE;
pub use scan::{find_with_extension, find_with_file_name};

use crate::error::{BuildpackError, BuildpackResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Legacy project descriptor file name
pub const PROJECT_JSON: &str = "project.json";

/// Modern project descriptor extension
pub const CSPROJ_EXTENSION: &str = ".csproj";

/// Suffix of the runtime config written by `dotnet publish`
pub const RUNTIMECONFIG_SUFFIX: &str = ".runtimeconfig.json";

/// Snapshot of an app's project layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Directories containing `project.json`, relative to the app root
    pub project_json_dirs: Vec<PathBuf>,

    /// Directories containing `*.csproj`, relative to the app root
    pub csproj_dirs: Vec<PathBuf>,

    /// Name of the published app, if the tree was pre-published
    pub published_project: Option<String>,
}

impl ProjectLayout {
    /// Whether any `project.json` was found
    pub fn has_project_json(&self) -> bool {
        !self.project_json_dirs.is_empty()
    }

    /// Whether any `*.csproj` was found
    pub fn has_csproj(&self) -> bool {
        !self.csproj_dirs.is_empty()
    }
}

/// An application source tree
#[derive(Debug, Clone)]
pub struct AppDir {
    root: PathBuf,
}

impl AppDir {
    /// Wrap the app tree rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The app root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directories containing a `project.json`
    pub fn with_project_json(&self) -> BuildpackResult<Vec<PathBuf>> {
        find_with_file_name(&self.root, PROJECT_JSON)
    }

    /// Directories containing a `*.csproj`
    pub fn with_csproj(&self) -> BuildpackResult<Vec<PathBuf>> {
        find_with_extension(&self.root, CSPROJ_EXTENSION)
    }

    /// Project selected by the `.deployment` file
    pub fn deployment_file_project(&self) -> BuildpackResult<Option<PathBuf>> {
        deployment::resolve(&self.root)
    }

    /// The project to run
    ///
    /// A single `project.json` directory wins outright; otherwise the
    /// `.deployment` file decides. Several candidates with no override is
    /// an error.
    pub fn main_project_path(&self) -> BuildpackResult<Option<PathBuf>> {
        let dirs = self.with_project_json()?;
        if let [only] = dirs.as_slice() {
            return Ok(Some(only.clone()));
        }

        if let Some(project) = self.deployment_file_project()? {
            return Ok(Some(project));
        }

        if dirs.len() > 1 {
            return Err(BuildpackError::AmbiguousProject { dirs });
        }

        Ok(None)
    }

    /// Name of the published app, taken from `<name>.runtimeconfig.json`
    /// at the app root
    pub fn published_project(&self) -> BuildpackResult<Option<String>> {
        let names = scan::find_in_root(&self.root, RUNTIMECONFIG_SUFFIX)?;
        Ok(names.into_iter().next())
    }

    /// Scan the tree into a layout snapshot
    pub fn layout(&self) -> BuildpackResult<ProjectLayout> {
        let layout = ProjectLayout {
            project_json_dirs: self.with_project_json()?,
            csproj_dirs: self.with_csproj()?,
            published_project: self.published_project()?,
        };
        debug!(
            "Layout of {}: {} project.json dirs, {} csproj dirs, published: {:?}",
            self.root.display(),
            layout.project_json_dirs.len(),
            layout.csproj_dirs.len(),
            layout.published_project
        );
        Ok(layout)
    }
}

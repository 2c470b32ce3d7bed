//! Error types for the buildpack
//!
//! All modules use `BuildpackResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for buildpack operations
pub type BuildpackResult<T> = Result<T, BuildpackError>;

/// All errors that can occur while compiling an app
#[derive(Error, Debug)]
pub enum BuildpackError {
    // Project layout errors
    #[error("Invalid .deployment file: {reason} ({})", .path.display())]
    DeploymentConfig { path: PathBuf, reason: String },

    #[error("Multiple paths contain a project.json file, but no .deployment file was used")]
    AmbiguousProject { dirs: Vec<PathBuf> },

    // SDK resolution errors
    #[error("App contains both a project.json and a *.csproj file")]
    ToolingConflict,

    #[error("Invalid SDK manifest at {}: {reason}", .path.display())]
    ManifestInvalid { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {}: {reason}", .path.display())]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    // Process errors
    #[error("Command failed to start: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command exited with code {code}: {command}\n{output}")]
    CommandExit {
        command: String,
        code: i32,
        output: String,
    },

    // Pipeline errors
    #[error("{description} failed, {source}")]
    StepFailed {
        description: String,
        #[source]
        source: Box<BuildpackError>,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl BuildpackError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Wrap an error as the failure of a named pipeline step
    pub fn step_failed(description: impl Into<String>, source: BuildpackError) -> Self {
        Self::StepFailed {
            description: description.into(),
            source: Box::new(source),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::DeploymentConfig { .. } => Some(
                "The .deployment file needs a [config] section with exactly one `project = <path>` entry",
            ),
            Self::AmbiguousProject { .. } => {
                Some("Add a .deployment file to the app root naming the project to run")
            }
            Self::ToolingConflict => Some(
                "Set DOTNET_SDK_TOOLING to msbuild or project.json, or pin the SDK in global.json",
            ),
            Self::StepFailed { source, .. } => source.hint(),
            _ => None,
        }
    }
}

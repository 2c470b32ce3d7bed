//! Dependency manifest parsing
//!
//! Two YAML files ship with the buildpack:
//!
//! - `manifest.yml` lists every dependency (`name`, `version`) the buildpack
//!   can fetch, plus one `default_versions` entry per dependency name.
//! - `dotnet-sdk-tools.yml` sorts SDK versions into the `project_json` and
//!   `msbuild` tooling families.

use crate::config::Tooling;
use crate::error::{BuildpackError, BuildpackResult};
use crate::text::{read_text, strip_bom};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Manifest dependency name of the .NET SDK
pub const DOTNET_SDK: &str = "dotnet";

/// A dependency name/version pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dependency {
    /// Dependency name
    pub name: String,

    /// Version string
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,
}

/// Accept YAML numbers (`6.9`) as version strings
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_yaml::Value::deserialize(deserializer)? {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(D::Error::custom(format!(
            "expected a version string, found {:?}",
            other
        ))),
    }
}

fn scalar_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Version(#[serde(deserialize_with = "scalar_string")] String);

    let versions: Option<Vec<Version>> = Option::deserialize(deserializer)?;
    Ok(versions
        .unwrap_or_default()
        .into_iter()
        .map(|Version(v)| v)
        .collect())
}

#[derive(Debug, Default, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    default_versions: Vec<Dependency>,

    #[serde(default)]
    dependencies: Vec<Dependency>,
}

/// SDK versions per tooling family
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToolingFamilies {
    /// Versions that build `project.json` projects
    #[serde(default, deserialize_with = "scalar_strings")]
    pub project_json: Vec<String>,

    /// Versions that build `*.csproj` projects
    #[serde(default, deserialize_with = "scalar_strings")]
    pub msbuild: Vec<String>,
}

impl ToolingFamilies {
    /// Versions compatible with a tooling family
    pub fn versions(&self, tooling: Tooling) -> &[String] {
        match tooling {
            Tooling::Msbuild => &self.msbuild,
            Tooling::ProjectJson => &self.project_json,
        }
    }
}

/// Known dependency versions, defaults and SDK tooling families
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SdkManifest {
    path: PathBuf,
    dependencies: Vec<Dependency>,
    defaults: Vec<Dependency>,
    families: ToolingFamilies,
}

impl SdkManifest {
    /// Load the manifest and tooling mapping from disk
    pub fn load(manifest_path: &Path, tools_path: &Path) -> BuildpackResult<Self> {
        let manifest_yaml = read_text(manifest_path)?;
        let tools_yaml = read_text(tools_path)?;

        let mut manifest = Self::parse(&manifest_yaml, &tools_yaml).map_err(|e| match e {
            BuildpackError::Yaml(source) => BuildpackError::ManifestInvalid {
                path: manifest_path.to_path_buf(),
                reason: source.to_string(),
            },
            other => other,
        })?;
        manifest.path = manifest_path.to_path_buf();

        debug!(
            "Loaded manifest {} with {} dependencies",
            manifest_path.display(),
            manifest.dependencies.len()
        );
        Ok(manifest)
    }

    /// Parse the manifest and tooling mapping from YAML text
    pub fn parse(manifest_yaml: &str, tools_yaml: &str) -> BuildpackResult<Self> {
        let manifest: ManifestFile = serde_yaml::from_str(strip_bom(manifest_yaml))?;
        let families: Option<ToolingFamilies> = serde_yaml::from_str(strip_bom(tools_yaml))?;

        Ok(Self {
            path: PathBuf::from("manifest.yml"),
            dependencies: manifest.dependencies,
            defaults: manifest.default_versions,
            families: families.unwrap_or_default(),
        })
    }

    /// Where the manifest was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared versions of a dependency, in manifest order
    pub fn versions<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.dependencies
            .iter()
            .filter(move |d| d.name == name)
            .map(|d| d.version.as_str())
    }

    /// Version the manifest designates as default for a dependency
    pub fn default_version(&self, name: &str) -> Option<&str> {
        self.defaults
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.version.as_str())
    }

    /// Default version, falling back to the last declared version
    pub fn version_for(&self, name: &str) -> BuildpackResult<String> {
        self.default_version(name)
            .or_else(|| self.versions(name).last())
            .map(str::to_string)
            .ok_or_else(|| self.invalid(format!("no version of {} is listed", name)))
    }

    /// Default .NET SDK version
    pub fn default_sdk_version(&self) -> BuildpackResult<String> {
        self.default_version(DOTNET_SDK)
            .map(str::to_string)
            .ok_or_else(|| self.invalid(format!("no default version for {}", DOTNET_SDK)))
    }

    /// Latest SDK declared for a tooling family
    ///
    /// Manifest declaration order is the ranking: the last `dotnet`
    /// dependency whose version belongs to the family wins.
    pub fn latest_sdk_version(&self, tooling: Tooling) -> BuildpackResult<String> {
        let family = self.families.versions(tooling);
        self.versions(DOTNET_SDK)
            .filter(|v| family.iter().any(|f| f.as_str() == *v))
            .last()
            .map(str::to_string)
            .ok_or_else(|| {
                self.invalid(format!("no {} version supports {}", DOTNET_SDK, tooling))
            })
    }

    /// Tooling family mapping
    pub fn families(&self) -> &ToolingFamilies {
        &self.families
    }

    fn invalid(&self, reason: String) -> BuildpackError {
        BuildpackError::ManifestInvalid {
            path: self.path.clone(),
            reason,
        }
    }
}

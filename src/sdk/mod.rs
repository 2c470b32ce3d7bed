//! .NET SDK manifest and version resolution

pub mod manifest;
pub mod version;

pub use manifest::{Dependency, SdkManifest, ToolingFamilies, DOTNET_SDK};
pub use version::{
    ResolvedVersion, SdkVersionResolver, VersionSource, GLOBAL_JSON, PROJECT_JSON_DEPRECATION,
};

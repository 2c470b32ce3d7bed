//! Installer set construction from configuration

use super::archive::{ArchiveInstaller, ArchiveSpec};
use super::sdk::SdkInstaller;
use super::{InstallContext, Installer, InstallerSet};
use crate::config::schema::{ArchiveConfig, InstallersConfig};
use tracing::debug;

/// Build the installers for a compile, in install order
///
/// libunwind comes first so the SDK can load it during restore. Disabled
/// archive installers are left out; the SDK is always present.
pub fn create_installers(config: &InstallersConfig, ctx: &InstallContext) -> InstallerSet {
    let archive = |spec: ArchiveSpec, overrides: &ArchiveConfig| -> Option<ArchiveInstaller> {
        let spec = spec.with_overrides(overrides);
        if !overrides.enabled {
            debug!("{} installer disabled", spec.name);
            return None;
        }
        Some(ArchiveInstaller::new(spec, ctx.clone()))
    };

    let mut installers = Vec::new();
    if let Some(libunwind) = archive(ArchiveSpec::libunwind(), &config.libunwind) {
        installers.push(Installer::Libunwind(libunwind));
    }
    installers.push(Installer::DotnetSdk(SdkInstaller::new(ctx.clone())));
    if let Some(node) = archive(ArchiveSpec::node(), &config.node) {
        installers.push(Installer::NodeJs(node));
    }
    if let Some(bower) = archive(ArchiveSpec::bower(), &config.bower) {
        installers.push(Installer::Bower(bower));
    }

    InstallerSet::new(installers)
}

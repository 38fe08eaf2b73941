//! Package manifests as a source of plugin identity.
//!
//! A plugin can take its name and version from a `Cargo.toml` instead of
//! spelling them out. Only the `[package]` table is read.

use serde::Deserialize;
use thiserror::Error;

use crate::plugin::unit::PluginIdentity;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("malformed package manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("package manifest field `{0}` is empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, Deserialize)]
struct PackageTable {
    name: String,
    version: String,
}

/// The parts of a package manifest needed to identify a plugin.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    package: PackageTable,
}

impl PackageManifest {
    pub fn parse(source: &str) -> Result<Self, ManifestError> {
        let manifest: PackageManifest = toml::from_str(source)?;
        if manifest.package.name.trim().is_empty() {
            return Err(ManifestError::Empty("package.name"));
        }
        if manifest.package.version.trim().is_empty() {
            return Err(ManifestError::Empty("package.version"));
        }
        Ok(manifest)
    }

    pub fn name(&self) -> &str {
        &self.package.name
    }

    pub fn version(&self) -> &str {
        &self.package.version
    }

    pub fn identity(&self) -> PluginIdentity {
        PluginIdentity::new(self.name(), self.version())
    }
}

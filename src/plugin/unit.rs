//! Plugin identity, the `Plugin` trait and the normalized `PluginUnit` record.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::plugin::manifest::PackageManifest;
use crate::plugin::scope::PluginServer;
use crate::routing::RouteError;

/// Errors a plugin's registration can end with.
#[derive(Debug, Error)]
pub enum PluginError {
    /// A route the plugin tried to add was rejected.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// `register` did not finish within the allotted time.
    #[error("registration did not complete within {after:?}")]
    Timeout { after: Duration },

    /// Plugin-specific setup failure.
    #[error("{0}")]
    Failed(String),
}

/// Name and version of a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PluginIdentity {
    pub name: String,
    pub version: String,
}

impl PluginIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Identity taken from a package manifest.
    pub fn from_manifest(manifest: &PackageManifest) -> Self {
        manifest.identity()
    }
}

impl fmt::Display for PluginIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Registration behaviour of a plugin.
///
/// Implementations add their routes through `server`; every path they give is
/// relative to the prefix in effect for this registration. `register` may
/// await arbitrary setup work. It is called at most once per server.
#[async_trait]
pub trait Plugin: Send + Sync {
    async fn register(&self, server: &mut PluginServer<'_>, options: &Value) -> Result<(), PluginError>;
}

/// A plugin together with its identity.
///
/// Whether the identity was written inline or read from a manifest, every
/// plugin reaches the server in this one shape.
#[derive(Clone)]
pub struct PluginUnit {
    identity: PluginIdentity,
    dependencies: Vec<String>,
    plugin: Arc<dyn Plugin>,
}

impl PluginUnit {
    pub fn new(identity: PluginIdentity, plugin: impl Plugin + 'static) -> Self {
        Self {
            identity,
            dependencies: Vec::new(),
            plugin: Arc::new(plugin),
        }
    }

    /// Names of plugins that must also be registered before the server starts.
    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn identity(&self) -> &PluginIdentity {
        &self.identity
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub(crate) fn plugin(&self) -> &dyn Plugin {
        self.plugin.as_ref()
    }
}

impl fmt::Debug for PluginUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginUnit")
            .field("identity", &self.identity)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

//! A plugin that takes its identity from the crate manifest and echoes its
//! registration options back over HTTP.

use async_trait::async_trait;
use axum::Json;
use serde_json::{json, Value};

use crate::plugin::{ManifestError, PackageManifest, Plugin, PluginError, PluginIdentity, PluginServer, PluginUnit};
use crate::routing::Route;

const MANIFEST: &str = include_str!("../../Cargo.toml");

struct ExternalPlugin;

#[async_trait]
impl Plugin for ExternalPlugin {
    async fn register(&self, server: &mut PluginServer<'_>, options: &Value) -> Result<(), PluginError> {
        let options = options.clone();
        server.route(Route::get("/plugin-external", move || {
            let body = json!({ "options": options });
            async move { Json(body) }
        }))?;
        Ok(())
    }
}

pub fn plugin() -> Result<PluginUnit, ManifestError> {
    let manifest = PackageManifest::parse(MANIFEST)?;
    Ok(PluginUnit::new(PluginIdentity::from_manifest(&manifest), ExternalPlugin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_comes_from_manifest() {
        let unit = plugin().unwrap();
        assert_eq!(unit.name(), env!("CARGO_PKG_NAME"));
        assert_eq!(unit.identity().version, env!("CARGO_PKG_VERSION"));
    }
}

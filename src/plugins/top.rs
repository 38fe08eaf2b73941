//! A plugin whose identity is written inline.

use async_trait::async_trait;
use axum::response::Html;
use serde_json::Value;

use crate::plugin::{Plugin, PluginError, PluginIdentity, PluginServer, PluginUnit};
use crate::routing::Route;

pub const NAME: &str = "myPlugin";
pub const VERSION: &str = "1.0.0";

pub const GREETING: &str = "<h1>hello, world</h1>";

struct TopPlugin;

#[async_trait]
impl Plugin for TopPlugin {
    async fn register(&self, server: &mut PluginServer<'_>, _options: &Value) -> Result<(), PluginError> {
        server.route(Route::get("/plugin-top", || async { Html(GREETING) }))?;
        Ok(())
    }
}

pub fn plugin() -> PluginUnit {
    PluginUnit::new(PluginIdentity::new(NAME, VERSION), TopPlugin)
}

//! Shared plugins and helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use plugin_server::{Plugin, PluginError, PluginIdentity, PluginServer, PluginUnit, Route, ServerConfig};
use serde_json::Value;
use tower::ServiceExt;

/// Config bound to an ephemeral loopback port.
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.server.host = "127.0.0.1".into();
    config.server.port = 0;
    config.plugins.registration_timeout_ms = 2_000;
    config
}

/// Registers `GET <path>` answering `body`, recording the options it saw.
pub struct Recorder {
    pub path: &'static str,
    pub body: &'static str,
    pub seen: Arc<Mutex<Vec<Value>>>,
}

#[async_trait]
impl Plugin for Recorder {
    async fn register(&self, server: &mut PluginServer<'_>, options: &Value) -> Result<(), PluginError> {
        self.seen.lock().unwrap().push(options.clone());
        let body = self.body;
        server.route(Route::get(self.path, move || async move { body }))?;
        Ok(())
    }
}

pub fn recorder(name: &str, path: &'static str) -> (PluginUnit, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let plugin = Recorder {
        path,
        body: path,
        seen: seen.clone(),
    };
    (PluginUnit::new(PluginIdentity::new(name, "1.0.0"), plugin), seen)
}

/// Registers each path with `GET`.
pub struct Paths(pub Vec<&'static str>);

#[async_trait]
impl Plugin for Paths {
    async fn register(&self, server: &mut PluginServer<'_>, _options: &Value) -> Result<(), PluginError> {
        for path in &self.0 {
            server.route(Route::get(*path, || async { "ok" }))?;
        }
        Ok(())
    }
}

pub fn paths(name: &str, paths: &[&'static str]) -> PluginUnit {
    PluginUnit::new(PluginIdentity::new(name, "1.0.0"), Paths(paths.to_vec()))
}

/// Sleeps before registering, logging start/end into `log`.
pub struct Slow {
    pub name: &'static str,
    pub delay: Duration,
    pub log: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Plugin for Slow {
    async fn register(&self, _server: &mut PluginServer<'_>, _options: &Value) -> Result<(), PluginError> {
        self.log.lock().unwrap().push(format!("{} start", self.name));
        tokio::time::sleep(self.delay).await;
        self.log.lock().unwrap().push(format!("{} end", self.name));
        Ok(())
    }
}

/// Adds a route, then fails.
pub struct Failing;

#[async_trait]
impl Plugin for Failing {
    async fn register(&self, server: &mut PluginServer<'_>, _options: &Value) -> Result<(), PluginError> {
        server.route(Route::get("/half-done", || async { "never served" }))?;
        Err(PluginError::Failed("database unreachable".into()))
    }
}

/// Send `GET path` through the router, returning status and body text.
pub async fn get(router: &Router, path: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

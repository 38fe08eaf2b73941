//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root configuration for the plugin server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listening host/port and request limits.
    pub server: ServerSection,

    /// Plugin registration settings.
    pub plugins: PluginSection,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host name or address to bind (e.g., "localhost", "0.0.0.0").
    pub host: String,

    /// Port to bind. `0` picks an ephemeral port.
    pub port: u16,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3103,
            request_timeout_secs: 30,
        }
    }
}

/// Plugin registration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PluginSection {
    /// Prefix applied to the plugin batch (must start with '/').
    pub prefix: Option<String>,

    /// Upper bound on a single plugin's `register` call, in milliseconds.
    pub registration_timeout_ms: u64,

    /// Options handed to the external plugin.
    pub options: Map<String, Value>,
}

impl Default for PluginSection {
    fn default() -> Self {
        let mut options = Map::new();
        options.insert(
            "msg".to_string(),
            Value::String("Anything here goes into the plugin".to_string()),
        );

        Self {
            prefix: Some("/plugins".to_string()),
            registration_timeout_ms: 10_000,
            options,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable text or one JSON object per line.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

//! What gets handed to `Server::register`.
//!
//! A plugin can be passed bare, or wrapped together with its options and a
//! local prefix. Both shapes become a `Registration` before the server sees them.

use std::time::Duration;

use serde_json::Value;

use crate::plugin::unit::PluginUnit;

/// One entry of a registration batch.
#[derive(Debug, Clone)]
pub struct Registration {
    plugin: PluginUnit,
    options: Value,
    prefix: Option<String>,
}

impl Registration {
    /// Wrap a plugin with empty options and no local prefix.
    pub fn new(plugin: PluginUnit) -> Self {
        Self {
            plugin,
            options: Value::Object(Default::default()),
            prefix: None,
        }
    }

    /// Options passed to this plugin's `register` and to no other plugin.
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }

    /// Prefix applied inside the batch prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn plugin(&self) -> &PluginUnit {
        &self.plugin
    }

    pub fn options(&self) -> &Value {
        &self.options
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

impl From<PluginUnit> for Registration {
    fn from(plugin: PluginUnit) -> Self {
        Registration::new(plugin)
    }
}

/// Options applying to a whole registration batch. Never seen by plugins.
#[derive(Debug, Clone, Default)]
pub struct RegisterOptions {
    /// Prefix applied to every route of every plugin in the batch.
    pub prefix: Option<String>,

    /// Skip plugins that are already registered instead of failing.
    pub once: bool,

    /// Per-plugin deadline. Falls back to the server's configured timeout.
    pub timeout: Option<Duration>,
}

impl RegisterOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

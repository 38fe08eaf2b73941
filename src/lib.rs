//! Plugin Server Library
//!
//! Compose HTTP route handlers into an axum server through plugins:
//! named, versioned bundles that register routes at startup, optionally
//! under a shared prefix.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod plugin;
pub mod plugins;
pub mod routes;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::{RunningServer, Server, ServerError, ServerInfo};
pub use lifecycle::{Bootstrap, Shutdown};
pub use plugin::{Plugin, PluginError, PluginIdentity, PluginServer, PluginUnit, RegisterOptions, Registration};
pub use routing::{Route, RouteError};

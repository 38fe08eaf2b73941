//! Plugin subsystem.
//!
//! # Data Flow
//! ```text
//! PluginUnit (bare)  ─┐
//!                     ├→ Registration (plugin, options, local prefix)
//! Registration (wrapped) ┘
//!     → Server::register(batch, RegisterOptions)
//!     → PluginServer scope (effective prefix, staged routes)
//!     → Plugin::register(scope, options).await (bounded by a timeout)
//!     → staged routes committed to the RouteTable
//! ```
//!
//! # Design Decisions
//! - One record type for plugins regardless of where identity comes from
//! - Plugins register strictly one after another, never concurrently
//! - A plugin's routes land all-or-nothing

pub mod manifest;
pub mod registration;
pub mod scope;
pub mod unit;

pub use manifest::{ManifestError, PackageManifest};
pub use registration::{RegisterOptions, Registration};
pub use scope::PluginServer;
pub use unit::{Plugin, PluginError, PluginIdentity, PluginUnit};

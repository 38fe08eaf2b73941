//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     Route (method, relative path, handler)
//!     → path.rs (validate, apply global then local prefix)
//!     → table.rs (conflict check, insert)
//!
//! Serving:
//!     RouteTable
//!     → into_router() (one MethodRouter per path)
//!     → axum Router, immutable for the life of the process
//! ```
//!
//! # Design Decisions
//! - Routes collected at startup, immutable at runtime
//! - Static path matching only (axum placeholders, no regex)
//! - Duplicate (method, path) fails fast instead of overwriting

pub mod path;
pub mod route;
pub mod table;

pub use route::{Route, RouteError};
pub use table::RouteTable;

//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ServerConfig (host, port)
//!     → listener.rs (resolve, bind)
//!     → tokio TcpListener handed to axum::serve
//! ```
//!
//! # Design Decisions
//! - Bind happens last in startup, after every route is in place
//! - A failed bind is fatal; there is no retry

pub mod listener;

pub use listener::{bind, ListenerError};

//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Server::new(config)
//!     → register(plugins) / route(direct routes)
//!     → start() (bind, freeze routes into an axum Router)
//!     → RunningServer::run(shutdown)
//!
//! Per request:
//!     TCP connection
//!     → request.rs (request ID, tracing span)
//!     → route handler, or response.rs fallback (404)
//!     → Send to client
//! ```

pub mod info;
pub mod request;
pub mod response;
pub mod server;

pub use info::ServerInfo;
pub use request::X_REQUEST_ID;
pub use server::{RunningServer, Server, ServerError};

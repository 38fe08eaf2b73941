//! Route entries and routing errors.

use axum::handler::Handler;
use axum::http::Method;
use axum::routing::{self, MethodFilter, MethodRouter};
use thiserror::Error;

/// Errors raised while adding routes to a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Another route already owns this method and effective path.
    #[error("route conflict: {method} {path} is already registered")]
    Conflict { method: String, path: String },

    /// The path cannot be served.
    #[error("invalid route path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The prefix cannot be prepended to route paths.
    #[error("invalid route prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    /// The HTTP method has no axum method filter.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
}

/// A single (method, path, handler) entry.
///
/// The path is relative to whatever prefix is in effect where the route is
/// added; prefixes are applied by the route table's owner, never here.
pub struct Route {
    method: Method,
    path: String,
    handler: MethodRouter,
}

impl Route {
    /// Build a route for any method axum can dispatch on.
    pub fn new<H, T>(method: Method, path: impl Into<String>, handler: H) -> Result<Self, RouteError>
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        let filter = MethodFilter::try_from(method.clone())
            .map_err(|_| RouteError::UnsupportedMethod(method.to_string()))?;

        Ok(Self {
            method,
            path: path.into(),
            handler: routing::on(filter, handler),
        })
    }

    /// `GET` route. Also answers `HEAD`.
    pub fn get<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self {
            method: Method::GET,
            path: path.into(),
            handler: routing::get(handler),
        }
    }

    /// `POST` route.
    pub fn post<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self {
            method: Method::POST,
            path: path.into(),
            handler: routing::post(handler),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Rewrite the path with `prefix` in front of it.
    pub(crate) fn prefixed(mut self, prefix: Option<&str>) -> Self {
        self.path = crate::routing::path::join(prefix, &self.path);
        self
    }

    pub(crate) fn into_parts(self) -> (Method, String, MethodRouter) {
        (self.method, self.path, self.handler)
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

//! HTTP server setup and plugin registration.
//!
//! # Responsibilities
//! - Own the route table while the server is being assembled
//! - Register plugins one at a time, each bounded by a timeout
//! - Apply batch and per-plugin prefixes
//! - Check plugin dependencies before listening
//! - Wire up middleware (tracing, request ID, timeout)
//! - Bind the listener and serve until shutdown

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;

use crate::config::ServerConfig;
use crate::http::info::ServerInfo;
use crate::http::{request, response};
use crate::net::{self, ListenerError};
use crate::plugin::{
    ManifestError, PluginError, PluginIdentity, PluginServer, PluginUnit, RegisterOptions,
    Registration,
};
use crate::routing::path::{compose_prefix, validate_prefix};
use crate::routing::{Route, RouteError, RouteTable};

/// Errors that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A directly added route was rejected.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// A plugin's registration failed.
    #[error("plugin {plugin} failed to register: {source}")]
    Plugin {
        plugin: String,
        #[source]
        source: PluginError,
    },

    #[error("plugin {0} is already registered")]
    DuplicatePlugin(String),

    #[error("plugin {plugin} requires plugin {dependency}, which is not registered")]
    MissingDependency { plugin: String, dependency: String },

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// The route conflict behind this error, if that is what it is.
    pub fn route_conflict(&self) -> Option<&RouteError> {
        match self {
            ServerError::Route(e @ RouteError::Conflict { .. }) => Some(e),
            ServerError::Plugin {
                source: PluginError::Route(e @ RouteError::Conflict { .. }),
                ..
            } => Some(e),
            _ => None,
        }
    }
}

/// A server that is still accepting plugins and routes.
pub struct Server {
    config: ServerConfig,
    info: ServerInfo,
    table: RouteTable,
    registered: Vec<PluginUnit>,
}

impl Server {
    /// Create a new server with the given configuration. Nothing is bound yet.
    pub fn new(config: ServerConfig) -> Self {
        let info = ServerInfo::new(config.server.host.clone(), config.server.port);
        Self {
            config,
            info,
            table: RouteTable::new(),
            registered: Vec::new(),
        }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// Identities of registered plugins, in registration order.
    pub fn plugins(&self) -> impl Iterator<Item = &PluginIdentity> {
        self.registered.iter().map(PluginUnit::identity)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.iter().any(|p| p.name() == name)
    }

    /// Register a batch of plugins, in order, each awaited before the next.
    ///
    /// Items may be bare `PluginUnit`s or `Registration`s. The first failure
    /// aborts the batch; plugins registered before it stay registered.
    pub async fn register<I>(&mut self, plugins: I, options: RegisterOptions) -> Result<(), ServerError>
    where
        I: IntoIterator,
        I::Item: Into<Registration>,
    {
        if let Some(prefix) = options.prefix.as_deref() {
            validate_prefix(prefix)?;
        }

        let limit = options
            .timeout
            .unwrap_or_else(|| Duration::from_millis(self.config.plugins.registration_timeout_ms));

        for item in plugins {
            self.register_one(item.into(), &options, limit).await?;
        }
        Ok(())
    }

    async fn register_one(
        &mut self,
        registration: Registration,
        options: &RegisterOptions,
        limit: Duration,
    ) -> Result<(), ServerError> {
        let unit = registration.plugin();

        if self.is_registered(unit.name()) {
            if options.once {
                tracing::debug!(plugin = %unit.identity(), "Plugin already registered, skipping");
                return Ok(());
            }
            return Err(ServerError::DuplicatePlugin(unit.identity().to_string()));
        }

        if let Some(local) = registration.prefix() {
            validate_prefix(local)?;
        }
        let prefix = compose_prefix(options.prefix.as_deref(), registration.prefix());

        let failed = |source: PluginError| ServerError::Plugin {
            plugin: unit.identity().to_string(),
            source,
        };

        let mut scope = PluginServer::new(unit.identity(), prefix.clone(), &self.info, &self.table);
        let outcome =
            tokio::time::timeout(limit, unit.plugin().register(&mut scope, registration.options())).await;
        let staged = scope.into_staged();

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(failed(e)),
            Err(_) => return Err(failed(PluginError::Timeout { after: limit })),
        }

        let added = staged.len();
        self.table.absorb(staged).map_err(|e| failed(e.into()))?;

        tracing::info!(
            plugin = %unit.identity(),
            prefix = prefix.as_deref().unwrap_or(""),
            routes = added,
            "Plugin registered"
        );
        self.registered.push(unit.clone());
        Ok(())
    }

    /// Add a route directly, without any prefix.
    pub fn route(&mut self, route: Route) -> Result<(), ServerError> {
        self.table.insert(route)?;
        Ok(())
    }

    pub fn add_routes<I>(&mut self, routes: I) -> Result<(), ServerError>
    where
        I: IntoIterator<Item = Route>,
    {
        routes.into_iter().try_for_each(|route| self.route(route))
    }

    /// Verify every declared dependency names a registered plugin.
    pub fn check_dependencies(&self) -> Result<(), ServerError> {
        for unit in &self.registered {
            for dependency in unit.dependencies() {
                if !self.is_registered(dependency) {
                    return Err(ServerError::MissingDependency {
                        plugin: unit.identity().to_string(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Freeze the route table into a servable router without binding.
    pub fn into_router(self) -> Result<Router, ServerError> {
        self.check_dependencies()?;
        Ok(Self::build_router(&self.config, self.table))
    }

    /// Bind the configured address. The server is listening once this returns.
    pub async fn start(self) -> Result<RunningServer, ServerError> {
        self.check_dependencies()?;

        let listener = net::bind(&self.config.server.host, self.config.server.port).await?;
        let local_addr = listener.local_addr()?;

        let mut info = self.info;
        info.mark_started(local_addr.port());

        tracing::info!(
            uri = %info.uri,
            address = %local_addr,
            routes = self.table.len(),
            plugins = self.registered.len(),
            "Server started"
        );

        let router = Self::build_router(&self.config, self.table);
        Ok(RunningServer {
            info,
            local_addr,
            listener,
            router,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, table: RouteTable) -> Router {
        table
            .into_router()
            .fallback(response::not_found)
            .layer(TimeoutLayer::new(Duration::from_secs(config.server.request_timeout_secs)))
            .layer(request::trace())
            .layer(request::propagate_request_id())
            .layer(request::set_request_id())
    }
}

/// A server bound to its listener.
pub struct RunningServer {
    info: ServerInfo,
    local_addr: SocketAddr,
    listener: TcpListener,
    router: Router,
}

impl RunningServer {
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `shutdown` fires, then drain in-flight requests.
    ///
    /// Dropping every sender also stops the server, so keep the `Shutdown`
    /// alive for as long as the server should run.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), ServerError> {
        axum::serve(self.listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                match shutdown.recv().await {
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::warn!("Shutdown channel closed, stopping");
                    }
                    _ => tracing::info!("Shutdown signal received"),
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

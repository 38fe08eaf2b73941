//! Startup orchestration.
//!
//! # Responsibilities
//! - Create the server from validated configuration
//! - Register plugin batches in the order they were listed
//! - Add direct routes after every plugin
//! - Bind the listener last (traffic only when ready)
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is served
//! - Plugins register one after another, never concurrently

use serde_json::Value;

use crate::config::ServerConfig;
use crate::http::{RunningServer, Server, ServerError, ServerInfo};
use crate::plugin::{RegisterOptions, Registration};
use crate::plugins::{external, top};
use crate::routes::home;
use crate::routing::Route;

/// Ordered startup plan for a server.
pub struct Bootstrap {
    server: Server,
    batches: Vec<(Vec<Registration>, RegisterOptions)>,
    routes: Vec<Route>,
}

impl Bootstrap {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            server: Server::new(config),
            batches: Vec::new(),
            routes: Vec::new(),
        }
    }

    /// The server's info, available before anything is registered.
    pub fn info(&self) -> &ServerInfo {
        self.server.info()
    }

    /// Queue a batch of plugins.
    pub fn register<I>(mut self, plugins: I, options: RegisterOptions) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Registration>,
    {
        self.batches
            .push((plugins.into_iter().map(Into::into).collect(), options));
        self
    }

    /// Queue a direct route. Direct routes are added after all plugins.
    pub fn route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn routes<I>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = Route>,
    {
        self.routes.extend(routes);
        self
    }

    /// Run the plan and start listening.
    pub async fn launch(self) -> Result<RunningServer, ServerError> {
        let Bootstrap {
            mut server,
            batches,
            routes,
        } = self;

        for (plugins, options) in batches {
            tracing::debug!(plugins = plugins.len(), prefix = ?options.prefix, "Registering plugin batch");
            server.register(plugins, options).await?;
        }

        server.add_routes(routes)?;
        server.start().await
    }
}

/// The stock application: the top plugin at the root, the external plugin
/// under the configured prefix, and the home page.
pub fn application(config: ServerConfig) -> Result<Bootstrap, ServerError> {
    let bootstrap = Bootstrap::new(config.clone());

    let mut options = config.plugins.options.clone();
    options.insert(
        "serverInfo".to_string(),
        serde_json::to_value(bootstrap.info()).unwrap_or_default(),
    );
    let external = Registration::new(external::plugin()?).with_options(Value::Object(options));

    let mut batch = RegisterOptions::default();
    if let Some(prefix) = config.plugins.prefix.as_deref().filter(|p| !p.is_empty()) {
        batch = batch.with_prefix(prefix);
    }

    Ok(bootstrap
        .register([top::plugin()], RegisterOptions::default())
        .register([external], batch)
        .routes(home::routes()))
}

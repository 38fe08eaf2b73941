//! The server as a plugin sees it during `register`.

use crate::http::ServerInfo;
use crate::plugin::unit::PluginIdentity;
use crate::routing::path::validate_path;
use crate::routing::{Route, RouteError, RouteTable};

/// A registration-scoped view of the server.
///
/// Routes added here carry the effective prefix and are staged; the server
/// commits them only if the plugin's `register` returns `Ok`.
pub struct PluginServer<'a> {
    identity: &'a PluginIdentity,
    prefix: Option<String>,
    info: &'a ServerInfo,
    committed: &'a RouteTable,
    staged: RouteTable,
}

impl<'a> PluginServer<'a> {
    pub(crate) fn new(
        identity: &'a PluginIdentity,
        prefix: Option<String>,
        info: &'a ServerInfo,
        committed: &'a RouteTable,
    ) -> Self {
        Self {
            identity,
            prefix,
            info,
            committed,
            staged: RouteTable::new(),
        }
    }

    /// Add a route. Its path is relative to `self.prefix()`.
    pub fn route(&mut self, route: Route) -> Result<(), RouteError> {
        // `foo` under `/plugins` would otherwise join into `/pluginsfoo`.
        validate_path(route.path())?;
        let route = route.prefixed(self.prefix.as_deref());
        self.committed.check(route.method().as_str(), route.path())?;

        let method = route.method().clone();
        let path = route.path().to_string();
        self.staged.insert(route)?;

        tracing::debug!(plugin = %self.identity, method = %method, path = %path, "Plugin route staged");
        Ok(())
    }

    pub fn routes<I>(&mut self, routes: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = Route>,
    {
        routes.into_iter().try_for_each(|route| self.route(route))
    }

    /// Server identity and address as of registration time.
    pub fn info(&self) -> &ServerInfo {
        self.info
    }

    /// Effective prefix (batch prefix, then local prefix).
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn plugin(&self) -> &PluginIdentity {
        self.identity
    }

    pub(crate) fn into_staged(self) -> RouteTable {
        self.staged
    }
}

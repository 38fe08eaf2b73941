//! The server's route table.
//!
//! # Responsibilities
//! - Store routes keyed by (path, method)
//! - Refuse conflicting registrations
//! - Hand the finished table to axum as a `Router`
//!
//! # Design Decisions
//! - Ordered maps, so the table is identical whatever order routes arrive in
//! - Conflicts are detected here, before axum would panic on them
//! - Built during startup, frozen once converted into a router

use std::collections::BTreeMap;

use axum::routing::MethodRouter;
use axum::Router;

use crate::routing::path::validate_path;
use crate::routing::route::{Route, RouteError};

/// Mapping from (method, path) to handler.
#[derive(Default)]
pub struct RouteTable {
    /// path → method → handler
    routes: BTreeMap<String, BTreeMap<String, MethodRouter>>,
    /// every distinct path, as axum's matcher will see it
    matcher: matchit::Router<()>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify that `method path` could be inserted.
    pub fn check(&self, method: &str, path: &str) -> Result<(), RouteError> {
        validate_path(path)?;

        if let Some(methods) = self.routes.get(path) {
            if methods.contains_key(method) {
                return Err(conflict(method, path));
            }
            return Ok(());
        }

        // A new path must fit beside every existing one (e.g. `{id}` vs `{*rest}`).
        let mut trial = self.matcher.clone();
        trial.insert(path, ()).map_err(|_| conflict(method, path))
    }

    /// Add a route whose path is already final (prefix applied).
    pub fn insert(&mut self, route: Route) -> Result<(), RouteError> {
        let (method, path, handler) = route.into_parts();
        let method = method.as_str().to_string();

        self.check(&method, &path)?;
        if !self.routes.contains_key(&path) {
            self.matcher
                .insert(path.as_str(), ())
                .map_err(|_| conflict(&method, &path))?;
        }

        tracing::debug!(method = %method, path = %path, "Route added");
        self.routes.entry(path).or_default().insert(method, handler);
        Ok(())
    }

    /// Move every route of `other` into this table.
    ///
    /// Nothing is moved if any entry conflicts.
    pub fn absorb(&mut self, other: RouteTable) -> Result<(), RouteError> {
        let mut matcher = self.matcher.clone();
        for (path, methods) in &other.routes {
            match self.routes.get(path) {
                Some(existing) => {
                    if let Some(method) = methods.keys().find(|m| existing.contains_key(*m)) {
                        return Err(conflict(method, path));
                    }
                }
                None => {
                    let method = methods.keys().next().map(String::as_str).unwrap_or_default();
                    matcher
                        .insert(path.as_str(), ())
                        .map_err(|_| conflict(method, path))?;
                }
            }
        }

        self.matcher = matcher;
        for (path, methods) in other.routes {
            self.routes.entry(path).or_default().extend(methods);
        }
        Ok(())
    }

    pub fn contains(&self, method: &str, path: &str) -> bool {
        self.routes
            .get(path)
            .map(|methods| methods.contains_key(method))
            .unwrap_or(false)
    }

    /// All `(method, path)` pairs, sorted by path then method.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.routes
            .iter()
            .flat_map(|(path, methods)| {
                methods.keys().map(move |method| (method.clone(), path.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Build the axum router, one merged `MethodRouter` per path.
    pub fn into_router(self) -> Router {
        let mut router = Router::new();
        for (path, methods) in self.routes {
            let merged = methods
                .into_values()
                .reduce(|acc, next| acc.merge(next));
            if let Some(method_router) = merged {
                router = router.route(&path, method_router);
            }
        }
        router
    }
}

fn conflict(method: &str, path: &str) -> RouteError {
    RouteError::Conflict {
        method: method.to_string(),
        path: path.to_string(),
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.entries()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    fn ok_route(method: Method, path: &str) -> Route {
        Route::new(method, path, || async { "ok" }).unwrap()
    }

    #[test]
    fn test_duplicate_method_and_path_conflicts() {
        let mut table = RouteTable::new();
        table.insert(ok_route(Method::GET, "/x")).unwrap();

        let err = table.insert(ok_route(Method::GET, "/x")).unwrap_err();
        assert_eq!(
            err,
            RouteError::Conflict { method: "GET".into(), path: "/x".into() }
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_same_path_different_methods() {
        let mut table = RouteTable::new();
        table.insert(ok_route(Method::GET, "/x")).unwrap();
        table.insert(ok_route(Method::POST, "/x")).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.contains("POST", "/x"));
    }

    #[test]
    fn test_placeholder_names_conflict() {
        let mut table = RouteTable::new();
        table.insert(ok_route(Method::GET, "/users/{id}")).unwrap();
        assert!(table.insert(ok_route(Method::POST, "/users/{user}")).is_err());
        assert!(table.insert(ok_route(Method::POST, "/users/{id}")).is_ok());
    }

    #[test]
    fn test_param_and_catch_all_conflict() {
        let mut table = RouteTable::new();
        table.insert(ok_route(Method::GET, "/files/{id}")).unwrap();

        let err = table.insert(ok_route(Method::GET, "/files/{*rest}")).unwrap_err();
        assert_eq!(
            err,
            RouteError::Conflict { method: "GET".into(), path: "/files/{*rest}".into() }
        );

        let mut reversed = RouteTable::new();
        reversed.insert(ok_route(Method::GET, "/files/{*rest}")).unwrap();
        assert!(reversed.insert(ok_route(Method::POST, "/files/{id}")).is_err());

        // What was accepted still builds.
        let _router = table.into_router();
        let _router = reversed.into_router();
    }

    #[test]
    fn test_absorb_rejects_overlapping_placeholders() {
        let mut table = RouteTable::new();
        table.insert(ok_route(Method::GET, "/files/{id}")).unwrap();

        let mut staged = RouteTable::new();
        staged.insert(ok_route(Method::GET, "/other")).unwrap();
        staged.insert(ok_route(Method::GET, "/files/{*rest}")).unwrap();

        assert!(matches!(table.absorb(staged), Err(RouteError::Conflict { .. })));
        assert_eq!(table.entries(), vec![("GET".to_string(), "/files/{id}".to_string())]);
        let _router = table.into_router();
    }

    #[test]
    fn test_invalid_path_rejected() {
        let mut table = RouteTable::new();
        assert!(matches!(
            table.insert(ok_route(Method::GET, "no-slash")),
            Err(RouteError::InvalidPath { .. })
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let paths = ["/b", "/a", "/c/{id}"];

        let mut forward = RouteTable::new();
        for p in paths {
            forward.insert(ok_route(Method::GET, p)).unwrap();
        }
        let mut backward = RouteTable::new();
        for p in paths.iter().rev() {
            backward.insert(ok_route(Method::GET, p)).unwrap();
        }

        assert_eq!(forward.entries(), backward.entries());
    }

    #[test]
    fn test_absorb_detects_conflicts() {
        let mut table = RouteTable::new();
        table.insert(ok_route(Method::GET, "/x")).unwrap();

        let mut staged = RouteTable::new();
        staged.insert(ok_route(Method::GET, "/y")).unwrap();
        table.absorb(staged).unwrap();
        assert_eq!(table.len(), 2);

        let mut clashing = RouteTable::new();
        clashing.insert(ok_route(Method::GET, "/x")).unwrap();
        assert!(table.absorb(clashing).is_err());
    }

    #[tokio::test]
    async fn test_router_dispatches_by_method() {
        let mut table = RouteTable::new();
        table.insert(Route::get("/x", || async { "got" })).unwrap();
        table.insert(Route::post("/x", || async { "posted" })).unwrap();
        let router = table.into_router();

        let res = router
            .clone()
            .oneshot(Request::post("/x").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"posted");

        let res = router
            .oneshot(Request::delete("/x").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}

//! Path and prefix rules.
//!
//! # Responsibilities
//! - Validate route paths before they reach axum (which panics on bad input)
//! - Validate and compose prefixes (global, then local)
//! - Join a prefix onto a route path
//!
//! # Design Decisions
//! - Path matching is case-sensitive and literal; no regex
//! - `/` under a prefix collapses to the prefix itself
//! - Placeholders use axum's `{name}` / `{*name}` syntax

use crate::routing::route::RouteError;

/// Check that `path` is a route path axum will accept.
pub fn validate_path(path: &str) -> Result<(), RouteError> {
    let invalid = |reason: &str| RouteError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    if !path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if path == "/" {
        return Ok(());
    }

    let segments: Vec<&str> = path[1..].split('/').collect();
    let last = segments.len() - 1;

    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            // Only a single trailing slash is tolerated.
            if i == last {
                continue;
            }
            return Err(invalid("empty path segment"));
        }
        if segment.starts_with(':') || segment.starts_with('*') {
            return Err(invalid("use {param} or {*rest} placeholders"));
        }

        let opens = segment.matches('{').count();
        let closes = segment.matches('}').count();
        if opens != closes || opens > 1 {
            return Err(invalid("unbalanced or repeated placeholder"));
        }
        if opens == 1 {
            if !(segment.starts_with('{') && segment.ends_with('}')) || segment.len() < 3 {
                return Err(invalid("placeholder must span a whole segment"));
            }
            if segment.starts_with("{*") && i != last {
                return Err(invalid("catch-all must be the last segment"));
            }
        }
    }

    Ok(())
}

/// Check that `prefix` can be prepended to route paths.
pub fn validate_prefix(prefix: &str) -> Result<(), RouteError> {
    let invalid = |reason: &str| RouteError::InvalidPrefix {
        prefix: prefix.to_string(),
        reason: reason.to_string(),
    };

    if !prefix.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if prefix.len() < 2 {
        return Err(invalid("must not be '/' alone"));
    }
    if prefix.ends_with('/') {
        return Err(invalid("must not end with '/'"));
    }
    if prefix.contains('{') || prefix.contains('}') {
        return Err(invalid("must not contain placeholders"));
    }

    validate_path(prefix).map_err(|_| invalid("not a valid path"))
}

/// Compose an outer prefix with an inner one (outer first).
pub fn compose_prefix(outer: Option<&str>, inner: Option<&str>) -> Option<String> {
    match (outer, inner) {
        (Some(o), Some(i)) => Some(format!("{o}{i}")),
        (Some(o), None) => Some(o.to_string()),
        (None, Some(i)) => Some(i.to_string()),
        (None, None) => None,
    }
}

/// Prepend `prefix` to `path`.
pub fn join(prefix: Option<&str>, path: &str) -> String {
    match prefix {
        Some(p) if path == "/" => p.to_string(),
        Some(p) => format!("{p}{path}"),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_paths() {
        for path in ["/", "/plugin-top", "/users/{id}", "/files/{*rest}", "/a/b/"] {
            assert!(validate_path(path).is_ok(), "{path} should be valid");
        }
    }

    #[test]
    fn test_invalid_paths() {
        for path in ["", "plugin", "/a//b", "/users/:id", "/files/*rest", "/{a}{b}", "/x{id}", "/{*rest}/more", "/{}"] {
            assert!(validate_path(path).is_err(), "{path} should be rejected");
        }
    }

    #[test]
    fn test_prefix_rules() {
        assert!(validate_prefix("/plugins").is_ok());
        assert!(validate_prefix("/api/v1").is_ok());
        assert!(validate_prefix("plugins").is_err());
        assert!(validate_prefix("/").is_err());
        assert!(validate_prefix("/plugins/").is_err());
        assert!(validate_prefix("/{tenant}").is_err());
    }

    #[test]
    fn test_join() {
        assert_eq!(join(Some("/plugins"), "/plugin-external"), "/plugins/plugin-external");
        assert_eq!(join(Some("/plugins"), "/"), "/plugins");
        assert_eq!(join(None, "/plugin-top"), "/plugin-top");
    }

    #[test]
    fn test_compose_outer_then_inner() {
        assert_eq!(compose_prefix(Some("/api"), Some("/v1")).as_deref(), Some("/api/v1"));
        assert_eq!(compose_prefix(None, Some("/v1")).as_deref(), Some("/v1"));
        assert_eq!(compose_prefix(Some("/api"), None).as_deref(), Some("/api"));
        assert_eq!(compose_prefix(None, None), None);
    }
}

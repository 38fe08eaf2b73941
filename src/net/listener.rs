//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve the configured host (names like "localhost" included)
//! - Bind the first address that accepts
//! - Report bind failures as a distinct, fatal error

use std::net::SocketAddr;

use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// The host/port pair did not resolve.
    Resolve { target: String, source: std::io::Error },
    /// Resolution produced no addresses.
    NoAddress(String),
    /// Failed to bind to address.
    Bind { target: String, source: std::io::Error },
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Resolve { target, source } => write!(f, "Failed to resolve {}: {}", target, source),
            ListenerError::NoAddress(target) => write!(f, "No address found for {}", target),
            ListenerError::Bind { target, source } => write!(f, "Failed to bind {}: {}", target, source),
        }
    }
}

impl std::error::Error for ListenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListenerError::Resolve { source, .. } | ListenerError::Bind { source, .. } => Some(source),
            ListenerError::NoAddress(_) => None,
        }
    }
}

/// Bind `host:port`, trying each resolved address in turn.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener, ListenerError> {
    let target = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    };

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host(&target)
        .await
        .map_err(|source| ListenerError::Resolve {
            target: target.clone(),
            source,
        })?
        .collect();

    let mut last_error = None;
    for addr in addrs {
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                tracing::info!(address = %addr, "Listener bound");
                return Ok(listener);
            }
            Err(e) => {
                tracing::debug!(address = %addr, error = %e, "Bind attempt failed");
                last_error = Some(e);
            }
        }
    }

    Err(match last_error {
        Some(source) => ListenerError::Bind { target, source },
        None => ListenerError::NoAddress(target),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let listener = bind("127.0.0.1", 0).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bind_port_in_use() {
        let first = bind("127.0.0.1", 0).await.unwrap();
        let port = first.local_addr().unwrap().port();

        let err = bind("127.0.0.1", port).await.unwrap_err();
        assert!(matches!(err, ListenerError::Bind { .. }));
    }
}

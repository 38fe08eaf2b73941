//! Server identity and address, as reported to plugins and operators.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use uuid::Uuid;

/// Snapshot of the server's identity and listening address.
///
/// Until the server starts, `port` is the configured port and `started` is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub created: u64,
    /// Milliseconds since the Unix epoch, 0 while not started.
    pub started: u64,
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub uri: String,
}

impl ServerInfo {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        let protocol = "http".to_string();
        let uri = format_uri(&protocol, &host, port);

        Self {
            id: Uuid::new_v4().to_string(),
            created: now_millis(),
            started: 0,
            host,
            port,
            protocol,
            uri,
        }
    }

    /// Record the bound port and start time.
    pub(crate) fn mark_started(&mut self, port: u16) {
        self.port = port;
        self.started = now_millis();
        self.uri = format_uri(&self.protocol, &self.host, port);
    }
}

fn format_uri(protocol: &str, host: &str, port: u16) -> String {
    // IPv6 literals need brackets.
    if host.contains(':') && !host.starts_with('[') {
        format!("{protocol}://[{host}]:{port}")
    } else {
        format!("{protocol}://{host}:{port}")
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_not_started() {
        let info = ServerInfo::new("localhost", 3103);
        assert_eq!(info.uri, "http://localhost:3103");
        assert_eq!(info.started, 0);
        assert!(info.created > 0);
    }

    #[test]
    fn test_mark_started_updates_port() {
        let mut info = ServerInfo::new("127.0.0.1", 0);
        info.mark_started(41000);
        assert_eq!(info.port, 41000);
        assert_eq!(info.uri, "http://127.0.0.1:41000");
        assert!(info.started >= info.created);
    }

    #[test]
    fn test_ipv6_uri() {
        assert_eq!(ServerInfo::new("::1", 80).uri, "http://[::1]:80");
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(ServerInfo::new("localhost", 1)).unwrap();
        assert!(value.get("uri").is_some());
        assert_eq!(value["protocol"], "http");
        assert_eq!(value["started"], 0);
    }
}

//! `[dev_server]` section configuration.
//!
//! Describes the external Vite dev-server process proxied in development.
//!
//! # Example
//!
//! ```toml
//! [dev_server]
//! host = "0.0.0.0"    # interface the dev server binds (wildcard for containers)
//! port = 5173
//! scheme = "http"
//! ```
//!
//! Browser-facing URLs always use a loopback hostname regardless of `host`;
//! `host` only controls where the reverse proxy connects.

use serde::{Deserialize, Serialize};

/// Hostname used in browser-facing dev URLs. The dev server may bind a
/// wildcard address for container networking, but links handed to the
/// browser must stay on loopback.
pub const BROWSER_HOST: &str = "localhost";

/// Vite dev-server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Interface the dev-server process binds.
    pub host: String,

    /// Dev-server port.
    pub port: u16,

    /// URL scheme (`http` or `https`).
    pub scheme: String,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5173,
            scheme: "http".to_string(),
        }
    }
}

impl DevServerConfig {
    /// Base URL embedded into browser-facing asset URLs.
    pub fn browser_base(&self) -> String {
        format!("{}://{}:{}", self.scheme, BROWSER_HOST, self.port)
    }

    /// Base URL the reverse proxy connects to. A wildcard bind address is
    /// not connectable, so it maps to loopback.
    pub fn upstream_base(&self) -> String {
        let host = match self.host.as_str() {
            "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
            host => host,
        };
        format!("{}://{}:{}", self.scheme, host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_dev_server_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.dev_server.host, "127.0.0.1");
        assert_eq!(config.dev_server.port, 5173);
        assert_eq!(config.dev_server.scheme, "http");
    }

    #[test]
    fn test_browser_base_ignores_bind_host() {
        let config = test_parse_config("[dev_server]\nhost = \"0.0.0.0\"\nport = 5199");
        assert_eq!(config.dev_server.browser_base(), "http://localhost:5199");
    }

    #[test]
    fn test_upstream_base_maps_wildcard_to_loopback() {
        let config = test_parse_config("[dev_server]\nhost = \"0.0.0.0\"");
        assert_eq!(config.dev_server.upstream_base(), "http://127.0.0.1:5173");

        let config = test_parse_config("[dev_server]\nhost = \"vite.internal\"");
        assert_eq!(
            config.dev_server.upstream_base(),
            "http://vite.internal:5173"
        );
    }
}

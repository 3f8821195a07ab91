//! Asset server strategies: who answers the browser's asset requests.
//!
//! The strategy pairs with the resolver chosen by the asset manager: in
//! development the resolver emits dev-server URLs and the proxy forwards
//! them; in production the resolver emits `/assets/...` paths and the
//! embedded server answers them from the build output tree.

mod embedded;
mod proxy;
mod response;

pub use embedded::EmbeddedServer;
pub use proxy::ProxyServer;
pub use response::{respond_html, respond_not_found, respond_unavailable};

use anyhow::Result;
use tiny_http::Request;

use crate::config::{AppConfig, Environment};

/// Environment-selected serving strategy, chosen once at startup.
pub enum AssetServer {
    /// Reverse proxy onto the Vite dev server (development).
    Proxy(ProxyServer),
    /// Direct serving from the build output tree (production).
    Embedded(EmbeddedServer),
}

impl AssetServer {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match config.assets.environment {
            Environment::Development => Ok(Self::Proxy(ProxyServer::new(&config.dev_server)?)),
            Environment::Production => Ok(Self::Embedded(EmbeddedServer::from_config(config))),
        }
    }

    /// Route registration: whether this URL belongs to the asset layer.
    pub fn handles(&self, url: &str) -> bool {
        match self {
            Self::Proxy(_) => ProxyServer::handles(url),
            Self::Embedded(_) => EmbeddedServer::handles(url),
        }
    }

    /// Answer an asset request.
    pub fn handle(&self, request: Request) -> Result<()> {
        match self {
            Self::Proxy(server) => server.handle(request),
            Self::Embedded(server) => server.handle(request),
        }
    }

    /// Human-readable description of the registered routes (startup log).
    pub fn describe(&self) -> String {
        match self {
            Self::Proxy(_) => format!("proxy {}", proxy::PROXY_PREFIXES.join(" ")),
            Self::Embedded(_) => format!(
                "static {} {} /favicon.ico /robots.txt",
                embedded::ASSETS_PREFIX,
                embedded::FONTS_PREFIX
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn test_strategy_follows_environment() {
        let mut config = AppConfig::default();
        config.assets.environment = Environment::Development;
        assert!(matches!(
            AssetServer::from_config(&config).unwrap(),
            AssetServer::Proxy(_)
        ));

        config.assets.environment = Environment::Production;
        assert!(matches!(
            AssetServer::from_config(&config).unwrap(),
            AssetServer::Embedded(_)
        ));
    }

    #[test]
    fn test_route_sets_differ_by_environment() {
        let mut config = AppConfig::default();
        config.assets.environment = Environment::Development;
        let dev = AssetServer::from_config(&config).unwrap();
        assert!(dev.handles("/@vite/client"));
        assert!(!dev.handles("/assets/main.ab12.js"));

        config.assets.environment = Environment::Production;
        let prod = AssetServer::from_config(&config).unwrap();
        assert!(prod.handles("/assets/main.ab12.js"));
        assert!(!prod.handles("/@vite/client"));
    }
}

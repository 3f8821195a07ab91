//! Production asset server: precompiled artifacts from the output tree.

use anyhow::Result;
use tiny_http::Request;

use crate::assets::OutputTree;
use crate::config::AppConfig;
use crate::debug;

use super::response::{respond_immutable_file, respond_not_found};

/// Prefix for general hashed artifacts.
pub const ASSETS_PREFIX: &str = "/assets/";

/// Prefix for the isolated font sub-tree.
pub const FONTS_PREFIX: &str = "/fonts/";

/// Individually served files at the tree root.
const SINGLETONS: [&str; 2] = ["/favicon.ico", "/robots.txt"];

/// Serves the build output tree.
pub struct EmbeddedServer {
    tree: OutputTree,
}

impl EmbeddedServer {
    pub fn new(tree: OutputTree) -> Self {
        Self { tree }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(OutputTree::new(&config.assets.output))
    }

    /// Whether this URL belongs to the output tree.
    pub fn handles(url: &str) -> bool {
        let path = url.split('?').next().unwrap_or(url);
        path.starts_with(ASSETS_PREFIX)
            || path.starts_with(FONTS_PREFIX)
            || SINGLETONS.contains(&path)
    }

    /// Serve a file from the tree. The mount prefix is stripped before
    /// lookup, so each sub-tree only ever exposes its own directory.
    /// Anything unresolvable (including traversal attempts) answers 404.
    pub fn handle(&self, request: Request) -> Result<()> {
        let url = request.url().to_string();
        let path = url.split('?').next().unwrap_or(&url);

        let file = if let Some(rest) = path.strip_prefix(ASSETS_PREFIX) {
            self.tree.resolve_in("assets", rest)
        } else if let Some(rest) = path.strip_prefix(FONTS_PREFIX) {
            self.tree.resolve_in("fonts", rest)
        } else if SINGLETONS.contains(&path) {
            self.tree.resolve(path)
        } else {
            None
        };

        match file {
            Some(file) => respond_immutable_file(request, &file),
            None => {
                debug!("serve"; "no such asset: {path}");
                respond_not_found(request)
            }
        }
    }
}

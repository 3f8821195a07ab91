//! Resolver strategies: logical path → deliverable URL.
//!
//! The strategy is selected once at construction from the configured
//! environment and held for the process lifetime; nothing re-decides it
//! per request.

mod dev;
mod prod;

pub use dev::DevResolver;
pub use prod::ProdResolver;

use crate::config::{AppConfig, Environment};

use super::{AssetError, Manifest};

/// Environment-selected resolution strategy.
pub enum AssetResolver {
    /// Synthesize URLs against the live Vite dev server.
    Development(DevResolver),
    /// Look up content-hashed artifacts in the build manifest.
    Production(ProdResolver),
}

impl AssetResolver {
    /// Build the resolver for the configured environment.
    ///
    /// Production mode loads the manifest here, eagerly: the document is
    /// read at most once per process and the resolver never touches the
    /// filesystem afterwards.
    pub fn from_config(config: &AppConfig) -> Result<Self, AssetError> {
        match config.assets.environment {
            Environment::Development => {
                Ok(Self::Development(DevResolver::new(&config.dev_server)))
            }
            Environment::Production => {
                let manifest =
                    Manifest::load(&config.assets.output, config.assets.strict_manifest)?;
                Ok(Self::Production(ProdResolver::new(
                    manifest,
                    config.assets.strict,
                )))
            }
        }
    }

    /// Resolve a logical path to a deliverable URL.
    pub fn resolve(&self, path: &str) -> Result<String, AssetError> {
        match self {
            Self::Development(resolver) => resolver.resolve(path),
            Self::Production(resolver) => resolver.resolve(path),
        }
    }
}

/// Path with its final extension stripped (`src/js/form.ts` → `src/js/form`).
/// Paths without an extension are returned unchanged.
pub(super) fn strip_extension(path: &str) -> &str {
    let base = base_name(path);
    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => &path[..path.len() - (base.len() - stem.len())],
        _ => path,
    }
}

/// Final path segment (`assets/main.ab12.js` → `main.ab12.js`).
pub(super) fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

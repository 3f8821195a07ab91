//! `[assets]` section configuration.
//!
//! Selects the asset environment and the build output location.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! environment = "production"  # development | production
//! output = "dist"             # build output directory
//! strict = false              # fail resolution instead of synthesizing a fallback
//! strict_manifest = false     # missing manifest is an error instead of empty
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Asset environment. Chosen once at startup; selects the resolver and
/// server strategy for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Resolve against the live Vite dev server; proxy its endpoints.
    Development,
    /// Resolve against the build manifest; serve hashed artifacts.
    Production,
}

impl Environment {
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Asset environment and build output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Active environment.
    pub environment: Environment,

    /// Build output directory (relative to project root).
    pub output: PathBuf,

    /// Return `NotFound` on total lookup failure instead of a synthesized
    /// fallback path.
    pub strict: bool,

    /// Treat a missing manifest document as an error instead of an empty
    /// manifest.
    pub strict_manifest: bool,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            output: PathBuf::from("dist"),
            strict: false,
            strict_manifest: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_assets_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.assets.environment, Environment::Development);
        assert_eq!(config.assets.output, PathBuf::from("dist"));
        assert!(!config.assets.strict);
        assert!(!config.assets.strict_manifest);
    }

    #[test]
    fn test_assets_config_production() {
        let config = test_parse_config(
            "[assets]\nenvironment = \"production\"\noutput = \"build/client\"\nstrict = true",
        );

        assert_eq!(config.assets.environment, Environment::Production);
        assert_eq!(config.assets.output, PathBuf::from("build/client"));
        assert!(config.assets.strict);
    }

    #[test]
    fn test_environment_display() {
        assert_eq!(Environment::Development.to_string(), "development");
        assert_eq!(Environment::Production.to_string(), "production");
    }

    #[test]
    fn test_environment_rejects_unknown() {
        let result: Result<Environment, _> = serde_json::from_str("\"staging\"");
        assert!(result.is_err());
    }
}

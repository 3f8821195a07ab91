//! Server configuration management for `formwork.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── assets     # [assets]
//! │   ├── dev_server # [dev_server]
//! │   └── serve      # [serve]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError
//! │   └── handle     # Global config handle
//! └── mod.rs         # AppConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section        | Purpose                                         |
//! |----------------|-------------------------------------------------|
//! | `[serve]`      | HTTP listener (port, interface)                 |
//! | `[assets]`     | Environment, build output, strictness           |
//! | `[dev_server]` | Vite dev-server host/port/scheme (development)  |

pub mod section;
pub mod types;

pub use section::{AssetsConfig, DevServerConfig, Environment, ServeConfig};
pub use types::{ConfigError, cfg, init_config};

use crate::{cli::Cli, log};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing formwork.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// HTTP listener settings
    pub serve: ServeConfig,

    /// Asset environment and build output settings
    pub assets: AssetsConfig,

    /// Vite dev-server connection settings
    pub dev_server: DevServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cli: None,
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            serve: ServeConfig::default(),
            assets: AssetsConfig::default(),
            dev_server: DevServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. A missing config
    /// file is not an error: every section has usable defaults, and CLI
    /// flags still apply.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let (config_path, exists) = match find_config_file(&cli.config) {
            Some(path) => (path, true),
            None => (cwd.join(&cli.config), false),
        };

        let mut config = if exists {
            Self::from_path(&config_path)?
        } else {
            crate::debug!("config"; "no {} found, using defaults", cli.config.display());
            Self::default()
        };

        config.config_path = config_path;
        config.cli = Some(cli);
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Finalize configuration after loading: resolve root, apply CLI
    /// overrides, normalize paths.
    fn finalize(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.root = crate::utils::path::normalize_path(&root);

        self.apply_cli_options(cli);

        // Normalize the output directory against the project root
        self.assets.output = crate::utils::path::normalize_path(&self.root.join(&self.assets.output));
    }

    /// Apply CLI overrides on top of the config file.
    fn apply_cli_options(&mut self, cli: &Cli) {
        Self::update_option(&mut self.assets.environment, cli.environment.as_ref());
        Self::update_option(&mut self.assets.output, cli.output.as_ref());
        Self::update_option(&mut self.assets.strict, cli.strict.as_ref());
        Self::update_option(&mut self.assets.strict_manifest, cli.strict_manifest.as_ref());

        if let crate::cli::Commands::Serve { interface, port } = &cli.command {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.dev_server.scheme.as_str(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "dev_server.scheme must be `http` or `https`, got `{}`",
                self.dev_server.scheme
            ))
            .into());
        }

        if self.dev_server.host.trim().is_empty() {
            return Err(
                ConfigError::Validation("dev_server.host must not be empty".into()).into(),
            );
        }

        if self.dev_server.port == 0 {
            return Err(ConfigError::Validation("dev_server.port must not be 0".into()).into());
        }

        // The host string ends up inside proxy-target URLs; reject anything
        // that does not assemble into one.
        if let Err(e) = url::Url::parse(&self.dev_server.upstream_base()) {
            return Err(ConfigError::Validation(format!(
                "dev_server settings do not form a valid URL: {e}"
            ))
            .into());
        }

        Ok(())
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }
}

/// Search upward from cwd for the config file.
fn find_config_file(name: &Path) -> Option<PathBuf> {
    // Absolute path: use directly
    if name.is_absolute() {
        return name.exists().then(|| name.to_path_buf());
    }

    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !dir.pop() {
            return None;
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config TOML. Panics if there are unknown fields
/// (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AppConfig {
    let (parsed, ignored) = AppConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        // Invalid TOML syntax - unclosed bracket
        let result: Result<AppConfig, _> = toml::from_str("[serve\nport = 8080");
        assert!(result.is_err());
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert!(config.cli.is_none());
        assert_eq!(config.config_path, PathBuf::new());
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.assets.environment, Environment::Development);
        assert_eq!(config.dev_server.port, 5173);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[assets]\nenvironment = \"production\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = AppConfig::parse_with_ignored(content).unwrap();

        // Config should parse successfully
        assert_eq!(config.assets.environment, Environment::Production);

        // Unknown fields should be collected
        assert!(!ignored.is_empty());
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[serve]\nport = 8080";
        let (_, ignored) = AppConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let mut config = AppConfig::default();
        config.dev_server.scheme = "ftp".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = AppConfig::default();
        config.dev_server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unparseable_host() {
        let mut config = AppConfig::default();
        config.dev_server.host = "not a host".to_string();
        assert!(config.validate().is_err());
    }
}

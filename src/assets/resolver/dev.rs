//! Development resolver: URLs on the live Vite dev server.
//!
//! No manifest exists in this mode; URLs are synthesized from the logical
//! path alone and the dev server serves the unbundled sources directly.

use crate::config::DevServerConfig;

use super::{AssetError, strip_extension};
use crate::assets::AssetType;

/// Conventional source root served by the dev server.
const SOURCE_PREFIX: &str = "src/";

/// Stylesheet source directory.
const STYLES_DIR: &str = "src/css";

/// Script source directory.
const SCRIPTS_DIR: &str = "src/js";

/// Per-page entry scripts live one level deeper.
const PAGES_DIR: &str = "pages";

/// The conventional main-entry name.
const MAIN_ENTRY: &str = "main";

/// Maps logical paths onto the dev server's source layout.
pub struct DevResolver {
    /// Browser-facing base URL (always a loopback hostname).
    base: String,
}

impl DevResolver {
    pub fn new(config: &DevServerConfig) -> Self {
        Self {
            base: config.browser_base(),
        }
    }

    /// Resolve a logical path to a dev-server URL. First matching rule wins:
    /// already source-rooted paths pass through verbatim, stylesheets root
    /// under the stylesheet directory, scripts resolve to their TypeScript
    /// source, anything else passes through verbatim.
    pub fn resolve(&self, path: &str) -> Result<String, AssetError> {
        if path.is_empty() {
            return Err(AssetError::InvalidPath);
        }

        let clean = path.trim_start_matches('/');
        if clean.starts_with(SOURCE_PREFIX) {
            return Ok(format!("{}/{clean}", self.base));
        }

        match AssetType::from_path(clean) {
            AssetType::Stylesheet => Ok(format!("{}/{STYLES_DIR}/{clean}", self.base)),
            AssetType::Script => Ok(self.script_url(clean)),
            _ => Ok(format!("{}/{clean}", self.base)),
        }
    }

    /// Scripts are always authored in TypeScript: strip whatever script
    /// extension the template asked for and point at the `.ts` source.
    fn script_url(&self, path: &str) -> String {
        let stem = strip_extension(path);
        if stem == MAIN_ENTRY {
            format!("{}/{SCRIPTS_DIR}/{PAGES_DIR}/{stem}.ts", self.base)
        } else {
            format!("{}/{SCRIPTS_DIR}/{stem}.ts", self.base)
        }
    }
}

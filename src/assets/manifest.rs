//! Build manifest model and loader.
//!
//! The bundler writes a JSON manifest mapping each logical source path to
//! its content-hashed output artifact. Loaded once at startup; immutable
//! for the process lifetime.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::AssetError;

/// Manifest locations relative to the build output root. Vite writes to
/// `.vite/manifest.json`; older layouts keep it at the root.
const MANIFEST_PATHS: [&str; 2] = [".vite/manifest.json", "manifest.json"];

/// One build artifact descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Output path of the compiled artifact, relative to the output root
    /// (no leading slash in the source document).
    pub file: String,

    /// Logical entry name.
    #[serde(default)]
    pub name: Option<String>,

    /// Original source path.
    #[serde(default)]
    pub src: Option<String>,

    /// Whether this is a top-level bundle entry point.
    #[serde(default, alias = "isEntry")]
    pub is_entry: bool,

    /// Stylesheet outputs associated with this entry, in emit order.
    #[serde(default)]
    pub css: Vec<String>,
}

/// Mapping from logical source path to build artifact.
///
/// Entries are kept sorted by key: the resolver's fallback scans take the
/// first match, so iteration order must be stable across runs.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    /// Parse a manifest document from raw bytes.
    ///
    /// A present-but-unparseable document is always a hard failure.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AssetError> {
        let entries: BTreeMap<String, ManifestEntry> = serde_json::from_slice(bytes)
            .map_err(|e| AssetError::InvalidManifest(e.to_string()))?;

        for (key, entry) in &entries {
            if entry.file.is_empty() {
                return Err(AssetError::InvalidManifest(format!(
                    "entry `{key}` has an empty `file` field"
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Load the manifest from the build output tree.
    ///
    /// Absence of the document is a valid state (the frontend may not have
    /// been built yet): permissive mode returns an empty manifest, strict
    /// mode fails with [`AssetError::ManifestNotFound`].
    pub fn load(output_root: &Path, strict: bool) -> Result<Self, AssetError> {
        for rel in MANIFEST_PATHS {
            let path = output_root.join(rel);
            match std::fs::read(&path) {
                Ok(bytes) => {
                    let manifest = Self::from_slice(&bytes)?;
                    crate::debug!("assets"; "loaded manifest ({} entries) from {}",
                        manifest.len(), path.display());
                    return Ok(manifest);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(AssetError::InvalidManifest(format!(
                        "failed to read {}: {e}",
                        path.display()
                    )));
                }
            }
        }

        if strict {
            return Err(AssetError::ManifestNotFound(
                output_root.join(MANIFEST_PATHS[0]),
            ));
        }

        crate::debug!("assets"; "no manifest under {}, starting empty", output_root.display());
        Ok(Self::default())
    }

    /// Look up an entry by its logical source path.
    pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
        self.entries.get(key)
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a manifest from explicit entries (tests and tooling).
    pub fn from_entries(entries: impl IntoIterator<Item = (String, ManifestEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

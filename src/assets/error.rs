//! Asset resolution error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by manifest loading and asset resolution.
#[derive(Debug, Error)]
pub enum AssetError {
    /// An empty logical path was supplied.
    #[error("asset path is empty")]
    InvalidPath,

    /// Strict resolution found no manifest match for the path.
    #[error("asset `{0}` not found in manifest")]
    NotFound(String),

    /// The manifest document is absent (strict manifest mode only).
    #[error("manifest not found at `{0}`")]
    ManifestNotFound(PathBuf),

    /// The manifest document is present but unparseable. Always fatal:
    /// a corrupt manifest is never safe to ignore, unlike an absent one.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
}

//! Read-only build-output tree lookups.

use std::path::{Path, PathBuf};

/// Read-only view over the build output directory.
///
/// All lookups are traversal-guarded: the resolved file must stay under the
/// tree root after canonicalization, so neither `..` sequences nor symlinks
/// can escape it.
#[derive(Debug, Clone)]
pub struct OutputTree {
    root: PathBuf,
}

impl OutputTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a URL path (relative to the tree root) to a file on disk.
    /// Returns `None` for missing files, directories, and anything that
    /// escapes the root.
    pub fn resolve(&self, url_path: &str) -> Option<PathBuf> {
        let clean = normalize_url(url_path);

        // Reject paths with suspicious patterns early
        if clean.contains("..") {
            return None;
        }

        let local = self.root.join(&clean);

        // Canonicalize to resolve symlinks and verify path is under root
        let canonical = local.canonicalize().ok()?;
        let root_canonical = self.root.canonicalize().ok()?;

        if !canonical.starts_with(&root_canonical) {
            return None;
        }

        canonical.is_file().then_some(canonical)
    }

    /// Resolve under a subdirectory of the tree (`fonts`, `assets`).
    pub fn resolve_in(&self, dir: &str, url_path: &str) -> Option<PathBuf> {
        let clean = normalize_url(url_path);
        if clean.is_empty() {
            return None;
        }
        self.resolve(&format!("{dir}/{clean}"))
    }
}

/// Normalize URL: decode, strip query string, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split('?').next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> (TempDir, OutputTree) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::create_dir_all(dir.path().join("fonts")).unwrap();
        fs::write(dir.path().join("assets/main.ab12.js"), "console.log(1)").unwrap();
        fs::write(dir.path().join("fonts/inter.woff2"), b"\0font").unwrap();
        fs::write(dir.path().join("robots.txt"), "User-agent: *\n").unwrap();
        let tree = OutputTree::new(dir.path());
        (dir, tree)
    }

    #[test]
    fn test_resolve_existing_file() {
        let (_dir, tree) = tree();
        let path = tree.resolve("assets/main.ab12.js").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_resolve_strips_query_and_slashes() {
        let (_dir, tree) = tree();
        assert!(tree.resolve("/robots.txt?v=1").is_some());
    }

    #[test]
    fn test_resolve_missing_file() {
        let (_dir, tree) = tree();
        assert!(tree.resolve("assets/other.js").is_none());
    }

    #[test]
    fn test_resolve_rejects_directory() {
        let (_dir, tree) = tree();
        assert!(tree.resolve("assets").is_none());
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let (_dir, tree) = tree();
        assert!(tree.resolve("../etc/passwd").is_none());
        assert!(tree.resolve("assets/../../etc/passwd").is_none());
        // Encoded traversal decodes to ".." and is rejected the same way
        assert!(tree.resolve("%2e%2e/etc/passwd").is_none());
    }

    #[test]
    fn test_resolve_in_subdirectory() {
        let (_dir, tree) = tree();
        assert!(tree.resolve_in("fonts", "inter.woff2").is_some());
        assert!(tree.resolve_in("fonts", "missing.woff2").is_none());
        assert!(tree.resolve_in("fonts", "").is_none());
    }
}

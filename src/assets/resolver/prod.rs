//! Production resolver: manifest lookup with an ordered fallback chain.

use super::{AssetError, Manifest, base_name, strip_extension};
use crate::assets::AssetType;

/// Resolves logical paths against the build manifest.
pub struct ProdResolver {
    manifest: Manifest,
    /// Fail with `NotFound` instead of synthesizing a fallback path.
    strict: bool,
}

impl ProdResolver {
    pub fn new(manifest: Manifest, strict: bool) -> Self {
        Self { manifest, strict }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Resolve a logical path to the built artifact's URL path.
    ///
    /// Ordered fallback chain, first match wins:
    /// 1. exact manifest key
    /// 2. stylesheet requests: cross-reference entries' CSS outputs
    /// 3. `name` field against the extension-stripped path
    /// 4. stylesheet requests: suffix match against entries' `src` fields
    /// 5. synthesized conventional path (permissive) or `NotFound` (strict)
    ///
    /// The synthesized fallback trades precision for availability: in a
    /// template render path a guessed link beats a broken one.
    pub fn resolve(&self, path: &str) -> Result<String, AssetError> {
        if path.is_empty() {
            return Err(AssetError::InvalidPath);
        }

        let clean = path.trim_start_matches('/');
        if let Some(entry) = self.manifest.get(clean) {
            return Ok(absolutize(&entry.file));
        }

        let requested = AssetType::from_path(clean);

        if requested.is_stylesheet() {
            for (_, entry) in self.manifest.iter() {
                for css in &entry.css {
                    if css_output_matches(css, clean) {
                        return Ok(absolutize(css));
                    }
                }
            }
        }

        let stem = strip_extension(clean);
        for (_, entry) in self.manifest.iter() {
            if entry.name.as_deref() == Some(stem) {
                return Ok(absolutize(&entry.file));
            }
        }

        if requested.is_stylesheet() {
            for (_, entry) in self.manifest.iter() {
                if entry
                    .src
                    .as_deref()
                    .is_some_and(|src| suffix_matches(src, clean))
                {
                    return Ok(absolutize(&entry.file));
                }
            }
        }

        if self.strict {
            return Err(AssetError::NotFound(clean.to_string()));
        }
        Ok(fallback_path(clean, requested))
    }
}

/// Manifest `file` fields carry no leading slash; served paths must.
fn absolutize(file: &str) -> String {
    if file.starts_with('/') {
        file.to_string()
    } else {
        format!("/{file}")
    }
}

/// Whether `suffix` matches `path` on a path-segment boundary.
fn suffix_matches(path: &str, suffix: &str) -> bool {
    path.ends_with(suffix)
        && (path.len() == suffix.len() || path.as_bytes()[path.len() - suffix.len() - 1] == b'/')
}

/// Whether a manifest CSS output corresponds to a requested stylesheet.
///
/// Hashed outputs (`assets/main.cd34.css`) match their unhashed request
/// (`main.css`): compare base names with the content-hash segment removed.
fn css_output_matches(css: &str, requested: &str) -> bool {
    if suffix_matches(css, requested) {
        return true;
    }
    strip_hash_segment(base_name(css)) == base_name(requested)
}

/// Remove the content-hash segment from a hashed file name
/// (`main.cd34.css` → `main.css`). Unhashed names pass through.
fn strip_hash_segment(base: &str) -> String {
    let parts: Vec<&str> = base.split('.').collect();
    if parts.len() < 3 {
        return base.to_string();
    }
    let mut kept = parts;
    kept.remove(kept.len() - 2);
    kept.join(".")
}

/// Deterministic conventional path for an unresolvable request.
fn fallback_path(path: &str, kind: AssetType) -> String {
    let base = base_name(path);
    match kind {
        AssetType::Script => format!("/assets/js/{base}"),
        AssetType::Stylesheet => format!("/assets/css/{base}"),
        _ => format!("/assets/{base}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ManifestEntry;

    fn manifest() -> Manifest {
        Manifest::from_slice(
            br#"{
                "src/main.ts": {
                    "file": "assets/main.ab12.js",
                    "name": "main",
                    "src": "src/main.ts",
                    "isEntry": true,
                    "css": ["assets/main.cd34.css"]
                },
                "src/css/app.css": {
                    "file": "assets/app.ef56.css",
                    "src": "src/css/app.css"
                }
            }"#,
        )
        .unwrap()
    }

    fn resolver() -> ProdResolver {
        ProdResolver::new(manifest(), false)
    }

    #[test]
    fn test_empty_path_is_invalid() {
        assert!(matches!(
            resolver().resolve(""),
            Err(AssetError::InvalidPath)
        ));
    }

    #[test]
    fn test_exact_match_is_absolutized() {
        assert_eq!(
            resolver().resolve("src/main.ts").unwrap(),
            "/assets/main.ab12.js"
        );
    }

    #[test]
    fn test_exact_match_ignores_leading_slash() {
        assert_eq!(
            resolver().resolve("/src/main.ts").unwrap(),
            "/assets/main.ab12.js"
        );
    }

    #[test]
    fn test_css_cross_reference() {
        // "main.css" is no manifest key; it reaches the entry's CSS output
        assert_eq!(
            resolver().resolve("main.css").unwrap(),
            "/assets/main.cd34.css"
        );
    }

    #[test]
    fn test_name_match_on_stripped_path() {
        assert_eq!(resolver().resolve("main.js").unwrap(), "/assets/main.ab12.js");
    }

    #[test]
    fn test_src_suffix_match_for_stylesheets() {
        assert_eq!(
            resolver().resolve("app.css").unwrap(),
            "/assets/app.ef56.css"
        );
        assert_eq!(
            resolver().resolve("css/app.css").unwrap(),
            "/assets/app.ef56.css"
        );
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let resolver = resolver();
        let first = resolver.resolve("missing/widget.js").unwrap();
        assert_eq!(first, "/assets/js/widget.js");
        assert_eq!(resolver.resolve("missing/widget.js").unwrap(), first);

        assert_eq!(
            resolver.resolve("theme/missing.css").unwrap(),
            "/assets/css/missing.css"
        );
        assert_eq!(resolver.resolve("logo.svg").unwrap(), "/assets/logo.svg");
    }

    #[test]
    fn test_strict_mode_fails_instead_of_fallback() {
        let resolver = ProdResolver::new(manifest(), true);
        let result = resolver.resolve("missing/widget.js");
        assert!(matches!(result, Err(AssetError::NotFound(path)) if path == "missing/widget.js"));

        // Exact and cross-reference lookups still succeed
        assert_eq!(resolver.resolve("src/main.ts").unwrap(), "/assets/main.ab12.js");
        assert_eq!(resolver.resolve("main.css").unwrap(), "/assets/main.cd34.css");
    }

    #[test]
    fn test_empty_manifest_still_resolves_permissively() {
        let resolver = ProdResolver::new(Manifest::default(), false);
        assert_eq!(resolver.resolve("main.js").unwrap(), "/assets/js/main.js");
    }

    #[test]
    fn test_suffix_matches_on_segment_boundary() {
        assert!(suffix_matches("src/css/app.css", "app.css"));
        assert!(suffix_matches("app.css", "app.css"));
        // "webapp.css" must not match a request for "app.css"
        assert!(!suffix_matches("src/css/webapp.css", "app.css"));
    }

    #[test]
    fn test_strip_hash_segment() {
        assert_eq!(strip_hash_segment("main.cd34.css"), "main.css");
        assert_eq!(strip_hash_segment("main.css"), "main.css");
        assert_eq!(strip_hash_segment("main"), "main");
    }

    #[test]
    fn test_first_match_wins_across_entries() {
        // Two entries with CSS outputs for the same stem: the scan takes
        // the first in key order every time.
        let manifest = Manifest::from_entries([
            (
                "src/a.ts".to_string(),
                ManifestEntry {
                    file: "assets/a.js".to_string(),
                    css: vec!["assets/shared.11aa.css".to_string()],
                    ..ManifestEntry::default()
                },
            ),
            (
                "src/b.ts".to_string(),
                ManifestEntry {
                    file: "assets/b.js".to_string(),
                    css: vec!["assets/shared.22bb.css".to_string()],
                    ..ManifestEntry::default()
                },
            ),
        ]);
        let resolver = ProdResolver::new(manifest, false);
        assert_eq!(
            resolver.resolve("shared.css").unwrap(),
            "/assets/shared.11aa.css"
        );
    }
}

//! Asset type classification.

/// Classification of an asset reference, derived purely from its file
/// extension. Computed on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    /// JavaScript/TypeScript bundle or module.
    Script,
    /// CSS (or a preprocessor source compiled to CSS).
    Stylesheet,
    /// Raster or vector image.
    Image,
    /// Web font.
    Font,
    /// Anything else.
    Unknown,
}

impl AssetType {
    /// Classify a path by its extension. Unknown extensions (and paths
    /// without one) map to [`AssetType::Unknown`].
    pub fn from_path(path: &str) -> Self {
        match extension(path) {
            Some("js" | "mjs" | "cjs" | "ts" | "tsx" | "jsx") => Self::Script,
            Some("css" | "scss" | "sass" | "less") => Self::Stylesheet,
            Some("png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "avif" | "ico" | "bmp") => {
                Self::Image
            }
            Some("woff" | "woff2" | "ttf" | "otf" | "eot") => Self::Font,
            _ => Self::Unknown,
        }
    }

    pub const fn is_script(self) -> bool {
        matches!(self, Self::Script)
    }

    pub const fn is_stylesheet(self) -> bool {
        matches!(self, Self::Stylesheet)
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Script => "script",
            Self::Stylesheet => "stylesheet",
            Self::Image => "image",
            Self::Font => "font",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// File extension of the final path segment, if any.
fn extension(path: &str) -> Option<&str> {
    let base = path.rsplit('/').next().unwrap_or(path);
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_extensions() {
        assert_eq!(AssetType::from_path("main.ts"), AssetType::Script);
        assert_eq!(AssetType::from_path("src/js/form.js"), AssetType::Script);
        assert_eq!(AssetType::from_path("widget.tsx"), AssetType::Script);
        assert_eq!(AssetType::from_path("legacy.cjs"), AssetType::Script);
    }

    #[test]
    fn test_stylesheet_extensions() {
        assert_eq!(AssetType::from_path("main.css"), AssetType::Stylesheet);
        assert_eq!(
            AssetType::from_path("src/css/forms.scss"),
            AssetType::Stylesheet
        );
    }

    #[test]
    fn test_image_extensions() {
        assert_eq!(AssetType::from_path("logo.svg"), AssetType::Image);
        assert_eq!(AssetType::from_path("img/banner.webp"), AssetType::Image);
        assert_eq!(AssetType::from_path("favicon.ico"), AssetType::Image);
    }

    #[test]
    fn test_font_extensions() {
        assert_eq!(AssetType::from_path("inter.woff2"), AssetType::Font);
        assert_eq!(AssetType::from_path("fonts/mono.ttf"), AssetType::Font);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(AssetType::from_path("data.bin"), AssetType::Unknown);
        assert_eq!(AssetType::from_path("noextension"), AssetType::Unknown);
        assert_eq!(AssetType::from_path(""), AssetType::Unknown);
        // Dotfile: the leading dot is not an extension separator
        assert_eq!(AssetType::from_path(".env"), AssetType::Unknown);
    }

    #[test]
    fn test_extension_uses_last_segment() {
        // The directory name must not leak into classification
        assert_eq!(AssetType::from_path("v1.2/bundle.js"), AssetType::Script);
    }
}

//! Image embedding for self-contained reports
//!
//! Screenshots referenced from test output live under the wiki's files
//! root. The report inlines each one as a base64 data URI so the document
//! can be archived and opened anywhere.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::{Captures, Regex};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::warn;

use crate::result::{FitlogError, FitlogResult};
use crate::rewrite::compile;

/// Default display width of embedded images, in pixels
pub const DEFAULT_IMAGE_WIDTH: u32 = 200;

static ANCHORED_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?is)<a\b[^>]*>\s*(<img\b[^>]*>)\s*</a>"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| compile(r#"(?i)<img\b[^>]*?\ssrc="([^"]*)"[^>]*?/?>"#));

/// Inlines `<img src="...">` references as base64 data URIs
#[derive(Debug, Clone)]
pub struct ImageEmbedder {
    assets_root: PathBuf,
    width: u32,
}

impl ImageEmbedder {
    /// Create an embedder resolving image paths against `assets_root`
    #[must_use]
    pub fn new(assets_root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: assets_root.into(),
            width: DEFAULT_IMAGE_WIDTH,
        }
    }

    /// Set the display width of embedded images
    #[must_use]
    pub const fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Root image paths are resolved against
    #[must_use]
    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    /// Resolve an image `src` attribute to a file path
    #[must_use]
    pub fn resolve(&self, src: &str) -> PathBuf {
        self.assets_root.join(src.trim_start_matches('/'))
    }

    /// Embed every image in `html`.
    ///
    /// An image that cannot be read is logged and left as an empty data URI;
    /// the rest of the chunk is still processed.
    #[must_use]
    pub fn embed(&self, html: &str) -> String {
        let unwrapped = ANCHORED_IMAGE.replace_all(html, "${1}");
        IMAGE
            .replace_all(&unwrapped, |caps: &Captures<'_>| {
                let src = &caps[1];
                if src.starts_with("data:") {
                    return caps[0].to_string();
                }
                let data = match encode_file(&self.resolve(src)) {
                    Ok(data) => data,
                    Err(err) => {
                        warn!(src, error = %err, "image not embedded");
                        String::new()
                    }
                };
                format!(
                    r#"<img src="data:image/png;base64,{data}" width="{}" onClick="openImage(this)">"#,
                    self.width
                )
            })
            .into_owned()
    }
}

/// Read a file and encode it as standard, padded base64
pub fn encode_file(path: &Path) -> FitlogResult<String> {
    let bytes = std::fs::read(path).map_err(|e| FitlogError::ImageRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(STANDARD.encode(bytes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Smallest valid PNG: 1x1 transparent pixel
    const PIXEL_PNG: [u8; 67] = [
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
        0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0a, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0d, 0x0a, 0x2d, 0xb4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];

    fn root_with_pixel() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("files/screenshots")).unwrap();
        std::fs::write(dir.path().join("files/screenshots/shot.png"), PIXEL_PNG).unwrap();
        dir
    }

    #[test]
    fn test_embeds_exact_base64() {
        let dir = root_with_pixel();
        let embedder = ImageEmbedder::new(dir.path());
        let out = embedder.embed(r#"<img src="files/screenshots/shot.png"/>"#);
        let expected = STANDARD.encode(PIXEL_PNG);
        assert!(out.contains(&format!(r#"src="data:image/png;base64,{expected}""#)));
        assert!(out.contains(r#"width="200""#));
        assert!(out.contains(r#"onClick="openImage(this)""#));
    }

    #[test]
    fn test_leading_slash_resolves_under_root() {
        let dir = root_with_pixel();
        let embedder = ImageEmbedder::new(dir.path());
        assert_eq!(
            embedder.resolve("/files/screenshots/shot.png"),
            dir.path().join("files/screenshots/shot.png")
        );
    }

    #[test]
    fn test_rerun_does_not_reembed() {
        let dir = root_with_pixel();
        let embedder = ImageEmbedder::new(dir.path());
        let once = embedder.embed(r#"<img alt="x" src="files/screenshots/shot.png" />"#);
        assert_eq!(embedder.embed(&once), once);
    }

    #[test]
    fn test_anchor_around_image_unwrapped() {
        let dir = root_with_pixel();
        let embedder = ImageEmbedder::new(dir.path());
        let out = embedder.embed(
            r#"<a href="files/screenshots/shot.png" target="_blank"><img src="files/screenshots/shot.png"/></a>"#,
        );
        assert!(out.starts_with("<img src=\"data:image/png;base64,"));
        assert!(!out.contains("<a "));
    }

    #[test]
    fn test_plain_anchor_kept() {
        let embedder = ImageEmbedder::new(".");
        let html = r#"<a href="page.html">page source</a>"#;
        assert_eq!(embedder.embed(html), html);
    }

    #[test]
    fn test_missing_image_yields_broken_reference() {
        let dir = TempDir::new().unwrap();
        let embedder = ImageEmbedder::new(dir.path());
        let out = embedder.embed(r#"before <img src="nope.png"/> after"#);
        assert_eq!(
            out,
            r#"before <img src="data:image/png;base64," width="200" onClick="openImage(this)"> after"#
        );
    }

    #[test]
    fn test_each_image_uses_its_own_file() {
        let dir = root_with_pixel();
        std::fs::write(dir.path().join("other.png"), b"abc").unwrap();
        let embedder = ImageEmbedder::new(dir.path()).with_width(320);
        let out = embedder.embed(r#"<img src="other.png"/><IMG SRC="files/screenshots/shot.png"/>"#);
        assert!(out.contains("base64,YWJj\""));
        assert!(out.contains(&STANDARD.encode(PIXEL_PNG)));
        assert!(out.contains(r#"width="320""#));
    }

    #[test]
    fn test_encode_file_error() {
        let err = encode_file(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, FitlogError::ImageRead { .. }));
    }
}

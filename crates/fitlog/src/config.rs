//! Render configuration
//!
//! Loaded from YAML (`fitlog.yaml`) or built in code. Every key is optional.
//!
//! ```yaml
//! assets_root: FitNesseRoot
//! reset_policy: per_test
//! color: true
//! image_width: 320
//! report_dir: target/fitlog
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::embed::DEFAULT_IMAGE_WIDTH;
use crate::result::{FitlogError, FitlogResult};

/// When the collapsed-section state is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Keep state for the whole run; an unclosed region hides later tests too
    #[default]
    Persist,
    /// Start every test with nothing hidden
    PerTest,
}

/// Configuration for a render run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Root that `<img src>` paths are resolved against
    pub assets_root: PathBuf,
    /// Collapsed-section state reset policy
    pub reset_policy: ResetPolicy,
    /// Emit ANSI colors in the transcript
    pub color: bool,
    /// Align pipe-table columns in the transcript
    pub align_tables: bool,
    /// Display width of embedded report images
    pub image_width: u32,
    /// Stylesheet replacing the bundled one
    pub stylesheet: Option<PathBuf>,
    /// Script replacing the bundled one
    pub script: Option<PathBuf>,
    /// Directory finished reports are written to
    pub report_dir: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            assets_root: PathBuf::from("."),
            reset_policy: ResetPolicy::Persist,
            color: true,
            align_tables: true,
            image_width: DEFAULT_IMAGE_WIDTH,
            stylesheet: None,
            script: None,
            report_dir: None,
        }
    }
}

impl RenderConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> FitlogResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_yaml_file(path: &Path) -> FitlogResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            FitlogError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Check value ranges
    pub fn validate(&self) -> FitlogResult<()> {
        if self.image_width == 0 {
            return Err(FitlogError::config("image_width must be greater than 0"));
        }
        Ok(())
    }

    /// Set the image assets root
    #[must_use]
    pub fn with_assets_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets_root = root.into();
        self
    }

    /// Set the reset policy
    #[must_use]
    pub const fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    /// Enable or disable transcript colors
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable table alignment
    #[must_use]
    pub const fn with_align_tables(mut self, align: bool) -> Self {
        self.align_tables = align;
        self
    }

    /// Set the embedded image width
    #[must_use]
    pub const fn with_image_width(mut self, width: u32) -> Self {
        self.image_width = width;
        self
    }

    /// Replace the bundled stylesheet
    #[must_use]
    pub fn with_stylesheet(mut self, path: impl Into<PathBuf>) -> Self {
        self.stylesheet = Some(path.into());
        self
    }

    /// Replace the bundled script
    #[must_use]
    pub fn with_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.script = Some(path.into());
        self
    }

    /// Write finished reports into `dir`
    #[must_use]
    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = Some(dir.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.reset_policy, ResetPolicy::Persist);
        assert!(config.color);
        assert!(config.align_tables);
        assert_eq!(config.image_width, 200);
        assert!(config.report_dir.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = RenderConfig::from_yaml_str("reset_policy: per_test\nimage_width: 320\n").unwrap();
        assert_eq!(config.reset_policy, ResetPolicy::PerTest);
        assert_eq!(config.image_width, 320);
        assert!(config.color);
        assert_eq!(config.assets_root, PathBuf::from("."));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RenderConfig::from_yaml_str("colour: false\n").unwrap_err();
        assert!(matches!(err, FitlogError::ConfigParse(_)));
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = RenderConfig::from_yaml_str("image_width: 0\n").unwrap_err();
        assert!(err.to_string().contains("image_width"));
    }

    #[test]
    fn test_builder() {
        let config = RenderConfig::new()
            .with_assets_root("FitNesseRoot")
            .with_reset_policy(ResetPolicy::PerTest)
            .with_color(false)
            .with_report_dir("out");
        assert_eq!(config.assets_root, PathBuf::from("FitNesseRoot"));
        assert_eq!(config.reset_policy, ResetPolicy::PerTest);
        assert!(!config.color);
        assert_eq!(config.report_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_missing_file() {
        let err = RenderConfig::from_yaml_file(Path::new("/no/fitlog.yaml")).unwrap_err();
        assert!(matches!(err, FitlogError::Config { .. }));
    }
}

//! Static report assets.
//!
//! Every report inlines one stylesheet and one script. Both are bundled into
//! the crate; either can be replaced by a file named in the configuration.
//! Assets are read once, when the run is set up.

use std::path::Path;

use crate::config::RenderConfig;
use crate::result::{FitlogError, FitlogResult};

const BUNDLED_STYLESHEET: &str = include_str!("../assets/report.css");
const BUNDLED_SCRIPT: &str = include_str!("../assets/report.js");

/// Stylesheet and script embedded verbatim in every report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportAssets {
    stylesheet: String,
    script: String,
}

impl Default for ReportAssets {
    fn default() -> Self {
        Self::bundled()
    }
}

impl ReportAssets {
    /// Assets shipped with the crate
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            stylesheet: BUNDLED_STYLESHEET.to_string(),
            script: BUNDLED_SCRIPT.to_string(),
        }
    }

    /// Assets from explicit strings
    #[must_use]
    pub fn new(stylesheet: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            stylesheet: stylesheet.into(),
            script: script.into(),
        }
    }

    /// Bundled assets with the overrides named in `config` applied
    pub fn from_config(config: &RenderConfig) -> FitlogResult<Self> {
        let mut assets = Self::bundled();
        if let Some(path) = &config.stylesheet {
            assets.stylesheet = read_asset(path)?;
        }
        if let Some(path) = &config.script {
            assets.script = read_asset(path)?;
        }
        Ok(assets)
    }

    /// Stylesheet text
    #[must_use]
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Script text
    #[must_use]
    pub fn script(&self) -> &str {
        &self.script
    }
}

fn read_asset(path: &Path) -> FitlogResult<String> {
    std::fs::read_to_string(path).map_err(|e| FitlogError::AssetLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_script_defines_handlers() {
        let assets = ReportAssets::bundled();
        assert!(assets.script().contains("function openImage"));
        assert!(assets.script().contains("function enableClickHandlers"));
        assert!(assets.stylesheet().contains(".closed-detail"));
    }

    #[test]
    fn test_override_from_config() {
        let dir = TempDir::new().unwrap();
        let css = dir.path().join("custom.css");
        std::fs::write(&css, "body { color: red; }").unwrap();
        let config = RenderConfig::new().with_stylesheet(&css);
        let assets = ReportAssets::from_config(&config).unwrap();
        assert_eq!(assets.stylesheet(), "body { color: red; }");
        assert_eq!(assets.script(), ReportAssets::bundled().script());
    }

    #[test]
    fn test_missing_override_is_an_error() {
        let config = RenderConfig::new().with_script("/no/such/script.js");
        let err = ReportAssets::from_config(&config).unwrap_err();
        assert!(matches!(err, FitlogError::AssetLoad { .. }));
    }
}

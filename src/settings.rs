//! Render settings loaded from TOML
//!
//! Every section and key is optional; anything left out keeps its default.
//!
//! ```toml
//! [layout]
//! overlap_buffer = 20
//! max_attempts = 12
//!
//! [svg]
//! embed_background = true
//!
//! [page]
//! title = "Ground floor"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::LayoutConfig;
use crate::renderer::{PageConfig, SvgConfig};

/// Errors that can occur when loading or parsing settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub layout: LayoutConfig,
    pub svg: SvgConfig,
    pub page: PageConfig,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_are_defaults() {
        assert_eq!(Settings::from_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::from_str(
            r#"
[layout]
overlap_buffer = 20.0
max_attempts = 12

[svg]
embed_background = true
class_prefix = "plan-"

[page]
title = "Ground floor"
"#,
        )
        .unwrap();

        assert_eq!(settings.layout.overlap_buffer, 20.0);
        assert_eq!(settings.layout.max_attempts, 12);
        assert_eq!(settings.layout.nudge_step, 15.0);
        assert!(settings.svg.embed_background);
        assert_eq!(settings.svg.class_prefix.as_deref(), Some("plan-"));
        assert!(settings.svg.pretty_print);
        assert_eq!(settings.page.title, "Ground floor");
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = Settings::from_str("[colors]\nred = \"#f00\"").unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(Settings::from_str("[layout]\nmax_attempts = \"ten\"").is_err());
    }
}

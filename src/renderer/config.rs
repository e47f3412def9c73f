//! Configuration for SVG and page rendering

use serde::Deserialize;

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SvgConfig {
    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "zo-" for "zo-zone")
    pub class_prefix: Option<String>,

    /// Outline color of zone rectangles
    pub zone_stroke: String,

    /// Outline width of zone rectangles
    pub zone_stroke_width: f64,

    /// Fill color of label and badge text
    pub text_fill: String,

    /// Inline a local background file as a base64 data URI
    pub embed_background: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            pretty_print: true,
            class_prefix: Some("zo-".to_string()),
            zone_stroke: "black".to_string(),
            zone_stroke_width: 2.0,
            text_fill: "black".to_string(),
            embed_background: false,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set whether local backgrounds are embedded
    pub fn with_embed_background(mut self, embed: bool) -> Self {
        self.embed_background = embed;
        self
    }
}

/// Configuration for the HTML page wrapping the SVG
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Contents of the `<title>` element
    pub title: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Output Image".to_string(),
        }
    }
}

impl PageConfig {
    /// Set the page title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

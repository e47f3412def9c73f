//! Configuration for the layout engine

use serde::Deserialize;

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum characters per wrapped zone label line
    pub max_chars_per_line: usize,

    /// Average glyph width as a fraction of the font size
    pub char_width_factor: f64,

    /// Font size for zones that do not specify one
    pub default_font_size: f64,

    /// Extra clearance added to the combined half-extents in the overlap test
    pub overlap_buffer: f64,

    /// Maximum number of nudges before a label is left where it is
    pub max_attempts: usize,

    /// Distance moved by each nudge
    pub nudge_step: f64,

    /// Radius of marker circles
    pub marker_radius: f64,

    /// Font size of the profile name next to a marker
    pub badge_font_size: f64,

    /// Horizontal gap between a marker circle and its badge text
    pub badge_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_chars_per_line: 20,
            char_width_factor: 0.6,
            default_font_size: 40.0,
            overlap_buffer: 15.0,
            max_attempts: 10,
            nudge_step: 15.0,
            marker_radius: 10.0,
            badge_font_size: 20.0,
            badge_gap: 5.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wrap width in characters
    pub fn with_max_chars_per_line(mut self, chars: usize) -> Self {
        self.max_chars_per_line = chars;
        self
    }

    /// Set the overlap buffer
    pub fn with_overlap_buffer(mut self, buffer: f64) -> Self {
        self.overlap_buffer = buffer;
        self
    }

    /// Set the nudge budget
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the nudge distance
    pub fn with_nudge_step(mut self, step: f64) -> Self {
        self.nudge_step = step;
        self
    }

    /// Set the marker circle radius
    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.max_chars_per_line, 20);
        assert_eq!(config.char_width_factor, 0.6);
        assert_eq!(config.default_font_size, 40.0);
        assert_eq!(config.overlap_buffer, 15.0);
        assert_eq!(config.max_attempts, 10);
        assert_eq!(config.nudge_step, 15.0);
        assert_eq!(config.marker_radius, 10.0);
        assert_eq!(config.badge_font_size, 20.0);
        assert_eq!(config.badge_gap, 5.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new()
            .with_overlap_buffer(20.0)
            .with_max_attempts(3)
            .with_nudge_step(5.0);

        assert_eq!(config.overlap_buffer, 20.0);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.nudge_step, 5.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LayoutConfig = toml::from_str("max_attempts = 4").unwrap();
        assert_eq!(config.max_attempts, 4);
        assert_eq!(config.nudge_step, 15.0);
    }
}

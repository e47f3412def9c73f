//! Zone Overlay - labeled zones and profile markers over a background image
//!
//! This library reads a scene of rectangular zones, point markers and
//! profiles, places zone labels so they do not collide, arranges a colored
//! badge per profile around each marker, and writes the result as an SVG
//! embedded in a standalone HTML page.
//!
//! # Example
//!
//! ```rust
//! use zone_overlay::render;
//!
//! let html = render(r#"
//! [canvas]
//! width = 400
//! height = 300
//! background = "plan.jpg"
//!
//! [[zones]]
//! label = "Kitchen"
//! corner_1 = "(0, 0)"
//! corner_3 = "(200, 100)"
//! "#).unwrap();
//! assert!(html.contains("<svg"));
//! assert!(html.contains("Kitchen"));
//! ```

pub mod data;
pub mod error;
pub mod layout;
pub mod parser;
pub mod renderer;
pub mod settings;

pub use data::{DataError, RowDiagnostic, SceneData};
pub use error::ParseError;
pub use layout::{LayoutConfig, LayoutResult, LintWarning};
pub use parser::parse_coordinate;
pub use renderer::{BackgroundError, PageConfig, SvgConfig};
pub use settings::{Settings, SettingsError};

use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Scene file could not be read or parsed
    #[error("scene error: {0}")]
    Data(#[from] DataError),

    /// Settings file could not be read or parsed
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    /// Background image could not be embedded
    #[error("background error: {0}")]
    Background(#[from] BackgroundError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// HTML page configuration
    pub page: PageConfig,
    /// Run layout lint checks after placement
    pub lint: bool,
    /// Debug mode: dump placements to the log
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from loaded settings
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            layout: settings.layout,
            svg: settings.svg,
            page: settings.page,
            ..Self::default()
        }
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the page configuration
    pub fn with_page(mut self, config: PageConfig) -> Self {
        self.page = config;
        self
    }

    /// Enable or disable lint checks
    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render a TOML scene to an HTML page with default configuration
pub fn render(source: &str) -> Result<String, RenderError> {
    render_with_config(source, RenderConfig::default())
}

/// Render a TOML scene to an HTML page with custom configuration
///
/// Local backgrounds are resolved against the working directory when
/// embedding is enabled.
///
/// # Example
///
/// ```rust
/// use zone_overlay::{render_with_config, LayoutConfig, PageConfig, RenderConfig};
///
/// let config = RenderConfig::new()
///     .with_layout(LayoutConfig::default().with_overlap_buffer(25.0))
///     .with_page(PageConfig::default().with_title("Plan"));
///
/// let scene = "[canvas]\nwidth = 10\nheight = 10\nbackground = \"bg.png\"\n";
/// let html = render_with_config(scene, config).unwrap();
/// assert!(html.contains("<title>Plan</title>"));
/// ```
pub fn render_with_config(source: &str, config: RenderConfig) -> Result<String, RenderError> {
    let scene = SceneData::from_str(source)?;
    let (html, _) = render_scene(&scene, None, &config)?;
    Ok(html)
}

/// Render a TOML scene and return lint warnings alongside the page
pub fn render_with_lint(
    source: &str,
    config: RenderConfig,
) -> Result<(String, Vec<LintWarning>), RenderError> {
    let scene = SceneData::from_str(source)?;
    render_scene(&scene, None, &config.with_lint(true))
}

/// Lay out a loaded scene and serialize it
///
/// `base_dir` anchors a relative background path for embedding. Lint
/// warnings are only collected when `config.lint` is set.
pub fn render_scene(
    scene: &SceneData,
    base_dir: Option<&Path>,
    config: &RenderConfig,
) -> Result<(String, Vec<LintWarning>), RenderError> {
    let zones = scene.zones(&config.layout);
    let markers = scene.markers();
    let profiles = scene.profiles();
    let canvas = scene.canvas();

    let result = layout::layout(&zones, &markers, &profiles, canvas, &config.layout);

    if config.debug {
        for placement in &result.placements {
            debug!(
                zone = placement.zone,
                initial_x = placement.initial.x,
                initial_y = placement.initial.y,
                x = placement.resolved.x,
                y = placement.resolved.y,
                attempts = placement.attempts,
                settled = placement.settled,
                "label placement"
            );
        }
        for skipped in &result.skipped {
            debug!(kind = %skipped.kind, row = skipped.index + 1, "skipped row");
        }
    }

    let warnings = if config.lint {
        layout::lint::check(&result, &config.layout)
    } else {
        Vec::new()
    };

    let background = renderer::background::resolve(
        scene.background(),
        base_dir,
        config.svg.embed_background,
    )?;

    let html = renderer::serialize(
        &result.primitives,
        canvas,
        &background,
        &config.svg,
        &config.page,
    );
    Ok((html, warnings))
}

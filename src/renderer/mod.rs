//! Renderer for generating output from layout results
//!
//! This module takes positioned primitives and produces an SVG document
//! wrapped in a minimal HTML page.

pub mod background;
pub mod config;
pub mod page;
pub mod svg;

pub use background::BackgroundError;
pub use config::{PageConfig, SvgConfig};
pub use page::{serialize, wrap_page};
pub use svg::render_svg;

//! Layout engine for placing zone labels and marker badges
//!
//! This module takes typed zones, markers and profiles and computes a
//! LayoutResult with positioned drawing primitives.

pub mod config;
pub mod engine;
pub mod lint;
pub mod offsets;
pub mod overlap;
pub mod text;
pub mod types;

pub use config::LayoutConfig;
pub use engine::layout;
pub use lint::{LintCategory, LintWarning};
pub use offsets::{generate as generate_offsets, ProfileOffsets};
pub use overlap::{overlaps, resolve, OverlapParams, Resolution};
pub use text::{wrap_and_measure, TextMeasure};
pub use types::*;

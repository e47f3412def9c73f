//! Lint engine for detecting layout defects in a finished scene.
//!
//! Runs after layout to report what the greedy placement could not fix:
//! zone labels that still collide, marker badges sitting on labels,
//! zones drawn from reversed corners, and primitives outside the canvas.

use std::fmt;

use super::config::LayoutConfig;
use super::text::measure_lines;
use super::types::{BoundingBox, LayoutResult, Primitive, TextBlock, TextRole};

/// A lint warning about a layout defect
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Overlap,
    Label,
    Badge,
    Geometry,
    Canvas,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Label => write!(f, "label"),
            LintCategory::Badge => write!(f, "badge"),
            LintCategory::Geometry => write!(f, "geometry"),
            LintCategory::Canvas => write!(f, "canvas"),
        }
    }
}

/// Run all lint checks on a completed layout.
///
/// Text is measured with the same glyph width factor the layout used.
pub fn check(result: &LayoutResult, config: &LayoutConfig) -> Vec<LintWarning> {
    let factor = config.char_width_factor;
    let mut warnings = Vec::new();
    check_label_overlaps(result, &mut warnings);
    check_unsettled(result, &mut warnings);
    check_badges(result, factor, &mut warnings);
    check_geometry(result, &mut warnings);
    check_canvas(result, factor, &mut warnings);
    warnings
}

/// Estimated box covered by a text block, from the top of its first line
fn text_bounds(block: &TextBlock, char_width_factor: f64) -> BoundingBox {
    let measure = measure_lines(block.lines.clone(), block.font_size, char_width_factor);
    BoundingBox::new(
        block.x,
        block.y - block.font_size,
        measure.width,
        measure.height,
    )
}

fn overlap_size(a: &BoundingBox, b: &BoundingBox) -> (f64, f64) {
    let (a, b) = (a.normalized(), b.normalized());
    (
        a.right().min(b.right()) - a.x.max(b.x),
        a.bottom().min(b.bottom()) - a.y.max(b.y),
    )
}

fn display_label(lines: &[String]) -> String {
    format!("\"{}\"", lines.join(" "))
}

// ── Zone labels ──────────────────────────────────────────────────

fn check_label_overlaps(result: &LayoutResult, warnings: &mut Vec<LintWarning>) {
    let footprints = &result.footprints;
    for i in 0..footprints.len() {
        for j in (i + 1)..footprints.len() {
            let (a, b) = (&footprints[i], &footprints[j]);
            if a.intersects(b) {
                let (w, h) = overlap_size(a, b);
                warnings.push(LintWarning {
                    category: LintCategory::Overlap,
                    message: format!(
                        "labels of zones #{} and #{} overlap by {:.0}x{:.0}px",
                        result.placements[i].zone + 1,
                        result.placements[j].zone + 1,
                        w,
                        h
                    ),
                });
            }
        }
    }
}

fn check_unsettled(result: &LayoutResult, warnings: &mut Vec<LintWarning>) {
    for placement in result.placements.iter().filter(|p| !p.settled) {
        warnings.push(LintWarning {
            category: LintCategory::Label,
            message: format!(
                "label of zone #{} is still too close to an earlier label after {} nudges",
                placement.zone + 1,
                placement.attempts
            ),
        });
    }
}

// ── Marker badges ────────────────────────────────────────────────

fn check_badges(result: &LayoutResult, factor: f64, warnings: &mut Vec<LintWarning>) {
    let badges: Vec<&TextBlock> = result
        .text_blocks()
        .filter(|b| b.role == TextRole::Badge)
        .collect();

    for badge in &badges {
        let bounds = text_bounds(badge, factor);
        if let Some(i) = result.footprints.iter().position(|f| f.intersects(&bounds)) {
            warnings.push(LintWarning {
                category: LintCategory::Badge,
                message: format!(
                    "badge {} at ({:.0}, {:.0}) covers the label of zone #{}",
                    display_label(&badge.lines),
                    badge.x,
                    badge.y,
                    result.placements[i].zone + 1
                ),
            });
        }
    }

    for i in 0..badges.len() {
        for j in (i + 1)..badges.len() {
            let (a, b) = (text_bounds(badges[i], factor), text_bounds(badges[j], factor));
            if a.intersects(&b) {
                warnings.push(LintWarning {
                    category: LintCategory::Badge,
                    message: format!(
                        "badges {} and {} overlap near ({:.0}, {:.0})",
                        display_label(&badges[i].lines),
                        display_label(&badges[j].lines),
                        badges[j].x,
                        badges[j].y
                    ),
                });
            }
        }
    }
}

// ── Zone geometry ────────────────────────────────────────────────

fn check_geometry(result: &LayoutResult, warnings: &mut Vec<LintWarning>) {
    for rect in result.rects() {
        if rect.width < 0.0 || rect.height < 0.0 {
            warnings.push(LintWarning {
                category: LintCategory::Geometry,
                message: format!(
                    "zone at ({}, {}) has reversed corners (width {}, height {}) and will not render",
                    rect.x, rect.y, rect.width, rect.height
                ),
            });
        }
    }
}

// ── Canvas bounds ────────────────────────────────────────────────

fn check_canvas(result: &LayoutResult, factor: f64, warnings: &mut Vec<LintWarning>) {
    let canvas = BoundingBox::new(0.0, 0.0, result.canvas.width, result.canvas.height);
    for primitive in &result.primitives {
        let (what, bounds) = match primitive {
            Primitive::Rect { bounds } => ("zone", *bounds),
            Primitive::Text(block) => ("text", text_bounds(block, factor)),
            Primitive::Circle { center, radius, .. } => (
                "marker",
                BoundingBox::new(
                    center.x - radius,
                    center.y - radius,
                    radius * 2.0,
                    radius * 2.0,
                ),
            ),
            Primitive::Image { .. } => continue,
        };
        if !bounds.within(&canvas) {
            warnings.push(LintWarning {
                category: LintCategory::Canvas,
                message: format!(
                    "{} at ({:.0}, {:.0}) extends past the {}x{} canvas",
                    what, bounds.x, bounds.y, result.canvas.width, result.canvas.height
                ),
            });
        }
    }
}

//! Layout engine: zones and markers to positioned primitives

use tracing::{debug, warn};

use super::config::LayoutConfig;
use super::offsets::ProfileOffsets;
use super::overlap::{self, OverlapParams};
use super::text;
use super::types::*;

/// Zone label footprints placed so far in one layout pass
///
/// Grows monotonically; entries are never removed or changed once pushed.
#[derive(Debug, Default)]
struct PlacedFootprints(Vec<Footprint>);

impl PlacedFootprints {
    fn as_slice(&self) -> &[Footprint] {
        &self.0
    }

    fn push(&mut self, footprint: Footprint) {
        self.0.push(footprint);
    }

    fn into_inner(self) -> Vec<Footprint> {
        self.0
    }
}

/// Compute positions for every zone and marker
///
/// Zones are laid out in input order, each label resolved against the labels
/// of earlier zones, so reordering zones can change where labels end up.
/// Marker badges are placed around their anchor without overlap checks.
pub fn layout(
    zones: &[Zone],
    markers: &[Marker],
    profiles: &[Profile],
    canvas: Size,
    config: &LayoutConfig,
) -> LayoutResult {
    let mut result = LayoutResult::new(canvas);
    let mut placed = PlacedFootprints::default();

    for (index, zone) in zones.iter().enumerate() {
        layout_zone(index, zone, config, &mut placed, &mut result);
    }
    result.footprints = placed.into_inner();

    let offsets = ProfileOffsets::new(profiles, config.marker_radius);
    for (index, marker) in markers.iter().enumerate() {
        layout_marker(index, marker, profiles, &offsets, config, &mut result);
    }

    debug!(
        primitives = result.primitives.len(),
        skipped = result.skipped.len(),
        "layout complete"
    );
    result
}

fn layout_zone(
    index: usize,
    zone: &Zone,
    config: &LayoutConfig,
    placed: &mut PlacedFootprints,
    result: &mut LayoutResult,
) {
    let Some((a, b)) = zone.corners() else {
        debug!(zone = index, label = %zone.label, "skipping zone without two corners");
        result.skipped.push(SkippedRecord {
            kind: RecordKind::Zone,
            index,
        });
        return;
    };

    result.primitives.push(Primitive::Rect {
        bounds: BoundingBox::from_corners(a, b),
    });

    let measure = text::measure_with_factor(
        &zone.label,
        zone.font_size,
        config.max_chars_per_line,
        config.char_width_factor,
    );
    let initial = initial_label_position(a, b, measure.width, measure.height);

    let params = OverlapParams {
        buffer: config.overlap_buffer,
        max_attempts: config.max_attempts,
        step: config.nudge_step,
    };
    let resolution = overlap::resolve(
        placed.as_slice(),
        initial.x,
        initial.y,
        measure.width,
        measure.height,
        &params,
    );
    if !resolution.settled {
        warn!(
            zone = index,
            label = %zone.label,
            attempts = resolution.attempts,
            "zone label still overlaps after exhausting nudges"
        );
    }

    placed.push(Footprint::new(
        resolution.x,
        resolution.y,
        measure.width,
        measure.height,
    ));
    result.placements.push(LabelPlacement {
        zone: index,
        initial,
        resolved: Point::new(resolution.x, resolution.y),
        attempts: resolution.attempts,
        settled: resolution.settled,
    });
    result.primitives.push(Primitive::Text(TextBlock {
        x: resolution.x,
        y: resolution.y + zone.font_size,
        lines: measure.lines,
        font_size: zone.font_size,
        role: TextRole::ZoneLabel,
    }));
}

/// Top-left of a label block centered between two corners
///
/// Halving floors, matching integer division on whole-pixel input.
pub fn initial_label_position(a: Point, b: Point, width: f64, height: f64) -> Point {
    let center_x = ((a.x + b.x) / 2.0).floor();
    let center_y = ((a.y + b.y) / 2.0).floor();
    Point::new(
        center_x - (width / 2.0).floor(),
        center_y - (height / 2.0).floor(),
    )
}

fn layout_marker(
    index: usize,
    marker: &Marker,
    profiles: &[Profile],
    offsets: &ProfileOffsets,
    config: &LayoutConfig,
    result: &mut LayoutResult,
) {
    let Some(position) = marker.position else {
        debug!(point = index, "skipping point without a position");
        result.skipped.push(SkippedRecord {
            kind: RecordKind::Marker,
            index,
        });
        return;
    };

    for profile in profiles {
        if !marker.is_member(&profile.key) {
            continue;
        }
        let Some((dx, dy)) = offsets.get(&profile.key) else {
            continue;
        };
        let center = position.offset(dx, dy);
        result.primitives.push(Primitive::Circle {
            center,
            radius: config.marker_radius,
            color: profile.color,
        });
        result.primitives.push(Primitive::Text(TextBlock {
            x: center.x + config.marker_radius + config.badge_gap,
            y: center.y + config.badge_font_size / 2.0,
            lines: vec![profile.display_name.clone()],
            font_size: config.badge_font_size,
            role: TextRole::Badge,
        }));
    }
}

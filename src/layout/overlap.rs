//! Greedy overlap avoidance for zone labels
//!
//! A candidate label is compared against every footprint placed before it.
//! While it is too close to any of them it is nudged by a fixed step,
//! cycling left, down, right, up. The search is bounded: once the attempt
//! budget runs out the last position is kept even if it still overlaps.

use super::types::Footprint;

/// Tuning for the overlap search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapParams {
    pub buffer: f64,
    pub max_attempts: usize,
    pub step: f64,
}

impl Default for OverlapParams {
    fn default() -> Self {
        Self {
            buffer: 15.0,
            max_attempts: 10,
            step: 15.0,
        }
    }
}

/// Outcome of resolving one candidate position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub x: f64,
    pub y: f64,
    /// Number of nudges applied
    pub attempts: usize,
    /// False when the budget ran out before a clear position was found
    pub settled: bool,
}

/// Buffered "too close" test
///
/// Compares the per-axis distance between the two boxes' anchors against
/// their combined half-extents plus `buffer`. Both axes must be too close
/// for the boxes to count as overlapping.
pub fn overlaps(a: &Footprint, b: &Footprint, buffer: f64) -> bool {
    (a.x - b.x).abs() < (a.width + b.width) / 2.0 + buffer
        && (a.y - b.y).abs() < (a.height + b.height) / 2.0 + buffer
}

/// Apply the nudge for the given attempt number
fn nudge(x: f64, y: f64, attempt: usize, step: f64) -> (f64, f64) {
    match attempt % 4 {
        0 => (x - step, y),
        1 => (x, y + step),
        2 => (x + step, y),
        _ => (x, y - step),
    }
}

/// Find a position for a `width` x `height` block near `(x, y)` that is
/// clear of every footprint in `existing`
pub fn resolve(
    existing: &[Footprint],
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    params: &OverlapParams,
) -> Resolution {
    let (mut x, mut y) = (x, y);
    for attempt in 0..params.max_attempts {
        let candidate = Footprint::new(x, y, width, height);
        if !existing
            .iter()
            .any(|placed| overlaps(placed, &candidate, params.buffer))
        {
            return Resolution {
                x,
                y,
                attempts: attempt,
                settled: true,
            };
        }
        (x, y) = nudge(x, y, attempt, params.step);
    }

    let candidate = Footprint::new(x, y, width, height);
    let settled = !existing
        .iter()
        .any(|placed| overlaps(placed, &candidate, params.buffer));
    Resolution {
        x,
        y,
        attempts: params.max_attempts,
        settled,
    }
}

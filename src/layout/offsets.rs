//! Radial offsets for markers sharing one anchor point

use std::f64::consts::PI;

use super::types::Profile;

/// Evenly spaced offsets on a circle of radius `2 * radius` around the origin
///
/// Offset `i` sits at angle `2πi / count`, starting on the positive x axis.
pub fn generate(count: usize, radius: f64) -> Vec<(f64, f64)> {
    (0..count)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / count as f64;
            (radius * 2.0 * angle.cos(), radius * 2.0 * angle.sin())
        })
        .collect()
}

/// Angular slots assigned to profiles in table order
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileOffsets {
    slots: Vec<(String, (f64, f64))>,
}

impl ProfileOffsets {
    pub fn new(profiles: &[Profile], radius: f64) -> Self {
        let offsets = generate(profiles.len(), radius);
        Self {
            slots: profiles
                .iter()
                .map(|p| p.key.clone())
                .zip(offsets)
                .collect(),
        }
    }

    /// Offset assigned to a profile key
    pub fn get(&self, key: &str) -> Option<(f64, f64)> {
        self.slots
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, offset)| *offset)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// Cluster placement: pedestals on a horizontal ring around the origin.
//
// Deterministic. Same cluster count and order => same arrangement.

use std::f64::consts::TAU;

use crate::model::Vec3;

/// Angle (radians) of slot `index` out of `count` evenly spaced slots.
/// `count` must be non-zero.
pub fn slot_angle(index: usize, count: usize) -> f64 {
    (index as f64 / count as f64) * TAU
}

/// World position of cluster `index` of `count` on a ring of `radius`, at height 0.
pub fn ring_position(index: usize, count: usize, radius: f64) -> Vec3 {
    let angle = slot_angle(index, count);
    Vec3 { x: radius * angle.cos(), y: 0.0, z: radius * angle.sin() }
}

// Item placement: scatter a cluster's members around its pedestal.
//
// Each item gets an even angular slot, then a random radius and height drawn
// from half-open ranges. The ranges are a hard contract; exact coordinates
// are not reproducible unless the unit source is.

use std::ops::Range;

use rand::Rng;

use super::ring::slot_angle;
use super::GalleryConfig;
use crate::model::{Node, Vec3};

/// Source of uniform samples in `[0, 1)`.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> UnitSource for R {
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
/// An empty list yields `0.0` forever.
#[derive(Debug, Clone)]
pub struct FixedUnits {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedUnits {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl UnitSource for FixedUnits {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

/// A node with its offset from the cluster origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    pub node: Node,
    /// Slot angle around the pedestal (radians).
    pub angle: f64,
    /// Horizontal distance from the pedestal center.
    pub radius: f64,
    pub local_position: Vec3,
}

impl PlacedItem {
    /// Height above the pedestal base.
    pub fn height(&self) -> f64 {
        self.local_position.y
    }
}

/// Place every member of one cluster. Draws two samples per item: radius, then height.
pub fn place_items<U: UnitSource + ?Sized>(
    nodes: Vec<Node>,
    cfg: &GalleryConfig,
    units: &mut U,
) -> Vec<PlacedItem> {
    let count = nodes.len();
    nodes
        .into_iter()
        .enumerate()
        .map(|(j, node)| {
            let angle = slot_angle(j, count);
            let radius = sample_half_open(&cfg.item_radius, units.next_unit());
            let height = sample_half_open(&cfg.item_height, units.next_unit());
            PlacedItem {
                node,
                angle,
                radius,
                local_position: Vec3 {
                    x: radius * angle.cos(),
                    y: height,
                    z: radius * angle.sin(),
                },
            }
        })
        .collect()
}

/// Map a unit sample onto `range`, never reaching `range.end`.
///
/// Out-of-range or non-finite samples are clamped first. `start + u * span`
/// can round up to `end` for `u` just below 1, so the result is pulled back
/// to the largest float below `end` in that case.
pub fn sample_half_open(range: &Range<f64>, unit: f64) -> f64 {
    let u = if unit.is_finite() { unit.clamp(0.0, 1.0) } else { 0.0 };
    let v = range.start + u * (range.end - range.start);
    if v >= range.end && range.end > range.start {
        next_below(range.end).max(range.start)
    } else {
        v
    }
}

fn next_below(x: f64) -> f64 {
    if x > 0.0 {
        f64::from_bits(x.to_bits() - 1)
    } else if x == 0.0 {
        -f64::from_bits(1)
    } else {
        f64::from_bits(x.to_bits() + 1)
    }
}

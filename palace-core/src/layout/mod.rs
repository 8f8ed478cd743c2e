// Gallery layout.
//
// Turns a flat node batch into a gallery tree:
//   gallery origin -> clusters on a ring -> items scattered on each pedestal
//
// Goals:
// - Every node appears exactly once, under its own cluster
// - Cluster order and member order follow first appearance in the input
// - Ring placement is deterministic; item scatter is random within fixed bounds
// - The whole tree is rebuilt per batch; nothing is shared between passes
//
// Submodules:
// - grouping: stable partition by group key
// - ring: cluster positions
// - scatter: item offsets and the injectable unit source

use std::ops::Range;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::{GroupKey, Node, Vec3};

mod grouping;
mod ring;
mod scatter;

pub use grouping::group_nodes;
pub use ring::{ring_position, slot_angle};
pub use scatter::{place_items, sample_half_open, FixedUnits, PlacedItem, UnitSource};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Distance from the gallery origin to each pedestal center.
    pub ring_radius: f64,
    /// Item distance from its pedestal center, half-open.
    pub item_radius: Range<f64>,
    /// Item height above its pedestal base, half-open.
    pub item_height: Range<f64>,
    /// Prefix for cluster titles ("TOPIC 3").
    pub title_prefix: String,
    /// Characters kept in an item's short caption.
    pub preview_chars: usize,
    /// Shown by the renderer when there are no clusters.
    pub placeholder: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            ring_radius: 8.0,
            item_radius: 1.5..2.0,
            item_height: 1.0..2.5,
            title_prefix: "TOPIC".to_string(),
            preview_chars: 15,
            placeholder: "Waiting for Knowledge...".to_string(),
        }
    }
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ring_radius.is_finite() || self.ring_radius < 0.0 {
            return Err(ConfigError::InvalidRadius { field: "ring_radius", value: self.ring_radius });
        }
        check_range("item_radius", &self.item_radius)?;
        if self.item_radius.start < 0.0 {
            return Err(ConfigError::InvalidRadius {
                field: "item_radius",
                value: self.item_radius.start,
            });
        }
        check_range("item_height", &self.item_height)
    }
}

fn check_range(field: &'static str, r: &Range<f64>) -> Result<(), ConfigError> {
    // The span must be finite too, or sampling yields NaN.
    if r.start.is_finite() && r.end.is_finite() && r.start < r.end && (r.end - r.start).is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { field, start: r.start, end: r.end })
    }
}

/// One pedestal: its group, ring position and placed members.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Group key; also the display label.
    pub key: GroupKey,
    /// Angle on the ring (radians).
    pub angle: f64,
    pub position: Vec3,
    pub items: Vec<PlacedItem>,
}

impl Cluster {
    pub fn label(&self) -> String {
        self.key.to_string()
    }

    /// World position of an item (cluster position + local offset).
    pub fn world_position(&self, item: &PlacedItem) -> Vec3 {
        self.position.offset(&item.local_position)
    }
}

/// Root of the layout tree. Clusters are in first-seen group order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gallery {
    pub clusters: Vec<Cluster>,
}

impl Gallery {
    pub const ORIGIN: Vec3 = Vec3::ORIGIN;

    /// No clusters: "no data yet".
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.clusters.iter().map(|c| c.items.len()).sum()
    }

    pub fn cluster(&self, key: &GroupKey) -> Option<&Cluster> {
        self.clusters.iter().find(|c| &c.key == key)
    }
}

/// Group `nodes` and lay the result out.
pub fn layout_gallery<U: UnitSource + ?Sized>(
    nodes: &[Node],
    cfg: &GalleryConfig,
    units: &mut U,
) -> Gallery {
    let grouped = group_nodes(nodes);
    tracing::debug!(nodes = nodes.len(), clusters = grouped.len(), "grouped nodes");
    assemble(grouped, cfg, units)
}

/// Lay out already-grouped nodes. Empty groups become clusters with no items.
pub fn assemble<U: UnitSource + ?Sized>(
    grouped: IndexMap<GroupKey, Vec<Node>>,
    cfg: &GalleryConfig,
    units: &mut U,
) -> Gallery {
    let count = grouped.len();
    let clusters = grouped
        .into_iter()
        .enumerate()
        .map(|(i, (key, members))| {
            if members.is_empty() {
                tracing::debug!(cluster = %key, "cluster has no members");
            }
            Cluster {
                key,
                angle: slot_angle(i, count),
                position: ring_position(i, count, cfg.ring_radius),
                items: place_items(members, cfg, units),
            }
        })
        .collect();
    Gallery { clusters }
}

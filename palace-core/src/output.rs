//! Output types for renderer consumption.
//!
//! These structs are serialized to JSON and handed to the 3D frontend,
//! which turns each cluster into a pedestal with a title and each item into
//! a floating marker with a caption and a tether line.

use serde::Serialize;

use crate::layout::{Cluster, Gallery, GalleryConfig, PlacedItem};

/// A placed item ready for the renderer, in its cluster's local frame.
#[derive(Debug, Clone, Serialize)]
pub struct ItemOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub text: String,
    /// Short caption shown until the item is hovered
    pub preview: String,
    pub position: [f64; 3],
    pub world_position: [f64; 3],
    /// Line from the item down to the pedestal base, local to the item
    pub tether: [[f64; 3]; 2],
}

/// A pedestal and its items
#[derive(Debug, Clone, Serialize)]
pub struct ClusterOutput {
    pub label: String,
    pub title: String,
    pub angle: f64,
    pub position: [f64; 3],
    pub items: Vec<ItemOutput>,
}

/// Error information for the frontend notification
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub message: String,
}

/// The combined output sent to the renderer
#[derive(Debug, Clone, Default, Serialize)]
pub struct SceneOutput {
    pub clusters: Vec<ClusterOutput>,
    /// Present only when there is nothing to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    /// Input records that were patched up while decoding
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl SceneOutput {
    pub fn from_gallery(gallery: &Gallery, cfg: &GalleryConfig) -> Self {
        let clusters = gallery.clusters.iter().map(|c| cluster_output(c, cfg)).collect();
        let placeholder = gallery.is_empty().then(|| cfg.placeholder.clone());
        Self { clusters, placeholder, error: None, warnings: Vec::new() }
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(ErrorInfo { message: message.into() });
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{\"clusters\":[]}".to_string())
    }
}

fn cluster_output(cluster: &Cluster, cfg: &GalleryConfig) -> ClusterOutput {
    let label = cluster.label();
    ClusterOutput {
        title: format!("{} {}", cfg.title_prefix, label),
        label,
        angle: cluster.angle,
        position: cluster.position.to_array(),
        items: cluster.items.iter().map(|i| item_output(cluster, i, cfg)).collect(),
    }
}

fn item_output(cluster: &Cluster, item: &PlacedItem, cfg: &GalleryConfig) -> ItemOutput {
    ItemOutput {
        id: item.node.id,
        text: item.node.text.clone(),
        preview: preview(&item.node.text, cfg.preview_chars),
        position: item.local_position.to_array(),
        world_position: cluster.world_position(item).to_array(),
        tether: [[0.0, 0.0, 0.0], [0.0, -item.height(), 0.0]],
    }
}

/// First `chars` characters followed by an ellipsis.
pub fn preview(text: &str, chars: usize) -> String {
    let mut out: String = text.chars().take(chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout_gallery, FixedUnits};
    use crate::model::Node;
    use serde_json::Value;

    #[test]
    fn test_preview_counts_characters() {
        assert_eq!(preview("建筑学是凝固的音乐。古罗马的万神殿拥有", 15), "建筑学是凝固的音乐。古罗马的万...");
        assert_eq!(preview("short", 15), "short...");
        assert_eq!(preview("", 15), "...");
    }

    #[test]
    fn test_empty_gallery_carries_placeholder() {
        let out = SceneOutput::from_gallery(&Gallery::default(), &GalleryConfig::default());
        let json: Value = serde_json::from_str(&out.to_json()).unwrap();
        assert_eq!(json["clusters"], Value::Array(vec![]));
        assert_eq!(json["placeholder"], "Waiting for Knowledge...");
        assert!(json.get("error").is_none());
        assert!(json.get("warnings").is_none());
    }

    #[test]
    fn test_scene_shape() {
        let cfg = GalleryConfig::default();
        let nodes = vec![Node::new("Pantheon dome").with_group(4).with_id(9)];
        let gallery = layout_gallery(&nodes, &cfg, &mut FixedUnits::new(vec![0.0, 0.0]));
        let json: Value = serde_json::from_str(&SceneOutput::from_gallery(&gallery, &cfg).to_json()).unwrap();

        assert!(json.get("placeholder").is_none());
        let cluster = &json["clusters"][0];
        assert_eq!(cluster["label"], "4");
        assert_eq!(cluster["title"], "TOPIC 4");
        assert_eq!(cluster["position"][0], 8.0);

        let item = &cluster["items"][0];
        assert_eq!(item["id"], 9);
        assert_eq!(item["text"], "Pantheon dome");
        assert_eq!(item["preview"], "Pantheon dome...");
        assert_eq!(item["position"][0], 1.5);
        assert_eq!(item["position"][1], 1.0);
        assert_eq!(item["world_position"][0], 9.5);
        assert_eq!(item["tether"][1][1], -1.0);
    }

    #[test]
    fn test_error_is_serialized() {
        let out = SceneOutput::default().with_error("boom");
        let json: Value = serde_json::from_str(&out.to_json()).unwrap();
        assert_eq!(json["error"]["message"], "boom");
    }

    #[test]
    fn test_warnings_are_serialized() {
        let out = SceneOutput::default().with_warnings(vec!["node 2: malformed record".to_string()]);
        let json: Value = serde_json::from_str(&out.to_json()).unwrap();
        assert_eq!(json["warnings"][0], "node 2: malformed record");
    }
}

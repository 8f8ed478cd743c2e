//! Decoding of analysis-service responses.
//!
//! The service answers `{"nodes": [...], "links": [...]}` or
//! `{"error": "..."}`. Only `nodes` matters here. Decoding is lenient per
//! record: a malformed node becomes a placeholder instead of failing the
//! batch.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{PayloadError, Result};
use crate::model::{GroupKey, Node};

#[derive(Debug, Default, Deserialize)]
struct RawNode {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    text: Option<Value>,
    #[serde(default)]
    full_text: Option<Value>,
    #[serde(default)]
    group: Option<Value>,
}

/// Nodes decoded from one response, plus notes about records that had to
/// be patched up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decoded {
    pub nodes: Vec<Node>,
    pub warnings: Vec<String>,
}

/// Decode an analysis response into nodes, in payload order.
///
/// A missing or null `nodes` field means "no data" and yields an empty list.
pub fn decode_payload(json: &str) -> Result<Decoded> {
    let value: Value = serde_json::from_str(json)?;
    decode_value(value)
}

pub fn decode_value(value: Value) -> Result<Decoded> {
    let mut obj = match value {
        Value::Object(obj) => obj,
        other => return Err(PayloadError::NotAnObject { found: json_type(&other) }),
    };

    let mut decoded = Decoded::default();
    let nodes = match obj.remove("nodes") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => {
            if let Some(Value::String(msg)) = obj.remove("error") {
                return Err(PayloadError::Backend(msg));
            }
            return Ok(decoded);
        }
        Some(other) => {
            decoded.warn(format!("`nodes` is a {}, not an array; treating as empty", json_type(&other)));
            return Ok(decoded);
        }
    };

    for (i, v) in nodes.into_iter().enumerate() {
        let node = decoded.decode_node(i, v);
        decoded.nodes.push(node);
    }
    Ok(decoded)
}

impl Decoded {
    fn warn(&mut self, message: String) {
        tracing::warn!("{}", message);
        self.warnings.push(message);
    }

    fn decode_node(&mut self, index: usize, value: Value) -> Node {
        let raw = match serde_json::from_value::<RawNode>(value) {
            Ok(raw) => raw,
            Err(e) => {
                self.warn(format!("node {}: malformed record ({}), using placeholder", index, e));
                RawNode::default()
            }
        };

        let text = raw
            .full_text
            .and_then(string_value)
            .or_else(|| raw.text.and_then(string_value))
            .unwrap_or_default();

        let group = match raw.group.map(group_value) {
            Some(Ok(key)) => key,
            Some(Err(found)) => {
                self.warn(format!("node {}: unsupported group value ({}), left ungrouped", index, found));
                None
            }
            None => None,
        };

        Node { id: raw.id.as_ref().and_then(Value::as_u64), text, group }
    }
}

fn string_value(v: Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Map a JSON `group` to a key, following how the value would print as a
/// JS object key. Falsy values (null, false, "", 0) count as absent and end
/// up in the ungrouped cluster. Arrays and objects are rejected.
fn group_value(v: Value) -> std::result::Result<Option<GroupKey>, &'static str> {
    match v {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some(GroupKey::from_label("true"))),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(GroupKey::from_label(s))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Some(GroupKey::Int(i)))
            } else if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64) {
                Ok(Some(GroupKey::Int(f as i64)))
            } else {
                // u64 beyond i64 range or fractional
                Ok(Some(GroupKey::from_label(n.to_string())))
            }
        }
        other => Err(json_type(&other)),
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_service_response() {
        let json = r#"{
            "nodes": [
                {"id": 0, "text": "Gothic cathedrals use ...", "full_text": "Gothic cathedrals use flying buttresses.", "group": 2, "fx": 1.0},
                {"id": 1, "text": "Short", "group": 0}
            ],
            "links": [{"source": 0, "target": 1}]
        }"#;
        let nodes = decode_payload(json).unwrap().nodes;

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].text, "Gothic cathedrals use flying buttresses.");
        assert_eq!(nodes[0].group, Some(GroupKey::Int(2)));
        assert_eq!(nodes[0].id, Some(0));
        assert_eq!(nodes[1].text, "Short");
        assert_eq!(nodes[1].group_key(), GroupKey::UNGROUPED);
    }

    #[test]
    fn test_missing_nodes_means_no_data() {
        assert!(decode_payload("{}").unwrap().nodes.is_empty());
        assert!(decode_payload(r#"{"nodes": null}"#).unwrap().nodes.is_empty());
        let odd = decode_payload(r#"{"nodes": "oops"}"#).unwrap();
        assert!(odd.nodes.is_empty());
        assert_eq!(odd.warnings.len(), 1);
    }

    #[test]
    fn test_backend_error_is_reported() {
        let err = decode_payload(r#"{"error": "Text too short. Please provide at least 5 lines."}"#).unwrap_err();
        assert!(matches!(err, PayloadError::Backend(ref m) if m.starts_with("Text too short")));
    }

    #[test]
    fn test_invalid_json_and_non_object() {
        assert!(matches!(decode_payload("{nodes"), Err(PayloadError::Json(_))));
        assert!(matches!(decode_payload("[1, 2]"), Err(PayloadError::NotAnObject { found: "array" })));
    }

    #[test]
    fn test_malformed_records_do_not_fail_batch() {
        let json = r#"{"nodes": [
            "not a record",
            {"group": 1},
            {"text": 42, "group": "A"},
            {"text": "fine", "group": 1}
        ]}"#;
        let decoded = decode_payload(json).unwrap();
        let nodes = &decoded.nodes;

        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0].text, "");
        assert_eq!(nodes[0].group, None);
        assert_eq!(nodes[1].text, "");
        assert_eq!(nodes[1].group, Some(GroupKey::Int(1)));
        assert_eq!(nodes[2].text, "");
        assert_eq!(nodes[2].group, Some(GroupKey::from("A")));
        assert_eq!(nodes[3].text, "fine");
        assert_eq!(decoded.warnings.len(), 1);
        assert!(decoded.warnings[0].starts_with("node 0: malformed record"));
    }

    #[test]
    fn test_group_value_forms() {
        let json = r#"{"nodes": [
            {"text": "a", "group": 3.0},
            {"text": "b", "group": ""},
            {"text": "c", "group": false},
            {"text": "d", "group": [1]},
            {"text": "e", "group": 1.5},
            {"text": "f", "group": null}
        ]}"#;
        let decoded = decode_payload(json).unwrap();
        assert_eq!(decoded.warnings, vec!["node 3: unsupported group value (array), left ungrouped".to_string()]);
        let groups: Vec<_> = decoded.nodes.into_iter().map(|n| n.group).collect();
        assert_eq!(
            groups,
            vec![
                Some(GroupKey::Int(3)),
                None,
                None,
                None,
                Some(GroupKey::from("1.5")),
                None,
            ]
        );
    }

    #[test]
    fn test_full_text_falls_back_to_text() {
        let json = r#"{"nodes": [{"text": "short", "full_text": null}]}"#;
        assert_eq!(decode_payload(json).unwrap().nodes[0].text, "short");
    }

    #[test]
    fn test_same_label_groups_share_a_cluster() {
        let json = r#"{"nodes": [
            {"text": "a", "group": 1},
            {"text": "b", "group": "1"},
            {"text": "c", "group": 1.5},
            {"text": "d", "group": "1.5"},
            {"text": "e"},
            {"text": "f", "group": "0"},
            {"text": "g", "group": true}
        ]}"#;
        let nodes = decode_payload(json).unwrap().nodes;
        let groups = crate::layout::group_nodes(&nodes);

        let summary: Vec<(String, Vec<&str>)> = groups
            .iter()
            .map(|(k, members)| (k.to_string(), members.iter().map(|n| n.text.as_str()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("1".to_string(), vec!["a", "b"]),
                ("1.5".to_string(), vec!["c", "d"]),
                ("0".to_string(), vec!["e", "f"]),
                ("true".to_string(), vec!["g"]),
            ]
        );
    }
}

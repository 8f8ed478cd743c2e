use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// Cluster tag attached to a node by the analysis service.
///
/// The service emits integer cluster labels, but hand-written payloads may
/// use names. Keys are identified by their display form: `Int(1)` and
/// `Name("1")` are the same cluster, as they would be as JS object keys.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Int(i64),
    Name(String),
}

impl GroupKey {
    /// Key used for nodes that carry no group.
    ///
    /// This is the same value as an explicit `group: 0`, so both land in one
    /// cluster. Whether `0` is a real category or only the "ungrouped"
    /// sentinel is not decided by the producer; keep them merged.
    pub const UNGROUPED: GroupKey = GroupKey::Int(0);

    /// Key for a textual label. Labels in canonical integer form ("7", "-2")
    /// become `Int`; anything else ("07", "1.5", "true") stays a name.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        match label.parse::<i64>() {
            Ok(n) if n.to_string() == label => GroupKey::Int(n),
            _ => GroupKey::Name(label),
        }
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (GroupKey::Int(a), GroupKey::Int(b)) => a == b,
            (GroupKey::Name(a), GroupKey::Name(b)) => a == b,
            _ => self.to_string() == other.to_string(),
        }
    }
}

impl Eq for GroupKey {}

impl Hash for GroupKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            GroupKey::Int(n) => n.to_string().hash(state),
            GroupKey::Name(s) => s.hash(state),
        }
    }
}

impl Default for GroupKey {
    fn default() -> Self {
        Self::UNGROUPED
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Int(n) => write!(f, "{}", n),
            GroupKey::Name(s) => f.write_str(s),
        }
    }
}

impl From<i64> for GroupKey {
    fn from(n: i64) -> Self {
        GroupKey::Int(n)
    }
}

impl From<i32> for GroupKey {
    fn from(n: i32) -> Self {
        GroupKey::Int(n.into())
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        GroupKey::from_label(s)
    }
}

/// One knowledge fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Identifier assigned by the analysis service, if any.
    pub id: Option<u64>,
    /// Display text (may be empty when the record had none).
    pub text: String,
    /// `None` => ungrouped
    pub group: Option<GroupKey>,
}

impl Node {
    pub fn new(text: impl Into<String>) -> Self {
        Self { id: None, text: text.into(), group: None }
    }

    pub fn with_group(mut self, group: impl Into<GroupKey>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// The partition key, falling back to [`GroupKey::UNGROUPED`].
    pub fn group_key(&self) -> GroupKey {
        self.group.clone().unwrap_or_default()
    }
}

/// 3D point in scene units (y is up).
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ORIGIN: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn offset(&self, other: &Vec3) -> Vec3 {
        Vec3 { x: self.x + other.x, y: self.y + other.y, z: self.z + other.z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

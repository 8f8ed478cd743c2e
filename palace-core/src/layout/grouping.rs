// Grouping stage: partition a flat node batch into clusters.
//
// Stable partition, not a sort: keys iterate in first-seen order and each
// member list keeps the input order.

use indexmap::IndexMap;

use crate::model::{GroupKey, Node};

/// Partition `nodes` by group key, preserving first-encounter order.
pub fn group_nodes(nodes: &[Node]) -> IndexMap<GroupKey, Vec<Node>> {
    let mut groups: IndexMap<GroupKey, Vec<Node>> = IndexMap::new();
    for node in nodes {
        groups.entry(node.group_key()).or_default().push(node.clone());
    }
    groups
}

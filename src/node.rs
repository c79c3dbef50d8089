use crate::value::Value;
use serde::{Deserialize, Serialize};

pub type NodeId = u64;

/// One element of the tree. Children are ids into the owning tree's arena,
/// kept in insertion order; the parent link is a back-reference by id, not
/// an owning pointer, so the structure stays a strict tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub value: Value,
    pub level: u64,
    pub kids: Vec<NodeId>,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

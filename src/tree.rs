use crate::error::SdsError;
use crate::node::{Node, NodeId};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// N-ary tree over heterogeneous scalar values.
///
/// Nodes live in a flat arena indexed by id; ids are dense and assigned by
/// the tree-owned counter, so a freshly constructed tree always numbers its
/// root 0 and the next node 1. The counter is a field, never a process-wide
/// static, which keeps concurrent construction of separate trees safe.
///
/// Not designed for concurrent mutation of one tree; callers needing that
/// must serialize access externally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NaryTree {
    nodes: Vec<Node>,
    next_id: NodeId,
}

/// One linearized node, in the shape the display and dump layers consume.
#[derive(Debug, Serialize)]
pub struct Row<'a> {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub level: u64,
    pub value: &'a Value,
}

impl NaryTree {
    /// Empty tree: a single placeholder root holding `Value::Undefined`.
    /// The placeholder is replaced by the first decoded root record.
    pub fn new() -> Self {
        Self::with_root(Value::Undefined)
    }

    pub fn with_root(value: Value) -> Self {
        let root = Node {
            id: 0,
            parent: None,
            value,
            level: 0,
            kids: Vec::new(),
        };
        Self {
            nodes: vec![root],
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.nodes[0].value.is_undefined()
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// O(1) lookup: ids are dense arena indices.
    pub fn find_by_id(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Appends a child under `parent`, allocating the next id. The new
    /// node's level is exactly one greater than the parent's.
    pub fn add_child(&mut self, parent: NodeId, value: Value) -> Result<NodeId, SdsError> {
        let parent_level = self
            .nodes
            .get(parent as usize)
            .map(|n| n.level)
            .ok_or(SdsError::NodeNotFound(parent))?;

        let id = self.next_id;
        self.next_id += 1;

        self.nodes.push(Node {
            id,
            parent: Some(parent),
            value,
            level: parent_level + 1,
            kids: Vec::new(),
        });
        self.nodes[parent as usize].kids.push(id);
        Ok(id)
    }

    /// Applies one decoded `(value, parent)` pair.
    ///
    /// A pair with no parent replaces the placeholder root's value and is
    /// only legal while the root is still undefined: decoded streams must
    /// carry their root record first and exactly once.
    pub fn insert(&mut self, value: Value, parent: Option<NodeId>) -> Result<NodeId, SdsError> {
        match parent {
            None => {
                if !self.nodes[0].value.is_undefined() {
                    return Err(SdsError::Deserialisation(
                        "second root record in stream".to_string(),
                    ));
                }
                self.nodes[0].value = value;
                Ok(0)
            }
            Some(pid) => {
                if self.find_by_id(pid).is_none() {
                    return Err(SdsError::MissingParent(pid));
                }
                self.add_child(pid, value)
            }
        }
    }

    /// Breadth-first traversal order: root first, then each level left to
    /// right in child-append order. Canonical for display and serialization;
    /// identical calls on an unmodified tree yield identical sequences.
    pub fn linearize(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::new();
        queue.push_back(0 as NodeId);

        while let Some(id) = queue.pop_front() {
            order.push(id);
            for kid in &self.nodes[id as usize].kids {
                queue.push_back(*kid);
            }
        }

        order
    }

    /// Linearized `(id, parent, level, value)` rows, the contract consumed
    /// by the console and dump layers.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.linearize().into_iter().map(|id| {
            let node = &self.nodes[id as usize];
            Row {
                id: node.id,
                parent: node.parent,
                level: node.level,
                value: &node.value,
            }
        })
    }
}

impl Default for NaryTree {
    fn default() -> Self {
        Self::new()
    }
}

/// The 13-node demo tree used by the CLI and the tests.
pub fn sample_tree() -> Result<NaryTree, SdsError> {
    let mut tree = NaryTree::with_root(Value::Int(8));

    let bar = tree.add_child(0, Value::Str("bar".to_string()))?;
    let baz = tree.add_child(0, Value::Str("baz".to_string()))?;

    let d1 = tree.add_child(bar, Value::Double(2.015))?;
    tree.add_child(bar, Value::Int(2015))?;
    tree.add_child(bar, Value::Str("2015".to_string()))?;

    tree.add_child(baz, Value::Str("foo".to_string()))?;
    let d2 = tree.add_child(baz, Value::Double(6.28318))?;

    let nine = tree.add_child(d1, Value::Int(9))?;
    let hello = tree.add_child(d2, Value::Str("hello".to_string()))?;

    tree.add_child(nine, Value::Str("Hey!".to_string()))?;
    tree.add_child(nine, Value::Str("Bye".to_string()))?;
    tree.add_child(hello, Value::Double(3.14159))?;

    Ok(tree)
}

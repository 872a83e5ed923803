//! Input node type and node identifiers.
//!
//! Each node has:
//! - A caller-assigned identifier, unique across the whole tree
//! - A title and a free-form description
//! - An ordered list of children (possibly empty)

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::Result;

/// Caller-assigned node identifier.
///
/// Identifiers must be unique across a tree. The layout does not enforce
/// this; selection and outline lookups key by id, so duplicates resolve to
/// whichever node was indexed first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new NodeId from anything string-like.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    #[inline]
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<NodeId> for String {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// One concept in the mindmap.
///
/// Accepts both `id` and the session service's `node_id` spelling. Missing
/// `description` becomes empty, and `children` may be absent or `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputNode {
    #[serde(alias = "node_id")]
    pub id: NodeId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<InputNode>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<InputNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<InputNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl InputNode {
    /// Create a leaf node.
    pub fn new(id: impl Into<NodeId>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper that appends a child.
    pub fn with_child(mut self, child: InputNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style helper that appends several children in order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = InputNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Parse a tree from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(InputNode::subtree_len).sum::<usize>()
    }
}

//! Error type shared by the engine and the wasm facade.

use thiserror::Error;

use crate::tree::NodeId;

pub type Result<T> = std::result::Result<T, MindmapError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MindmapError {
    #[error("invalid tree: {0}")]
    InvalidTree(String),

    #[error("malformed config: {0}")]
    MalformedConfig(String),

    #[error("invalid config: {field} is out of range")]
    InvalidConfig { field: &'static str },

    #[error("unknown node: {id}")]
    UnknownNode { id: NodeId },

    #[error("no tree loaded")]
    NoTree,
}

impl MindmapError {
    #[must_use]
    pub fn unknown_node(id: impl Into<NodeId>) -> Self {
        Self::UnknownNode { id: id.into() }
    }
}

impl From<serde_json::Error> for MindmapError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidTree(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for MindmapError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::InvalidTree(err.to_string())
    }
}

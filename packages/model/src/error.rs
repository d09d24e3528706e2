//! Error types for the document model

use crate::node::NodeKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeKey),

    #[error("Node is not text: {0}")]
    NotText(NodeKey),

    #[error("Node is not a block: {0}")]
    NotBlock(NodeKey),

    #[error("Offset {offset} out of bounds for node {key} (length {len})")]
    OffsetOutOfBounds {
        key: NodeKey,
        offset: usize,
        len: usize,
    },

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid path: {0:?}")]
    InvalidPath(Vec<usize>),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

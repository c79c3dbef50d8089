use crate::node::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported value kind: {0}")]
    UnsupportedValueKind(u32),

    #[error("Bad format: {0}")]
    BadFormat(String),

    #[error("Deserialisation error: {0}")]
    Deserialisation(String),

    #[error("Missing parent: {0}")]
    MissingParent(NodeId),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
}

//! Animation error types

use thiserror::Error;

use crate::scheduler::NodeId;

/// Errors raised while configuring tracks or wiring compositions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// Track keyframes, duration or start time are unusable
    #[error("invalid track configuration: {0}")]
    InvalidConfiguration(String),

    /// The node already belongs to a composition
    #[error("node {node:?} is already attached to {parent:?}")]
    DuplicateAttachment { node: NodeId, parent: NodeId },

    /// The node is the target composition or one of its ancestors
    #[error("attaching {node:?} under {parent:?} would create a cycle")]
    CyclicAttachment { node: NodeId, parent: NodeId },

    /// The id does not name a live node
    #[error("unknown animation node {0:?}")]
    UnknownNode(NodeId),

    /// Children can only be added to compositions
    #[error("node {0:?} is a track, not a composition")]
    NotAComposition(NodeId),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;

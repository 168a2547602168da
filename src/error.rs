//! Error types shared by the document model and the overlay host.

use thiserror::Error;

use crate::dom::NodeId;

/// Structural misuse of the arena document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0:?} does not exist in this document")]
    MissingNode(NodeId),
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("inserting {child:?} under {parent:?} would create a cycle")]
    HierarchyCycle { parent: NodeId, child: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// `detach` was requested while the placeholder marker had no parent,
    /// i.e. the host was never moved out by `attach`.
    #[error("overlay host {host:?} was closed without a prior attach")]
    NotAttached { host: NodeId },
    #[error("document error: {0}")]
    Dom(#[from] DomError),
}

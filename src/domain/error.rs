//! Domain-level errors (no external dependencies)

use std::convert::Infallible;

use thiserror::Error;

use crate::domain::arena::NodeId;

/// Domain errors represent misuse of the tree API.
/// Every variant is raised before the offending mutation takes effect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cannot attach a node without a title")]
    InvalidTitle,

    #[error("unsupported value type: {found}, expecting a scalar")]
    UnsupportedValueType { found: &'static str },

    #[error("circular reference detected while setting child to parent")]
    CircularReference { child: NodeId, parent: NodeId },

    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
}

impl From<Infallible> for DomainError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

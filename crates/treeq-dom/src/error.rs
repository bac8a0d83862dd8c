//! Tree construction errors

use crate::{InstanceId, NodeId};

/// Result type for tree operations
pub type DomResult<T> = Result<T, DomError>;

/// Tree operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node id does not belong to this tree
    #[error("node {0:?} not found")]
    NotFound(NodeId),
    /// Instance id does not belong to this tree
    #[error("component instance {0:?} not found")]
    InstanceNotFound(InstanceId),
    /// Inserting would re-parent a node or create a cycle
    #[error("hierarchy request error: cannot append {child:?} to {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    /// Attribute operations need an element
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    /// Ref registered where no stateful instance can hold it
    #[error("no non-functional component instance can own ref `{0}`")]
    NoRefOwner(String),
}

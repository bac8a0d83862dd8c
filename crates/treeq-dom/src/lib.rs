//! treeq DOM - Rendered tree model
//!
//! Arena-based tree of markup nodes with a component instance overlay.
//! A tree is produced once per render pass and only read by queries.

mod node;
mod tree;
mod component;
mod walker;
mod error;

pub use node::{Node, NodeData, ElementData};
pub use tree::DomTree;
pub use component::{ComponentDef, ComponentDefinition, ComponentInstance, RefBinding, RefTarget};
pub use walker::{Descendants, Ancestors};
pub use error::{DomError, DomResult};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node" (detached parent, unset root)
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Component instance identifier (index into the instance arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub(crate) u32);

impl InstanceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

//! Query scope
//!
//! The subtree a wrapper may search. The wrapper's own node takes part
//! only when `include_root` is set. For a component wrapper, instances
//! mounted at the same node but outside it (its own parents) are never in
//! scope, while instances nested inside it always are.

use treeq_dom::{DomTree, InstanceId, NodeId};

use crate::Target;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope {
    pub root: NodeId,
    pub include_root: bool,
    /// Index of the first in-scope instance at `root`
    floor: usize,
    /// Bound component, if any
    owner: Option<InstanceId>,
}

impl Scope {
    /// Scope of a wrapper target; `None` for the not-found sentinel
    pub fn new(tree: &DomTree, target: Target, include_root: bool) -> Option<Self> {
        match target {
            Target::Element(node) => tree.get(node).map(|_| Self {
                root: node,
                include_root,
                floor: 0,
                owner: None,
            }),
            Target::Component(id) => {
                let instance = tree.instance(id)?;
                let floor = tree
                    .instances_at(instance.root)
                    .iter()
                    .position(|&i| i == id)
                    .unwrap_or(0);
                Some(Self {
                    root: instance.root,
                    include_root,
                    floor,
                    owner: Some(id),
                })
            }
            Target::Missing => None,
        }
    }

    /// Bound component instance
    pub fn owner(&self) -> Option<InstanceId> {
        self.owner
    }

    /// Nodes that may hold in-scope instances, in document order. The root
    /// is always walked since a bound component's children can share it.
    pub fn instance_nodes<'t>(&self, tree: &'t DomTree) -> impl Iterator<Item = NodeId> + 't {
        std::iter::once(self.root).chain(tree.descendants(self.root))
    }

    /// In-scope instances rendered at `node`, outermost first
    pub fn instances_at<'t>(&self, tree: &'t DomTree, node: NodeId) -> &'t [InstanceId] {
        let all = tree.instances_at(node);
        if node != self.root {
            all
        } else if self.include_root {
            all.get(self.floor..).unwrap_or(&[])
        } else if self.owner.is_some() {
            // Children of the bound component sharing its root node
            all.get(self.floor + 1..).unwrap_or(&[])
        } else {
            &[]
        }
    }

    /// Outermost in-scope instance at `node`
    pub fn outermost(&self, tree: &DomTree, node: NodeId) -> Option<InstanceId> {
        self.instances_at(tree, node).first().copied()
    }
}

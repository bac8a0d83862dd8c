//! Document-order traversal
//!
//! `Descendants` walks a subtree depth-first, pre-order: the order every
//! query result is reported in. `Ancestors` walks parent links upward.

use crate::{DomTree, NodeId};

/// Pre-order iterator over the descendants of a node (the node itself excluded)
pub struct Descendants<'a> {
    tree: &'a DomTree,
    /// Pending nodes; children are pushed in reverse so the first child pops first
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(tree: &'a DomTree, root: NodeId) -> Self {
        let stack = tree.children(root).iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Iterator over the ancestors of a node, nearest first
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    current: NodeId,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(tree: &'a DomTree, node: NodeId) -> Self {
        Self { tree, current: node }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let parent = self.tree.parent(self.current)?;
        self.current = parent;
        Some(parent)
    }
}

#[cfg(test)]
mod tests {
    use crate::DomTree;

    #[test]
    fn test_descendants_pre_order() {
        // <div><ul><li/><li/></ul><p/></div>
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let ul = tree.create_element("ul");
        let li1 = tree.create_element("li");
        let li2 = tree.create_element("li");
        let p = tree.create_element("p");
        tree.append_child(div, ul).unwrap();
        tree.append_child(ul, li1).unwrap();
        tree.append_child(ul, li2).unwrap();
        tree.append_child(div, p).unwrap();

        let order: Vec<_> = tree.descendants(div).collect();
        assert_eq!(order, vec![ul, li1, li2, p]);

        let inner: Vec<_> = tree.descendants(ul).collect();
        assert_eq!(inner, vec![li1, li2]);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("c");
        tree.append_child(a, b).unwrap();
        tree.append_child(b, c).unwrap();

        let chain: Vec<_> = tree.ancestors(c).collect();
        assert_eq!(chain, vec![b, a]);
        assert_eq!(tree.ancestors(a).count(), 0);
    }
}

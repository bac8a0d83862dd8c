//! Render tree (arena-based allocation)
//!
//! Nodes and component instances live in two arenas and refer to each
//! other by id. The renderer builds a tree through the mutating methods;
//! queries only ever borrow it immutably.

use crate::component::{ComponentDef, ComponentInstance, RefTarget};
use crate::walker::{Ancestors, Descendants};
use crate::{DomError, DomResult, ElementData, InstanceId, Node, NodeId};

/// Arena-based render tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    instances: Vec<ComponentInstance>,
    root: NodeId,
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DomTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            instances: Vec::new(),
            root: NodeId::NONE,
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content.to_string()))
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.check(parent)?;
        self.check(child)?;

        let hierarchy = DomError::HierarchyRequest { parent, child };
        if self.nodes[child.index()].parent.is_valid() || child == self.root {
            return Err(hierarchy);
        }
        // Appending an ancestor of `parent` would close a cycle
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(hierarchy);
        }

        self.nodes[child.index()].parent = parent;
        self.nodes[parent.index()].children.push(child);
        Ok(())
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.check(node)?;
        let elem = self.nodes[node.index()]
            .as_element_mut()
            .ok_or(DomError::NotAnElement(node))?;
        elem.set_attr(name, value);
        Ok(())
    }

    /// Designate the render root
    pub fn set_root(&mut self, node: NodeId) -> DomResult<()> {
        self.check(node)?;
        if self.nodes[node.index()].parent.is_valid() {
            return Err(DomError::HierarchyRequest { parent: self.nodes[node.index()].parent, child: node });
        }
        self.root = node;
        Ok(())
    }

    /// Render root (NONE for an empty tree)
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Element data of a node, if it is an element
    #[inline]
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Parent of a node
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// Children in document order (empty for unknown ids)
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Element children only, in document order
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&c| self.element(c).is_some())
    }

    /// Descendants of `root` in document order, `root` excluded
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants::new(self, root)
    }

    /// Ancestors of `node`, nearest first
    pub fn ancestors(&self, node: NodeId) -> Ancestors<'_> {
        Ancestors::new(self, node)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ------------------------------------------------------------------
    // Component overlay
    // ------------------------------------------------------------------

    /// Mount a component instance whose rendered root is `root`.
    ///
    /// Instances sharing a root node stay ordered outermost first.
    pub fn mount(
        &mut self,
        definition: &ComponentDef,
        root: NodeId,
        parent: Option<InstanceId>,
    ) -> DomResult<InstanceId> {
        self.check(root)?;
        let depth = match parent {
            Some(p) => self.instance(p).ok_or(DomError::InstanceNotFound(p))?.depth + 1,
            None => 0,
        };

        let id = InstanceId(self.instances.len() as u32);
        self.instances.push(ComponentInstance {
            definition: definition.clone(),
            root,
            parent,
            depth,
            refs: Vec::new(),
        });

        let instances = &self.instances;
        let slot = &mut self.nodes[root.index()].instances;
        let pos = slot.partition_point(|i| instances[i.index()].depth <= depth);
        slot.insert(pos, id);

        tracing::trace!("Mounted {:?} as {:?} at {:?} (depth {})", definition, id, root, depth);
        Ok(id)
    }

    /// Get an instance by ID
    #[inline]
    pub fn instance(&self, id: InstanceId) -> Option<&ComponentInstance> {
        self.instances.get(id.index())
    }

    /// Instances rendered at a node, outermost first
    #[inline]
    pub fn instances_at(&self, node: NodeId) -> &[InstanceId] {
        self.get(node).map(|n| n.instances.as_slice()).unwrap_or(&[])
    }

    /// Whether a node is the root of any component instance
    #[inline]
    pub fn is_component_boundary(&self, node: NodeId) -> bool {
        !self.instances_at(node).is_empty()
    }

    /// Number of component instances
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Register a ref on `owner`.
    ///
    /// Functional instances hold no refs: the binding moves to the nearest
    /// enclosing non-functional instance.
    pub fn add_ref(
        &mut self,
        owner: InstanceId,
        name: &str,
        target: RefTarget,
        in_loop: bool,
    ) -> DomResult<InstanceId> {
        match target {
            RefTarget::Node(node) => self.check(node)?,
            RefTarget::Instance(i) => {
                self.instance(i).ok_or(DomError::InstanceNotFound(i))?;
            }
        }

        let mut current = Some(owner);
        while let Some(id) = current {
            let instance = self.instance(id).ok_or(DomError::InstanceNotFound(id))?;
            if !instance.is_functional() {
                if id != owner {
                    tracing::trace!("Ref `{}` moved from functional {:?} to {:?}", name, owner, id);
                }
                self.instances[id.index()].register_ref(name, target, in_loop);
                return Ok(id);
            }
            current = instance.parent;
        }
        Err(DomError::NoRefOwner(name.to_string()))
    }

    fn check(&self, id: NodeId) -> DomResult<()> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(DomError::NotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_navigate() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let text = tree.create_text("hello");
        let p = tree.create_element("p");
        tree.set_root(div).unwrap();
        tree.append_child(div, text).unwrap();
        tree.append_child(div, p).unwrap();

        assert_eq!(tree.root(), div);
        assert_eq!(tree.children(div), &[text, p]);
        assert_eq!(tree.element_children(div).collect::<Vec<_>>(), vec![p]);
        assert_eq!(tree.parent(p), Some(div));
        assert_eq!(tree.parent(div), None);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_append_rejects_reparenting_and_cycles() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("c");
        tree.append_child(a, b).unwrap();

        assert!(matches!(tree.append_child(c, b), Err(DomError::HierarchyRequest { .. })));
        assert!(matches!(tree.append_child(b, a), Err(DomError::HierarchyRequest { .. })));
        assert!(matches!(tree.append_child(a, a), Err(DomError::HierarchyRequest { .. })));
        assert_eq!(tree.append_child(a, NodeId(99)), Err(DomError::NotFound(NodeId(99))));
    }

    #[test]
    fn test_set_attribute_requires_element() {
        let mut tree = DomTree::new();
        let text = tree.create_text("x");
        let div = tree.create_element("div");
        assert_eq!(tree.set_attribute(text, "id", "x"), Err(DomError::NotAnElement(text)));
        tree.set_attribute(div, "class", "foo").unwrap();
        assert!(tree.element(div).unwrap().has_class("foo"));
    }

    #[test]
    fn test_nested_instances_ordered_outermost_first() {
        let outer = ComponentDef::named("Outer");
        let inner = ComponentDef::named("Inner");
        let mut tree = DomTree::new();
        let div = tree.create_element("div");

        let o = tree.mount(&outer, div, None).unwrap();
        let i = tree.mount(&inner, div, Some(o)).unwrap();
        assert_eq!(tree.instances_at(div), &[o, i]);
        assert!(tree.is_component_boundary(div));
        assert_eq!(tree.instance(i).unwrap().depth, 1);
    }

    #[test]
    fn test_mount_order_does_not_matter() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let host = tree.create_comment("");
        let top = tree.mount(&ComponentDef::anonymous(), host, None).unwrap();
        let outer = tree.mount(&ComponentDef::named("Outer"), host, Some(top)).unwrap();
        let inner = tree.mount(&ComponentDef::named("Inner"), div, Some(outer)).unwrap();
        let mid = tree.mount(&ComponentDef::named("Mid"), div, Some(top)).unwrap();
        assert_eq!(tree.instances_at(div), &[mid, inner]);
    }

    #[test]
    fn test_functional_ref_moves_to_stateful_parent() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let child = tree.create_element("p");
        tree.append_child(root, child).unwrap();

        let parent = tree.mount(&ComponentDef::named("Parent"), root, None).unwrap();
        let functional = tree.mount(&ComponentDef::functional(Some("F")), child, Some(parent)).unwrap();

        let owner = tree.add_ref(functional, "foo", RefTarget::Node(child), false).unwrap();
        assert_eq!(owner, parent);
        assert_eq!(tree.instance(parent).unwrap().refs.len(), 1);
        assert!(tree.instance(functional).unwrap().refs.is_empty());
    }

    #[test]
    fn test_functional_ref_without_owner_fails() {
        let mut tree = DomTree::new();
        let root = tree.create_element("p");
        let functional = tree.mount(&ComponentDef::functional(None), root, None).unwrap();
        assert_eq!(
            tree.add_ref(functional, "foo", RefTarget::Node(root), false),
            Err(DomError::NoRefOwner("foo".into()))
        );
    }
}

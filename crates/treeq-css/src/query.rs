//! Scoped selector queries
//!
//! Walks the scope in document order and emits every matching element
//! exactly once, whichever member of the list matched it.

use treeq_dom::{DomTree, NodeId};

use crate::SelectorList;

impl SelectorList {
    /// All elements under `scope` matching this list, in document order.
    ///
    /// `scope` itself is a candidate only when `include_scope` is set; it
    /// always takes part as an ancestor for combinators.
    pub fn query_all(&self, tree: &DomTree, scope: NodeId, include_scope: bool) -> Vec<NodeId> {
        let candidates = include_scope
            .then_some(scope)
            .into_iter()
            .chain(tree.descendants(scope));

        let matched: Vec<NodeId> = candidates
            .filter(|&node| self.matches(tree, node, scope))
            .collect();
        tracing::trace!("Selector list matched {} nodes under {:?}", matched.len(), scope);
        matched
    }

    /// First match in document order
    pub fn query_first(&self, tree: &DomTree, scope: NodeId, include_scope: bool) -> Option<NodeId> {
        include_scope
            .then_some(scope)
            .into_iter()
            .chain(tree.descendants(scope))
            .find(|&node| self.matches(tree, node, scope))
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_selector_list;
    use treeq_dom::{DomTree, NodeId};

    fn query(tree: &DomTree, scope: NodeId, selector: &str) -> Vec<NodeId> {
        parse_selector_list(selector).unwrap().query_all(tree, scope, false)
    }

    /// <div><ul><ul></ul></ul><p class="a"></p></div>
    fn fixture() -> (DomTree, [NodeId; 4]) {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let ul1 = tree.create_element("ul");
        let ul2 = tree.create_element("ul");
        let p = tree.create_element("p");
        tree.set_attribute(p, "class", "a").unwrap();
        tree.append_child(div, ul1).unwrap();
        tree.append_child(ul1, ul2).unwrap();
        tree.append_child(div, p).unwrap();
        tree.set_root(div).unwrap();
        (tree, [div, ul1, ul2, p])
    }

    #[test]
    fn test_child_combinator_uses_scope_as_parent() {
        let (tree, [div, ul1, _, _]) = fixture();
        assert_eq!(query(&tree, div, "div > ul"), vec![ul1]);
    }

    #[test]
    fn test_descendant_combinator() {
        let (tree, [div, ul1, ul2, _]) = fixture();
        assert_eq!(query(&tree, div, "div ul"), vec![ul1, ul2]);
        assert_eq!(query(&tree, div, "ul ul"), vec![ul2]);
    }

    #[test]
    fn test_scope_limits_ancestors() {
        let (tree, [_, ul1, ul2, _]) = fixture();
        // `div` lies outside the scope rooted at the outer ul
        assert!(query(&tree, ul1, "div ul").is_empty());
        assert_eq!(query(&tree, ul1, "ul ul"), vec![ul2]);
    }

    #[test]
    fn test_list_emits_each_node_once_in_document_order() {
        let (tree, [div, ul1, ul2, p]) = fixture();
        assert_eq!(query(&tree, div, ".a, ul, p"), vec![ul1, ul2, p]);
    }

    #[test]
    fn test_include_scope() {
        let (tree, [div, ..]) = fixture();
        let list = parse_selector_list("div").unwrap();
        assert!(list.query_all(&tree, div, false).is_empty());
        assert_eq!(list.query_all(&tree, div, true), vec![div]);
        assert_eq!(list.query_first(&tree, div, true), Some(div));
    }
}

//! Component matcher
//!
//! Walks the instance overlay of a scope in document order of each
//! instance's root node, and resolves ref names on the bound component.

use std::collections::HashMap;

use treeq_dom::{ComponentInstance, DomTree, InstanceId, NodeId, RefTarget};

use crate::scope::Scope;
use crate::{QueryError, Target};

/// In-scope instances satisfying `predicate`, in document order. Instances
/// sharing a root node come outermost first.
pub(crate) fn match_components<F>(tree: &DomTree, scope: &Scope, predicate: F) -> Vec<InstanceId>
where
    F: Fn(&ComponentInstance) -> bool,
{
    scope
        .instance_nodes(tree)
        .flat_map(|node| scope.instances_at(tree, node).iter().copied())
        .filter(|&id| tree.instance(id).is_some_and(&predicate))
        .collect()
}

/// Targets bound to ref `name` on the scope's component, in document order.
///
/// Functional owners hold no refs, so they yield nothing.
pub(crate) fn match_ref(tree: &DomTree, scope: &Scope, name: &str) -> Result<Vec<Target>, QueryError> {
    let owner = scope
        .owner()
        .and_then(|id| tree.instance(id))
        .ok_or(QueryError::RefOnNonComponent)?;

    let position: HashMap<NodeId, usize> = std::iter::once(owner.root)
        .chain(tree.descendants(owner.root))
        .enumerate()
        .map(|(index, node)| (node, index))
        .collect();

    let mut targets: Vec<(usize, Target)> = owner
        .refs_named(name)
        .filter_map(|binding| {
            let (node, target) = match binding.target {
                RefTarget::Node(node) => (node, Target::Element(node)),
                RefTarget::Instance(id) => (tree.instance(id)?.root, Target::Component(id)),
            };
            // Bindings pointing outside the owner's subtree are stale
            position.get(&node).map(|&index| (index, target))
        })
        .collect();
    targets.sort_by_key(|&(index, _)| index);

    tracing::trace!("Ref `{}` resolved to {} targets", name, targets.len());
    Ok(targets.into_iter().map(|(_, target)| target).collect())
}

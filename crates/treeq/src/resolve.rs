//! Topmost resolution and dedup
//!
//! Runs the matcher a selector calls for, lifts markup matches onto the
//! outermost component rendered at the same node, and keeps the first
//! entry per physical node.

use std::collections::HashSet;

use treeq_css::{SelectorList, check_syntax, parse_selector_list};
use treeq_dom::{DomTree, NodeId};

use crate::components::{match_components, match_ref};
use crate::scope::Scope;
use crate::{QueryConfig, QueryError, Selector, Target};

/// Parse CSS text. The parse failure detail is logged; callers only see
/// `InvalidSelector`.
pub(crate) fn parse_css(text: &str, config: &QueryConfig) -> Result<SelectorList, QueryError> {
    let checked = match parse_selector_list(text) {
        Ok(list) if config.strict_syntax => check_syntax(text).map(|()| list),
        result => result,
    };
    checked.map_err(|err| {
        tracing::debug!("Rejected CSS selector {:?}: {}", text, err);
        QueryError::InvalidSelector
    })
}

/// Every match for `selector` in `scope`: markup elements and components
pub(crate) fn find_all(
    tree: &DomTree,
    scope: &Scope,
    selector: &Selector,
    config: &QueryConfig,
) -> Result<Vec<Target>, QueryError> {
    let targets = match selector {
        Selector::Css(text) => {
            let list = parse_css(text, config)?;
            list.query_all(tree, scope.root, scope.include_root)
                .into_iter()
                .map(|node| match scope.outermost(tree, node) {
                    Some(id) => Target::Component(id),
                    None => Target::Element(node),
                })
                .collect()
        }
        Selector::Ref(name) => match_ref(tree, scope, name)?,
        Selector::Component(_) | Selector::Name(_) => instance_matches(tree, scope, selector),
    };
    Ok(dedup(tree, targets))
}

/// Matches for `selector` in `scope`, restricted to components
pub(crate) fn find_all_components(
    tree: &DomTree,
    scope: &Scope,
    selector: &Selector,
    config: &QueryConfig,
) -> Result<Vec<Target>, QueryError> {
    let targets = match selector {
        Selector::Css(text) => {
            let list = parse_css(text, config)?;
            list.query_all(tree, scope.root, scope.include_root)
                .into_iter()
                .filter_map(|node| {
                    let outermost = scope.outermost(tree, node);
                    if outermost.is_none() {
                        tracing::trace!("Dropped markup match {:?}", node);
                    }
                    outermost.map(Target::Component)
                })
                .collect()
        }
        Selector::Ref(name) => match_ref(tree, scope, name)?
            .into_iter()
            .filter(|target| matches!(target, Target::Component(_)))
            .collect(),
        Selector::Component(_) | Selector::Name(_) => instance_matches(tree, scope, selector),
    };
    Ok(dedup(tree, targets))
}

/// Whether `target` itself satisfies `selector`
pub(crate) fn target_matches(
    tree: &DomTree,
    target: Target,
    selector: &Selector,
    config: &QueryConfig,
) -> Result<bool, QueryError> {
    let instance = match target {
        Target::Component(id) => tree.instance(id),
        _ => None,
    };
    match selector {
        Selector::Css(text) => {
            let list = parse_css(text, config)?;
            Ok(target_node(tree, target).is_some_and(|node| list.matches(tree, node, tree.root())))
        }
        Selector::Component(def) => Ok(instance.is_some_and(|i| i.definition.is_related(def))),
        Selector::Name(name) => Ok(instance.is_some_and(|i| i.declared_name() == Some(name.as_str()))),
        Selector::Ref(_) => Err(QueryError::InvalidSelector),
    }
}

fn instance_matches(tree: &DomTree, scope: &Scope, selector: &Selector) -> Vec<Target> {
    let ids = match selector {
        Selector::Component(def) => match_components(tree, scope, |i| i.definition.is_related(def)),
        Selector::Name(name) => match_components(tree, scope, |i| i.declared_name() == Some(name.as_str())),
        Selector::Css(_) | Selector::Ref(_) => Vec::new(),
    };
    ids.into_iter().map(Target::Component).collect()
}

/// Physical node a target stands for
pub(crate) fn target_node(tree: &DomTree, target: Target) -> Option<NodeId> {
    match target {
        Target::Element(node) => Some(node),
        Target::Component(id) => tree.instance(id).map(|i| i.root),
        Target::Missing => None,
    }
}

/// Keep the first target per physical node
fn dedup(tree: &DomTree, targets: Vec<Target>) -> Vec<Target> {
    let mut seen = HashSet::new();
    targets
        .into_iter()
        .filter(|&target| target_node(tree, target).is_some_and(|node| seen.insert(node)))
        .collect()
}

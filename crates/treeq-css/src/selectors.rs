//! Selector model and structural matching
//!
//! A `SelectorList` is a comma-separated list of complex selectors; a
//! complex selector is a chain of compound selectors joined by
//! combinators; a compound selector is a conjunction of simple selectors.

use treeq_dom::{DomTree, ElementData, NodeData, NodeId};

/// Pseudo-class type (argument-free structural subset)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    Empty,
}

impl PseudoClass {
    /// Parse from the name following `:`
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "first-child" => Some(Self::FirstChild),
            "last-child" => Some(Self::LastChild),
            "only-child" => Some(Self::OnlyChild),
            "first-of-type" => Some(Self::FirstOfType),
            "last-of-type" => Some(Self::LastOfType),
            "only-of-type" => Some(Self::OnlyOfType),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }
}

/// Attribute selector: `[name]` or `[name=value]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    /// Exact value to compare against; `None` tests presence only
    pub value: Option<String>,
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        match (&self.value, value) {
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
            (_, None) => false,
        }
    }
}

/// A component of a compound selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// Universal selector *
    Universal,
    /// Type selector (tag name, lower-cased)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value]
    Attribute(AttributeSelector),
    /// Structural pseudo-class
    PseudoClass(PseudoClass),
}

/// Relation between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: any ancestor
    Descendant,
    /// `>`: direct parent
    Child,
}

/// Simple selectors that must all match the same element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    pub components: Vec<SimpleSelector>,
}

/// Compound selectors joined by combinators, left to right.
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SimpleSelector {
    fn matches(&self, tree: &DomTree, node: NodeId, element: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Type(tag) => element.tag.eq_ignore_ascii_case(tag),
            Self::Id(id) => element.id.as_deref() == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Attribute(attr) => attr.matches(element.get_attr(&attr.name)),
            Self::PseudoClass(pseudo) => match_pseudo_class(*pseudo, tree, node, element),
        }
    }
}

impl CompoundSelector {
    /// Match against a single node; non-elements never match
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(element) = tree.element(node) else {
            return false;
        };
        self.components.iter().all(|c| c.matches(tree, node, element))
    }
}

impl ComplexSelector {
    /// Match `node` against the full chain. Ancestors considered by the
    /// combinators stop at `scope` (inclusive).
    pub fn matches(&self, tree: &DomTree, node: NodeId, scope: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_at(tree, node, n - 1, scope),
        }
    }

    fn matches_at(&self, tree: &DomTree, node: NodeId, index: usize, scope: NodeId) -> bool {
        if !self.compounds[index].matches(tree, node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        let parent = |n: NodeId| if n == scope { None } else { tree.parent(n) };
        match self.combinators[index - 1] {
            Combinator::Child => {
                parent(node).is_some_and(|p| self.matches_at(tree, p, index - 1, scope))
            }
            Combinator::Descendant => {
                let mut current = parent(node);
                while let Some(ancestor) = current {
                    if self.matches_at(tree, ancestor, index - 1, scope) {
                        return true;
                    }
                    current = parent(ancestor);
                }
                false
            }
        }
    }
}

impl SelectorList {
    /// True if any selector in the list matches `node`
    pub fn matches(&self, tree: &DomTree, node: NodeId, scope: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, node, scope))
    }
}

/// Match a structural pseudo-class. Positions count element siblings only;
/// a parentless element is its own only sibling.
pub fn match_pseudo_class(
    pseudo: PseudoClass,
    tree: &DomTree,
    node: NodeId,
    element: &ElementData,
) -> bool {
    let siblings = || -> Vec<NodeId> {
        match tree.parent(node) {
            Some(parent) => tree.element_children(parent).collect(),
            None => vec![node],
        }
    };
    let same_type = || -> Vec<NodeId> {
        siblings()
            .into_iter()
            .filter(|&s| tree.element(s).is_some_and(|e| e.tag == element.tag))
            .collect()
    };

    match pseudo {
        PseudoClass::FirstChild => siblings().first() == Some(&node),
        PseudoClass::LastChild => siblings().last() == Some(&node),
        PseudoClass::OnlyChild => siblings().len() == 1,
        PseudoClass::FirstOfType => same_type().first() == Some(&node),
        PseudoClass::LastOfType => same_type().last() == Some(&node),
        PseudoClass::OnlyOfType => same_type().len() == 1,
        // Comments do not count as content
        PseudoClass::Empty => tree
            .children(node)
            .iter()
            .all(|&c| matches!(tree.get(c).map(|n| &n.data), Some(NodeData::Comment(_)))),
    }
}

//! Wrappers and result collections
//!
//! A `Wrapper` is a handle on one position of a rendered tree: a markup
//! element, a component instance, or nothing (the not-found sentinel).
//! Wrappers borrow the tree, so handles from one render pass cannot
//! outlive it.

use std::fmt;

use treeq_dom::{ComponentInstance, DomTree, ElementData, InstanceId, NodeId};

use crate::resolve::{self, target_node};
use crate::scope::Scope;
use crate::{QueryConfig, QueryError, Selector, Value};

/// What a wrapper points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A markup element (or other node) with no component on it
    Element(NodeId),
    /// A component instance
    Component(InstanceId),
    /// Nothing matched
    Missing,
}

type Matcher = fn(&DomTree, &Scope, &Selector, &QueryConfig) -> Result<Vec<Target>, QueryError>;

/// Handle on one tree position
#[derive(Clone)]
pub struct Wrapper<'t> {
    tree: &'t DomTree,
    target: Target,
    /// Selector that produced this wrapper
    selector: Option<Value>,
    config: QueryConfig,
}

impl<'t> Wrapper<'t> {
    pub fn new(tree: &'t DomTree, target: Target) -> Self {
        Self {
            tree,
            target,
            selector: None,
            config: QueryConfig::default(),
        }
    }

    /// Bind to the tree root: the outermost root instance when the root is
    /// a component boundary, otherwise the root element
    pub fn mount(tree: &'t DomTree) -> Self {
        let root = tree.root();
        let target = match tree.instances_at(root).first() {
            Some(&id) => Target::Component(id),
            None if tree.get(root).is_some() => Target::Element(root),
            None => Target::Missing,
        };
        Self::new(tree, target)
    }

    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> QueryConfig {
        self.config
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn tree(&self) -> &'t DomTree {
        self.tree
    }

    /// False for the not-found sentinel
    pub fn exists(&self) -> bool {
        self.target != Target::Missing
    }

    pub fn is_component(&self) -> bool {
        matches!(self.target, Target::Component(_))
    }

    /// Physical node (a component's root node)
    pub fn node(&self) -> Option<NodeId> {
        target_node(self.tree, self.target)
    }

    pub fn instance(&self) -> Option<&'t ComponentInstance> {
        match self.target {
            Target::Component(id) => self.tree.instance(id),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&'t ElementData> {
        self.node().and_then(|node| self.tree.element(node))
    }

    /// Declared name for components, tag name for elements
    pub fn name(&self) -> Option<&'t str> {
        match self.target {
            Target::Component(_) => self.instance().and_then(ComponentInstance::declared_name),
            _ => self.element().map(|e| e.tag.as_str()),
        }
    }

    /// Class names on the physical node, sorted
    pub fn classes(&self) -> Vec<&'t str> {
        let mut classes: Vec<&str> = self
            .element()
            .map(|e| e.classes.iter().map(String::as_str).collect())
            .unwrap_or_default();
        classes.sort_unstable();
        classes
    }

    pub fn attribute(&self, name: &str) -> Option<&'t str> {
        self.element().and_then(|e| e.get_attr(name))
    }

    /// Selector that produced this wrapper, as passed
    pub fn selector(&self) -> Option<&Value> {
        self.selector.as_ref()
    }

    /// Every element and component under this wrapper matching `selector`
    pub fn find_all(&self, selector: impl Into<Value>) -> Result<WrapperArray<'t>, QueryError> {
        self.query(selector.into(), resolve::find_all, "find_all")
    }

    /// Components under this wrapper matching `selector`. CSS matches on
    /// nodes that carry no component are dropped.
    pub fn find_all_components(&self, selector: impl Into<Value>) -> Result<WrapperArray<'t>, QueryError> {
        self.query(selector.into(), resolve::find_all_components, "find_all_components")
    }

    /// First match of `find_all`, or the not-found sentinel
    pub fn find(&self, selector: impl Into<Value>) -> Result<Wrapper<'t>, QueryError> {
        let array = self.find_all(selector)?;
        Ok(self.first_or_missing(array))
    }

    /// First match of `find_all_components`, or the not-found sentinel
    pub fn find_component(&self, selector: impl Into<Value>) -> Result<Wrapper<'t>, QueryError> {
        let array = self.find_all_components(selector)?;
        Ok(self.first_or_missing(array))
    }

    /// Whether this wrapper's own target satisfies `selector`
    pub fn matches(&self, selector: impl Into<Value>) -> Result<bool, QueryError> {
        let selector = Selector::normalize(&selector.into())?;
        resolve::target_matches(self.tree, self.target, &selector, &self.config)
    }

    fn query(&self, raw: Value, matcher: Matcher, operation: &str) -> Result<WrapperArray<'t>, QueryError> {
        let selector = Selector::normalize(&raw)?;
        let targets = match Scope::new(self.tree, self.target, self.config.include_root) {
            Some(scope) => matcher(self.tree, &scope, &selector, &self.config)?,
            None => Vec::new(),
        };
        tracing::debug!("{} ({:?}) matched {} targets", operation, selector.kind(), targets.len());

        let wrappers = targets
            .into_iter()
            .map(|target| self.derive(target, &raw))
            .collect();
        Ok(WrapperArray { wrappers, selector: raw })
    }

    fn first_or_missing(&self, array: WrapperArray<'t>) -> Wrapper<'t> {
        let WrapperArray { wrappers, selector } = array;
        match wrappers.into_iter().next() {
            Some(first) => first,
            None => self.derive(Target::Missing, &selector),
        }
    }

    /// Wrapper for a match, carrying this wrapper's config
    fn derive(&self, target: Target, selector: &Value) -> Wrapper<'t> {
        Wrapper {
            tree: self.tree,
            target,
            selector: Some(selector.clone()),
            config: self.config,
        }
    }
}

impl fmt::Debug for Wrapper<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapper")
            .field("target", &self.target)
            .field("name", &self.name())
            .field("selector", &self.selector)
            .finish()
    }
}

/// Ordered, duplicate-free matches of one query
#[derive(Debug, Clone)]
pub struct WrapperArray<'t> {
    wrappers: Vec<Wrapper<'t>>,
    selector: Value,
}

impl<'t> WrapperArray<'t> {
    pub fn len(&self) -> usize {
        self.wrappers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wrappers.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&Wrapper<'t>> {
        self.wrappers.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Wrapper<'t>> {
        self.wrappers.iter()
    }

    pub fn wrappers(&self) -> &[Wrapper<'t>] {
        &self.wrappers
    }

    /// Selector the query was made with, as passed
    pub fn selector(&self) -> &Value {
        &self.selector
    }
}

impl<'t> IntoIterator for WrapperArray<'t> {
    type Item = Wrapper<'t>;
    type IntoIter = std::vec::IntoIter<Wrapper<'t>>;

    fn into_iter(self) -> Self::IntoIter {
        self.wrappers.into_iter()
    }
}

impl<'a, 't> IntoIterator for &'a WrapperArray<'t> {
    type Item = &'a Wrapper<'t>;
    type IntoIter = std::slice::Iter<'a, Wrapper<'t>>;

    fn into_iter(self) -> Self::IntoIter {
        self.wrappers.iter()
    }
}

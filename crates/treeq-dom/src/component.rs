//! Component definitions and instances
//!
//! A `ComponentDef` is a shared handle to a definition; two handles are
//! equal only when they point at the same definition. Definitions can
//! extend a base definition (class-style wrappers, `extends`), which
//! forms an extension chain used for identity matching.

use std::fmt;
use std::sync::Arc;

use crate::{InstanceId, NodeId};

/// Component definition as declared by its author
#[derive(Debug, Default)]
pub struct ComponentDefinition {
    /// Declared `name` option
    pub name: Option<String>,
    /// Functional components have no instance state and hold no refs
    pub functional: bool,
    /// Base definition this one wraps or extends
    pub extends: Option<ComponentDef>,
}

/// Shared component definition handle with reference identity
#[derive(Clone)]
pub struct ComponentDef(Arc<ComponentDefinition>);

impl ComponentDef {
    pub fn new(definition: ComponentDefinition) -> Self {
        Self(Arc::new(definition))
    }

    /// Stateful component with a declared name
    pub fn named(name: &str) -> Self {
        Self::new(ComponentDefinition {
            name: Some(name.to_string()),
            ..Default::default()
        })
    }

    /// Stateful component without a declared name
    pub fn anonymous() -> Self {
        Self::new(ComponentDefinition::default())
    }

    /// Functional component
    pub fn functional(name: Option<&str>) -> Self {
        Self::new(ComponentDefinition {
            name: name.map(str::to_string),
            functional: true,
            extends: None,
        })
    }

    /// Wrap this definition (class-style component or `extends`)
    pub fn extend(&self, name: Option<&str>) -> Self {
        Self::new(ComponentDefinition {
            name: name.map(str::to_string),
            functional: self.0.functional,
            extends: Some(self.clone()),
        })
    }

    pub fn definition(&self) -> &ComponentDefinition {
        &self.0
    }

    /// Declared name, inherited from the base chain when not declared locally
    pub fn name(&self) -> Option<&str> {
        self.chain().find_map(|def| def.0.name.as_deref())
    }

    pub fn is_functional(&self) -> bool {
        self.0.functional
    }

    pub fn base(&self) -> Option<&ComponentDef> {
        self.0.extends.as_ref()
    }

    /// This definition followed by every base it extends, nearest first
    pub fn chain(&self) -> impl Iterator<Item = &ComponentDef> {
        std::iter::successors(Some(self), |&def| def.base())
    }

    /// Reference identity
    #[inline]
    pub fn same(&self, other: &ComponentDef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// True when either definition appears in the other's extension chain
    pub fn is_related(&self, other: &ComponentDef) -> bool {
        self.chain().any(|def| def.same(other)) || other.chain().any(|def| def.same(self))
    }
}

impl PartialEq for ComponentDef {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for ComponentDef {}

impl fmt::Debug for ComponentDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "ComponentDef({name})"),
            None => write!(f, "ComponentDef(<anonymous>)"),
        }
    }
}

/// What a ref name points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefTarget {
    /// A markup element
    Node(NodeId),
    /// A child component instance
    Instance(InstanceId),
}

/// One ref binding registered on an instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefBinding {
    pub name: String,
    pub target: RefTarget,
    /// Registered inside an iteration construct (multi-valued)
    pub in_loop: bool,
}

/// Component instance overlay on a rendered node
#[derive(Debug)]
pub struct ComponentInstance {
    /// Definition the instance was created from
    pub definition: ComponentDef,
    /// Node this instance renders to
    pub root: NodeId,
    /// Enclosing instance, if any
    pub parent: Option<InstanceId>,
    /// Nesting depth (0 for top-level instances)
    pub depth: u32,
    /// Refs owned by this instance, in registration order
    pub refs: Vec<RefBinding>,
}

impl ComponentInstance {
    pub fn declared_name(&self) -> Option<&str> {
        self.definition.name()
    }

    pub fn is_functional(&self) -> bool {
        self.definition.is_functional()
    }

    /// Register a ref. Non-loop bindings replace an earlier binding of the
    /// same name; loop bindings accumulate.
    pub(crate) fn register_ref(&mut self, name: &str, target: RefTarget, in_loop: bool) {
        if !in_loop {
            self.refs.retain(|binding| binding.name != name);
        }
        self.refs.push(RefBinding {
            name: name.to_string(),
            target,
            in_loop,
        });
    }

    /// All bindings for `name`, in registration order
    pub fn refs_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RefBinding> + 'a {
        self.refs.iter().filter(move |binding| binding.name == name)
    }
}

//! Tree Node - one rendered position
//!
//! A node is a markup element, a text run, or a comment placeholder.
//! Any node can additionally be the root of one or more component
//! instances; `instances` is ordered outermost first.

use std::collections::{HashMap, HashSet};

use crate::{InstanceId, NodeId};

/// Tree node - core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// Children in document order
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
    /// Component instances rendered at this node, outermost first
    pub instances: Vec<InstanceId>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    /// Create a comment node
    pub fn comment(content: String) -> Self {
        Self::with_data(NodeData::Comment(content))
    }

    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data,
            instances: Vec::new(),
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this node is the root of at least one component instance
    #[inline]
    pub fn is_component_boundary(&self) -> bool {
        !self.instances.is_empty()
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Markup element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment, also the placeholder a component renders when it renders nothing
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Default)]
pub struct ElementData {
    /// Tag name, lower-cased
    pub tag: String,
    /// Cached id attribute
    pub id: Option<String>,
    /// Cached class list
    pub classes: HashSet<String>,
    /// All attributes, including `id` and `class`
    pub attributes: HashMap<String, String>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, keeping the id/class caches in sync
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => {
                self.classes = value.split_whitespace().map(str::to_string).collect();
            }
            _ => {}
        }
        self.attributes.insert(name.to_string(), value.to_string());
    }

    #[inline]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_is_lowercased() {
        let elem = ElementData::new("DIV");
        assert_eq!(elem.tag, "div");
    }

    #[test]
    fn test_class_attribute_updates_cache() {
        let mut elem = ElementData::new("div");
        elem.set_attr("class", "foo  bar");
        assert!(elem.has_class("foo"));
        assert!(elem.has_class("bar"));
        assert_eq!(elem.get_attr("class"), Some("foo  bar"));

        elem.set_attr("class", "baz");
        assert!(!elem.has_class("foo"));
        assert!(elem.has_class("baz"));
    }

    #[test]
    fn test_id_attribute_updates_cache() {
        let mut elem = ElementData::new("a");
        elem.set_attr("id", "main");
        elem.set_attr("href", "/");
        assert_eq!(elem.id.as_deref(), Some("main"));
        assert_eq!(elem.get_attr("href"), Some("/"));
        assert_eq!(elem.get_attr("missing"), None);
    }

    #[test]
    fn test_node_kinds() {
        let node = Node::comment(String::new());
        assert!(!node.is_element());
        assert!(!node.is_component_boundary());
        assert!(Node::element("p").is_element());
        assert_eq!(Node::text("hi".into()).as_text(), Some("hi"));
    }
}

//! HTML5 parser implementation
//!
//! Uses html5ever's RcDom and converts the `<body>` contents to treeq
//! nodes. Whitespace-only text is dropped, as a template compiler would.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use treeq_dom::{DomTree, NodeId};

use crate::HtmlError;

/// HTML5 markup loader
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new HTML parser
    pub fn new() -> Self {
        Self
    }

    /// Parse markup into a new tree. The markup must hold exactly one
    /// top-level element, which becomes the root.
    pub fn parse_tree(&self, html: &str) -> Result<DomTree, HtmlError> {
        let dom = self.parse_dom(html)?;
        let body = find_body(&dom.document).unwrap_or_else(|| dom.document.clone());
        let mut tree = DomTree::new();

        let mut root = None;
        for child in body.children.borrow().iter() {
            // Stray top-level text and comments have nowhere to attach
            if !matches!(child.data, RcNodeData::Element { .. }) {
                continue;
            }
            if let Some(id) = self.convert_node(child, &mut tree, None)? {
                if root.is_some() {
                    return Err(HtmlError::MultipleRoots);
                }
                root = Some(id);
            }
        }

        tree.set_root(root.ok_or(HtmlError::NoRoot)?)?;
        tracing::debug!("Parsed fixture with {} nodes", tree.len());
        Ok(tree)
    }

    /// Parse markup and append the resulting nodes under `parent`
    pub fn append(&self, tree: &mut DomTree, parent: NodeId, html: &str) -> Result<Vec<NodeId>, HtmlError> {
        let dom = self.parse_dom(html)?;
        let body = find_body(&dom.document).unwrap_or_else(|| dom.document.clone());
        let mut appended = Vec::new();
        for child in body.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, tree, Some(parent))? {
                appended.push(id);
            }
        }
        tracing::trace!("Appended {} top-level nodes under {:?}", appended.len(), parent);
        Ok(appended)
    }

    /// Dropping the returned dom empties every node's children, so
    /// handles into it are only useful while it lives
    fn parse_dom(&self, html: &str) -> Result<RcDom, HtmlError> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())?;
        Ok(dom)
    }

    /// Convert an RcDom node (and its subtree); returns the new node id,
    /// or `None` for skipped content
    fn convert_node(
        &self,
        handle: &Handle,
        tree: &mut DomTree,
        parent: Option<NodeId>,
    ) -> Result<Option<NodeId>, HtmlError> {
        let id = match &handle.data {
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if text.trim().is_empty() {
                    return Ok(None);
                }
                tree.create_text(&text)
            }
            RcNodeData::Comment { contents } => tree.create_comment(contents),
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    tree.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, Some(id))?;
                }
                id
            }
            // Doctype, processing instructions, document: nothing to render
            _ => return Ok(None),
        };

        if let Some(parent) = parent {
            tree.append_child(parent, id)?;
        }
        Ok(Some(id))
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let RcNodeData::Element { name, .. } = &handle.data {
        if &*name.local == "body" {
            return Some(handle.clone());
        }
    }
    handle.children.borrow().iter().find_map(find_body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let tree = HtmlParser::new().parse_tree("<div><p></p><p></p></div>").unwrap();
        let root = tree.root();
        assert_eq!(tree.element(root).unwrap().tag, "div");
        assert_eq!(tree.children(root).len(), 2);
    }

    #[test]
    fn test_parse_keeps_children() {
        let tree = HtmlParser::new().parse_tree("<div><p></p></div>").unwrap();
        let root = tree.root();
        assert_eq!(tree.element(root).unwrap().tag, "div");
        assert_eq!(tree.children(root).len(), 1);
        assert_eq!(tree.element(tree.children(root)[0]).unwrap().tag, "p");
    }

    #[test]
    fn test_top_level_non_elements_not_created() {
        let tree = HtmlParser::new().parse_tree("<!-- c -->stray<div></div>tail").unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.element(tree.root()).unwrap().tag, "div");
    }

    #[test]
    fn test_attributes_and_classes() {
        let tree = HtmlParser::new()
            .parse_tree(r#"<div id="main" class="a b"><a href="/">x</a></div>"#)
            .unwrap();
        let root = tree.element(tree.root()).unwrap();
        assert_eq!(root.id.as_deref(), Some("main"));
        assert!(root.has_class("a") && root.has_class("b"));

        let link = tree.children(tree.root())[0];
        assert_eq!(tree.element(link).unwrap().get_attr("href"), Some("/"));
        assert_eq!(tree.get(tree.children(link)[0]).unwrap().as_text(), Some("x"));
    }

    #[test]
    fn test_whitespace_text_dropped() {
        let tree = HtmlParser::new().parse_tree("<ul>\n  <li></li>\n  <li></li>\n</ul>").unwrap();
        assert_eq!(tree.children(tree.root()).len(), 2);
    }

    #[test]
    fn test_root_required() {
        assert!(matches!(HtmlParser::new().parse_tree("just text"), Err(HtmlError::NoRoot)));
        assert!(matches!(
            HtmlParser::new().parse_tree("<p></p><p></p>"),
            Err(HtmlError::MultipleRoots)
        ));
    }

    #[test]
    fn test_append_inner_html() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        tree.set_root(div).unwrap();

        let added = HtmlParser::new().append(&mut tree, div, "<svg></svg>").unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(tree.element(added[0]).unwrap().tag, "svg");
        assert_eq!(tree.parent(added[0]), Some(div));
    }
}

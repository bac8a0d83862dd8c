//! Edge case tests for treeq-html
//!
//! Malformed and unusual markup as a renderer might hand it over.

use treeq_dom::{DomTree, NodeData};
use treeq_html::{HtmlError, HtmlParser, append_html, parse};

fn tags(tree: &DomTree) -> Vec<String> {
    std::iter::once(tree.root())
        .chain(tree.descendants(tree.root()))
        .filter_map(|n| tree.element(n).map(|e| e.tag.clone()))
        .collect()
}

// ============================================================================
// ROOT SELECTION
// ============================================================================

#[test]
fn test_parse_only_doctype() {
    assert!(matches!(parse("<!DOCTYPE html>"), Err(HtmlError::NoRoot)));
}

#[test]
fn test_parse_only_whitespace() {
    assert!(matches!(parse("   \t\n\r\n   "), Err(HtmlError::NoRoot)));
}

#[test]
fn test_parse_two_roots() {
    assert!(matches!(parse("<p></p><p></p>"), Err(HtmlError::MultipleRoots)));
}

#[test]
fn test_surrounding_whitespace_ignored() {
    let tree = parse("\n  <section></section>\n").unwrap();
    assert_eq!(tags(&tree), vec!["section"]);
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_tags() {
    let tree = parse("<div><p><span>text").unwrap();
    assert_eq!(tags(&tree), vec!["div", "p", "span"]);
}

#[test]
fn test_parse_self_closing_div() {
    // `/>` does not close a non-void element
    let tree = parse(r#"<div><div class="foo" /></div>"#).unwrap();
    assert_eq!(tags(&tree), vec!["div", "div"]);
}

// ============================================================================
// SPECIAL CONTENT
// ============================================================================

#[test]
fn test_textarea_content_is_text() {
    let tree = parse("<div><textarea><div>not a div</div></textarea></div>").unwrap();
    assert_eq!(tags(&tree), vec!["div", "textarea"]);
}

#[test]
fn test_comments_kept() {
    let tree = parse("<div><!-- placeholder --><p></p></div>").unwrap();
    let children = tree.children(tree.root());
    assert_eq!(children.len(), 2);
    assert!(matches!(tree.get(children[0]).map(|n| &n.data), Some(NodeData::Comment(_))));
}

#[test]
fn test_void_elements_and_attributes() {
    let tree = parse(r#"<div><br><img SRC="a.png"><input type="text" title="a &amp; b"></div>"#).unwrap();
    assert_eq!(tags(&tree), vec!["div", "br", "img", "input"]);

    let children = tree.children(tree.root());
    assert_eq!(tree.element(children[1]).unwrap().get_attr("src"), Some("a.png"));
    assert_eq!(tree.element(children[2]).unwrap().get_attr("title"), Some("a & b"));
}

// ============================================================================
// APPENDED CONTENT
// ============================================================================

#[test]
fn test_append_multiple_nodes() {
    let mut tree = parse("<div></div>").unwrap();
    let root = tree.root();
    let added = append_html(&mut tree, root, "<span></span>text<em></em>").unwrap();
    assert_eq!(added.len(), 3);
    assert_eq!(tree.children(root), added.as_slice());
}

#[test]
fn test_append_reuses_parser() {
    let parser = HtmlParser::default();
    let mut tree = parser.parse_tree("<ul></ul>").unwrap();
    let root = tree.root();
    for _ in 0..3 {
        parser.append(&mut tree, root, "<li></li>").unwrap();
    }
    assert_eq!(tree.element_children(root).count(), 3);
}

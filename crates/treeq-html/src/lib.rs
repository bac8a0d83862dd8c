//! treeq HTML - Markup loader
//!
//! Turns HTML text into `treeq_dom` nodes: whole render trees for
//! fixtures, or `innerHTML`-style content appended under an existing node.

mod parser;

pub use parser::HtmlParser;

use treeq_dom::{DomTree, NodeId};

/// Parse markup into a fresh tree rooted at its first top-level element
pub fn parse(html: &str) -> Result<DomTree, HtmlError> {
    HtmlParser::new().parse_tree(html)
}

/// Parse markup and append it under `parent` (`innerHTML` content)
pub fn append_html(tree: &mut DomTree, parent: NodeId, html: &str) -> Result<Vec<NodeId>, HtmlError> {
    HtmlParser::new().append(tree, parent, html)
}

/// Markup loading error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("failed to read markup: {0}")]
    Io(#[from] std::io::Error),

    #[error("markup contains no element to use as root")]
    NoRoot,

    #[error("markup has more than one top-level element")]
    MultipleRoots,

    #[error(transparent)]
    Dom(#[from] treeq_dom::DomError),
}

//! treeq CSS - Selector engine
//!
//! Parses the supported selector subset and matches it against a
//! `treeq_dom::DomTree`:
//! - type, universal, `.class`, `#id`, `[attr]`, `[attr=value]`
//! - descendant and child combinators, comma-separated lists
//! - argument-free structural pseudo-classes (`:first-of-type`, ...)

mod parser;
mod query;
mod validate;
pub mod selectors;

pub use parser::parse_selector_list;
pub use selectors::{
    AttributeSelector, Combinator, ComplexSelector, CompoundSelector, PseudoClass,
    SelectorList, SimpleSelector,
};
pub use validate::check_syntax;

/// Selector parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected {found} at offset {offset} in `{selector}`")]
    Unexpected {
        selector: String,
        offset: usize,
        found: String,
    },
    #[error("unsupported selector feature `{feature}` in `{selector}`")]
    Unsupported { selector: String, feature: String },
    #[error("syntax error in `{selector}`: {message}")]
    Syntax { selector: String, message: String },
}

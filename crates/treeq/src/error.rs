//! Query errors
//!
//! Messages are fixed: callers match on them, and a malformed CSS string
//! reports exactly like a selector of the wrong shape.

/// Query error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Wrong selector shape, or CSS text that does not parse
    #[error("find selector must be a valid CSS selector, component definition, or find option object")]
    InvalidSelector,

    /// Ref query against a wrapper that is not bound to a component
    #[error("ref selectors can only be used on component wrappers")]
    RefOnNonComponent,
}

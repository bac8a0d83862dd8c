//! treeq
//!
//! Query engine for rendered component trees: locate markup elements and
//! component instances by CSS selector, component definition, declared
//! name, or ref name, and get them back in document order without
//! duplicates.
//!
//! # Example
//! ```rust,ignore
//! use treeq::{mount, Value};
//!
//! let wrapper = mount(&tree);
//! let items = wrapper.find_all("ul > li")?;
//! let child = wrapper.find_component(&child_def)?;
//! let named = wrapper.find_all(Value::name_query("test-component"))?;
//! ```

mod config;
mod error;
mod value;
mod selector;
mod scope;
mod components;
mod resolve;
mod wrapper;

pub use config::QueryConfig;
pub use error::QueryError;
pub use value::{Object, Value};
pub use selector::{Selector, SelectorKind};
pub use wrapper::{Target, Wrapper, WrapperArray};

// Re-export sub-crates for tree construction and raw selector access
pub use treeq_css as css;
pub use treeq_dom as dom;

/// Bind a wrapper to the root of a rendered tree
pub fn mount(tree: &dom::DomTree) -> Wrapper<'_> {
    Wrapper::mount(tree)
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

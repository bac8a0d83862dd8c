//! Query Configuration

use serde::{Deserialize, Serialize};

/// Query configuration options, carried from a wrapper to every wrapper
/// it produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Treat the wrapper's own node as a match candidate
    pub include_root: bool,

    /// Also run CSS text through the lightningcss syntax check
    pub strict_syntax: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            include_root: false,
            strict_syntax: true,
        }
    }
}

impl QueryConfig {
    pub fn with_include_root(mut self, include_root: bool) -> Self {
        self.include_root = include_root;
        self
    }

    pub fn with_strict_syntax(mut self, strict_syntax: bool) -> Self {
        self.strict_syntax = strict_syntax;
        self
    }
}

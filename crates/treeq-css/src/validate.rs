//! Syntax check through lightningcss
//!
//! Wraps the selector in an empty style rule and lets the stylesheet
//! parser judge it, so text a browser-grade parser rejects is rejected
//! here too.

use lightningcss::stylesheet::{ParserOptions, StyleSheet};

use crate::CssError;

/// Check selector syntax with lightningcss
pub fn check_syntax(selector: &str) -> Result<(), CssError> {
    // Braces or semicolons would let the text escape the rule prelude
    if selector.contains(['{', '}', ';']) {
        return Err(CssError::Syntax {
            selector: selector.to_string(),
            message: "rule delimiters are not allowed in a selector".to_string(),
        });
    }

    let source = format!("{selector} {{}}");
    StyleSheet::parse(&source, ParserOptions::default())
        .map(|_| ())
        .map_err(|e| CssError::Syntax {
            selector: selector.to_string(),
            message: e.to_string(),
        })
}

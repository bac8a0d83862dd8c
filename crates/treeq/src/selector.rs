//! Selector normalization
//!
//! Classifies a raw caller value into one of the four selector kinds.
//! CSS text is not parsed here; syntax errors surface when the markup
//! matcher runs.

use treeq_dom::ComponentDef;

use crate::{Object, QueryError, Value};

/// Normalized selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector text
    Css(String),
    /// Component definition, matched through its extension chain
    Component(ComponentDef),
    /// `{ name }` option: declared component name
    Name(String),
    /// `{ ref }` option: ref name on the bound component
    Ref(String),
}

/// Selector kind, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    Css,
    Component,
    Name,
    Ref,
}

impl Selector {
    /// Classify a raw value. Everything that is not a string, a component
    /// definition, or an object with exactly one `name`/`ref` string entry
    /// is rejected.
    pub fn normalize(raw: &Value) -> Result<Self, QueryError> {
        let selector = match raw {
            Value::String(text) => Some(Self::Css(text.clone())),
            Value::Component(def) => Some(Self::Component(def.clone())),
            Value::Object(object) => Self::from_options(object),
            _ => None,
        };
        selector.ok_or_else(|| {
            tracing::debug!("Rejected selector of shape {}", raw.type_name());
            QueryError::InvalidSelector
        })
    }

    fn from_options(object: &Object) -> Option<Self> {
        match object.entries() {
            [(key, Value::String(name))] if key == "name" => Some(Self::Name(name.clone())),
            [(key, Value::String(name))] if key == "ref" => Some(Self::Ref(name.clone())),
            _ => None,
        }
    }

    pub fn kind(&self) -> SelectorKind {
        match self {
            Self::Css(_) => SelectorKind::Css,
            Self::Component(_) => SelectorKind::Component,
            Self::Name(_) => SelectorKind::Name,
            Self::Ref(_) => SelectorKind::Ref,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_valid_shapes() {
        let def = ComponentDef::named("c");
        assert_eq!(Selector::normalize(&"p".into()), Ok(Selector::Css("p".into())));
        assert_eq!(Selector::normalize(&(&def).into()), Ok(Selector::Component(def)));
        assert_eq!(
            Selector::normalize(&Value::name_query("test-component")),
            Ok(Selector::Name("test-component".into()))
        );
        assert_eq!(Selector::normalize(&Value::ref_query("foo")), Ok(Selector::Ref("foo".into())));
    }

    #[test]
    fn test_malformed_css_is_not_checked_here() {
        assert_eq!(
            Selector::normalize(&r#"[href=&6"/"]"#.into()),
            Ok(Selector::Css(r#"[href=&6"/"]"#.into()))
        );
    }

    #[test]
    fn test_reject_invalid_shapes() {
        let invalid = [
            Value::Undefined,
            Value::Null,
            Value::from(f64::NAN),
            Value::from(0),
            Value::from(2),
            Value::from(true),
            Value::from(false),
            Value::Function,
            Value::object([]),
            Value::object([("name", Value::Undefined)]),
            Value::object([("name", Value::from(3))]),
            Value::object([("ref", Value::from("foo")), ("nope", Value::from(true))]),
            Value::object([("other", Value::from("foo"))]),
            Value::Array(Vec::new()),
            Value::Array(vec![Value::from("p")]),
        ];
        for value in invalid {
            assert_eq!(Selector::normalize(&value), Err(QueryError::InvalidSelector), "{value:?}");
        }
    }

    #[test]
    fn test_kind() {
        assert_eq!(Selector::Css("p".into()).kind(), SelectorKind::Css);
        assert_eq!(Selector::Ref("r".into()).kind(), SelectorKind::Ref);
    }
}

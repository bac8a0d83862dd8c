//! Raw selector values
//!
//! Callers hand the engine loosely-shaped values; `Value` models every
//! shape a caller can pass so the normalizer can reject the wrong ones.
//! Objects sit behind a shared handle so a stored selector can be
//! compared by identity with the one the caller still holds.

use std::sync::Arc;

use treeq_dom::ComponentDef;

/// Any value a caller can pass as a selector
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Arc<Object>),
    /// A callable that is not a component definition
    Function,
    /// A component definition
    Component(ComponentDef),
}

/// Plain object: ordered key/value entries with unique keys
#[derive(Debug, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace an entry, keeping first-insertion order
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Value {
    /// Object value from key/value pairs
    pub fn object<'a>(entries: impl IntoIterator<Item = (&'a str, Value)>) -> Self {
        let object = entries
            .into_iter()
            .fold(Object::new(), |object, (key, value)| object.with(key, value));
        Value::Object(Arc::new(object))
    }

    /// `{ name: <name> }`
    pub fn name_query(name: &str) -> Self {
        Self::object([("name", Value::from(name))])
    }

    /// `{ ref: <name> }`
    pub fn ref_query(name: &str) -> Self {
        Self::object([("ref", Value::from(name))])
    }

    /// Provenance equality: identity for objects, components and
    /// functions; value equality for everything else
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Component(a), Value::Component(b)) => a.same(b),
            (Value::Function, _) | (_, Value::Function) => false,
            _ => self == other,
        }
    }

    /// Short shape name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function => "function",
            Value::Component(_) => "component",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b) || a == b,
            (Value::Component(a), Value::Component(b)) => a.same(b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(Arc::new(object))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<ComponentDef> for Value {
    fn from(def: ComponentDef) -> Self {
        Value::Component(def)
    }
}

impl From<&ComponentDef> for Value {
    fn from(def: &ComponentDef) -> Self {
        Value::Component(def.clone())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_identity_vs_equality() {
        let a = Value::ref_query("foo");
        let b = Value::ref_query("foo");
        assert_eq!(a, b);
        assert!(!a.same(&b));
        assert!(a.same(&a.clone()));
    }

    #[test]
    fn test_strings_compare_by_value() {
        assert!(Value::from("p").same(&Value::from(String::from("p"))));
        assert!(!Value::from("p").same(&Value::from("div")));
    }

    #[test]
    fn test_nan_is_never_same() {
        let nan = Value::from(f64::NAN);
        assert!(!nan.same(&nan.clone()));
    }

    #[test]
    fn test_components_compare_by_identity() {
        let def = ComponentDef::named("c");
        assert!(Value::from(&def).same(&Value::from(def.clone())));
        assert!(!Value::from(&def).same(&Value::from(ComponentDef::named("c"))));
    }

    #[test]
    fn test_object_insert_replaces() {
        let object = Object::new().with("ref", "a").with("ref", "b");
        assert_eq!(object.len(), 1);
        assert_eq!(object.get("ref"), Some(&Value::from("b")));
    }
}

//! Tolerant navigation over loosely structured JSON documents.
//!
//! [`Node`] wraps an optional reference into a [`serde_json::Value`]. Every
//! accessor returns another `Node` instead of failing, so a chain such as
//! `doc.get("a").get("b").first().get("c")` simply ends up absent when any
//! step is missing or has the wrong type. Callers that need a container to
//! exist use [`Node::require`], which is the only fallible step.

use serde_json::Value;

use crate::error::ParseError;

/// Whether a fetched document carries nothing at all.
///
/// `null`, `false`, zero, and an empty string, array or object all count as
/// blank. A blank document is a failed fetch, not a document to parse.
///
/// ```
/// use serde_json::json;
/// use twwx_core::document::is_blank;
///
/// assert!(is_blank(&json!({})));
/// assert!(!is_blank(&json!({"cwaopendata": {}})));
/// ```
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// A possibly-absent position in a JSON document.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    value: Option<&'a Value>,
}

impl<'a> Node<'a> {
    /// Wrap a document root.
    pub fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    /// An absent node.
    pub fn missing() -> Self {
        Self { value: None }
    }

    /// Child under `key`, absent unless this node is an object holding it.
    pub fn get(&self, key: &str) -> Node<'a> {
        Node {
            value: self.value.and_then(|v| v.as_object()).and_then(|o| o.get(key)),
        }
    }

    /// First element, absent unless this node is a non-empty array.
    pub fn first(&self) -> Node<'a> {
        Node {
            value: self.value.and_then(|v| v.as_array()).and_then(|a| a.first()),
        }
    }

    /// Like [`get`](Node::get), but a missing or null child is an error
    /// naming `path`.
    pub fn require(&self, key: &str, path: &str) -> Result<Node<'a>, ParseError> {
        let child = self.get(key);
        if child.is_present() {
            Ok(child)
        } else {
            Err(ParseError::MissingKey(path.to_string()))
        }
    }

    /// Whether the node exists and is not `null`.
    pub fn is_present(&self) -> bool {
        self.value.is_some_and(|v| !v.is_null())
    }

    pub fn is_object(&self) -> bool {
        self.value.is_some_and(Value::is_object)
    }

    /// Array elements, or `None` if this node is not an array.
    pub fn as_array(&self) -> Option<&'a [Value]> {
        self.value.and_then(|v| v.as_array()).map(Vec::as_slice)
    }

    /// Array elements as nodes; empty for anything that is not an array.
    pub fn items(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        self.as_array().unwrap_or(&[]).iter().map(Node::new)
    }

    /// Scalar text: strings verbatim, numbers and booleans rendered.
    pub fn text(&self) -> Option<String> {
        match self.value? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Scalar text, treating an empty string as absent.
    pub fn non_empty_text(&self) -> Option<String> {
        self.text().filter(|s| !s.is_empty())
    }
}

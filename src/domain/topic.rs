use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One selectable unit of a sheet: a question, a command or a concept.
///
/// Topics are opaque JSON documents. Only `id` and the title-bearing field
/// are read; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(Map<String, Value>);

impl Topic {
  /// Wrap a JSON value. Anything other than an object is not a topic.
  pub fn from_value(value: Value) -> Option<Self> {
    match value {
      Value::Object(map) => Some(Self(map)),
      _ => None,
    }
  }

  /// Normalized ID, or None when the document has no usable `id`.
  pub fn id(&self) -> Option<String> {
    self.0.get("id").and_then(normalize_id)
  }

  /// Read a field as display text. Numbers are rendered, other types ignored.
  pub fn text_field(&self, key: &str) -> Option<String> {
    match self.0.get(key)? {
      Value::String(s) => Some(s.clone()),
      Value::Number(n) => Some(n.to_string()),
      _ => None,
    }
  }

  pub fn get(&self, key: &str) -> Option<&Value> {
    self.0.get(key)
  }
}

/// Normalize a stored ID to the string form used by history and revision.
///
/// `"7"`, `" 7 "` and `7` compare equal after normalization. Blank strings,
/// null, booleans and containers are not IDs.
pub fn normalize_id(value: &Value) -> Option<String> {
  match value {
    Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

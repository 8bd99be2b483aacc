//! Data-shape adapters: turn a stored sheet document into a flat topic list.
//!
//! Adapters never fail. A document that does not have the expected shape
//! yields an empty list and a warning.

use serde_json::Value;

use crate::domain::Topic;

/// Where the topics live inside a stored sheet document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataShape {
    /// The document is already an array of topics
    Flat,
    /// `document[outer][*][inner]`, concatenated
    Nested {
        outer: &'static str,
        inner: &'static str,
    },
    /// `document[key]` is the array of topics
    Wrapped { key: &'static str },
    /// A company question page: `document.data.problem_list`
    AuxiliaryPages,
}

/// Normalize `document` into topics according to `shape`.
pub fn normalize(shape: DataShape, sheet: &str, document: &Value) -> Vec<Topic> {
    match shape {
        DataShape::Flat => match document.as_array() {
            Some(items) => collect_topics(sheet, items),
            None => reject(sheet, "expected a top-level array"),
        },
        DataShape::Nested { outer, inner } => {
            let Some(groups) = document.get(outer).and_then(Value::as_array) else {
                return reject(sheet, &format!("expected array at `{}`", outer));
            };
            let mut topics = Vec::new();
            for (idx, group) in groups.iter().enumerate() {
                if !group.is_object() {
                    tracing::warn!("{}: skipping non-object entry {} in `{}`", sheet, idx, outer);
                    continue;
                }
                if let Some(items) = group.get(inner).and_then(Value::as_array) {
                    topics.extend(collect_topics(sheet, items));
                }
            }
            topics
        }
        DataShape::Wrapped { key } => match document.get(key).and_then(Value::as_array) {
            Some(items) => collect_topics(sheet, items),
            None => reject(sheet, &format!("expected array at `{}`", key)),
        },
        DataShape::AuxiliaryPages => {
            match document
                .get("data")
                .and_then(|d| d.get("problem_list"))
                .and_then(Value::as_array)
            {
                Some(items) => collect_topics(sheet, items),
                None => reject(sheet, "expected array at `data.problem_list`"),
            }
        }
    }
}

fn collect_topics(sheet: &str, items: &[Value]) -> Vec<Topic> {
    let topics: Vec<Topic> = items.iter().cloned().filter_map(Topic::from_value).collect();
    let dropped = items.len() - topics.len();
    if dropped > 0 {
        tracing::warn!("{}: dropped {} non-object topic entries", sheet, dropped);
    }
    topics
}

fn reject(sheet: &str, reason: &str) -> Vec<Topic> {
    tracing::warn!("Invalid data format for {}: {}", sheet, reason);
    Vec::new()
}

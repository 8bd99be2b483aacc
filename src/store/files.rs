//! File-based topic source: one wrapper document per sheet.
//!
//! `<dir>/<sheet_type>.json` holds the sheet either as a flat array of topics
//! (an export of the topic table) or in its nested upstream form, which is
//! normalized through the sheet's data-shape adapter on every read.

use std::fs;
use std::path::PathBuf;

use super::{StoreError, TopicStore};
use crate::domain::Topic;
use crate::sheets::{shape, DataShape, SheetDefinition};

#[derive(Debug, Clone)]
pub struct SheetFileStore {
  dir: PathBuf,
}

impl SheetFileStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn sheet_path(&self, sheet_type: &str) -> PathBuf {
    self.dir.join(format!("{}.json", sheet_type))
  }
}

impl TopicStore for SheetFileStore {
  fn find_all(&self, sheet: &SheetDefinition) -> Result<Vec<Topic>, StoreError> {
    let path = self.sheet_path(sheet.name);
    let display = path.display().to_string();

    let content =
      fs::read_to_string(&path).map_err(|e| StoreError::Io(display.clone(), e.to_string()))?;
    let document: serde_json::Value =
      serde_json::from_str(&content).map_err(|e| StoreError::Parse(display, e.to_string()))?;

    let data_shape = if document.is_array() {
      DataShape::Flat
    } else {
      sheet.data_shape
    };
    Ok(shape::normalize(data_shape, sheet.name, &document))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sheets::lookup;
  use serde_json::json;
  use tempfile::TempDir;

  #[test]
  fn test_reads_nested_sheet() {
    let temp = TempDir::new().unwrap();
    let doc = json!({"sheetData": [{"questions": [{"id": 175, "title": "Combine Two Tables"}]}]});
    fs::write(temp.path().join("lc_sql_50.json"), doc.to_string()).unwrap();

    let store = SheetFileStore::new(temp.path());
    let topics = store.find_all(lookup("lc_sql_50").unwrap()).unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].id().as_deref(), Some("175"));
  }

  #[test]
  fn test_reads_flat_export() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("sde_sheet.json"), r#"[{"id": 1}, {"id": "2"}]"#).unwrap();

    let store = SheetFileStore::new(temp.path());
    let topics = store.find_all(lookup("sde_sheet").unwrap()).unwrap();
    let ids: Vec<_> = topics.iter().filter_map(Topic::id).collect();
    assert_eq!(ids, vec!["1", "2"]);
  }

  #[test]
  fn test_wrong_shape_is_empty_not_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("docker_commands.json"), r#"{"commands": []}"#).unwrap();

    let store = SheetFileStore::new(temp.path());
    let topics = store.find_all(lookup("docker_commands").unwrap()).unwrap();
    assert!(topics.is_empty());
  }

  #[test]
  fn test_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let store = SheetFileStore::new(temp.path());
    let err = store.find_all(lookup("sde_sheet").unwrap()).unwrap_err();
    assert!(matches!(err, StoreError::Io(_, _)));
  }

  #[test]
  fn test_invalid_json_is_parse_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("langgraph.json"), "{").unwrap();
    let store = SheetFileStore::new(temp.path());
    let err = store.find_all(lookup("langgraph").unwrap()).unwrap_err();
    assert!(matches!(err, StoreError::Parse(_, _)));
  }
}

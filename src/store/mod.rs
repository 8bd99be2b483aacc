//! Storage seams used by the selection engine.
//!
//! The engine only talks to these traits. `db::SqliteStore` implements both;
//! `files::SheetFileStore` is the read-only, file-based topic source.

pub mod files;

use std::collections::HashSet;

use crate::db::DbLockError;
use crate::domain::Topic;
use crate::sheets::SheetDefinition;

pub use files::SheetFileStore;

/// Source of candidate topics for a sheet.
pub trait TopicStore: Send + Sync {
  /// Every topic of the sheet, flattened.
  fn find_all(&self, sheet: &SheetDefinition) -> Result<Vec<Topic>, StoreError>;
}

/// Per-sheet history (solved IDs) and revision (deferred IDs) sets.
///
/// The add operations are atomic set-inserts: they report `true` only for
/// the call that actually inserted the ID.
pub trait ProgressStore: Send + Sync {
  fn history(&self, sheet_type: &str) -> Result<HashSet<String>, StoreError>;

  fn add_to_history(&self, sheet_type: &str, topic_id: &str) -> Result<bool, StoreError>;

  fn remove_from_history(&self, sheet_type: &str, topic_id: &str) -> Result<bool, StoreError>;

  fn add_to_revision(&self, sheet_type: &str, topic_id: &str) -> Result<bool, StoreError>;

  /// Revision IDs in the order they were marked.
  fn revision(&self, sheet_type: &str) -> Result<Vec<String>, StoreError>;
}

/// Storage-layer failures.
#[derive(Debug)]
pub enum StoreError {
  Lock,
  Sqlite(rusqlite::Error),
  Io(String, String),
  Parse(String, String),
}

impl std::fmt::Display for StoreError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StoreError::Lock => write!(f, "Database unavailable"),
      StoreError::Sqlite(e) => write!(f, "Database error: {}", e),
      StoreError::Io(path, err) => write!(f, "IO error reading {}: {}", path, err),
      StoreError::Parse(path, err) => write!(f, "Parse error in {}: {}", path, err),
    }
  }
}

impl std::error::Error for StoreError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      StoreError::Sqlite(e) => Some(e),
      _ => None,
    }
  }
}

impl From<rusqlite::Error> for StoreError {
  fn from(e: rusqlite::Error) -> Self {
    StoreError::Sqlite(e)
  }
}

impl From<DbLockError> for StoreError {
  fn from(_: DbLockError) -> Self {
    StoreError::Lock
  }
}

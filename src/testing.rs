//! Test utilities for database and sheet fixtures.
//!
//! Reuses the real schema initialization so tests never carry their own copy
//! of the tables.

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::db::{self, SqliteStore};
use crate::domain::Topic;
use crate::engine::SheetHandlerFactory;

/// Temporary database plus a sheets directory, cleaned up on drop.
pub struct TestEnv {
    /// Temporary directory (kept alive for file persistence)
    pub temp: TempDir,
    /// Store on `roulette.db` inside `temp`, fully migrated
    pub store: SqliteStore,
    /// Wrapper files and auxiliary page directories
    pub sheets_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let conn = rusqlite::Connection::open(temp.path().join("roulette.db"))?;
        db::run_migrations(&conn)?;
        let store = SqliteStore::new(Arc::new(Mutex::new(conn)));

        let sheets_dir = temp.path().join("sheets");
        std::fs::create_dir_all(&sheets_dir)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Self {
            temp,
            store,
            sheets_dir,
        })
    }

    /// Get the temporary directory path for creating test files.
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Insert a JSON array of topic documents for `sheet_type`.
    pub fn seed(&self, sheet_type: &str, docs: Value) {
        self.store.insert_topics(sheet_type, &topics(docs)).unwrap();
    }

    /// Write one company question page (`{"data": {"problem_list": items}}`).
    pub fn write_auxiliary_page(&self, dir_name: &str, file_name: &str, items: Value) {
        let dir = self.sheets_dir.join(dir_name);
        std::fs::create_dir_all(&dir).unwrap();
        let doc = serde_json::json!({"data": {"problem_list": items}});
        std::fs::write(dir.join(file_name), doc.to_string()).unwrap();
    }

    /// Factory backed by the database store for both topics and progress.
    pub fn factory(&self) -> SheetHandlerFactory {
        let store = Arc::new(self.store.clone());
        SheetHandlerFactory::new(store.clone(), store, &self.sheets_dir)
    }
}

/// Parse a JSON array into topics, dropping non-objects.
pub fn topics(docs: Value) -> Vec<Topic> {
    match docs {
        Value::Array(items) => items.into_iter().filter_map(Topic::from_value).collect(),
        _ => panic!("expected a JSON array of topics"),
    }
}

pub mod progress;
pub mod schema;
pub mod topics;

use rusqlite::{Connection, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::Topic;
use crate::sheets::SheetDefinition;
use crate::store::{ProgressStore, StoreError, TopicStore};

pub use progress::*;
pub use schema::run_migrations;
pub use topics::*;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }
}

/// Error returned when database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).ok();
  }

  // Create backup before migrations if database exists
  if path.exists() {
    let backup_path = path.with_extension("db.backup");
    if let Err(e) = std::fs::copy(path, &backup_path) {
      tracing::warn!("Could not create database backup: {}", e);
    }
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

/// Topic and progress store on a shared SQLite connection.
///
/// Each call holds the lock for one statement, so concurrent requests
/// interleave between calls but never inside one.
#[derive(Clone)]
pub struct SqliteStore {
  pool: DbPool,
}

impl SqliteStore {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &DbPool {
    &self.pool
  }

  /// Insert or replace topics of a sheet. Returns the number of rows written.
  pub fn insert_topics(&self, sheet_type: &str, topics: &[Topic]) -> std::result::Result<usize, StoreError> {
    let mut conn = try_lock(&self.pool)?;
    let written = upsert_topics(&mut conn, sheet_type, topics)?;
    tracing::info!(
      "{}: wrote {} topics ({} stored)",
      sheet_type,
      written,
      count_topics(&conn, sheet_type)?
    );
    Ok(written)
  }
}

impl TopicStore for SqliteStore {
  fn find_all(&self, sheet: &SheetDefinition) -> std::result::Result<Vec<Topic>, StoreError> {
    let conn = try_lock(&self.pool)?;
    Ok(get_topics(&conn, sheet.name)?)
  }
}

impl ProgressStore for SqliteStore {
  fn history(&self, sheet_type: &str) -> std::result::Result<HashSet<String>, StoreError> {
    let conn = try_lock(&self.pool)?;
    Ok(get_history(&conn, sheet_type)?)
  }

  fn add_to_history(&self, sheet_type: &str, topic_id: &str) -> std::result::Result<bool, StoreError> {
    let conn = try_lock(&self.pool)?;
    Ok(insert_history(&conn, sheet_type, topic_id)?)
  }

  fn remove_from_history(&self, sheet_type: &str, topic_id: &str) -> std::result::Result<bool, StoreError> {
    let conn = try_lock(&self.pool)?;
    Ok(delete_history(&conn, sheet_type, topic_id)?)
  }

  fn add_to_revision(&self, sheet_type: &str, topic_id: &str) -> std::result::Result<bool, StoreError> {
    let conn = try_lock(&self.pool)?;
    Ok(insert_revision(&conn, sheet_type, topic_id)?)
  }

  fn revision(&self, sheet_type: &str) -> std::result::Result<Vec<String>, StoreError> {
    let conn = try_lock(&self.pool)?;
    Ok(get_revision(&conn, sheet_type)?)
  }
}

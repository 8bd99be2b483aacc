//! History and revision sets, one logical record per sheet type.
//!
//! Both tables are keyed by `(sheet_type, topic_id)`, so adding is a single
//! `INSERT OR IGNORE`: atomic, idempotent, and it tells the caller whether
//! this call was the one that inserted the row.

use chrono::Utc;
use rusqlite::{params, Connection, Result};
use std::collections::HashSet;

pub fn get_history(conn: &Connection, sheet_type: &str) -> Result<HashSet<String>> {
  let mut stmt = conn.prepare("SELECT topic_id FROM history WHERE sheet_type = ?1")?;
  let ids = stmt
    .query_map(params![sheet_type], |row| row.get(0))?
    .collect::<Result<HashSet<String>>>()?;
  Ok(ids)
}

/// Returns true if the id was not already in the history.
pub fn insert_history(conn: &Connection, sheet_type: &str, topic_id: &str) -> Result<bool> {
  let inserted = conn.execute(
    "INSERT OR IGNORE INTO history (sheet_type, topic_id, solved_at) VALUES (?1, ?2, ?3)",
    params![sheet_type, topic_id, Utc::now().to_rfc3339()],
  )?;
  Ok(inserted == 1)
}

/// Returns true if a row was removed.
pub fn delete_history(conn: &Connection, sheet_type: &str, topic_id: &str) -> Result<bool> {
  let deleted = conn.execute(
    "DELETE FROM history WHERE sheet_type = ?1 AND topic_id = ?2",
    params![sheet_type, topic_id],
  )?;
  Ok(deleted > 0)
}

/// Returns true if the id was not already marked.
pub fn insert_revision(conn: &Connection, sheet_type: &str, topic_id: &str) -> Result<bool> {
  let inserted = conn.execute(
    "INSERT OR IGNORE INTO revision (sheet_type, topic_id, marked_at) VALUES (?1, ?2, ?3)",
    params![sheet_type, topic_id, Utc::now().to_rfc3339()],
  )?;
  Ok(inserted == 1)
}

/// Revision ids in marking order.
pub fn get_revision(conn: &Connection, sheet_type: &str) -> Result<Vec<String>> {
  let mut stmt =
    conn.prepare("SELECT topic_id FROM revision WHERE sheet_type = ?1 ORDER BY rowid")?;
  let ids = stmt
    .query_map(params![sheet_type], |row| row.get(0))?
    .collect::<Result<Vec<String>>>()?;
  Ok(ids)
}

//! Topic documents per sheet

use rusqlite::{params, Connection, Result};

use crate::domain::Topic;

/// Insert topics, replacing the body of any topic whose id already exists.
///
/// Runs in one transaction. Topics without an id are stored with a NULL
/// `topic_id` and never conflict.
pub fn upsert_topics(conn: &mut Connection, sheet_type: &str, topics: &[Topic]) -> Result<usize> {
  let tx = conn.transaction()?;
  let mut written = 0;
  {
    let mut stmt = tx.prepare(
      r#"
      INSERT INTO topics (sheet_type, topic_id, body)
      VALUES (?1, ?2, ?3)
      ON CONFLICT (sheet_type, topic_id) DO UPDATE SET body = excluded.body
      "#,
    )?;
    for topic in topics {
      let body = serde_json::to_string(topic)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
      written += stmt.execute(params![sheet_type, topic.id(), body])?;
    }
  }
  tx.commit()?;
  Ok(written)
}

/// All topics of a sheet in insertion order.
///
/// Rows whose body is not a JSON object are skipped with a warning.
pub fn get_topics(conn: &Connection, sheet_type: &str) -> Result<Vec<Topic>> {
  let mut stmt = conn.prepare("SELECT id, body FROM topics WHERE sheet_type = ?1 ORDER BY id")?;

  let rows = stmt
    .query_map(params![sheet_type], |row| {
      Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
    })?
    .collect::<Result<Vec<_>>>()?;

  let mut topics = Vec::with_capacity(rows.len());
  for (row_id, body) in rows {
    match serde_json::from_str::<serde_json::Value>(&body).ok().and_then(Topic::from_value) {
      Some(topic) => topics.push(topic),
      None => tracing::warn!("Skipping unreadable topic row {} in {}", row_id, sheet_type),
    }
  }
  Ok(topics)
}

pub fn count_topics(conn: &Connection, sheet_type: &str) -> Result<i64> {
  conn.query_row(
    "SELECT COUNT(*) FROM topics WHERE sheet_type = ?1",
    params![sheet_type],
    |row| row.get(0),
  )
}

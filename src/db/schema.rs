use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Tables are created with their complete schema; every statement is
  // idempotent so this runs on every start.
  conn.execute_batch(
    r#"
    -- One row per topic. topic_id is NULL for documents without a usable id;
    -- those rows are kept so they can be reported, never selected.
    CREATE TABLE IF NOT EXISTS topics (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      sheet_type TEXT NOT NULL,
      topic_id TEXT,
      body TEXT NOT NULL,
      UNIQUE (sheet_type, topic_id)
    );

    CREATE TABLE IF NOT EXISTS history (
      sheet_type TEXT NOT NULL,
      topic_id TEXT NOT NULL,
      solved_at TEXT NOT NULL,
      PRIMARY KEY (sheet_type, topic_id)
    );

    CREATE TABLE IF NOT EXISTS revision (
      sheet_type TEXT NOT NULL,
      topic_id TEXT NOT NULL,
      marked_at TEXT NOT NULL,
      PRIMARY KEY (sheet_type, topic_id)
    );

    CREATE INDEX IF NOT EXISTS idx_topics_sheet_type ON topics(sheet_type);
    "#,
  )?;

  Ok(())
}

//! Project path functions - single source of truth for default file paths.
//!
//! ## Environment Variables
//!
//! - `DATA_DIR`: Override the base data directory (default: "data")
//!
//! Explicit settings (`DATABASE_PATH`, `SHEETS_DIR`, config.toml) take
//! precedence over these defaults, see config.rs. Separate data directories
//! allow isolated instances:
//! ```bash
//! DATA_DIR=data/test PORT=8001 cargo run
//! ```

use std::env;
use std::sync::OnceLock;

/// Lazily initialized data directory from DATA_DIR env var
static DATA_DIR_VALUE: OnceLock<String> = OnceLock::new();

/// Get the base data directory (from DATA_DIR env var or default "data")
pub fn data_dir() -> &'static str {
    DATA_DIR_VALUE.get_or_init(|| env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// SQLite database holding topics, history and revision sets
pub fn db_path() -> String {
    format!("{}/sheet_roulette.db", data_dir())
}

/// Wrapper files (`<sheet_type>.json`) and company question page directories
pub fn sheets_dir() -> String {
    format!("{}/sheets", data_dir())
}

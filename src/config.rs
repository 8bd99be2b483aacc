//! Application configuration.
//!
//! Every value is resolved with priority: config.toml > environment (.env is
//! loaded first) > default.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::paths;

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8000;

/// Default bind address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

// ==================== config.toml ====================

#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
    server: Option<ServerConfig>,
    content: Option<ContentConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct ContentConfig {
    sheets_dir: Option<String>,
    source: Option<String>,
}

// ==================== Settings ====================

/// Where topic lists are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicSource {
    /// The `topics` table of the SQLite database
    Database,
    /// One wrapper JSON file per sheet under the sheets directory
    Files,
}

impl TopicSource {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "database" | "db" => Some(TopicSource::Database),
            "files" | "file" => Some(TopicSource::Files),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub sheets_dir: PathBuf,
    pub topic_source: TopicSource,
}

impl Settings {
    /// Load from `config.toml` and the process environment.
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();
        let file = read_config_file(Path::new(CONFIG_FILE));
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn resolve(file: AppConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let AppConfig {
            database,
            server,
            content,
        } = file;
        let (host, port) = server.map(|s| (s.host, s.port)).unwrap_or_default();
        let (sheets_dir, source) = content.map(|c| (c.sheets_dir, c.source)).unwrap_or_default();

        let database_path = database
            .and_then(|d| d.path)
            .or_else(|| env("DATABASE_PATH"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(paths::db_path()));

        let host = host
            .or_else(|| env("SERVER_HOST"))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = port
            .or_else(|| {
                env("PORT").and_then(|p| match p.parse() {
                    Ok(port) => Some(port),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid PORT value: {}", p);
                        None
                    }
                })
            })
            .unwrap_or(DEFAULT_PORT);

        let sheets_dir = sheets_dir
            .or_else(|| env("SHEETS_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(paths::sheets_dir()));

        let topic_source = source
            .or_else(|| env("TOPIC_SOURCE"))
            .and_then(|s| {
                let parsed = TopicSource::parse(&s);
                if parsed.is_none() {
                    tracing::warn!("Unknown topic source '{}', using the database", s);
                }
                parsed
            })
            .unwrap_or(TopicSource::Database);

        Self {
            database_path,
            host,
            port,
            sheets_dir,
            topic_source,
        }
    }

    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_config_file(path: &Path) -> AppConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    match toml::from_str::<AppConfig>(&contents) {
        Ok(config) => {
            tracing::info!("Using configuration from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            AppConfig::default()
        }
    }
}

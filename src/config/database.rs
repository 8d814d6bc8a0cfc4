use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Embedded database configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Filesystem path of the embedded SQLite database file.
    /// TOML: `database.path`. Default: `foodpilot.db`.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("foodpilot.db")
}

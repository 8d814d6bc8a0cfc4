use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum FoodpilotError {
    /// The embedded database file could not be opened or created.
    #[error("storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("invalid CORS origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<figment::Error> for FoodpilotError {
    fn from(e: figment::Error) -> Self {
        FoodpilotError::Config(Box::new(e))
    }
}

impl FoodpilotError {
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, FoodpilotError::StorageUnavailable { .. })
    }
}

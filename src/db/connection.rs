use crate::config::DatabaseConfig;
use crate::error::FoodpilotError;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tracing::{debug, warn};

/// Opens unpooled connections to the embedded SQLite database at a fixed path.
///
/// Every call to [`ConnectionProvider::open_connection`] yields an independent
/// handle owned by the caller. Rows fetched through it are `SqliteRow`s, which
/// can be read by column name (`row.try_get("name")`) as well as by index.
/// Prefer [`ConnectionProvider::with_connection`], which releases the handle
/// on every exit path.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    path: Arc<Path>,
}

impl ConnectionProvider {
    pub fn new(cfg: &DatabaseConfig) -> Self {
        Self::from_path(cfg.path.clone())
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::from(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection, creating the database file if it is missing.
    pub async fn open_connection(&self) -> Result<SqliteConnection, FoodpilotError> {
        let opts = SqliteConnectOptions::new()
            .filename(&*self.path)
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        match opts.connect().await {
            Ok(conn) => {
                debug!(path = %self.path.display(), "sqlite connection opened");
                Ok(conn)
            }
            Err(source) => {
                warn!(path = %self.path.display(), error = %source, "sqlite connection failed");
                Err(FoodpilotError::StorageUnavailable {
                    path: self.path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Release a connection. Close failures are logged, not returned.
    pub async fn close_connection(&self, conn: SqliteConnection) {
        match conn.close().await {
            Ok(()) => debug!(path = %self.path.display(), "sqlite connection closed"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "sqlite close failed"),
        }
    }

    /// Run `f` with a freshly opened connection and close it afterwards,
    /// whether `f` succeeded or not.
    pub async fn with_connection<T, F>(&self, f: F) -> Result<T, FoodpilotError>
    where
        F: AsyncFnOnce(&mut SqliteConnection) -> Result<T, FoodpilotError>,
    {
        let mut conn = self.open_connection().await?;
        let result = f(&mut conn).await;
        self.close_connection(conn).await;
        result
    }
}

//! Database module: access to the embedded SQLite file.
//!
//! No schema is defined here; callers own whatever tables they create.

pub mod connection;

pub use connection::ConnectionProvider;
pub use sqlx::SqliteConnection;

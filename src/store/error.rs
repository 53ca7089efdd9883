//! Error types for the conversation store.

use thiserror::Error;

/// Errors surfaced by [`ConversationStore`](super::ConversationStore).
///
/// The store never retries; every failure reaches the immediate caller.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database was written by a newer build. Opening must not proceed.
    #[error("database schema version {stored} is newer than supported version {supported}")]
    SchemaTooNew { stored: i64, supported: i64 },

    /// SQLite failed to open, prepare, execute or read.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The database holds something the schema should have made impossible.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    /// Filesystem error while preparing the database location.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

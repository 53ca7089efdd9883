//! Conversation watermark storage with SQLite
//!
//! One owned connection per store handle. Opening a store runs the schema
//! guard; there is no other way to obtain a handle, so no registry, ledger or
//! view operation can run against an unchecked database.

mod acknowledgements;
mod conversations;
mod error;
mod schema;
mod unread;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

pub use error::{Result, StoreError};
pub use schema::SUPPORTED_VERSION;

use schema::{SCHEMA, VERSION_SCHEMA};

pub struct ConversationStore {
    conn: Connection,
}

impl ConversationStore {
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %path.display(), "opening conversation store");
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory store (tests, dry runs).
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.check_supported_version()?;
        store.init_schema()?;
        Ok(store)
    }

    /// Create the version singleton if missing and refuse databases written by
    /// a newer build. Older versions are accepted as-is.
    fn check_supported_version(&self) -> Result<()> {
        self.conn.execute_batch(VERSION_SCHEMA)?;

        let created = self.conn.execute(
            "INSERT INTO version (singleton, version) VALUES (1, ?)
             ON CONFLICT(singleton) DO NOTHING",
            params![SUPPORTED_VERSION],
        )?;
        if created > 0 {
            info!(version = SUPPORTED_VERSION, "initialised new conversation store");
        }

        let stored = self.schema_version()?;
        if stored > SUPPORTED_VERSION {
            return Err(StoreError::SchemaTooNew {
                stored,
                supported: SUPPORTED_VERSION,
            });
        }

        debug!(stored, supported = SUPPORTED_VERSION, "schema version accepted");
        Ok(())
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Version recorded in the database's version singleton.
    pub fn schema_version(&self) -> Result<i64> {
        let version = self
            .conn
            .query_row("SELECT version FROM version WHERE singleton = 1", [], |row| {
                row.get(0)
            })?;
        Ok(version)
    }

    /// Close the underlying connection, surfacing any error SQLite reports.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| StoreError::Storage(e))
    }
}

// ============================================
// ROW TYPES
// ============================================

/// A tracked conversation as last observed from the chat service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub conversation_type: String,
    pub display_name: String,
    /// Fixed-format decimal timestamp token; empty when no message was seen.
    pub latest_msg_ts: String,
}

impl Conversation {
    pub fn new(
        id: impl Into<String>,
        conversation_type: impl Into<String>,
        display_name: impl Into<String>,
        latest_msg_ts: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            conversation_type: conversation_type.into(),
            display_name: display_name.into(),
            latest_msg_ts: latest_msg_ts.into(),
        }
    }

    /// Whether any message has ever been observed in this conversation.
    pub fn has_messages(&self) -> bool {
        !self.latest_msg_ts.is_empty()
    }
}

/// One row of the watermark ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknowledgement {
    pub conversation_id: String,
    pub acknowledged_through_ts: String,
    pub acknowledged_at: Option<i64>,
}

/// A conversation with unread content and its resolved watermark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreadConversation {
    #[serde(flatten)]
    pub conversation: Conversation,
    /// Highest acknowledged-through timestamp, empty if never acknowledged.
    pub acknowledged_through_ts: String,
}

impl UnreadConversation {
    /// Point a reader should resume from: the last acknowledged message if
    /// there is one, otherwise the latest message.
    pub fn best_linkable_ts(&self) -> &str {
        if self.acknowledged_through_ts.is_empty() {
            &self.conversation.latest_msg_ts
        } else {
            &self.acknowledged_through_ts
        }
    }
}

//! Acknowledgement ledger.
//!
//! Rows are only ever inserted or deleted by exact (conversation, ts) pair,
//! which keeps ack and unack symmetric without remembering the previous
//! watermark. Superseded rows accumulate until `compact_acknowledgements`.

use chrono::Utc;
use rusqlite::params;
use tracing::{debug, info};

use super::{Acknowledgement, ConversationStore, Result};

impl ConversationStore {
    /// Record that `conversation_id` has been read through `ts`.
    ///
    /// Acknowledging a pair that already exists is a no-op. The timestamp is
    /// not checked against the registry.
    pub fn acknowledge(&self, conversation_id: &str, ts: &str) -> Result<()> {
        let inserted = self.conn.execute(
            r#"INSERT INTO acknowledgements
               (conversation_id, acknowledged_through_ts, acknowledged_at)
               VALUES (?, ?, ?)
               ON CONFLICT(conversation_id, acknowledged_through_ts) DO NOTHING"#,
            params![conversation_id, ts, Utc::now().timestamp()],
        )?;

        debug!(conversation_id, ts, inserted, "acknowledged conversation");
        Ok(())
    }

    /// Remove the watermark `(conversation_id, ts)` if it exists.
    pub fn unacknowledge(&self, conversation_id: &str, ts: &str) -> Result<()> {
        let deleted = self.conn.execute(
            r#"DELETE FROM acknowledgements
               WHERE conversation_id = ? AND acknowledged_through_ts = ?"#,
            params![conversation_id, ts],
        )?;

        debug!(conversation_id, ts, deleted, "unacknowledged conversation");
        Ok(())
    }

    /// Ledger rows for one conversation, highest watermark first.
    pub fn acknowledgements(&self, conversation_id: &str) -> Result<Vec<Acknowledgement>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT conversation_id, acknowledged_through_ts, acknowledged_at
               FROM acknowledgements
               WHERE conversation_id = ?
               ORDER BY acknowledged_through_ts DESC"#,
        )?;

        let rows = stmt.query_map(params![conversation_id], |row| {
            Ok(Acknowledgement {
                conversation_id: row.get(0)?,
                acknowledged_through_ts: row.get(1)?,
                acknowledged_at: row.get(2)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    /// Delete every watermark that is not the highest of its conversation.
    ///
    /// Leaves the unread view unchanged. Returns the number of removed rows.
    pub fn compact_acknowledgements(&self) -> Result<usize> {
        let deleted = self.conn.execute(
            r#"DELETE FROM acknowledgements
               WHERE acknowledged_through_ts < (
                   SELECT MAX(a.acknowledged_through_ts)
                   FROM acknowledgements a
                   WHERE a.conversation_id = acknowledgements.conversation_id
               )"#,
            [],
        )?;

        info!(deleted, "compacted acknowledgement ledger");
        Ok(deleted)
    }
}

//! Conversation registry: one row per conversation, updated only forwards.

use rusqlite::params;
use tracing::debug;

use super::{Conversation, ConversationStore, Result, StoreError};

impl ConversationStore {
    /// Insert a conversation, or refresh it if the incoming `latest_msg_ts`
    /// is strictly newer than the stored one.
    ///
    /// Ties and older timestamps are ignored, so replaying stale or
    /// re-ordered snapshots never loses newer state. Returns whether a row
    /// was written.
    pub fn upsert(&self, conversation: &Conversation) -> Result<bool> {
        let changed = self.conn.execute(
            r#"INSERT INTO conversations
               (id, conversation_type, display_name, latest_msg_ts)
               VALUES (?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   conversation_type = excluded.conversation_type,
                   display_name = excluded.display_name,
                   latest_msg_ts = excluded.latest_msg_ts
               WHERE excluded.latest_msg_ts > conversations.latest_msg_ts"#,
            params![
                conversation.id,
                conversation.conversation_type,
                conversation.display_name,
                conversation.latest_msg_ts,
            ],
        )?;

        if changed == 0 {
            debug!(
                id = %conversation.id,
                ts = %conversation.latest_msg_ts,
                "skipped conversation update, stored timestamp is not older"
            );
        }

        Ok(changed > 0)
    }

    /// Upsert each conversation in order, stopping at the first failure.
    ///
    /// Not wrapped in a transaction: conversations before the failing one
    /// stay committed. Returns how many rows were written.
    pub fn upsert_many(&self, conversations: &[Conversation]) -> Result<usize> {
        let mut written = 0;
        for conversation in conversations {
            if self.upsert(conversation)? {
                written += 1;
            }
        }
        Ok(written)
    }

    /// Look up a conversation by id.
    pub fn get(&self, id: &str) -> Result<Option<Conversation>> {
        let mut stmt = self.conn.prepare(
            r#"SELECT id, conversation_type, display_name, latest_msg_ts
               FROM conversations
               WHERE id = ?"#,
        )?;

        let mut rows = stmt
            .query_map(params![id], |row| {
                Ok(Conversation {
                    id: row.get(0)?,
                    conversation_type: row.get(1)?,
                    display_name: row.get(2)?,
                    latest_msg_ts: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(StoreError::DataIntegrity(format!(
                "found {} rows for conversation id {}",
                n, id
            ))),
        }
    }
}

//! Unacknowledged view, recomputed on every query.

use super::{Conversation, ConversationStore, Result, UnreadConversation};

impl ConversationStore {
    /// Conversations with messages newer than their highest watermark.
    ///
    /// Conversations that never had a message are left out. Ordered by
    /// `latest_msg_ts` descending, then `id` ascending, so repeated queries
    /// paginate stably.
    pub fn list_unacknowledged(&self) -> Result<Vec<UnreadConversation>> {
        let mut stmt = self.conn.prepare(
            r#"WITH latest_acknowledgements AS (
                   SELECT conversation_id,
                          MAX(acknowledged_through_ts) AS acknowledged_through_ts
                   FROM acknowledgements
                   GROUP BY conversation_id
               )
               SELECT c.id, c.conversation_type, c.display_name, c.latest_msg_ts,
                      COALESCE(a.acknowledged_through_ts, '')
               FROM conversations c
               LEFT JOIN latest_acknowledgements a ON c.id = a.conversation_id
               WHERE (a.acknowledged_through_ts IS NULL
                      OR c.latest_msg_ts > a.acknowledged_through_ts)
                 AND c.latest_msg_ts <> ''
               ORDER BY c.latest_msg_ts DESC, c.id ASC"#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(UnreadConversation {
                conversation: Conversation {
                    id: row.get(0)?,
                    conversation_type: row.get(1)?,
                    display_name: row.get(2)?,
                    latest_msg_ts: row.get(3)?,
                },
                acknowledged_through_ts: row.get(4)?,
            })
        })?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Into::into)
    }
}

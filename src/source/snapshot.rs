//! Snapshot file source
//!
//! Reads a JSON export of conversations, as produced by a chat API dump:
//!
//! ```json
//! [
//!   { "id": "D024BE91L", "display_name": "Ada", "latest_msg_ts": "1355517523.000005" },
//!   { "id": "D0C0F7S8Y", "conversation_type": "mpim", "display_name": "Grace",
//!     "messages": [ { "ts": "1355517523.000005" }, { "ts": "1355517524.000001" } ] }
//! ]
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

use super::{latest_ts, ConversationSource};
use crate::store::Conversation;

pub struct SnapshotSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct SnapshotEntry {
    id: String,
    #[serde(default = "default_conversation_type")]
    conversation_type: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    latest_msg_ts: Option<String>,
    #[serde(default)]
    messages: Vec<SnapshotMessage>,
}

#[derive(Debug, Deserialize)]
struct SnapshotMessage {
    ts: String,
}

fn default_conversation_type() -> String {
    "im".to_string()
}

impl SnapshotEntry {
    fn into_conversation(self) -> Result<Conversation> {
        if self.id.trim().is_empty() {
            bail!("Conversation entry has an empty id");
        }

        let latest_msg_ts = match self.latest_msg_ts {
            Some(ts) => ts,
            None => latest_ts(self.messages.iter().map(|m| m.ts.as_str())),
        };

        let display_name = if self.display_name.is_empty() {
            self.id.clone()
        } else {
            self.display_name
        };

        Ok(Conversation {
            id: self.id,
            conversation_type: self.conversation_type,
            display_name,
            latest_msg_ts,
        })
    }
}

impl SnapshotSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn parse(content: &str) -> Result<Vec<Conversation>> {
        let entries: Vec<SnapshotEntry> =
            serde_json::from_str(content).context("Snapshot is not a JSON array of conversations")?;

        entries
            .into_iter()
            .map(SnapshotEntry::into_conversation)
            .collect()
    }
}

impl ConversationSource for SnapshotSource {
    fn id(&self) -> &str {
        "snapshot"
    }

    fn description(&self) -> String {
        format!("JSON snapshot at {}", self.path.display())
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn fetch_conversations(&self) -> Result<Vec<Conversation>> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read snapshot {}", self.path.display()))?;
        let conversations = Self::parse(&content)
            .with_context(|| format!("Failed to parse snapshot {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            count = conversations.len(),
            "loaded conversation snapshot"
        );
        Ok(conversations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_explicit_and_derived_timestamps() {
        let json = r#"[
            { "id": "D1", "display_name": "Ada", "latest_msg_ts": "1.000005" },
            { "id": "D2", "conversation_type": "mpim", "display_name": "Grace",
              "messages": [ { "ts": "1.000005" }, { "ts": "2.000001" }, { "ts": "1.500000" } ] },
            { "id": "D3", "display_name": "Quiet" }
        ]"#;

        let conversations = SnapshotSource::parse(json).unwrap();
        assert_eq!(
            conversations,
            vec![
                Conversation::new("D1", "im", "Ada", "1.000005"),
                Conversation::new("D2", "mpim", "Grace", "2.000001"),
                Conversation::new("D3", "im", "Quiet", ""),
            ]
        );
    }

    #[test]
    fn test_missing_display_name_falls_back_to_id() {
        let conversations = SnapshotSource::parse(r#"[{ "id": "D9" }]"#).unwrap();
        assert_eq!(conversations[0].display_name, "D9");
    }

    #[test]
    fn test_empty_id_is_rejected() {
        assert!(SnapshotSource::parse(r#"[{ "id": "  ", "display_name": "x" }]"#).is_err());
    }

    #[test]
    fn test_fetch_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversations.json");
        std::fs::write(&path, r#"[{ "id": "D1", "latest_msg_ts": "3.0" }]"#).unwrap();

        let source = SnapshotSource::new(path);
        assert!(source.is_available());
        let conversations = source.fetch_conversations().unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].latest_msg_ts, "3.0");
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let source = SnapshotSource::new(PathBuf::from("/nonexistent/slackbox.json"));
        assert!(!source.is_available());
        assert!(source.fetch_conversations().is_err());
    }
}

//! SQLite schema definition
//!
//! The version table is created and checked on its own, before the rest of
//! the schema, so that a database written by a newer build is rejected
//! without any table being touched.

/// Highest schema version this build knows how to read.
pub const SUPPORTED_VERSION: i64 = 1;

pub const VERSION_SCHEMA: &str = r#"
-- singleton is always 1, regardless of the version, so there is only ever
-- one version row
CREATE TABLE IF NOT EXISTS version (
    singleton INTEGER NOT NULL PRIMARY KEY,
    version INTEGER NOT NULL
);
"#;

pub const SCHEMA: &str = r#"
-- ============================================
-- CONVERSATIONS
-- ============================================

-- Conversations we're tracking, keyed by the chat service's own id
CREATE TABLE IF NOT EXISTS conversations (
    id TEXT NOT NULL PRIMARY KEY,
    conversation_type TEXT NOT NULL,       -- 'im', 'mpim', 'channel'
    display_name TEXT NOT NULL,
    latest_msg_ts TEXT NOT NULL DEFAULT '' -- '' = no message ever observed
);

-- ============================================
-- ACKNOWLEDGEMENTS
-- ============================================

-- Watermark ledger: the conversation has been read up to and including
-- acknowledged_through_ts. Several rows per conversation may coexist.
CREATE TABLE IF NOT EXISTS acknowledgements (
    conversation_id TEXT NOT NULL,
    acknowledged_through_ts TEXT NOT NULL,
    acknowledged_at INTEGER                -- seconds since epoch, store time
);

-- ============================================
-- INDEXES
-- ============================================

CREATE UNIQUE INDEX IF NOT EXISTS ack_convo_idx
    ON acknowledgements (conversation_id, acknowledged_through_ts);

CREATE INDEX IF NOT EXISTS idx_conversations_latest
    ON conversations (latest_msg_ts DESC, id);
"#;

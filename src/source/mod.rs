//! Conversation sources
//!
//! A source produces the current snapshot of every conversation the user
//! takes part in. The store makes no assumption about ordering or
//! freshness of what a source returns; stale or repeated snapshots are
//! absorbed by the registry's upsert-if-newer rule.

mod snapshot;

pub use snapshot::SnapshotSource;

use anyhow::Result;

use crate::store::Conversation;

/// Fetch adapter feeding the conversation registry
pub trait ConversationSource {
    /// Short identifier used in logs
    fn id(&self) -> &str;

    /// Human-readable description
    fn description(&self) -> String;

    /// Check if this source's data exists
    fn is_available(&self) -> bool;

    /// Fetch the current snapshot of all conversations
    fn fetch_conversations(&self) -> Result<Vec<Conversation>>;
}

/// Latest timestamp among `timestamps`, or "" when there are none.
///
/// Timestamps compare as strings, matching the store's ordering.
pub fn latest_ts<'a, I>(timestamps: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    timestamps
        .into_iter()
        .max()
        .map(str::to_string)
        .unwrap_or_default()
}

//! Sync command implementation

use anyhow::{Context, Result};
use tracing::info;

use crate::source::ConversationSource;
use crate::store::{ConversationStore, UnreadConversation};

/// Pull the source's snapshot into the registry and return the fresh unread set.
pub fn update_and_find_unread(
    store: &ConversationStore,
    source: &dyn ConversationSource,
) -> Result<Vec<UnreadConversation>> {
    let conversations = source
        .fetch_conversations()
        .with_context(|| format!("Failed to fetch conversations from {}", source.id()))?;

    let written = store
        .upsert_many(&conversations)
        .context("Failed to update conversations")?;
    info!(
        source = source.id(),
        fetched = conversations.len(),
        written,
        "synced conversations"
    );

    Ok(store.list_unacknowledged()?)
}

/// Sync, then print the first page of the unread set.
pub fn run(
    store: &ConversationStore,
    source: &dyn ConversationSource,
    page_size: usize,
) -> Result<()> {
    println!("Syncing from {}...", source.description());

    if !source.is_available() {
        println!("Source not available. Check your configuration.");
        return Ok(());
    }

    let unread = update_and_find_unread(store, source)?;
    println!();
    super::list::print_page(&unread, 0, page_size);
    Ok(())
}

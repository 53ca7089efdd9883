use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::store::ConversationStore;

/// Permalink to where reading of `id` should resume.
pub fn resolve_link(store: &ConversationStore, config: &Config, id: &str) -> Result<String> {
    let unread = store.list_unacknowledged()?;

    // Unread conversations resume at their watermark; read ones at the latest message.
    let ts = match unread.iter().find(|u| u.conversation.id == id) {
        Some(u) => u.best_linkable_ts().to_string(),
        None => store
            .get(id)?
            .ok_or_else(|| anyhow!("Conversation not found: {}", id))?
            .latest_msg_ts,
    };

    if ts.is_empty() {
        return Err(anyhow!("Conversation {} has no messages to link", id));
    }

    config
        .link_for(id, &ts)
        .ok_or_else(|| anyhow!("No links.base_url configured"))
}

pub fn run(store: &ConversationStore, config: &Config, id: &str) -> Result<()> {
    println!("{}", resolve_link(store, config, id)?);
    Ok(())
}

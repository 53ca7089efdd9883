use anyhow::{anyhow, Result};

use crate::store::ConversationStore;

/// Resolve the watermark to acknowledge: an explicit `ts`, or the
/// conversation's latest message.
pub fn resolve_ts(store: &ConversationStore, id: &str, ts: Option<String>) -> Result<String> {
    if let Some(ts) = ts {
        return Ok(ts);
    }

    let conversation = store
        .get(id)?
        .ok_or_else(|| anyhow!("Conversation not found: {}", id))?;

    if !conversation.has_messages() {
        return Err(anyhow!("Conversation {} has no messages to acknowledge", id));
    }
    Ok(conversation.latest_msg_ts)
}

pub fn ack(store: &ConversationStore, id: String, ts: Option<String>) -> Result<()> {
    let ts = resolve_ts(store, &id, ts)?;
    store.acknowledge(&id, &ts)?;
    println!("Acknowledged '{}' through {}", id, ts);
    Ok(())
}

pub fn unack(store: &ConversationStore, id: String, ts: String) -> Result<()> {
    store.unacknowledge(&id, &ts)?;
    println!("Removed acknowledgement of '{}' at {}", id, ts);
    Ok(())
}

use anyhow::Result;

use crate::store::ConversationStore;

pub fn run(store: &ConversationStore, id: &str) -> Result<()> {
    let conversation = match store.get(id)? {
        Some(c) => c,
        None => {
            println!("Conversation '{}' not found.", id);
            return Ok(());
        }
    };

    println!("\n{}", "=".repeat(60));
    println!("Conversation: {} ({})", conversation.display_name, conversation.id);
    println!("Type: {}", conversation.conversation_type);
    if conversation.has_messages() {
        println!("Latest message: {}", conversation.latest_msg_ts);
    } else {
        println!("Latest message: none");
    }
    println!("{}", "=".repeat(60));

    let acks = store.acknowledgements(id)?;
    if acks.is_empty() {
        println!("\nNever acknowledged.");
        return Ok(());
    }

    println!("\n{:<20} {}", "Read through", "Recorded at");
    for ack in acks {
        let recorded = ack
            .acknowledged_at
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<20} {}", ack.acknowledged_through_ts, recorded);
    }

    Ok(())
}

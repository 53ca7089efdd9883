use anyhow::Result;

use crate::store::ConversationStore;

pub fn run(store: &ConversationStore) -> Result<()> {
    let removed = store.compact_acknowledgements()?;
    println!("Removed {} superseded acknowledgement(s).", removed);
    Ok(())
}

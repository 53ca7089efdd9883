pub mod cli;
pub mod config;
pub mod source;
pub mod store;

pub use config::Config;
pub use source::{ConversationSource, SnapshotSource};
pub use store::{Conversation, ConversationStore, StoreError, UnreadConversation};

pub mod ack;
pub mod compact;
pub mod link;
pub mod list;
pub mod show;
pub mod sync;

//! List command implementation

use anyhow::Result;
use std::fmt::Write;

use crate::store::{ConversationStore, UnreadConversation};

/// Index range `[start, end)` of page `page` (zero-based).
/// Pages past the end are empty.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> (usize, usize) {
    let page_size = page_size.max(1);
    let start = page.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    (start, end)
}

pub fn run(store: &ConversationStore, page: usize, page_size: usize, json: bool) -> Result<()> {
    let unread = store.list_unacknowledged()?;

    if json {
        let (start, end) = page_bounds(unread.len(), page, page_size);
        println!("{}", serde_json::to_string_pretty(&unread[start..end])?);
        return Ok(());
    }

    print_page(&unread, page, page_size);
    Ok(())
}

pub fn print_page(unread: &[UnreadConversation], page: usize, page_size: usize) {
    print!("{}", format_page(unread, page, page_size));
}

/// Render one page of the unread table, footer included.
pub fn format_page(unread: &[UnreadConversation], page: usize, page_size: usize) -> String {
    if unread.is_empty() {
        return "Nothing unread. Run 'slackbox sync' to refresh.\n".to_string();
    }

    let (start, end) = page_bounds(unread.len(), page, page_size);
    if start == end {
        return format!("No conversations on page {}.\n", page + 1);
    }

    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "{:<4} {:<12} {:<6} {:<20} {:<20} {}",
        "#", "ID", "Type", "Latest", "Read through", "Name"
    );
    let _ = writeln!(out, "{}", "-".repeat(90));

    for (i, u) in unread[start..end].iter().enumerate() {
        let c = &u.conversation;
        let acked = if u.acknowledged_through_ts.is_empty() {
            "-"
        } else {
            u.acknowledged_through_ts.as_str()
        };

        let _ = writeln!(
            out,
            "{:<4} {:<12} {:<6} {:<20} {:<20} {}",
            start + i + 1,
            c.id,
            c.conversation_type,
            c.latest_msg_ts,
            acked,
            c.display_name,
        );
    }

    let pages = unread.len().div_ceil(page_size.max(1));
    let _ = writeln!(out, "\nPage {}/{} ({} unread)", page + 1, pages, unread.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Conversation;

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(5, 0, 2), (0, 2));
        assert_eq!(page_bounds(5, 1, 2), (2, 4));
        assert_eq!(page_bounds(5, 2, 2), (4, 5));
        assert_eq!(page_bounds(5, 3, 2), (5, 5));
        assert_eq!(page_bounds(0, 0, 10), (0, 0));
    }

    fn unread(ids: &[&str]) -> Vec<UnreadConversation> {
        ids.iter()
            .map(|id| UnreadConversation {
                conversation: Conversation::new(*id, "im", *id, "1.0"),
                acknowledged_through_ts: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_format_page_honours_page_size() {
        let rows = unread(&["D1", "D2", "D3"]);

        let first = format_page(&rows, 0, 2);
        assert!(first.contains("D1") && first.contains("D2"));
        assert!(!first.contains("D3"));
        assert!(first.contains("Page 1/2 (3 unread)"));

        let second = format_page(&rows, 1, 2);
        assert!(second.contains("D3") && !second.contains("D1"));
        assert!(second.contains("Page 2/2"));
    }

    #[test]
    fn test_format_page_empty_and_past_end() {
        assert!(format_page(&[], 0, 10).starts_with("Nothing unread"));
        assert!(format_page(&unread(&["D1"]), 4, 10).starts_with("No conversations on page 5"));
    }

    #[test]
    fn test_page_bounds_zero_page_size() {
        assert_eq!(page_bounds(3, 0, 0), (0, 1));
    }
}

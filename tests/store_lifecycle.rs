use rusqlite::Connection;
use slackbox::store::{Conversation, ConversationStore, StoreError, SUPPORTED_VERSION};
use std::path::Path;
use tempfile::TempDir;

fn unread_ids(store: &ConversationStore) -> Vec<String> {
    store
        .list_unacknowledged()
        .unwrap()
        .into_iter()
        .map(|u| u.conversation.id)
        .collect()
}

fn bump_version(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute("UPDATE version SET version = version + 1", [])
        .unwrap();
}

#[test]
fn reopen_keeps_state_and_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("slackbox.db");

    let store = ConversationStore::open(&path).unwrap();
    store
        .upsert(&Conversation::new("D1", "im", "Ada", "1.000000"))
        .unwrap();
    store.acknowledge("D1", "0.500000").unwrap();
    store.close().unwrap();

    let store = ConversationStore::open(&path).unwrap();
    assert_eq!(store.schema_version().unwrap(), SUPPORTED_VERSION);
    assert_eq!(store.get("D1").unwrap().unwrap().display_name, "Ada");
    assert_eq!(store.acknowledgements("D1").unwrap().len(), 1);
}

#[test]
fn newer_schema_is_rejected_without_touching_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("slackbox.db");

    let store = ConversationStore::open(&path).unwrap();
    store
        .upsert(&Conversation::new("D1", "im", "Ada", "1.000000"))
        .unwrap();
    store.close().unwrap();

    bump_version(&path);

    match ConversationStore::open(&path) {
        Err(StoreError::SchemaTooNew { stored, supported }) => {
            assert_eq!(stored, SUPPORTED_VERSION + 1);
            assert_eq!(supported, SUPPORTED_VERSION);
        }
        Err(e) => panic!("expected SchemaTooNew, got {}", e),
        Ok(_) => panic!("expected SchemaTooNew, store opened"),
    }

    let conn = Connection::open(&path).unwrap();
    let version: i64 = conn
        .query_row("SELECT version FROM version", [], |row| row.get(0))
        .unwrap();
    let name: String = conn
        .query_row(
            "SELECT display_name FROM conversations WHERE id = 'D1'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(version, SUPPORTED_VERSION + 1);
    assert_eq!(name, "Ada");
}

#[test]
fn acknowledge_and_revoke_through_new_messages() {
    let store = ConversationStore::open_in_memory().unwrap();

    store.upsert(&Conversation::new("X", "im", "X", "1.0")).unwrap();
    assert_eq!(unread_ids(&store), vec!["X"]);

    store.acknowledge("X", "1.0").unwrap();
    assert!(unread_ids(&store).is_empty());

    store.upsert(&Conversation::new("X", "im", "X", "2.0")).unwrap();
    assert_eq!(unread_ids(&store), vec!["X"]);

    // Removing the old watermark leaves "2.0" unacknowledged.
    store.unacknowledge("X", "1.0").unwrap();
    assert_eq!(unread_ids(&store), vec!["X"]);

    store.acknowledge("X", "2.0").unwrap();
    assert!(unread_ids(&store).is_empty());
}

#[test]
fn watermarks_resolve_to_the_highest_row() {
    let store = ConversationStore::open_in_memory().unwrap();
    store.upsert(&Conversation::new("D1", "im", "Ada", "2.0")).unwrap();
    store.acknowledge("D1", "1.0").unwrap();
    store.acknowledge("D1", "2.0").unwrap();
    assert!(unread_ids(&store).is_empty());

    // Regressing below the watermark is impossible...
    store.upsert(&Conversation::new("D1", "im", "Ada", "1.5")).unwrap();
    assert!(unread_ids(&store).is_empty());

    // ...only a fresh message resurfaces the conversation.
    store.upsert(&Conversation::new("D1", "im", "Ada", "2.5")).unwrap();
    let unread = store.list_unacknowledged().unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].acknowledged_through_ts, "2.0");
    assert_eq!(store.acknowledgements("D1").unwrap().len(), 2);
}

#[test]
fn stores_are_independent() {
    let a = ConversationStore::open_in_memory().unwrap();
    let b = ConversationStore::open_in_memory().unwrap();

    a.upsert(&Conversation::new("D1", "im", "Ada", "1.0")).unwrap();
    assert_eq!(unread_ids(&a), vec!["D1"]);
    assert!(unread_ids(&b).is_empty());
}

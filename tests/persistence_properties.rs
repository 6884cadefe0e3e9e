//! Persistence round-trips across fresh store instances.
//!
//! Each case writes through one `LocalStorage` handle and restores through a
//! newly opened one on the same file, the way a restart would.

use proptest::prelude::*;
use sim_chat::common::ChatMessage;
use sim_chat::storage::message_store::MESSAGES_KEY;
use sim_chat::storage::{KeyValueStore, LocalStorage, MessageStore, SessionStore};
use tempfile::TempDir;

fn open_fresh(dir: &TempDir) -> LocalStorage {
    LocalStorage::open(dir.path().join("chat.db")).unwrap()
}

fn message_strategy() -> impl Strategy<Value = (String, String)> {
    ("[A-Za-z]{1,8}", "[a-z ]{0,20}[a-z!?]")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_login_survives_restart(name in "[ \t]{0,2}[A-Za-z0-9][A-Za-z0-9 ]{0,15}[ \t]{0,2}") {
        let dir = tempfile::tempdir().unwrap();

        let mut session = SessionStore::default();
        prop_assert!(session.login(&name));
        session.persist(&open_fresh(&dir)).unwrap();

        let restored = SessionStore::restore(&open_fresh(&dir)).unwrap();
        prop_assert_eq!(restored.current_user(), Some(name.trim()));
    }

    #[test]
    fn prop_history_survives_restart(entries in prop::collection::vec(message_strategy(), 0..20)) {
        let dir = tempfile::tempdir().unwrap();
        let storage = open_fresh(&dir);

        let mut store = MessageStore::default();
        for (username, content) in entries {
            prop_assert!(store.append(ChatMessage::new(username, content)));
            store.persist(&storage).unwrap();
        }

        let restored = MessageStore::restore(&open_fresh(&dir)).unwrap();
        prop_assert_eq!(restored.messages(), store.messages());
    }

    #[test]
    fn prop_clear_always_empties(count in 0usize..15) {
        let dir = tempfile::tempdir().unwrap();
        let storage = open_fresh(&dir);

        let mut store = MessageStore::default();
        for i in 0..count {
            store.append(ChatMessage::new("Sam", format!("message {i}")));
        }
        store.persist(&storage).unwrap();

        store.clear();
        MessageStore::remove_persisted(&storage).unwrap();

        prop_assert!(store.is_empty());
        prop_assert_eq!(open_fresh(&dir).get(MESSAGES_KEY).unwrap(), None);
        prop_assert!(MessageStore::restore(&open_fresh(&dir)).unwrap().is_empty());
    }
}

#[test]
fn browser_history_restores() {
    let dir = tempfile::tempdir().unwrap();
    open_fresh(&dir)
        .set(
            MESSAGES_KEY,
            r#"[{"id":1712345678901,"content":"hi","username":"Sam","timestamp":"9:15:02 AM"},
                {"id":1712345690000.5,"content":"Hello everyone! 👋","username":"Bob","timestamp":"9:15:14 AM"}]"#,
        )
        .unwrap();

    let restored = MessageStore::restore(&open_fresh(&dir)).unwrap();
    let authors: Vec<_> = restored
        .messages()
        .iter()
        .map(|m| m.username.as_str())
        .collect();
    assert_eq!(authors, ["Sam", "Bob"]);
    assert_eq!(restored.messages()[1].id.as_str(), "1712345690000.5");
}

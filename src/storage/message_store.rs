use serde_json::Value;

use crate::common::ChatMessage;

use super::error::StorageResult;
use super::local_storage::KeyValueStore;

/// Storage key holding the message history as a JSON array.
pub const MESSAGES_KEY: &str = "chatMessages";

/// Append-only message history in display order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageStore {
    messages: Vec<ChatMessage>,
}

impl MessageStore {
    /// Adopt the persisted history. A missing key or unreadable data yields
    /// an empty store; only storage access failures are returned.
    pub fn restore(storage: &impl KeyValueStore) -> StorageResult<Self> {
        let messages = match storage.get(MESSAGES_KEY)? {
            Some(raw) => decode_history(&raw),
            None => Vec::new(),
        };
        Ok(Self { messages })
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Adds a message at the end. Messages without author or text are
    /// refused.
    pub fn append(&mut self, message: ChatMessage) -> bool {
        if !message.is_well_formed() {
            return false;
        }
        self.messages.push(message);
        true
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Writes the full sequence under [`MESSAGES_KEY`].
    pub fn persist(&self, storage: &impl KeyValueStore) -> StorageResult<()> {
        let json = serde_json::to_string(&self.messages)?;
        storage.set(MESSAGES_KEY, &json)
    }

    /// Deletes the persisted sequence, as opposed to persisting `[]`.
    pub fn remove_persisted(storage: &impl KeyValueStore) -> StorageResult<()> {
        storage.remove(MESSAGES_KEY)
    }
}

/// Parses a persisted history leniently.
///
/// Anything that is not a JSON array restores as empty. Inside an array,
/// records that do not match the message schema are dropped one by one so a
/// single bad entry does not cost the whole history.
pub fn decode_history(raw: &str) -> Vec<ChatMessage> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            log::warn!(
                "Persisted history is not an array ({}); starting empty",
                kind_of(&other)
            );
            return Vec::new();
        }
        Err(err) => {
            log::warn!("Persisted history is not valid JSON ({err}); starting empty");
            return Vec::new();
        }
    };

    let total = entries.len();
    let messages: Vec<ChatMessage> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ChatMessage>(entry).ok())
        .filter(ChatMessage::is_well_formed)
        .collect();

    if messages.len() < total {
        log::warn!(
            "Dropped {} malformed record(s) from persisted history",
            total - messages.len()
        );
    }
    messages
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

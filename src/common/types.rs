use std::fmt;

use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Display format for message timestamps.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Identifier of a chat message.
///
/// New ids are UUIDv7 strings, so two messages created in the same
/// millisecond still get distinct, time-ordered ids. Histories written by the
/// browser build stored ids as JSON numbers; those are accepted on read and
/// kept in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Ok(Self(text)),
            RawId::Number(number) => Ok(Self(number.to_string())),
        }
    }
}

/// Domain model of one chat message, also the persisted record schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    pub username: String,
    pub timestamp: String,
}

impl ChatMessage {
    /// Builds a message stamped with a fresh id and the current local time.
    pub fn new(username: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            content: content.into(),
            username: username.into(),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn is_from(&self, username: &str) -> bool {
        self.username == username
    }

    /// A record restored from storage is only trusted when it has an author
    /// and some text.
    pub fn is_well_formed(&self) -> bool {
        !self.content.trim().is_empty() && !self.username.trim().is_empty()
    }
}

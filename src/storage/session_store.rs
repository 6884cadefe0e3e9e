use super::error::StorageResult;
use super::local_storage::KeyValueStore;

/// Storage key holding the logged-in username as plain text.
pub const SESSION_KEY: &str = "chatUser";

/// Identity of the local operator. Mirrors exactly one persisted value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionStore {
    current: Option<String>,
}

impl SessionStore {
    /// Adopt the persisted identity, if any. Blank values count as absent.
    pub fn restore(storage: &impl KeyValueStore) -> StorageResult<Self> {
        let current = storage
            .get(SESSION_KEY)?
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Ok(Self { current })
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Sets the identity to the trimmed username. Blank input is refused and
    /// leaves the store untouched.
    pub fn login(&mut self, username: &str) -> bool {
        let username = username.trim();
        if username.is_empty() {
            return false;
        }
        self.current = Some(username.to_string());
        true
    }

    /// Clears the identity and hands back the previous one.
    pub fn logout(&mut self) -> Option<String> {
        self.current.take()
    }

    /// Writes the identity, or deletes the key when logged out.
    pub fn persist(&self, storage: &impl KeyValueStore) -> StorageResult<()> {
        match &self.current {
            Some(username) => storage.set(SESSION_KEY, username),
            None => storage.remove(SESSION_KEY),
        }
    }
}

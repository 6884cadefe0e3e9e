pub mod error;
pub mod local_storage;
pub mod message_store;
pub mod session_store;

pub use error::{StorageError, StorageResult};
pub use local_storage::{KeyValueStore, LocalStorage};
pub use message_store::MessageStore;
pub use session_store::SessionStore;

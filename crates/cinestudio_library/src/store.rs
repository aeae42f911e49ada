//! Key-value store trait and in-memory implementation.

use cinestudio_error::StudioResult;
use std::collections::HashMap;
use std::sync::Mutex;

/// Trait for pluggable persistent key-value backends.
///
/// Models the persistent store as string keys mapping to string documents.
/// All library mutations are full-document writes; read-modify-write
/// sequences assume a single writer.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the document stored under `key`, if any.
    async fn get(&self, key: &str) -> StudioResult<Option<String>>;

    /// Write `value` under `key`, replacing any existing document.
    async fn set(&self, key: &str, value: &str) -> StudioResult<()>;

    /// Remove the document under `key`. Removing an absent key is a no-op.
    async fn remove(&self, key: &str) -> StudioResult<()>;
}

/// In-memory store for tests and ephemeral sessions.
///
/// # Examples
///
/// ```
/// use cinestudio_library::{KeyValueStore, MemoryStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::default();
/// store.set("greeting", "hello").await?;
/// assert_eq!(store.get("greeting").await?.as_deref(), Some("hello"));
/// store.remove("greeting").await?;
/// assert_eq!(store.get("greeting").await?, None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StudioResult<Option<String>> {
        let entries = self.entries.lock().expect("memory store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StudioResult<()> {
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StudioResult<()> {
        let mut entries = self.entries.lock().expect("memory store lock poisoned");
        entries.remove(key);
        Ok(())
    }
}

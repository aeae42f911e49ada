//! The saved-artifact library.

use crate::namespace::TUTORIAL_SEEN_KEY;
use crate::{KeyValueStore, Namespace};
use cinestudio_core::SavedItem;
use cinestudio_error::{LibraryError, LibraryErrorKind, StudioResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Sort key for library listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Lexicographic by item name
    Name,
    /// Numeric by save timestamp
    CreatedAt,
}

/// Sort direction for library listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// Four independent named collections of saved artifacts over a
/// [`KeyValueStore`], plus the onboarding flag.
///
/// Each collection is one JSON document under a fixed namespace key; every
/// mutation rewrites the full document. Items are kept most-recent-first.
/// Stored content is handled as raw JSON internally so metadata operations
/// (list, delete, clear) work uniformly across the four item types.
#[derive(Debug, Clone)]
pub struct Library<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Library<S> {
    /// Create a library over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read a full collection, tolerating absence and corruption.
    ///
    /// A missing namespace is an empty collection. A namespace that fails to
    /// deserialize is logged and also treated as empty, so one bad document
    /// never blocks the rest of the application.
    pub async fn read_collection(&self, namespace: Namespace) -> Vec<SavedItem<JsonValue>> {
        let raw = match self.store.get(namespace.key()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(namespace = %namespace, error = %e, "Failed to read collection, defaulting to empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(
                    namespace = %namespace,
                    error = %e,
                    "Corrupt collection document, defaulting to empty"
                );
                Vec::new()
            }
        }
    }

    async fn write_collection(
        &self,
        namespace: Namespace,
        items: &[SavedItem<JsonValue>],
    ) -> StudioResult<()> {
        let raw = serde_json::to_string(items)
            .map_err(|e| LibraryError::new(LibraryErrorKind::Serialization(e.to_string())))?;
        self.store.set(namespace.key(), &raw).await
    }

    /// Save a named artifact into a collection.
    ///
    /// The new item is prepended (most-recent-first) and the full collection
    /// is written back as one unit. An empty or whitespace name aborts the
    /// save with [`LibraryErrorKind::EmptyName`], leaving the stored
    /// collection unchanged.
    #[tracing::instrument(skip(self, content), fields(namespace = %namespace))]
    pub async fn save<T: Serialize>(
        &self,
        namespace: Namespace,
        name: &str,
        content: T,
    ) -> StudioResult<SavedItem<JsonValue>> {
        if name.trim().is_empty() {
            return Err(LibraryError::new(LibraryErrorKind::EmptyName).into());
        }

        let content = serde_json::to_value(content)
            .map_err(|e| LibraryError::new(LibraryErrorKind::Serialization(e.to_string())))?;
        let item = SavedItem::new(name.trim(), content);

        let mut items = self.read_collection(namespace).await;
        items.insert(0, item.clone());
        self.write_collection(namespace, &items).await?;

        tracing::info!(namespace = %namespace, id = %item.id, name = %item.name, "Saved item");
        Ok(item)
    }

    /// Load an item by id, decoding its content to the collection's type.
    ///
    /// Returns a copy for the caller to adopt as working state; whether to
    /// overwrite unsaved work is the caller's decision, not this layer's.
    #[tracing::instrument(skip(self), fields(namespace = %namespace))]
    pub async fn load<T: DeserializeOwned>(
        &self,
        namespace: Namespace,
        id: &str,
    ) -> StudioResult<SavedItem<T>> {
        let items = self.read_collection(namespace).await;
        let item = items
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| {
                LibraryError::new(LibraryErrorKind::ItemNotFound {
                    namespace: namespace.key().to_string(),
                    id: id.to_string(),
                })
            })?;

        let content = serde_json::from_value(item.content).map_err(|e| {
            LibraryError::new(LibraryErrorKind::CorruptNamespace {
                namespace: namespace.key().to_string(),
                message: e.to_string(),
            })
        })?;

        Ok(SavedItem {
            id: item.id,
            name: item.name,
            created_at: item.created_at,
            content,
        })
    }

    /// Delete an item by id and rewrite the full collection.
    #[tracing::instrument(skip(self), fields(namespace = %namespace))]
    pub async fn delete(&self, namespace: Namespace, id: &str) -> StudioResult<()> {
        let mut items = self.read_collection(namespace).await;
        let before = items.len();
        items.retain(|item| item.id != id);

        if items.len() == before {
            return Err(LibraryError::new(LibraryErrorKind::ItemNotFound {
                namespace: namespace.key().to_string(),
                id: id.to_string(),
            })
            .into());
        }

        self.write_collection(namespace, &items).await?;
        tracing::info!(namespace = %namespace, id = id, "Deleted item");
        Ok(())
    }

    /// Erase all four collections.
    ///
    /// Removal is sequential with no rollback; the operation is idempotent,
    /// so retrying after an interruption is safe.
    #[tracing::instrument(skip(self))]
    pub async fn clear_all(&self) -> StudioResult<()> {
        for namespace in Namespace::ALL {
            self.store.remove(namespace.key()).await?;
        }
        tracing::warn!("Cleared all library collections");
        Ok(())
    }

    /// List a collection with filtering and ordering.
    ///
    /// The filter is a case-insensitive substring match on the item name; an
    /// empty filter keeps everything. Sorting is stable, so ties keep their
    /// stored (most-recent-first) order.
    pub async fn list(
        &self,
        namespace: Namespace,
        filter: &str,
        sort_key: SortKey,
        direction: SortDirection,
    ) -> Vec<SavedItem<JsonValue>> {
        let needle = filter.to_lowercase();
        let mut items: Vec<_> = self
            .read_collection(namespace)
            .await
            .into_iter()
            .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
            .collect();

        // Reversed comparators instead of sort-then-reverse keep tie order stable.
        match (sort_key, direction) {
            (SortKey::Name, SortDirection::Asc) => items.sort_by(|a, b| a.name.cmp(&b.name)),
            (SortKey::Name, SortDirection::Desc) => items.sort_by(|a, b| b.name.cmp(&a.name)),
            (SortKey::CreatedAt, SortDirection::Asc) => {
                items.sort_by(|a, b| a.created_at.cmp(&b.created_at))
            }
            (SortKey::CreatedAt, SortDirection::Desc) => {
                items.sort_by(|a, b| b.created_at.cmp(&a.created_at))
            }
        }

        items
    }

    /// Whether the onboarding guidance has been shown.
    pub async fn tutorial_seen(&self) -> bool {
        matches!(self.store.get(TUTORIAL_SEEN_KEY).await, Ok(Some(_)))
    }

    /// Record that the onboarding guidance has been shown.
    pub async fn mark_tutorial_seen(&self) -> StudioResult<()> {
        self.store.set(TUTORIAL_SEEN_KEY, "true").await
    }
}

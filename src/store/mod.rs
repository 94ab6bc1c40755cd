// ============================================================================
// Item Store Interface
// ============================================================================

pub mod memory;

pub use memory::InMemoryItemStore;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::core::{Form, Item, ItemId, ItemPatch, Result};

/// A change pushed to collection subscribers
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// An item was created or merged
    ItemSet { id: ItemId, item: Item },
    /// An item was deleted
    ItemDeleted { id: ItemId },
    /// The form's membership changed
    FormUpdated { form: Form },
}

/// The persistence boundary consumed by commands.
///
/// Commands mutate nothing but this interface. The in-memory implementation
/// backs tests and local editing; a remote document store (one document per
/// item plus a form document) implements the same trait for production use.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Fetch the full item for `id`.
    async fn get(&self, id: &ItemId) -> Result<Item>;

    /// Merge `patch` onto the stored item.
    ///
    /// When `id` is absent the item is created from the patch if the patch
    /// is complete (type and label present); an incomplete patch against a
    /// missing id is an [`ItemNotFound`](crate::FormError::ItemNotFound)
    /// error.
    async fn set_merge(&self, id: &ItemId, patch: ItemPatch) -> Result<()>;

    /// Delete the item for `id`. Fails fast when the id is absent.
    async fn delete(&self, id: &ItemId) -> Result<()>;

    /// Snapshot of the current form.
    async fn form(&self) -> Result<Form>;

    /// Append `id` to the form's item ids iff absent (array-union).
    async fn push_item_id(&self, id: &ItemId) -> Result<()>;

    /// Remove `id` from the form's item ids (array-remove).
    async fn remove_item_id(&self, id: &ItemId) -> Result<()>;

    /// Subscribe to collection changes. Dropping the receiver unsubscribes.
    fn subscribe(&self) -> broadcast::Receiver<StoreEvent>;
}

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

use super::{ItemStore, StoreEvent};
use crate::core::{Form, FormError, Item, ItemId, ItemPatch, Result};

/// Capacity of the change-event channel; lagging subscribers drop events
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// In-memory item store
///
/// Reference implementation of [`ItemStore`]: one map of items plus the form
/// document, each behind its own lock, with a broadcast channel carrying
/// collection changes to subscribers.
pub struct InMemoryItemStore {
    items: RwLock<HashMap<ItemId, Item>>,
    form: RwLock<Form>,
    events: broadcast::Sender<StoreEvent>,
}

impl InMemoryItemStore {
    pub fn new(form_name: impl Into<String>) -> Self {
        Self::with_form(Form::new(form_name))
    }

    /// Start from an existing form document
    pub fn with_form(form: Form) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            items: RwLock::new(HashMap::new()),
            form: RwLock::new(form),
            events,
        }
    }

    /// Number of stored items
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }

    fn publish(&self, event: StoreEvent) {
        // send only fails when nobody is subscribed
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn get(&self, id: &ItemId) -> Result<Item> {
        self.items
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| FormError::ItemNotFound(id.clone()))
    }

    async fn set_merge(&self, id: &ItemId, patch: ItemPatch) -> Result<()> {
        let merged = {
            let mut items = self.items.write().await;
            let merged = match items.get(id) {
                Some(existing) => existing.apply(&patch)?,
                None => patch
                    .build(id.clone())
                    .ok_or_else(|| FormError::ItemNotFound(id.clone()))?,
            };
            items.insert(id.clone(), merged.clone());
            merged
        };
        debug!(id = %id, "item merged");
        self.publish(StoreEvent::ItemSet {
            id: id.clone(),
            item: merged,
        });
        Ok(())
    }

    async fn delete(&self, id: &ItemId) -> Result<()> {
        if self.items.write().await.remove(id).is_none() {
            return Err(FormError::ItemNotFound(id.clone()));
        }
        debug!(id = %id, "item deleted");
        self.publish(StoreEvent::ItemDeleted { id: id.clone() });
        Ok(())
    }

    async fn form(&self) -> Result<Form> {
        Ok(self.form.read().await.clone())
    }

    async fn push_item_id(&self, id: &ItemId) -> Result<()> {
        let form = {
            let mut form = self.form.write().await;
            form.push_unique(id.clone());
            form.clone()
        };
        self.publish(StoreEvent::FormUpdated { form });
        Ok(())
    }

    async fn remove_item_id(&self, id: &ItemId) -> Result<()> {
        let form = {
            let mut form = self.form.write().await;
            form.remove(id);
            form.clone()
        };
        self.publish(StoreEvent::FormUpdated { form });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

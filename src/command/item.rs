use serde::{Deserialize, Serialize};

use crate::core::{Item, ItemId, ItemPatch, Result};
use crate::store::ItemStore;

/// A user intent, not yet executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Create a new default item and append it to the form
    CreateItem,
    /// Merge a partial patch onto an existing item
    UpdateItem { id: ItemId, patch: ItemPatch },
    /// Delete an existing item and drop it from the form
    DeleteItem { id: ItemId },
}

impl CommandSpec {
    /// Execute the forward effect and record the reversible command
    ///
    /// The update and delete variants read the target item *before* writing,
    /// so the recorded `before` snapshot makes undo exact. A missing id
    /// fails here, before any mutation, and nothing is recorded.
    pub async fn invoke(self, store: &dyn ItemStore) -> Result<Command> {
        match self {
            CommandSpec::CreateItem => {
                let id = ItemId::generate();
                let item = Item::initial(id.clone());
                store.set_merge(&id, item.to_patch()).await?;
                store.push_item_id(&id).await?;
                Ok(Command::CreateItem { id })
            }
            CommandSpec::UpdateItem { id, patch } => {
                let before = store.get(&id).await?;
                // reject an invalid patch before touching the store
                before.apply(&patch)?;
                store.set_merge(&id, patch.clone()).await?;
                Ok(Command::UpdateItem {
                    id,
                    before,
                    after: patch,
                })
            }
            CommandSpec::DeleteItem { id } => {
                let before = store.get(&id).await?;
                store.delete(&id).await?;
                store.remove_item_id(&id).await?;
                Ok(Command::DeleteItem { id, before })
            }
        }
    }
}

/// A recorded, reversible form edit
///
/// One variant per command kind, each carrying exactly the payload its
/// reversal needs. Values are immutable once recorded and move between the
/// undo and redo stacks. The serialized form is a `{"name": ..., ...}`
/// record suitable for a history panel or log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum Command {
    CreateItem {
        id: ItemId,
    },
    UpdateItem {
        id: ItemId,
        before: Item,
        after: ItemPatch,
    },
    DeleteItem {
        id: ItemId,
        before: Item,
    },
}

impl Command {
    /// Command kind, as rendered in history entries
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateItem { .. } => "createItem",
            Command::UpdateItem { .. } => "updateItem",
            Command::DeleteItem { .. } => "deleteItem",
        }
    }

    /// The item this command targets
    pub fn item_id(&self) -> &ItemId {
        match self {
            Command::CreateItem { id }
            | Command::UpdateItem { id, .. }
            | Command::DeleteItem { id, .. } => id,
        }
    }

    /// Reverse the recorded effect
    pub async fn undo(&self, store: &dyn ItemStore) -> Result<()> {
        match self {
            Command::CreateItem { id } => {
                store.delete(id).await?;
                store.remove_item_id(id).await
            }
            Command::UpdateItem { id, before, .. } => {
                store.set_merge(id, before.to_patch()).await
            }
            Command::DeleteItem { id, before } => {
                store.set_merge(id, before.to_patch()).await?;
                store.push_item_id(id).await
            }
        }
    }

    /// Re-apply the recorded effect (forward replay of the original payload)
    pub async fn redo(&self, store: &dyn ItemStore) -> Result<()> {
        match self {
            Command::CreateItem { id } => {
                let item = Item::initial(id.clone());
                store.set_merge(id, item.to_patch()).await?;
                store.push_item_id(id).await
            }
            Command::UpdateItem { id, after, .. } => {
                store.set_merge(id, after.clone()).await
            }
            Command::DeleteItem { id, .. } => {
                store.delete(id).await?;
                store.remove_item_id(id).await
            }
        }
    }
}

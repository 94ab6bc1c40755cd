//! Undo/redo command core for a form builder.
//!
//! Form edits are expressed as reversible commands executed against an async
//! item store; the [`CommandManager`] owns the linear undo/redo history.
//!
//! # Examples
//!
//! Create a field, rename it, and walk the history back and forth:
//!
//! ```
//! use std::sync::Arc;
//! use formcore::{CommandManager, CommandSpec, InMemoryItemStore, ItemPatch, ItemStore};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> formcore::Result<()> {
//! let store = Arc::new(InMemoryItemStore::new("contact"));
//! let manager = CommandManager::new(store.clone());
//!
//! let created = manager.invoke(CommandSpec::CreateItem).await?;
//! let id = created.item_id().clone();
//!
//! manager
//!     .invoke(CommandSpec::UpdateItem {
//!         id: id.clone(),
//!         patch: ItemPatch::label("Name"),
//!     })
//!     .await?;
//!
//! manager.undo().await?; // label back to "title"
//! manager.redo().await?; // label is "Name" again
//! assert_eq!(store.form().await?.item_ids, vec![id]);
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod core;
pub mod store;

// Re-export main types for convenience
pub use command::{Command, CommandManager, CommandSpec};
pub use core::{Form, FormError, Item, ItemId, ItemKind, ItemPatch, ItemType, Result, SelectOption};
pub use store::{InMemoryItemStore, ItemStore, StoreEvent};

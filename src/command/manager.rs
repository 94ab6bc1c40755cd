// ============================================================================
// Command Manager
// ============================================================================

use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::{Command, CommandSpec};
use crate::core::Result;
use crate::store::ItemStore;

/// Owner of the undo/redo history
///
/// All mutating operations run under one async mutex, so invokes against the
/// same item are queued rather than racing their `before` captures, and the
/// stacks can never observe a half-finished operation.
///
/// A command is pushed onto the undo stack only after its invoke resolved;
/// a failed undo or redo leaves the command where it was. Invoking any new
/// command discards the redo stack (linear history, no branching).
pub struct CommandManager {
    store: Arc<dyn ItemStore>,
    undo_stack: RwLock<Vec<Command>>,
    redo_stack: RwLock<Vec<Command>>,
    // serializes invoke/undo/redo end to end
    op_lock: Mutex<()>,
}

impl CommandManager {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            undo_stack: RwLock::new(Vec::new()),
            redo_stack: RwLock::new(Vec::new()),
            op_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    /// Execute `spec` and record it for undo
    ///
    /// On success the recorded command lands on the undo stack and the redo
    /// stack is cleared; the command is also returned so callers can read
    /// e.g. the created item id. On failure the stacks are untouched.
    pub async fn invoke(&self, spec: CommandSpec) -> Result<Command> {
        let _guard = self.op_lock.lock().await;

        let command = spec.invoke(self.store.as_ref()).await?;
        debug!(command = command.name(), id = %command.item_id(), "invoked");

        self.undo_stack.write().await.push(command.clone());
        self.redo_stack.write().await.clear();
        Ok(command)
    }

    /// Reverse the most recent command, if any
    ///
    /// Returns the undone command, or `None` when the undo stack is empty.
    /// If the command's undo fails it stays on the undo stack.
    pub async fn undo(&self) -> Result<Option<Command>> {
        let _guard = self.op_lock.lock().await;

        let Some(command) = self.undo_stack.read().await.last().cloned() else {
            return Ok(None);
        };
        command.undo(self.store.as_ref()).await?;
        debug!(command = command.name(), id = %command.item_id(), "undone");

        self.undo_stack.write().await.pop();
        self.redo_stack.write().await.push(command.clone());
        Ok(Some(command))
    }

    /// Re-apply the most recently undone command, if any
    ///
    /// Returns the replayed command, or `None` when the redo stack is empty.
    /// If the replay fails the command stays on the redo stack.
    pub async fn redo(&self) -> Result<Option<Command>> {
        let _guard = self.op_lock.lock().await;

        let Some(command) = self.redo_stack.read().await.last().cloned() else {
            return Ok(None);
        };
        command.redo(self.store.as_ref()).await?;
        debug!(command = command.name(), id = %command.item_id(), "redone");

        self.redo_stack.write().await.pop();
        self.undo_stack.write().await.push(command.clone());
        Ok(Some(command))
    }

    /// Snapshot of the undo history, most recent last
    pub async fn undo_stack(&self) -> Vec<Command> {
        self.undo_stack.read().await.clone()
    }

    /// Snapshot of the redo history, most recent last
    pub async fn redo_stack(&self) -> Vec<Command> {
        self.redo_stack.read().await.clone()
    }

    pub async fn can_undo(&self) -> bool {
        !self.undo_stack.read().await.is_empty()
    }

    pub async fn can_redo(&self) -> bool {
        !self.redo_stack.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryItemStore;
    use tokio_test::assert_ok;

    fn manager() -> CommandManager {
        CommandManager::new(Arc::new(InMemoryItemStore::new("contact")))
    }

    #[tokio::test]
    async fn test_empty_stacks_are_noops() {
        let manager = manager();
        assert!(manager.undo().await.unwrap().is_none());
        assert!(manager.redo().await.unwrap().is_none());
        assert!(!manager.can_undo().await);
        assert!(!manager.can_redo().await);
    }

    #[tokio::test]
    async fn test_invoke_pushes_and_clears_redo() {
        let manager = manager();
        assert_ok!(manager.invoke(CommandSpec::CreateItem).await);
        manager.undo().await.unwrap();
        assert!(manager.can_redo().await);

        assert_ok!(manager.invoke(CommandSpec::CreateItem).await);
        assert!(!manager.can_redo().await);
        assert_eq!(manager.undo_stack().await.len(), 1);
    }
}

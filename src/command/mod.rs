// ============================================================================
// Command Module
// ============================================================================
//
// Implements the Command Pattern for reversible form edits. A CommandSpec is
// the user intent; invoking it performs the forward effect against the item
// store and records a Command carrying exactly the data its reversal needs.
// The CommandManager owns the undo and redo stacks and sequences
// invoke/undo/redo.
//
// ============================================================================

pub mod item;
pub mod manager;

pub use item::{Command, CommandSpec};
pub use manager::CommandManager;

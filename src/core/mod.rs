pub mod error;
pub mod form;
pub mod item;

pub use error::{FormError, Result};
pub use form::Form;
pub use item::{Item, ItemId, ItemKind, ItemPatch, ItemType, SelectOption};

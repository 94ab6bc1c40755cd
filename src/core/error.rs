use thiserror::Error;

use super::ItemId;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Item '{0}' not found")]
    ItemNotFound(ItemId),

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Lock error: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, FormError>;

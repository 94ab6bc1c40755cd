use serde::{Deserialize, Serialize};

use super::ItemId;

/// A named, ordered collection of item ids
///
/// The form only references items; the items themselves live in the store's
/// item collection. Membership updates follow array-union / array-remove
/// semantics: a push of an already-present id is a no-op, a remove drops
/// every occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub name: String,
    #[serde(rename = "itemIds")]
    pub item_ids: Vec<ItemId>,
}

impl Form {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_ids: Vec::new(),
        }
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.item_ids.contains(id)
    }

    /// Append `id` iff it is not already a member
    pub fn push_unique(&mut self, id: ItemId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.item_ids.push(id);
        true
    }

    /// Remove every occurrence of `id`
    pub fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.item_ids.len();
        self.item_ids.retain(|member| member != id);
        self.item_ids.len() != before
    }

    pub fn len(&self) -> usize {
        self.item_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty()
    }
}

// ============================================================================
// Form Item Model
// ============================================================================
//
// A form is an ordered list of items; each item is either a text input or a
// select input. The item type determines which extra fields exist, so the
// model is a closed enum rather than a bag of optional fields.
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicI64, Ordering};

use super::{FormError, Result};

/// Last issued id, in milliseconds since the epoch
static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Unique identifier for a form item
///
/// Ids are derived from a millisecond timestamp and are strictly increasing:
/// two ids generated in the same millisecond still come out distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a fresh unique id
    pub fn generate() -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        let mut issued = now;
        let _ = LAST_ID_MILLIS.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            issued = now.max(last + 1);
            Some(issued)
        });
        ItemId(issued.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One choice of a select item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Discriminant of an item's kind, used in patches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Text,
    Select,
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Text => write!(f, "text"),
            ItemType::Select => write!(f, "select"),
        }
    }
}

/// Type-specific payload of an item
///
/// Serializes with a `"type"` tag, so a text item reads as
/// `{"type": "text", "placeholder": ...}` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Text { placeholder: String },
    Select { options: Vec<SelectOption> },
}

/// A single form field definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub label: String,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// The default item written by a create command
    pub fn initial(id: ItemId) -> Self {
        Self {
            id,
            label: "title".to_string(),
            kind: ItemKind::Text {
                placeholder: String::new(),
            },
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self.kind {
            ItemKind::Text { .. } => ItemType::Text,
            ItemKind::Select { .. } => ItemType::Select,
        }
    }

    /// Apply a partial patch with merge semantics
    ///
    /// Fields absent from the patch keep their stored value. A field that is
    /// invalid for the (target) item type is rejected rather than silently
    /// dropped. A type switch rebuilds the type-specific payload from the
    /// patch, defaulting what the patch does not carry.
    pub fn apply(&self, patch: &ItemPatch) -> Result<Item> {
        let target = patch.item_type.unwrap_or_else(|| self.item_type());

        let kind = match target {
            ItemType::Text => {
                if patch.options.is_some() {
                    return Err(FormError::InvalidPatch(
                        "'options' is not valid for a text item".to_string(),
                    ));
                }
                let placeholder = match (&patch.placeholder, &self.kind) {
                    (Some(placeholder), _) => placeholder.clone(),
                    (None, ItemKind::Text { placeholder }) => placeholder.clone(),
                    (None, _) => String::new(),
                };
                ItemKind::Text { placeholder }
            }
            ItemType::Select => {
                if patch.placeholder.is_some() {
                    return Err(FormError::InvalidPatch(
                        "'placeholder' is not valid for a select item".to_string(),
                    ));
                }
                let options = match (&patch.options, &self.kind) {
                    (Some(options), _) => options.clone(),
                    (None, ItemKind::Select { options }) => options.clone(),
                    (None, _) => Vec::new(),
                };
                ItemKind::Select { options }
            }
        };

        Ok(Item {
            id: self.id.clone(),
            label: patch.label.clone().unwrap_or_else(|| self.label.clone()),
            kind,
        })
    }

    /// Full patch equivalent of this item, used to merge a snapshot back
    pub fn to_patch(&self) -> ItemPatch {
        let mut patch = ItemPatch {
            item_type: Some(self.item_type()),
            label: Some(self.label.clone()),
            ..ItemPatch::default()
        };
        match &self.kind {
            ItemKind::Text { placeholder } => patch.placeholder = Some(placeholder.clone()),
            ItemKind::Select { options } => patch.options = Some(options.clone()),
        }
        patch
    }
}

/// Partial item content, the unit of a merge write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

impl ItemPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: Some(placeholder.into()),
            ..Self::default()
        }
    }

    /// Build a complete item from this patch, if it carries enough fields
    ///
    /// A merge write against a missing id creates the item only when the
    /// patch is complete (type and label present), mirroring document-store
    /// set-with-merge behavior.
    pub fn build(&self, id: ItemId) -> Option<Item> {
        let item_type = self.item_type?;
        let label = self.label.clone()?;
        let kind = match item_type {
            ItemType::Text => ItemKind::Text {
                placeholder: self.placeholder.clone().unwrap_or_default(),
            },
            ItemType::Select => ItemKind::Select {
                options: self.options.clone().unwrap_or_default(),
            },
        };
        Some(Item { id, label, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_and_increasing() {
        let a = ItemId::generate();
        let b = ItemId::generate();
        let c = ItemId::generate();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_initial_item_defaults() {
        let item = Item::initial("1".into());
        assert_eq!(item.label, "title");
        assert_eq!(
            item.kind,
            ItemKind::Text {
                placeholder: String::new()
            }
        );
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let item = Item::initial("1".into());
        let patched = item.apply(&ItemPatch::label("Name")).unwrap();
        assert_eq!(patched.label, "Name");
        // placeholder untouched
        assert_eq!(patched.kind, item.kind);

        let patched = patched.apply(&ItemPatch::placeholder("e.g. Alice")).unwrap();
        assert_eq!(patched.label, "Name");
        assert_eq!(
            patched.kind,
            ItemKind::Text {
                placeholder: "e.g. Alice".to_string()
            }
        );
    }

    #[test]
    fn test_apply_rejects_fields_of_other_type() {
        let item = Item::initial("1".into());
        let patch = ItemPatch {
            options: Some(vec![SelectOption::new("Yes", "y")]),
            ..ItemPatch::default()
        };
        assert!(matches!(
            item.apply(&patch),
            Err(FormError::InvalidPatch(_))
        ));
    }

    #[test]
    fn test_apply_type_switch_rebuilds_payload() {
        let item = Item::initial("1".into());
        let patch = ItemPatch {
            item_type: Some(ItemType::Select),
            options: Some(vec![SelectOption::new("Yes", "y")]),
            ..ItemPatch::default()
        };
        let switched = item.apply(&patch).unwrap();
        assert_eq!(switched.item_type(), ItemType::Select);

        // switching back defaults the placeholder
        let patch = ItemPatch {
            item_type: Some(ItemType::Text),
            ..ItemPatch::default()
        };
        let back = switched.apply(&patch).unwrap();
        assert_eq!(
            back.kind,
            ItemKind::Text {
                placeholder: String::new()
            }
        );
    }

    #[test]
    fn test_to_patch_round_trips() {
        let item = Item {
            id: "7".into(),
            label: "Country".to_string(),
            kind: ItemKind::Select {
                options: vec![SelectOption::new("Japan", "jp")],
            },
        };
        let rebuilt = item.to_patch().build("7".into()).unwrap();
        assert_eq!(rebuilt, item);
    }

    #[test]
    fn test_build_requires_type_and_label() {
        assert!(ItemPatch::label("x").build("1".into()).is_none());
        assert!(
            ItemPatch {
                item_type: Some(ItemType::Text),
                ..ItemPatch::default()
            }
            .build("1".into())
            .is_none()
        );
    }

    #[test]
    fn test_item_serializes_with_type_tag() {
        let item = Item::initial("1".into());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["label"], "title");
        assert_eq!(json["placeholder"], "");
        assert!(json.get("options").is_none());
    }
}

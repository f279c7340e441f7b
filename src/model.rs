//! List and item value types
//!
//! These are exactly what gets serialized into the storage blob.

use serde::{Deserialize, Serialize};

/// A single todo entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// A named list of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// Display name, fixed at creation
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
    /// In-progress text for the next item. Older saves call this `newItem`.
    #[serde(rename = "draftItemText", alias = "newItem", default)]
    pub draft_item_text: String,
}

impl TodoList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            draft_item_text: String::new(),
        }
    }

    /// Number of items checked off
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_list_is_empty() {
        let list = TodoList::new("Groceries");
        assert_eq!(list.name, "Groceries");
        assert!(list.items.is_empty());
        assert_eq!(list.draft_item_text, "");
    }

    #[test]
    fn test_serializes_draft_as_camel_case() {
        let mut list = TodoList::new("Work");
        list.draft_item_text = "call bob".to_string();
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["draftItemText"], "call bob");
        assert!(json.get("draft_item_text").is_none());
    }

    #[test]
    fn test_accepts_legacy_new_item_field() {
        let json = r#"{"name":"Old","items":[{"text":"a","completed":true}],"newItem":"half"}"#;
        let list: TodoList = serde_json::from_str(json).unwrap();
        assert_eq!(list.draft_item_text, "half");
        assert_eq!(list.completed_count(), 1);
    }

    #[test]
    fn test_missing_draft_defaults_to_empty() {
        let list: TodoList = serde_json::from_str(r#"{"name":"x","items":[]}"#).unwrap();
        assert_eq!(list.draft_item_text, "");
    }
}

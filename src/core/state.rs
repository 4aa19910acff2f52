//! # Application State
//!
//! One snapshot of everything the list screen shows. Domain data only,
//! no TUI types. Presentation state (selection, scroll, completion flags,
//! editor text) lives in the `tui` module.
//!
//! ```text
//! TodoState
//! ├── items: Vec<Item>          // append-only, at most one is_editing
//! ├── dialog_open: bool         // add dialog visible
//! ├── draft: Draft              // add dialog title/description text
//! ├── notice: Option<Notice>    // transient toast ("Enter title", ...)
//! └── next_notice_seq: u64      // sequence for the next notice
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! The store never mutates a published snapshot; it clones, updates, and
//! publishes a fresh `Arc<TodoState>`.

use crate::core::item::{Item, ItemId};

/// Text held by the add dialog before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

impl Draft {
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: DraftField, text: String) {
        match field {
            DraftField::Title => self.title = text,
            DraftField::Description => self.description = text,
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Description,
}

/// A short advisory message. `seq` tells a fresh notice apart from an older
/// one with the same text, so an expiring timer only clears its own notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub seq: u64,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    pub items: Vec<Item>,
    pub dialog_open: bool,
    pub draft: Draft,
    pub notice: Option<Notice>,
    pub(crate) next_notice_seq: u64,
}

impl TodoState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The item currently shown in its editor, if any.
    pub fn editing_item(&self) -> Option<&Item> {
        self.items.iter().find(|item| item.is_editing)
    }

    pub fn editing_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_editing).count()
    }

    /// Id the next created item receives.
    pub fn next_id(&self) -> ItemId {
        self.items.len() as ItemId + 1
    }

    pub(crate) fn raise_notice(&mut self, message: String) {
        self.next_notice_seq += 1;
        self.notice = Some(Notice {
            seq: self.next_notice_seq,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = TodoState::new();
        assert!(state.is_empty());
        assert!(!state.dialog_open);
        assert_eq!(state.draft, Draft::default());
        assert!(state.notice.is_none());
        assert_eq!(state.next_id(), 1);
    }

    #[test]
    fn test_editing_item_lookup() {
        let mut state = TodoState::new();
        state.items.push(Item::new(1, "a", "b"));
        state.items.push(Item {
            is_editing: true,
            ..Item::new(2, "c", "d")
        });
        assert_eq!(state.editing_item().map(|i| i.id), Some(2));
        assert_eq!(state.editing_count(), 1);
        assert_eq!(state.item(1).map(|i| i.title.as_str()), Some("a"));
        assert!(state.item(7).is_none());
    }

    #[test]
    fn test_notice_sequence_increases() {
        let mut state = TodoState::new();
        state.raise_notice("Enter title".to_string());
        state.raise_notice("Enter title".to_string());
        let notice = state.notice.expect("notice raised");
        assert_eq!(notice.seq, 2);
        assert_eq!(notice.message, "Enter title");
    }

    #[test]
    fn test_draft_field_access() {
        let mut draft = Draft::default();
        draft.set(DraftField::Title, "t".to_string());
        draft.set(DraftField::Description, "d".to_string());
        assert_eq!(draft.get(DraftField::Title), "t");
        assert_eq!(draft.get(DraftField::Description), "d");
        draft.clear();
        assert_eq!(draft, Draft::default());
    }
}

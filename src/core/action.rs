//! # Actions
//!
//! Everything that can happen to the to-do list becomes an `Action`.
//! User presses Enter on "Add"? That's `Action::SubmitNewItem { .. }`.
//! User presses `e` on a row? That's `Action::RequestEdit(id)`.
//!
//! The `update()` function takes the current state and an action and
//! mutates the state in place. No side effects here. Terminal I/O and
//! timers happen in the TUI adapter.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```

use log::{debug, info};

use crate::core::error::{ValidationError, validate_draft};
use crate::core::item::{Item, ItemId};
use crate::core::state::{DraftField, TodoState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Put `target` in edit mode and every other item out of it.
    RequestEdit(ItemId),
    /// Leave edit mode everywhere and store the editor's text on `id`.
    CompleteEdit {
        id: ItemId,
        title: String,
        description: String,
    },
    OpenAddDialog,
    /// Cancel: hide the dialog and clear the drafts.
    CloseAddDialog,
    /// Hide the dialog but keep the drafts for next time.
    DismissAddDialog,
    UpdateDraft { field: DraftField, text: String },
    SubmitNewItem { title: String, description: String },
    /// Clear the notice with this sequence number, if it is still shown.
    DismissNotice(u64),
    Quit,
}

/// What the caller should do after an action has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    ItemAdded(ItemId),
    Rejected(ValidationError),
}

pub fn update(state: &mut TodoState, action: Action) -> Effect {
    match action {
        Action::RequestEdit(target) => {
            if state.item(target).is_none() {
                debug!("Edit requested for unknown item {}", target);
                return Effect::None;
            }
            for item in &mut state.items {
                item.is_editing = item.id == target;
            }
            Effect::None
        }
        Action::CompleteEdit {
            id,
            title,
            description,
        } => {
            for item in &mut state.items {
                item.is_editing = false;
            }
            if let Some(item) = state.items.iter_mut().find(|item| item.id == id) {
                item.title = title;
                item.description = description;
            }
            Effect::None
        }
        Action::OpenAddDialog => {
            state.dialog_open = true;
            Effect::None
        }
        Action::CloseAddDialog => {
            state.dialog_open = false;
            state.draft.clear();
            Effect::None
        }
        Action::DismissAddDialog => {
            state.dialog_open = false;
            Effect::None
        }
        Action::UpdateDraft { field, text } => {
            state.draft.set(field, text);
            Effect::None
        }
        Action::SubmitNewItem { title, description } => match submit_new_item(state, title, description) {
            Ok(id) => Effect::ItemAdded(id),
            Err(err) => Effect::Rejected(err),
        },
        Action::DismissNotice(seq) => {
            if state.notice.as_ref().is_some_and(|notice| notice.seq == seq) {
                state.notice = None;
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Validate a submission and append it. A rejection raises a notice and
/// leaves the items alone.
pub fn submit_new_item(
    state: &mut TodoState,
    title: String,
    description: String,
) -> Result<ItemId, ValidationError> {
    if let Err(err) = validate_draft(&title, &description) {
        info!("Rejected new item: {}", err);
        state.raise_notice(err.to_string());
        return Err(err);
    }
    let id = state.next_id();
    state.items.push(Item::new(id, title, description));
    state.dialog_open = false;
    state.draft.clear();
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Draft;
    use crate::test_support::state_with_items;

    #[test]
    fn test_request_edit_sets_single_flag() {
        let mut state = state_with_items(&[("a", "1"), ("b", "2"), ("c", "3")]);
        update(&mut state, Action::RequestEdit(2));
        let flags: Vec<bool> = state.items.iter().map(|i| i.is_editing).collect();
        assert_eq!(flags, vec![false, true, false]);

        update(&mut state, Action::RequestEdit(3));
        let flags: Vec<bool> = state.items.iter().map(|i| i.is_editing).collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[test]
    fn test_request_edit_unknown_id_is_noop() {
        let mut state = state_with_items(&[("a", "1"), ("b", "2")]);
        update(&mut state, Action::RequestEdit(1));
        let before = state.clone();
        assert_eq!(update(&mut state, Action::RequestEdit(99)), Effect::None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_complete_edit_accepts_blank_text() {
        let mut state = state_with_items(&[("a", "1"), ("b", "2")]);
        update(&mut state, Action::RequestEdit(2));
        update(
            &mut state,
            Action::CompleteEdit {
                id: 2,
                title: String::new(),
                description: "  ".to_string(),
            },
        );
        assert_eq!(state.items[1].title, "");
        assert_eq!(state.items[1].description, "  ");
        assert_eq!(state.items[0].title, "a");
        assert_eq!(state.editing_count(), 0);
    }

    #[test]
    fn test_complete_edit_unknown_id_only_clears_flags() {
        let mut state = state_with_items(&[("a", "1")]);
        update(&mut state, Action::RequestEdit(1));
        update(
            &mut state,
            Action::CompleteEdit {
                id: 5,
                title: "x".to_string(),
                description: "y".to_string(),
            },
        );
        assert_eq!(state.items[0].title, "a");
        assert!(!state.items[0].is_editing);
    }

    #[test]
    fn test_submit_appends_with_sequential_id() {
        let mut state = TodoState::new();
        update(&mut state, Action::OpenAddDialog);
        let effect = update(
            &mut state,
            Action::SubmitNewItem {
                title: "Buy milk".to_string(),
                description: "2%".to_string(),
            },
        );
        assert_eq!(effect, Effect::ItemAdded(1));
        assert_eq!(state.items, vec![Item::new(1, "Buy milk", "2%")]);
        assert!(!state.dialog_open);
    }

    #[test]
    fn test_submit_keeps_untrimmed_text() {
        let mut state = TodoState::new();
        update(
            &mut state,
            Action::SubmitNewItem {
                title: "  padded ".to_string(),
                description: "d".to_string(),
            },
        );
        assert_eq!(state.items[0].title, "  padded ");
    }

    #[test]
    fn test_rejected_submit_keeps_dialog_and_drafts() {
        let mut state = TodoState::new();
        update(&mut state, Action::OpenAddDialog);
        update(
            &mut state,
            Action::UpdateDraft {
                field: DraftField::Description,
                text: "x".to_string(),
            },
        );
        let effect = update(
            &mut state,
            Action::SubmitNewItem {
                title: String::new(),
                description: "x".to_string(),
            },
        );
        assert_eq!(effect, Effect::Rejected(ValidationError::BlankTitle));
        assert!(state.dialog_open);
        assert!(state.is_empty());
        assert_eq!(state.draft.description, "x");
        assert_eq!(
            state.notice.as_ref().map(|n| n.message.as_str()),
            Some("Enter title")
        );
    }

    #[test]
    fn test_cancel_clears_drafts_dismiss_keeps_them() {
        let mut state = TodoState::new();
        update(&mut state, Action::OpenAddDialog);
        update(
            &mut state,
            Action::UpdateDraft {
                field: DraftField::Title,
                text: "half typed".to_string(),
            },
        );
        update(&mut state, Action::DismissAddDialog);
        assert!(!state.dialog_open);
        assert_eq!(state.draft.title, "half typed");

        update(&mut state, Action::OpenAddDialog);
        update(&mut state, Action::CloseAddDialog);
        assert!(!state.dialog_open);
        assert_eq!(state.draft, Draft::default());
    }

    #[test]
    fn test_stale_notice_dismissal_is_ignored() {
        let mut state = TodoState::new();
        let blank = || Action::SubmitNewItem {
            title: String::new(),
            description: String::new(),
        };
        update(&mut state, blank());
        let first = state.notice.as_ref().map(|n| n.seq).unwrap_or_default();
        update(&mut state, blank());

        update(&mut state, Action::DismissNotice(first));
        assert!(state.notice.is_some());

        let second = state.notice.as_ref().map(|n| n.seq).unwrap_or_default();
        update(&mut state, Action::DismissNotice(second));
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_quit_effect() {
        let mut state = TodoState::new();
        assert_eq!(update(&mut state, Action::Quit), Effect::Quit);
    }
}

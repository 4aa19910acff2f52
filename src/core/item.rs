//! # Item
//!
//! The single entity of the application. Completion ("checked") is NOT part
//! of an item: it is row-local view state owned by the TUI list.

/// Identifier of an item within the list.
///
/// Assigned as `len + 1` at creation. Unique only because the list is
/// append-only; a delete operation would need a counter independent of length.
pub type ItemId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    /// True for at most one item across the whole list.
    pub is_editing: bool,
}

impl Item {
    pub fn new(id: ItemId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            is_editing: false,
        }
    }
}

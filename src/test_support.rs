//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::item::{Item, ItemId};
use crate::core::state::TodoState;
use crate::core::store::Store;

/// Creates a state holding the given `(title, description)` pairs with ids 1..=n.
pub fn state_with_items(items: &[(&str, &str)]) -> TodoState {
    let mut state = TodoState::new();
    state.items = items
        .iter()
        .enumerate()
        .map(|(i, (title, description))| Item::new(i as ItemId + 1, *title, *description))
        .collect();
    state
}

/// Creates a store over [`state_with_items`].
pub fn store_with_items(items: &[(&str, &str)]) -> Store {
    Store::with_state(state_with_items(items))
}

/// Collects every cell symbol of a rendered test buffer into one string.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}

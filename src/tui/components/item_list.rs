//! # ItemList Component
//!
//! Scrollable view of the to-do items.
//!
//! ## Responsibilities
//!
//! - Display every item as an `ItemRow`, or as the `ItemEditor` card for the
//!   item in edit mode
//! - Keyboard selection, scrolling and hit testing for mouse clicks
//! - Layout caching (row heights) for scroll math
//! - Row-local completion flags
//!
//! ## Completion flags
//!
//! A row's checkbox state belongs to the row, not to the item. The flag is
//! dropped whenever the row goes away: its item enters edit mode, or it
//! scrolls completely out of the viewport. A rebuilt `ItemListState` starts
//! with no flags at all. Nothing here ever reaches the store.
//!
//! ## Architecture
//!
//! `ItemList` is a transient component (created each frame) that wraps
//! `&'a mut ItemListState` (persistent state) and the snapshot's items
//! (props).

use std::collections::HashSet;

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::{Item, ItemId};
use crate::tui::component::Component;
use crate::tui::components::item_editor::{EditorState, ItemEditor};
use crate::tui::components::item_row::{ItemRow, RowControl, control_at};
use crate::tui::event::TuiEvent;

/// Lines moved per mouse wheel notch.
const WHEEL_STEP: u16 = 3;

/// Cached row measurements from the last render.
#[derive(Debug, Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// Running total: `prefix_heights[i]` is the bottom edge of row `i`.
    pub prefix_heights: Vec<u16>,
}

impl LayoutCache {
    pub(crate) fn update(&mut self, heights: Vec<u16>) {
        let mut total = 0u16;
        self.prefix_heights = heights
            .iter()
            .map(|h| {
                total = total.saturating_add(*h);
                total
            })
            .collect();
        self.heights = heights;
    }

    fn total(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    fn top(&self, index: usize) -> u16 {
        if index == 0 {
            0
        } else {
            self.prefix_heights.get(index - 1).copied().unwrap_or(0)
        }
    }
}

/// Events emitted by the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    RequestEdit(ItemId),
    /// Enter on the row already in edit mode: give its editor the keyboard.
    FocusEditor,
    OpenAddDialog,
    Quit,
    /// Selection, scroll or a completion flag changed.
    Changed,
}

/// Selection, scroll and row-local state for the list.
/// Must be persisted in the parent `TuiState`.
pub struct ItemListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    pub selected: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Screen area of the last render (for hit testing)
    pub area: Rect,
    /// Scroll the selection into view on the next render, once the new
    /// row has been measured.
    reveal_pending: bool,
    checked: HashSet<ItemId>,
}

impl Default for ItemListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::default(),
            selected: None,
            viewport_height: 0,
            area: Rect::default(),
            reveal_pending: false,
            checked: HashSet::new(),
        }
    }

    pub fn is_checked(&self, id: ItemId) -> bool {
        self.checked.contains(&id)
    }

    pub fn toggle_checked(&mut self, id: ItemId) {
        if !self.checked.remove(&id) {
            self.checked.insert(id);
        }
    }

    /// Forget the completion flag of every row not in `alive`.
    pub fn recycle_rows(&mut self, alive: &HashSet<ItemId>) {
        self.checked.retain(|id| alive.contains(id));
    }

    /// Handle a key event against the current items.
    pub fn handle_event(&mut self, event: &TuiEvent, items: &[Item]) -> Option<ListEvent> {
        match event {
            TuiEvent::InputChar('q') | TuiEvent::Escape => Some(ListEvent::Quit),
            TuiEvent::InputChar('a') => Some(ListEvent::OpenAddDialog),
            TuiEvent::InputChar('e') | TuiEvent::Submit => {
                let item = items.get(self.selected?)?;
                if item.is_editing {
                    Some(ListEvent::FocusEditor)
                } else {
                    Some(ListEvent::RequestEdit(item.id))
                }
            }
            TuiEvent::InputChar(' ') => {
                let item = items.get(self.selected?)?;
                if item.is_editing {
                    return None;
                }
                self.toggle_checked(item.id);
                Some(ListEvent::Changed)
            }
            TuiEvent::CursorUp => {
                if items.is_empty() {
                    return None;
                }
                let idx = self
                    .selected
                    .map(|i| i.saturating_sub(1))
                    .unwrap_or(items.len() - 1);
                self.select(idx)
            }
            TuiEvent::CursorDown => {
                if items.is_empty() {
                    return None;
                }
                let idx = self
                    .selected
                    .map(|i| (i + 1).min(items.len() - 1))
                    .unwrap_or(0);
                self.select(idx)
            }
            TuiEvent::CursorHome if !items.is_empty() => self.select(0),
            TuiEvent::CursorEnd if !items.is_empty() => self.select(items.len() - 1),
            TuiEvent::PageUp => {
                self.scroll_by(-(self.viewport_height as i32));
                Some(ListEvent::Changed)
            }
            TuiEvent::PageDown => {
                self.scroll_by(self.viewport_height as i32);
                Some(ListEvent::Changed)
            }
            TuiEvent::ScrollUp => {
                self.scroll_by(-(WHEEL_STEP as i32));
                Some(ListEvent::Changed)
            }
            TuiEvent::ScrollDown => {
                self.scroll_by(WHEEL_STEP as i32);
                Some(ListEvent::Changed)
            }
            TuiEvent::MouseClick(col, row) => {
                let idx = self.hit_test(*col, *row)?;
                self.selected = Some(idx);
                let Some(item) = items.get(idx).filter(|item| !item.is_editing) else {
                    return Some(ListEvent::Changed);
                };

                // Rows are drawn from the left edge of the list, one column
                // short of it for the scrollbar.
                let x = col - self.area.x;
                let y = row - self.area.y + self.scroll_state.offset().y - self.layout.top(idx);
                match control_at(self.area.width.saturating_sub(1), x, y) {
                    Some(RowControl::Edit) => Some(ListEvent::RequestEdit(item.id)),
                    Some(RowControl::Checkbox) => {
                        self.toggle_checked(item.id);
                        Some(ListEvent::Changed)
                    }
                    None => Some(ListEvent::Changed),
                }
            }
            _ => None,
        }
    }

    /// Select a row that may not have been laid out yet (a new item, or
    /// the row that just became an editor) and bring it into view.
    pub fn select_and_reveal(&mut self, idx: usize) {
        self.selected = Some(idx);
        self.reveal_pending = true;
    }

    fn select(&mut self, idx: usize) -> Option<ListEvent> {
        self.selected = Some(idx);
        self.scroll_to_selected();
        Some(ListEvent::Changed)
    }

    fn scroll_by(&mut self, delta: i32) {
        let current = self.scroll_state.offset().y as i32;
        let y = (current + delta).max(0) as u16;
        self.scroll_state.set_offset(Position { x: 0, y });
        self.clamp_scroll();
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.layout.total().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected row is fully visible.
    /// If the row is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected else {
            return;
        };
        if idx >= self.layout.prefix_heights.len() {
            return;
        }

        let item_top = self.layout.top(idx);
        let item_bottom = self.layout.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom
                .saturating_sub(self.viewport_height)
                .min(item_top);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    /// Row index under a screen position, if any.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<usize> {
        if !self.area.contains(Position { x: col, y: row }) {
            return None;
        }
        let content_y = (row - self.area.y) + self.scroll_state.offset().y;
        self.layout
            .prefix_heights
            .iter()
            .position(|bottom| content_y < *bottom)
    }

    /// Keep the selection inside `len` rows.
    pub fn clamp_selection(&mut self, len: usize) {
        self.selected = match (self.selected, len) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => None,
        };
    }
}

/// Scrollable list component.
/// Created fresh each frame with references to state and data.
pub struct ItemList<'a> {
    pub state: &'a mut ItemListState,
    pub items: &'a [Item],
    /// Editor for the item in edit mode, if one is open
    pub editor: Option<&'a mut EditorState>,
    /// Whether the editor has keyboard focus
    pub editor_active: bool,
    pub description_max_lines: u16,
}

impl<'a> ItemList<'a> {
    pub fn new(
        state: &'a mut ItemListState,
        items: &'a [Item],
        editor: Option<&'a mut EditorState>,
        editor_active: bool,
        description_max_lines: u16,
    ) -> Self {
        Self {
            state,
            items,
            editor,
            editor_active,
            description_max_lines,
        }
    }

    fn shows_editor(&self, item: &Item) -> bool {
        item.is_editing
            && self
                .editor
                .as_ref()
                .is_some_and(|editor| editor.item_id == item.id)
    }
}

impl Component for ItemList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.area = area;
        self.state.viewport_height = area.height;
        self.state.clamp_selection(self.items.len());

        if self.items.is_empty() {
            self.state.layout.update(Vec::new());
            self.state.recycle_rows(&HashSet::new());
            let empty = Paragraph::new("No items yet. Press a to add one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Update layout cache
        let items = self.items;
        let heights: Vec<u16> = items
            .iter()
            .map(|item| {
                if self.shows_editor(item) {
                    self.editor
                        .as_deref()
                        .map_or(0, |editor| editor.height(content_width))
                } else {
                    ItemRow::new(item, false, false, self.description_max_lines)
                        .height(content_width)
                }
            })
            .collect();
        self.state.layout.update(heights);
        self.state.clamp_scroll();
        if self.state.reveal_pending {
            self.state.scroll_to_selected();
            self.state.reveal_pending = false;
        }

        let offset_y = self.state.scroll_state.offset().y;
        let viewport_bottom = offset_y.saturating_add(area.height);

        // 2. Draw rows into the scroll view
        let mut scroll_view = ScrollView::new(Size::new(content_width, self.state.layout.total()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut alive = HashSet::new();
        let mut cursor = None;
        for (idx, item) in items.iter().enumerate() {
            let top = self.state.layout.top(idx);
            let height = self.state.layout.heights[idx];
            let rect = Rect::new(0, top, content_width, height);
            let selected = self.state.selected == Some(idx);

            if self.shows_editor(item) {
                let active = self.editor_active;
                if let Some(state) = self.editor.as_deref_mut() {
                    let (widgets, editor_cursor) = ItemEditor::new(state, active).layout(rect);
                    for (widget, widget_rect) in widgets {
                        scroll_view.render_widget(widget, widget_rect);
                    }
                    cursor = editor_cursor;
                }
                continue;
            }

            let visible = top < viewport_bottom && top + height > offset_y;
            if visible {
                alive.insert(item.id);
            }
            let row = ItemRow::new(
                item,
                self.state.is_checked(item.id),
                selected,
                self.description_max_lines,
            );
            scroll_view.render_widget(row, rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // 3. Editor cursor, translated from content to screen coordinates
        if let Some((x, y)) = cursor
            && y >= offset_y
            && y < viewport_bottom
        {
            frame.set_cursor_position((area.x + x, area.y + (y - offset_y)));
        }

        // 4. Rows that left the screen (or became editors) lose their flags
        self.state.recycle_rows(&alive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, state_with_items};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &mut ItemListState, items: &[Item], width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| ItemList::new(state, items, None, false, 4).render(f, f.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_empty_list_placeholder() {
        let mut state = ItemListState::new();
        let text = draw(&mut state, &[], 50, 10);
        assert!(text.contains("No items yet"));
    }

    #[test]
    fn test_navigation_selects_rows() {
        let items = state_with_items(&[("a", "1"), ("b", "2"), ("c", "3")]).items;
        let mut state = ItemListState::new();
        state.handle_event(&TuiEvent::CursorDown, &items);
        assert_eq!(state.selected, Some(0));
        state.handle_event(&TuiEvent::CursorDown, &items);
        state.handle_event(&TuiEvent::CursorDown, &items);
        state.handle_event(&TuiEvent::CursorDown, &items);
        assert_eq!(state.selected, Some(2));
        state.handle_event(&TuiEvent::CursorHome, &items);
        assert_eq!(state.selected, Some(0));
        state.handle_event(&TuiEvent::CursorEnd, &items);
        assert_eq!(state.selected, Some(2));
    }

    #[test]
    fn test_edit_trigger_targets_selected_row() {
        let mut items = state_with_items(&[("a", "1"), ("b", "2")]).items;
        let mut state = ItemListState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('e'), &items), None);

        state.selected = Some(1);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('e'), &items),
            Some(ListEvent::RequestEdit(2))
        );
        items[1].is_editing = true;
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &items),
            Some(ListEvent::FocusEditor)
        );
    }

    #[test]
    fn test_space_toggles_only_row_state() {
        let items = state_with_items(&[("a", "1")]).items;
        let mut state = ItemListState::new();
        state.selected = Some(0);
        state.handle_event(&TuiEvent::InputChar(' '), &items);
        assert!(state.is_checked(1));
        state.handle_event(&TuiEvent::InputChar(' '), &items);
        assert!(!state.is_checked(1));
    }

    #[test]
    fn test_checked_row_survives_redraw_while_visible() {
        let items = state_with_items(&[("a", "1"), ("b", "2")]).items;
        let mut state = ItemListState::new();
        state.toggle_checked(2);
        let text = draw(&mut state, &items, 50, 20);
        assert!(text.contains("[x]"));
        draw(&mut state, &items, 50, 20);
        assert!(state.is_checked(2));
    }

    #[test]
    fn test_flag_dropped_when_row_scrolls_away() {
        let pairs: Vec<(String, String)> =
            (1..=10).map(|i| (format!("item {i}"), "d".to_string())).collect();
        let refs: Vec<(&str, &str)> = pairs.iter().map(|(t, d)| (t.as_str(), d.as_str())).collect();
        let items = state_with_items(&refs).items;

        let mut state = ItemListState::new();
        state.toggle_checked(1);
        draw(&mut state, &items, 50, 8); // each row is 4 tall: rows 1-2 visible
        assert!(state.is_checked(1));

        state.handle_event(&TuiEvent::CursorEnd, &items);
        draw(&mut state, &items, 50, 8);
        assert!(!state.is_checked(1));

        state.handle_event(&TuiEvent::CursorHome, &items);
        let text = draw(&mut state, &items, 50, 8);
        assert!(text.contains("item 1"));
        assert!(!state.is_checked(1));
    }

    #[test]
    fn test_flag_dropped_when_item_enters_edit_mode() {
        let mut items = state_with_items(&[("a", "1"), ("b", "2")]).items;
        let mut state = ItemListState::new();
        state.toggle_checked(1);
        items[0].is_editing = true;

        let mut editor = EditorState::new(&items[0], 4);
        let backend = TestBackend::new(50, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                ItemList::new(&mut state, &items, Some(&mut editor), true, 4).render(f, f.area())
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Editing #1"));
        assert!(!state.is_checked(1));
    }

    #[test]
    fn test_reveal_scrolls_new_row_into_view() {
        let pairs: Vec<(String, String)> =
            (1..=10).map(|i| (format!("item {i}"), "d".to_string())).collect();
        let refs: Vec<(&str, &str)> = pairs.iter().map(|(t, d)| (t.as_str(), d.as_str())).collect();
        let items = state_with_items(&refs).items;

        let mut state = ItemListState::new();
        state.select_and_reveal(9);
        let text = draw(&mut state, &items, 50, 8);
        assert_eq!(state.scroll_state.offset().y, 32);
        assert!(text.contains("item 10"));
    }

    #[test]
    fn test_hit_test_maps_rows() {
        let items = state_with_items(&[("a", "1"), ("b", "2")]).items;
        let mut state = ItemListState::new();
        draw(&mut state, &items, 50, 20);
        assert_eq!(state.hit_test(5, 0), Some(0));
        assert_eq!(state.hit_test(5, 4), Some(1));
        assert_eq!(state.hit_test(5, 15), None);
    }

    #[test]
    fn test_clicks_on_row_controls() {
        let mut items = state_with_items(&[("a", "1"), ("b", "2")]).items;
        let mut state = ItemListState::new();
        draw(&mut state, &items, 50, 20);
        // 49 columns of rows: the marker spans 40..=43 and "[ ]" 44..=46,
        // on the title line of each 4-line row
        assert_eq!(
            state.handle_event(&TuiEvent::MouseClick(46, 5), &items),
            Some(ListEvent::Changed)
        );
        assert!(state.is_checked(2));
        assert_eq!(state.selected, Some(1));

        state.handle_event(&TuiEvent::MouseClick(46, 5), &items);
        assert!(!state.is_checked(2));

        assert_eq!(
            state.handle_event(&TuiEvent::MouseClick(42, 1), &items),
            Some(ListEvent::RequestEdit(1))
        );
        assert_eq!(state.selected, Some(0));

        // Text area and the description line below the checkbox only select
        state.handle_event(&TuiEvent::MouseClick(5, 1), &items);
        state.handle_event(&TuiEvent::MouseClick(46, 2), &items);
        assert!(!state.is_checked(1));

        // The row in edit mode has no checkbox to hit
        items[0].is_editing = true;
        state.handle_event(&TuiEvent::MouseClick(46, 1), &items);
        assert!(!state.is_checked(1));
    }

    #[test]
    fn test_shortcuts() {
        let mut state = ItemListState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('a'), &[]),
            Some(ListEvent::OpenAddDialog)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('q'), &[]),
            Some(ListEvent::Quit)
        );
        assert_eq!(state.handle_event(&TuiEvent::CursorDown, &[]), None);
    }
}

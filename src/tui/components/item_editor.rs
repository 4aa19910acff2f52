//! # ItemEditor Component
//!
//! Inline editor shown in place of the row of the item in edit mode.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `EditorState` lives in `TuiState` while an item is in edit mode
//! - `ItemEditor` is created each frame with borrowed state
//!
//! The fields are filled from the item once, when the editor first appears.
//! Later store updates do not overwrite what the user is typing. Saving
//! sends the text as-is, blank or not.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::{Item, ItemId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;

/// Outer card borders, top + bottom.
const CARD_VERTICAL_OVERHEAD: u16 = 2;
const SAVE_BUTTON_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    Title,
    Description,
    Save,
}

impl EditorFocus {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Save,
            Self::Save => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::Save,
            Self::Description => Self::Title,
            Self::Save => Self::Description,
        }
    }
}

/// Events emitted by the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    Save {
        id: ItemId,
        title: String,
        description: String,
    },
    /// Hand keyboard focus back to the list. The editor stays open.
    Blur,
    Changed,
}

pub struct EditorState {
    pub item_id: ItemId,
    pub title: TextField,
    pub description: TextField,
    pub focus: EditorFocus,
}

impl EditorState {
    /// Editor seeded from `item`. The description grows up to
    /// `description_max_lines` before it scrolls, like the row it replaces.
    pub fn new(item: &Item, description_max_lines: u16) -> Self {
        Self {
            item_id: item.id,
            title: TextField::with_text("Title", item.title.clone()).single_line(),
            description: TextField::with_text("Description", item.description.clone())
                .max_lines(description_max_lines),
            focus: EditorFocus::Title,
        }
    }

    /// Height of the card at the given outer width.
    pub fn height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(2);
        CARD_VERTICAL_OVERHEAD
            + self.title.height(inner)
            + self.description.height(inner)
            + SAVE_BUTTON_HEIGHT
    }

    fn save(&self) -> EditorEvent {
        EditorEvent::Save {
            id: self.item_id,
            title: self.title.text().to_string(),
            description: self.description.text().to_string(),
        }
    }
}

impl EventHandler for EditorState {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<EditorEvent> {
        match event {
            TuiEvent::Save => return Some(self.save()),
            TuiEvent::Escape => return Some(EditorEvent::Blur),
            TuiEvent::FocusNext => {
                self.focus = self.focus.next();
                return Some(EditorEvent::Changed);
            }
            TuiEvent::FocusPrev => {
                self.focus = self.focus.prev();
                return Some(EditorEvent::Changed);
            }
            _ => {}
        }

        match self.focus {
            EditorFocus::Title => match event {
                TuiEvent::CursorDown => {
                    self.focus = EditorFocus::Description;
                    Some(EditorEvent::Changed)
                }
                _ => match self.title.handle_event(event)? {
                    FieldEvent::Submit => {
                        self.focus = EditorFocus::Description;
                        Some(EditorEvent::Changed)
                    }
                    FieldEvent::Changed => Some(EditorEvent::Changed),
                },
            },
            EditorFocus::Description => match self.description.handle_event(event) {
                Some(FieldEvent::Submit) => Some(self.save()),
                Some(FieldEvent::Changed) => Some(EditorEvent::Changed),
                // Arrow keys past the first/last line leave the field
                None if *event == TuiEvent::CursorUp => {
                    self.focus = EditorFocus::Title;
                    Some(EditorEvent::Changed)
                }
                None if *event == TuiEvent::CursorDown => {
                    self.focus = EditorFocus::Save;
                    Some(EditorEvent::Changed)
                }
                None => None,
            },
            EditorFocus::Save => match event {
                TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(self.save()),
                TuiEvent::CursorUp => {
                    self.focus = EditorFocus::Description;
                    Some(EditorEvent::Changed)
                }
                _ => None,
            },
        }
    }
}

/// Transient render wrapper for the editor card.
pub struct ItemEditor<'a> {
    state: &'a mut EditorState,
    /// Whether the editor (rather than the list) has keyboard focus
    active: bool,
}

impl<'a> ItemEditor<'a> {
    pub fn new(state: &'a mut EditorState, active: bool) -> Self {
        Self { state, active }
    }

    pub fn height(&self, width: u16) -> u16 {
        self.state.height(width)
    }

    /// Widgets making up the card placed at `area`, plus the cursor position
    /// in the same coordinates when a text field has focus.
    pub fn layout(&mut self, area: Rect) -> (Vec<(Paragraph<'static>, Rect)>, Option<(u16, u16)>) {
        let focus = self.state.focus;
        self.state.title.focused = self.active && focus == EditorFocus::Title;
        self.state.description.focused = self.active && focus == EditorFocus::Description;

        let card_style = if self.active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let card = Paragraph::new("").block(
            Block::bordered()
                .border_type(BorderType::Double)
                .border_style(card_style)
                .title(format!(" Editing #{} ", self.state.item_id)),
        );

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(CARD_VERTICAL_OVERHEAD),
        };
        let title_h = self.state.title.height(inner.width);
        let description_h = self.state.description.height(inner.width);
        let title_area = Rect { height: title_h, ..inner };
        let description_area = Rect {
            y: inner.y + title_h,
            height: description_h,
            ..inner
        };
        let save_area = Rect {
            y: inner.y + title_h + description_h,
            height: SAVE_BUTTON_HEIGHT,
            ..inner
        };

        let save_style = if self.active && focus == EditorFocus::Save {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let save = Paragraph::new(" Save ✔ (Ctrl+S) ")
            .style(save_style)
            .alignment(Alignment::Center);

        // Build the fields first: that settles their scroll offsets
        let title = self.state.title.paragraph(title_area.width);
        let description = self.state.description.paragraph(description_area.width);

        let cursor = if self.state.title.focused {
            Some(self.state.title.cursor_position(title_area))
        } else if self.state.description.focused {
            Some(self.state.description.cursor_position(description_area))
        } else {
            None
        };

        let widgets = vec![
            (card, area),
            (title, title_area),
            (description, description_area),
            (save, save_area),
        ];
        (widgets, cursor)
    }
}

impl Component for ItemEditor<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (widgets, cursor) = self.layout(area);
        for (widget, rect) in widgets {
            frame.render_widget(widget, rect.intersection(area));
        }
        if let Some(position) = cursor {
            frame.set_cursor_position(position);
        }
    }
}

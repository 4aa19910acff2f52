//! # AddDialog Component
//!
//! Centered overlay for creating an item: Title, Description, Cancel, Add.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `AddDialogState` lives in `TuiState` while the dialog is open
//! - `AddDialog` is created each frame with borrowed state
//!
//! The text itself belongs to the store's draft. Every edit is reported as
//! `DialogEvent::DraftChanged` so the draft survives a dismissal, and the
//! fields are refilled from the draft whenever the dialog opens.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::{Draft, DraftField};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{FieldEvent, TextField};
use crate::tui::event::TuiEvent;

const DIALOG_WIDTH_PERCENT: u16 = 70;
const BUTTON_ROW_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogFocus {
    Title,
    Description,
    Cancel,
    Add,
}

impl DialogFocus {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Cancel,
            Self::Cancel => Self::Add,
            Self::Add => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::Add,
            Self::Description => Self::Title,
            Self::Cancel => Self::Description,
            Self::Add => Self::Cancel,
        }
    }
}

/// Events emitted by the add dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    DraftChanged { field: DraftField, text: String },
    Submit { title: String, description: String },
    /// Cancel button: close and clear the drafts.
    Cancel,
    /// Esc: close and keep the drafts.
    Dismiss,
    /// Focus moved; nothing to tell the store.
    Redraw,
}

pub struct AddDialogState {
    pub title: TextField,
    pub description: TextField,
    pub focus: DialogFocus,
}

impl AddDialogState {
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            title: TextField::with_text("Title", draft.title.clone()).single_line(),
            description: TextField::with_text("Description", draft.description.clone()),
            focus: DialogFocus::Title,
        }
    }

    fn submit(&self) -> DialogEvent {
        DialogEvent::Submit {
            title: self.title.text().to_string(),
            description: self.description.text().to_string(),
        }
    }

    fn focus_to(&mut self, focus: DialogFocus) -> Option<DialogEvent> {
        self.focus = focus;
        Some(DialogEvent::Redraw)
    }
}

impl EventHandler for AddDialogState {
    type Event = DialogEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DialogEvent> {
        match event {
            TuiEvent::Escape => return Some(DialogEvent::Dismiss),
            TuiEvent::Save => return Some(self.submit()),
            TuiEvent::FocusNext => return self.focus_to(self.focus.next()),
            TuiEvent::FocusPrev => return self.focus_to(self.focus.prev()),
            _ => {}
        }

        match self.focus {
            DialogFocus::Title => match self.title.handle_event(event)? {
                FieldEvent::Submit => self.focus_to(DialogFocus::Description),
                FieldEvent::Changed => Some(DialogEvent::DraftChanged {
                    field: DraftField::Title,
                    text: self.title.text().to_string(),
                }),
            },
            DialogFocus::Description => match self.description.handle_event(event)? {
                FieldEvent::Submit => self.focus_to(DialogFocus::Add),
                FieldEvent::Changed => Some(DialogEvent::DraftChanged {
                    field: DraftField::Description,
                    text: self.description.text().to_string(),
                }),
            },
            DialogFocus::Cancel | DialogFocus::Add => match event {
                TuiEvent::CursorLeft => self.focus_to(DialogFocus::Cancel),
                TuiEvent::CursorRight => self.focus_to(DialogFocus::Add),
                TuiEvent::CursorUp => self.focus_to(DialogFocus::Description),
                TuiEvent::Submit | TuiEvent::InputChar(' ') => {
                    if self.focus == DialogFocus::Add {
                        Some(self.submit())
                    } else {
                        Some(DialogEvent::Cancel)
                    }
                }
                _ => None,
            },
        }
    }
}

/// Transient render wrapper for the add dialog overlay.
pub struct AddDialog<'a> {
    state: &'a mut AddDialogState,
}

impl<'a> AddDialog<'a> {
    pub fn new(state: &'a mut AddDialogState) -> Self {
        Self { state }
    }
}

impl Component for AddDialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let focus = self.state.focus;
        self.state.title.focused = focus == DialogFocus::Title;
        self.state.description.focused = focus == DialogFocus::Description;

        let width = ((area.width as u32 * DIALOG_WIDTH_PERCENT as u32 / 100) as u16)
            .max(20)
            .min(area.width);
        // Block borders + horizontal padding
        let field_width = width.saturating_sub(4);
        let content_height = self.state.title.height(field_width)
            + self.state.description.height(field_width)
            + BUTTON_ROW_HEIGHT;
        let overlay = centered_rect(width, content_height + 2, area);

        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" New Item ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Tab Next  Ctrl+S Add  Esc Close ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [title_area, description_area, buttons_area] = Layout::vertical([
            Constraint::Length(self.state.title.height(inner.width)),
            Constraint::Length(self.state.description.height(inner.width)),
            Constraint::Length(BUTTON_ROW_HEIGHT),
        ])
        .areas(inner);

        self.state.title.render(frame, title_area);
        self.state.description.render(frame, description_area);

        let [cancel_area, add_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(buttons_area);
        frame.render_widget(button(" Cancel ", focus == DialogFocus::Cancel), cancel_area);
        frame.render_widget(button(" Add ", focus == DialogFocus::Add), add_area);
    }
}

fn button(label: &'static str, focused: bool) -> Paragraph<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Paragraph::new(label).style(style).alignment(Alignment::Center)
}

/// A `width` x `height` rect centered in `outer`, clamped to fit.
fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(outer.width)),
        Constraint::Fill(1),
    ])
    .areas(center_v);
    center
}

//! # TextField Component
//!
//! A bordered, labelled text input used by the add dialog and the item
//! editor.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Report Enter as `FieldEvent::Submit` so the owner can move focus or save
//! - Render the wrapped buffer with internal scrolling past `max_lines`
//!
//! ## State Management
//!
//! The buffer is internal state. `focused` is a prop set by the owner each
//! frame. Cursor position and scroll state are encapsulated in `CursorState`.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary, wrap_line_count,
    wrap_lines,
};

/// Visible lines before a multi-line field starts scrolling internally.
pub const DEFAULT_MAX_LINES: u16 = 4;

/// High-level events emitted by a `TextField`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// Buffer or cursor changed
    Changed,
    /// Enter pressed
    Submit,
}

pub struct TextField {
    buffer: String,
    label: String,
    /// Whether the field has keyboard focus (Prop)
    pub focused: bool,
    /// Newlines are refused; pasted newlines become spaces.
    single_line: bool,
    max_lines: u16,
    cursor: CursorState,
}

impl TextField {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_text(label, "")
    }

    /// A field pre-filled with `text`, cursor at the end.
    pub fn with_text(label: impl Into<String>, text: impl Into<String>) -> Self {
        let buffer = text.into();
        Self {
            cursor: CursorState::at_end(&buffer),
            buffer,
            label: label.into(),
            focused: false,
            single_line: false,
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    pub fn single_line(mut self) -> Self {
        self.single_line = true;
        self.max_lines = 1;
        self
    }

    pub fn max_lines(mut self, lines: u16) -> Self {
        self.max_lines = lines.max(1);
        self
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Height needed for the current buffer at the given outer width,
    /// clamped to `max_lines` plus borders.
    pub fn height(&self, width: u16) -> u16 {
        let lines = wrap_line_count(&self.buffer, inner_width(width));
        lines.min(self.max_lines) + VERTICAL_OVERHEAD
    }

    /// Build the widget for this frame. Also settles the scroll offset so the
    /// cursor line is visible.
    pub fn paragraph(&mut self, width: u16) -> Paragraph<'static> {
        let inner = inner_width(width);
        self.cursor.last_width = inner;
        self.cursor
            .update_scroll_offset(&self.buffer, inner, self.max_lines);

        let lines: Vec<Line<'static>> = wrap_lines(&self.buffer, inner)
            .into_iter()
            .skip(self.cursor.scroll_offset as usize)
            .take(self.max_lines as usize)
            .map(Line::from)
            .collect();

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.label.clone());

        let text_style = if self.focused {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        Paragraph::new(lines).block(block).style(text_style)
    }

    /// Screen position of the cursor when the field occupies `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        self.cursor.screen_pos(&self.buffer, area)
    }

    fn insert(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let paragraph = self.paragraph(area.width);
        frame.render_widget(paragraph, area);
        if self.focused {
            frame.set_cursor_position(self.cursor_position(area));
        }
    }
}

impl EventHandler for TextField {
    type Event = FieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('\n') if self.single_line => None,
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp));
                Some(FieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                if self.single_line {
                    let flat = text.replace(['\r', '\n'], " ");
                    self.insert(&flat);
                } else {
                    self.insert(&text.replace("\r\n", "\n"));
                }
                Some(FieldEvent::Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(FieldEvent::Changed)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(FieldEvent::Changed)
            }
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                FieldEvent::Changed
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                FieldEvent::Changed
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    FieldEvent::Changed
                })
            }
            TuiEvent::CursorUp => {
                let width = self.cursor.last_width;
                self.cursor
                    .move_vertically(&self.buffer, -1, width)
                    .then_some(FieldEvent::Changed)
            }
            TuiEvent::CursorDown => {
                let width = self.cursor.last_width;
                self.cursor
                    .move_vertically(&self.buffer, 1, width)
                    .then_some(FieldEvent::Changed)
            }
            TuiEvent::Submit => Some(FieldEvent::Submit),
            _ => None,
        }
    }
}

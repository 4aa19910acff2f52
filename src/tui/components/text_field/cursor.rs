//! Cursor position tracking and navigation for `TextField`.
//!
//! `CursorState` owns the cursor byte offset and the internal scroll offset.
//! All methods take `buffer: &str` explicitly; the text is owned by
//! `TextField`.

use unicode_width::UnicodeWidthStr;

use super::text_wrap::{BORDER_OFFSET, inner_width, wrap_line_count, wrap_spans};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible wrapped line (0 when content fits)
    pub scroll_offset: u16,
    /// Inner width from the last render (used for Up/Down movement)
    pub last_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Cursor placed after the last character of `buffer`.
    pub fn at_end(buffer: &str) -> Self {
        Self {
            pos: buffer.len(),
            ..Self::new()
        }
    }

    /// Wrapped (row, column) of the cursor for a field of inner `width`.
    pub fn locate(&self, buffer: &str, width: u16) -> (u16, u16) {
        locate(buffer, self.pos, width)
    }

    /// Move to the previous (`direction < 0`) or next wrapped line, keeping
    /// the column where possible. Returns `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, width: u16) -> bool {
        if width == 0 || buffer.is_empty() {
            return false;
        }

        let spans = wrap_spans(buffer, width);
        let (row, col) = locate_in(&spans, buffer, self.pos, width);
        let last_row = spans.len().saturating_sub(1) as u16;
        let target_row = if direction < 0 {
            if row == 0 {
                return false;
            }
            row - 1
        } else {
            if row >= last_row {
                return false;
            }
            row + 1
        };

        // Rightmost boundary on the target row that does not pass the column
        let mut best = None;
        for pos in boundaries(buffer) {
            let (r, c) = locate_in(&spans, buffer, pos, width);
            if r > target_row {
                break;
            }
            if r == target_row && (best.is_none() || c <= col) {
                best = Some(pos);
            }
        }

        match best {
            Some(pos) => {
                self.pos = pos;
                true
            }
            None => false,
        }
    }

    /// Keep the cursor line inside the `max_lines` visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, width: u16, max_lines: u16) {
        let total_lines = wrap_line_count(buffer, width);
        if total_lines <= max_lines {
            self.scroll_offset = 0;
            return;
        }

        let (cursor_line, _) = self.locate(buffer, width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + max_lines {
            self.scroll_offset = cursor_line.saturating_sub(max_lines - 1);
        }
    }

    /// Screen (column, row) for the cursor inside a bordered field at `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        let (row, col) = self.locate(buffer, width);
        let visible_row = row.saturating_sub(self.scroll_offset);
        (
            area.x + BORDER_OFFSET + col,
            area.y + BORDER_OFFSET + visible_row,
        )
    }
}

fn boundaries(buffer: &str) -> impl Iterator<Item = usize> + '_ {
    buffer
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(buffer.len()))
}

fn locate(buffer: &str, pos: usize, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }
    locate_in(&wrap_spans(buffer, width), buffer, pos, width)
}

/// Row is the last wrapped line starting at or before `pos`; the column is
/// measured from that line's first byte.
fn locate_in(spans: &[(usize, usize)], buffer: &str, pos: usize, width: u16) -> (u16, u16) {
    let row = spans
        .iter()
        .rposition(|(start, _)| *start <= pos)
        .unwrap_or(0);
    let start = spans.get(row).map_or(0, |(start, _)| *start);
    let col = buffer.get(start..pos).map_or(0, |text| text.width()) as u16;

    (row as u16, col.min(width.saturating_sub(1)))
}

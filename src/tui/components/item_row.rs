use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::Item;

/// Borders (1 top + 1 bottom) plus the title line.
const FIXED_HEIGHT: u16 = 3;
/// Left + right borders.
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Edit marker and checkbox on the right: " ✎  [x] "
const CONTROLS_WIDTH: u16 = 8;
/// Columns of " ✎  " at the start of the controls.
const EDIT_MARKER_WIDTH: u16 = 4;

/// Clickable parts of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowControl {
    Edit,
    Checkbox,
}

/// Control under `(x, y)`, measured from the top-left corner of a row drawn
/// `width` columns wide. Controls sit on the title line only.
pub fn control_at(width: u16, x: u16, y: u16) -> Option<RowControl> {
    if y != 1 {
        return None;
    }
    let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
    let start = 1 + inner - CONTROLS_WIDTH.min(inner);
    if x < start || x >= 1 + inner {
        return None;
    }
    if x - start < EDIT_MARKER_WIDTH {
        Some(RowControl::Edit)
    } else {
        Some(RowControl::Checkbox)
    }
}

/// Read-only rendering of one item that is not being edited.
///
/// # Design
///
/// `ItemRow` is a **transient component**: built fresh each frame from the
/// item and the row-local flags the parent `ItemList` keeps. It never talks
/// to the store; the list turns key presses on the selected row into
/// actions.
///
/// The completion flag (`checked`) only affects styling: title and
/// description are crossed out.
#[derive(Clone, Copy)]
pub struct ItemRow<'a> {
    pub item: &'a Item,
    pub checked: bool,
    pub selected: bool,
    pub description_max_lines: u16,
}

impl<'a> ItemRow<'a> {
    pub fn new(item: &'a Item, checked: bool, selected: bool, description_max_lines: u16) -> Self {
        Self {
            item,
            checked,
            selected,
            description_max_lines,
        }
    }

    /// Height of this row when drawn `width` columns wide.
    pub fn height(&self, width: u16) -> u16 {
        FIXED_HEIGHT + self.description_lines(text_width(width)).len() as u16
    }

    fn description_lines(&self, width: u16) -> Vec<String> {
        let max = self.description_max_lines.max(1) as usize;
        if width == 0 {
            return vec![String::new()];
        }
        let wrapped = textwrap::wrap(&self.item.description, width as usize);
        let mut lines: Vec<String> = wrapped.iter().take(max).map(|l| l.to_string()).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        if wrapped.len() > max
            && let Some(last) = lines.last_mut()
        {
            *last = truncate_to_width(&format!("{last}…"), width as usize);
        }
        lines
    }
}

impl Widget for ItemRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Plain)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let [text_area, controls_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(CONTROLS_WIDTH)])
                .areas(inner);

        let strike = if self.checked {
            Modifier::CROSSED_OUT
        } else {
            Modifier::empty()
        };
        let title_style = Style::default().add_modifier(Modifier::BOLD | strike);
        let description_style = Style::default().fg(Color::Gray).add_modifier(strike);

        let first_line = self.item.title.lines().next().unwrap_or("");
        let mut lines = vec![Line::from(Span::styled(
            truncate_to_width(first_line, text_area.width as usize),
            title_style,
        ))];
        lines.extend(
            self.description_lines(text_area.width)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, description_style))),
        );
        Paragraph::new(lines).render(text_area, buf);

        let checkbox = if self.checked { "[x]" } else { "[ ]" };
        let controls = Line::from(vec![
            Span::styled(" ✎  ", Style::default().fg(Color::DarkGray)),
            Span::styled(checkbox, Style::default().add_modifier(Modifier::BOLD)),
        ]);
        Paragraph::new(controls).render(controls_area, buf);
    }
}

fn text_width(width: u16) -> u16 {
    width
        .saturating_sub(HORIZONTAL_OVERHEAD)
        .saturating_sub(CONTROLS_WIDTH)
}

/// Cut `s` to at most `max_width` display columns, ending in "…" when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

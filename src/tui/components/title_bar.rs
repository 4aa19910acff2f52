//! # TitleBar Component
//!
//! Top status bar: application name, item count, and which item (if any) is
//! in edit mode.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(snapshot.len(), snapshot.editing_item().map(|i| i.id));
//! title_bar.render(frame, area);
//! ```
//!
//! ### Props-in-Struct Pattern
//!
//! Props are struct fields rather than render() parameters because the
//! Component trait requires a fixed render() signature.

use crate::core::ItemId;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
pub struct TitleBar {
    /// Number of items in the list
    pub item_count: usize,
    /// Item currently in edit mode
    pub editing: Option<ItemId>,
}

impl TitleBar {
    pub fn new(item_count: usize, editing: Option<ItemId>) -> Self {
        Self {
            item_count,
            editing,
        }
    }

    fn status(&self) -> String {
        let count = match self.item_count {
            1 => "1 item".to_string(),
            n => format!("{n} items"),
        };
        match self.editing {
            Some(id) => format!("{count} | editing #{id}"),
            None => count,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("To-Do List", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" ({})", self.status())),
        ]);
        frame.render_widget(line, area);
    }
}

//! # Toast Component
//!
//! Short notice drawn over the bottom of the screen. Non-blocking: keys keep
//! going to whatever had focus.
//!
//! `NoticeTimer` tracks when the visible notice appeared so the event loop
//! can dismiss it after the configured duration.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::Notice;
use crate::tui::component::Component;

/// Rows kept free below the toast (help line).
const BOTTOM_MARGIN: u16 = 2;
const TOAST_HEIGHT: u16 = 3;

pub struct Toast<'a> {
    pub message: &'a str,
}

impl<'a> Toast<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Component for Toast<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = (self.message.width() as u16).saturating_add(4).min(area.width);
        let height = TOAST_HEIGHT.min(area.height);
        let y = area
            .bottom()
            .saturating_sub(height + BOTTOM_MARGIN)
            .max(area.y);
        let x = area.x + (area.width - width) / 2;
        let rect = Rect::new(x, y, width, height);

        frame.render_widget(Clear, rect);
        let toast = Paragraph::new(self.message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
        frame.render_widget(toast, rect);
    }
}

/// Expiry tracking for the notice currently on screen.
#[derive(Debug)]
pub struct NoticeTimer {
    duration: Duration,
    shown: Option<(u64, Instant)>,
}

impl NoticeTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            shown: None,
        }
    }

    /// Follow the snapshot's notice. A new sequence number restarts the clock.
    pub fn observe(&mut self, notice: Option<&Notice>, now: Instant) {
        self.shown = match (notice, self.shown) {
            (None, _) => None,
            (Some(n), Some((seq, since))) if n.seq == seq => Some((seq, since)),
            (Some(n), _) => Some((n.seq, now)),
        };
    }

    /// Sequence number of the notice whose time is up, if any.
    pub fn expired(&self, now: Instant) -> Option<u64> {
        let (seq, since) = self.shown?;
        (now.duration_since(since) >= self.duration).then_some(seq)
    }

    /// How long the event loop may sleep before the notice expires.
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        let (_, since) = self.shown?;
        Some(self.duration.saturating_sub(now.duration_since(since)))
    }
}

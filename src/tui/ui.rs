use crate::core::TodoState;
use crate::tui::component::Component;
use crate::tui::components::{AddDialog, ItemList, TitleBar, Toast};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const ADD_BUTTON_LABEL: &str = "[ + Add Item ]";

/// Screen regions of the main view.
pub struct ScreenLayout {
    pub title: Rect,
    pub list: Rect,
    pub add_button: Rect,
    pub help: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    use Constraint::{Length, Min};
    let [title, list, button_bar, help] =
        Layout::vertical([Length(1), Min(0), Length(1), Length(1)]).areas(area);
    let [_, add_button, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(ADD_BUTTON_LABEL.chars().count() as u16),
        Constraint::Fill(1),
    ])
    .areas(button_bar);
    ScreenLayout {
        title,
        list,
        add_button,
        help,
    }
}

pub fn draw_ui(frame: &mut Frame, snapshot: &TodoState, tui: &mut TuiState) {
    let layout = screen_layout(frame.area());
    tui.add_button_area = layout.add_button;

    TitleBar::new(snapshot.len(), snapshot.editing_item().map(|item| item.id))
        .render(frame, layout.title);

    let editor_active = tui.focus == Focus::Editor && tui.dialog.is_none();
    ItemList::new(
        &mut tui.item_list,
        &snapshot.items,
        tui.editor.as_mut(),
        editor_active,
        tui.description_max_lines,
    )
    .render(frame, layout.list);

    let button_style = if tui.dialog.is_some() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(ADD_BUTTON_LABEL, button_style)).alignment(Alignment::Center),
        layout.add_button,
    );

    frame.render_widget(
        Paragraph::new(Line::from(help_text(tui))).style(Style::default().fg(Color::DarkGray)),
        layout.help,
    );

    if let Some(dialog) = tui.dialog.as_mut() {
        AddDialog::new(dialog).render(frame, frame.area());
    }

    if let Some(notice) = &snapshot.notice {
        Toast::new(&notice.message).render(frame, frame.area());
    }
}

fn help_text(tui: &TuiState) -> &'static str {
    if tui.dialog.is_some() {
        " Tab Next field  Enter Next  Ctrl+S Add  Esc Close "
    } else if tui.focus == Focus::Editor {
        " Tab Next field  Ctrl+S Save  Esc Back to list "
    } else {
        " ↑↓ Select  a Add  e Edit  Space Done  q Quit "
    }
}

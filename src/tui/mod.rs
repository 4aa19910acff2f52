//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard and mouse events into store calls.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Data Flow
//!
//! ```text
//! crossterm Event ─▶ TuiEvent ─▶ component event ─▶ Store::dispatch
//!                                                        │
//!         draw_ui(snapshot) ◀── redraw flag ◀── subscriber
//! ```
//!
//! ## Redraw Strategy
//!
//! The loop only draws when the store subscriber flagged a new snapshot or a
//! terminal event arrived. While a notice is on screen the poll timeout
//! shrinks to the time left before it expires; otherwise the loop sleeps up
//! to `IDLE_POLL`.

mod component;
pub mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::cell::Cell;
use std::io::{self, stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use ratatui::layout::{Position, Rect};

use crate::core::config::ResolvedConfig;
use crate::core::{Action, Effect, Store, TodoState};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    AddDialogState, DialogEvent, EditorEvent, EditorState, ItemListState, ListEvent, NoticeTimer,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// Which part of the main view receives keys when no dialog is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Editor,
}

/// TUI-specific presentation state (not part of the store)
pub struct TuiState {
    // Persistent component states
    pub item_list: ItemListState,
    /// Present while an item is in edit mode
    pub editor: Option<EditorState>,
    /// Present while the add dialog is open
    pub dialog: Option<AddDialogState>,
    pub focus: Focus,
    pub description_max_lines: u16,
    /// Where the "Add Item" button was last drawn (for mouse clicks)
    pub add_button_area: Rect,
}

impl TuiState {
    pub fn new(description_max_lines: u16) -> Self {
        Self {
            item_list: ItemListState::new(),
            editor: None,
            dialog: None,
            focus: Focus::List,
            description_max_lines,
            add_button_area: Rect::default(),
        }
    }

    /// Bring component states in line with a new snapshot.
    ///
    /// The editor is created when an item enters edit mode and kept (with
    /// whatever the user typed) for as long as that same item stays in edit
    /// mode. The dialog fields are filled from the draft when it opens.
    pub fn sync(&mut self, snapshot: &TodoState) {
        match snapshot.editing_item() {
            Some(item) => {
                if self.editor.as_ref().map(|e| e.item_id) != Some(item.id) {
                    debug!("Opening editor for item {}", item.id);
                    self.editor = Some(EditorState::new(item, self.description_max_lines));
                    self.focus = Focus::Editor;
                    if let Some(idx) = snapshot.items.iter().position(|i| i.id == item.id) {
                        self.item_list.select_and_reveal(idx);
                    }
                }
            }
            None => {
                if self.editor.take().is_some() {
                    debug!("Editor closed");
                }
                self.focus = Focus::List;
            }
        }

        match (snapshot.dialog_open, self.dialog.is_some()) {
            (true, false) => self.dialog = Some(AddDialogState::from_draft(&snapshot.draft)),
            (false, true) => self.dialog = None,
            _ => {}
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let mut store = Store::new();
    let mut tui = TuiState::new(config.description_max_lines);
    let mut timer = NoticeTimer::new(Duration::from_millis(config.notice_duration_ms));

    let needs_redraw = Rc::new(Cell::new(true)); // Force first frame
    let flag = Rc::clone(&needs_redraw);
    store.subscribe(move |_snapshot| flag.set(true));

    let mut terminal = ratatui::init();
    let guard = TerminalModeGuard::new();
    if let Err(e) = &guard {
        warn!("Failed to enable terminal modes: {}", e);
    }

    let result = event_loop(&mut terminal, &mut store, &mut tui, &mut timer, &needs_redraw);

    drop(guard);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    store: &mut Store,
    tui: &mut TuiState,
    timer: &mut NoticeTimer,
    needs_redraw: &Cell<bool>,
) -> io::Result<()> {
    loop {
        let now = Instant::now();
        timer.observe(store.state().notice.as_ref(), now);
        if let Some(seq) = timer.expired(now) {
            debug!("Notice {} expired", seq);
            store.dismiss_notice(seq);
            timer.observe(store.state().notice.as_ref(), now);
        }

        // Only draw when something changed
        if needs_redraw.replace(false) {
            let snapshot = store.snapshot();
            terminal.draw(|f| ui::draw_ui(f, &snapshot, tui))?;
        }

        let timeout = timer.time_left(now).map_or(IDLE_POLL, |t| t.min(IDLE_POLL));
        let Some(first) = poll_event_timeout(timeout)? else {
            continue;
        };

        // Process first event + drain all pending events before next draw
        let mut pending = vec![first];
        while let Some(event) = poll_event_immediate()? {
            pending.push(event);
        }
        needs_redraw.set(true);

        for event in pending {
            if route_event(store, tui, &event) {
                info!("Quit requested");
                return Ok(());
            }
        }
    }
}

/// Apply one terminal event. Returns `true` when the app should quit.
///
/// Routing order: Ctrl+C, then the add dialog (modal), then mouse input for
/// the list, then whichever of editor or list has focus.
fn route_event(store: &mut Store, tui: &mut TuiState, event: &TuiEvent) -> bool {
    let quit = match event {
        TuiEvent::Resize => false,
        TuiEvent::ForceQuit => store.dispatch(Action::Quit) == Effect::Quit,
        _ if tui.dialog.is_some() => {
            route_dialog_event(store, tui, event);
            false
        }
        TuiEvent::MouseClick(col, row)
            if tui.add_button_area.contains(Position { x: *col, y: *row }) =>
        {
            store.open_add_dialog();
            false
        }
        TuiEvent::MouseClick(..) | TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            let snapshot = store.snapshot();
            match tui.item_list.handle_event(event, &snapshot.items) {
                Some(ListEvent::RequestEdit(id)) => store.request_edit(id),
                Some(_) if matches!(event, TuiEvent::MouseClick(..)) => {
                    let on_editor = tui
                        .item_list
                        .selected
                        .and_then(|idx| snapshot.items.get(idx))
                        .is_some_and(|item| item.is_editing);
                    tui.focus = if on_editor { Focus::Editor } else { Focus::List };
                }
                _ => {}
            }
            false
        }
        _ if tui.focus == Focus::Editor && tui.editor.is_some() => {
            route_editor_event(store, tui, event);
            false
        }
        _ => route_list_event(store, tui, event),
    };

    tui.sync(store.state());
    quit
}

fn route_dialog_event(store: &mut Store, tui: &mut TuiState, event: &TuiEvent) {
    let Some(dialog) = tui.dialog.as_mut() else {
        return;
    };
    match dialog.handle_event(event) {
        Some(DialogEvent::DraftChanged { field, text }) => store.update_draft(field, text),
        Some(DialogEvent::Submit { title, description }) => {
            match store.submit_new_item(title, description) {
                Ok(id) => {
                    info!("Item {} added", id);
                    tui.item_list.select_and_reveal(store.state().len() - 1);
                }
                Err(e) => debug!("Submission rejected: {}", e),
            }
        }
        Some(DialogEvent::Cancel) => store.close_add_dialog(),
        Some(DialogEvent::Dismiss) => store.dismiss_add_dialog(),
        Some(DialogEvent::Redraw) | None => {}
    }
}

fn route_editor_event(store: &mut Store, tui: &mut TuiState, event: &TuiEvent) {
    let Some(editor) = tui.editor.as_mut() else {
        return;
    };
    match editor.handle_event(event) {
        Some(EditorEvent::Save {
            id,
            title,
            description,
        }) => store.complete_edit(id, title, description),
        Some(EditorEvent::Blur) => tui.focus = Focus::List,
        Some(EditorEvent::Changed) | None => {}
    }
}

fn route_list_event(store: &mut Store, tui: &mut TuiState, event: &TuiEvent) -> bool {
    let snapshot = store.snapshot();
    match tui.item_list.handle_event(event, &snapshot.items) {
        Some(ListEvent::RequestEdit(id)) => store.request_edit(id),
        Some(ListEvent::FocusEditor) => tui.focus = Focus::Editor,
        Some(ListEvent::OpenAddDialog) => store.open_add_dialog(),
        Some(ListEvent::Quit) => return store.dispatch(Action::Quit) == Effect::Quit,
        Some(ListEvent::Changed) | None => {}
    }
    false
}

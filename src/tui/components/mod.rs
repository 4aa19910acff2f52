//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: top status bar with item count and edit status
//! - `ItemRow`: one item in read mode
//! - `Toast`: transient notice
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events. Persistent state
//! lives in `TuiState`; a transient wrapper borrows it each frame:
//! - `TextField`: labelled text input
//! - `ItemList` / `ItemListState`: scrollable rows, selection, completion flags
//! - `ItemEditor` / `EditorState`: inline editor for the item in edit mode
//! - `AddDialog` / `AddDialogState`: overlay for creating an item
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (Top status bar)
//! ├── item_row.rs     (Single item, read mode)
//! ├── item_editor.rs  (Single item, edit mode)
//! ├── item_list.rs    (Scrollable item container)
//! ├── add_dialog.rs   (New item overlay)
//! ├── toast.rs        (Notice toast + expiry timer)
//! └── text_field/     (Text input with wrapping and cursor)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod add_dialog;
pub mod item_editor;
pub mod item_list;
pub mod item_row;
pub mod text_field;
pub mod toast;

pub use add_dialog::{AddDialog, AddDialogState, DialogEvent};
pub use item_editor::{EditorEvent, EditorState, ItemEditor};
pub use item_list::{ItemList, ItemListState, ListEvent};
pub use item_row::ItemRow;
pub use text_field::{FieldEvent, TextField};
pub use toast::{NoticeTimer, Toast};

//! # Core Application Logic
//!
//! The to-do list's business logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • TodoState (snapshot) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Store (observable)   │
//!                    │                         │
//!                    │  No UI. No terminal.    │
//!                    └───────────┬─────────────┘
//!                                │ Arc<TodoState>
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`]: The `Item` entity
//! - [`state`]: `TodoState`, one immutable snapshot of everything the screen shows
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`store`]: `Store`, which publishes a new snapshot per change to subscribers
//! - [`error`]: Validation errors surfaced as notices
//! - [`config`]: Settings file, env and CLI resolution

pub mod action;
pub mod config;
pub mod error;
pub mod item;
pub mod state;
pub mod store;

pub use action::{Action, Effect};
pub use error::ValidationError;
pub use item::{Item, ItemId};
pub use state::{Draft, DraftField, Notice, TodoState};
pub use store::Store;

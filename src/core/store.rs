//! # Store
//!
//! Observable container for `TodoState`. One-way data flow:
//!
//! ```text
//! view event → Action → Store::dispatch → update() on a copy
//!                                      → new Arc<TodoState> → subscribers
//! ```
//!
//! Published snapshots are immutable. Holding an old `Arc<TodoState>` is
//! safe; it never changes under the holder. Subscribers are only called
//! when an action actually changed the state.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::core::action::{self, Action, Effect, update};
use crate::core::error::ValidationError;
use crate::core::item::ItemId;
use crate::core::state::{DraftField, TodoState};

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Arc<TodoState>)>;

pub struct Store {
    snapshot: Arc<TodoState>,
    version: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("version", &self.version)
            .field("items", &self.snapshot.items.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(TodoState::new())
    }

    pub fn with_state(state: TodoState) -> Self {
        Self {
            snapshot: Arc::new(state),
            version: 0,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<TodoState> {
        Arc::clone(&self.snapshot)
    }

    pub fn state(&self) -> &TodoState {
        &self.snapshot
    }

    /// Number of snapshots published since creation.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Arc<TodoState>) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Apply an action. Publishes a new snapshot if the state changed.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        debug!("Dispatch: {:?}", action);
        self.apply(|next| update(next, action))
    }

    /// Run `change` on a copy of the snapshot and publish the copy if it differs.
    fn apply<R>(&mut self, change: impl FnOnce(&mut TodoState) -> R) -> R {
        let mut next = TodoState::clone(&self.snapshot);
        let outcome = change(&mut next);

        if next != *self.snapshot {
            self.snapshot = Arc::new(next);
            self.version += 1;
            debug!(
                "Published snapshot v{} ({} items)",
                self.version,
                self.snapshot.items.len()
            );
            for (_, subscriber) in &mut self.subscribers {
                subscriber(&self.snapshot);
            }
        }
        outcome
    }

    pub fn request_edit(&mut self, target: ItemId) {
        self.dispatch(Action::RequestEdit(target));
    }

    pub fn complete_edit(&mut self, target: ItemId, title: impl Into<String>, description: impl Into<String>) {
        self.dispatch(Action::CompleteEdit {
            id: target,
            title: title.into(),
            description: description.into(),
        });
    }

    pub fn open_add_dialog(&mut self) {
        self.dispatch(Action::OpenAddDialog);
    }

    pub fn close_add_dialog(&mut self) {
        self.dispatch(Action::CloseAddDialog);
    }

    pub fn dismiss_add_dialog(&mut self) {
        self.dispatch(Action::DismissAddDialog);
    }

    pub fn update_draft(&mut self, field: DraftField, text: impl Into<String>) {
        self.dispatch(Action::UpdateDraft {
            field,
            text: text.into(),
        });
    }

    /// Validate and append a new item. On rejection the notice is raised
    /// and the list is left as it was.
    pub fn submit_new_item(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<ItemId, ValidationError> {
        let (title, description) = (title.into(), description.into());
        debug!("Submit: {:?} / {:?}", title, description);
        self.apply(|next| action::submit_new_item(next, title, description))
    }

    pub fn dismiss_notice(&mut self, seq: u64) {
        self.dispatch(Action::DismissNotice(seq));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribers_see_each_change_once() {
        let mut store = Store::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.len()));

        store.open_add_dialog();
        store.submit_new_item("a", "b").unwrap();
        store.submit_new_item("c", "d").unwrap();

        assert_eq!(*seen.borrow(), vec![0, 1, 2]);
        assert_eq!(store.version(), 3);
    }

    #[test]
    fn test_noop_dispatch_does_not_notify() {
        let mut store = Store::new();
        store.submit_new_item("a", "b").unwrap();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.request_edit(42);
        store.dismiss_notice(7);
        store.close_add_dialog();

        assert_eq!(*calls.borrow(), 0);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_old_snapshots_stay_unchanged() {
        let mut store = Store::new();
        let before = store.snapshot();
        store.submit_new_item("Buy milk", "2%").unwrap();
        let after = store.snapshot();

        assert!(before.is_empty());
        assert_eq!(after.len(), 1);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = Store::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.open_add_dialog();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.close_add_dialog();

        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_submit_new_item_result() {
        let mut store = Store::new();
        assert_eq!(store.submit_new_item("", "x"), Err(ValidationError::BlankTitle));
        assert_eq!(
            store.submit_new_item("x", ""),
            Err(ValidationError::BlankDescription)
        );
        assert_eq!(store.submit_new_item("x", "y"), Ok(1));
        assert_eq!(store.submit_new_item("z", "w"), Ok(2));
    }

    #[test]
    fn test_submit_result_matches_published_snapshot() {
        let mut store = Store::new();
        let published = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&published);
        store.subscribe(move |snapshot| {
            sink.borrow_mut()
                .push(snapshot.items.last().map(|item| item.id))
        });

        let first = store.submit_new_item("a", "1");
        let rejected = store.submit_new_item(" ", "1");
        let second = store.submit_new_item("b", "2");

        assert_eq!(first, Ok(1));
        assert_eq!(rejected, Err(ValidationError::BlankTitle));
        assert_eq!(second, Ok(2));
        // The rejection publishes its notice without touching the items
        assert_eq!(*published.borrow(), vec![Some(1), Some(1), Some(2)]);
        assert_eq!(
            store.dispatch(Action::SubmitNewItem {
                title: "c".into(),
                description: "3".into(),
            }),
            Effect::ItemAdded(3)
        );
    }
}

//! The todo list controller.
//!
//! # Overview
//! `TodoController` owns the authoritative collection and everything that
//! shadows it while requests are in flight: the placeholder shown during an
//! add, the set of ids awaiting a response, the error notification, and the
//! entry-field focus counter. The presentation layer calls the intent
//! methods and renders [`TodoView`]s, either on demand via [`view`] or by
//! watching [`subscribe`].
//!
//! # Design
//! - State sits in a `tokio::sync::watch` channel. Every transition is a
//!   synchronous `send_modify`, so no lock is ever held across an await and
//!   each subscriber observes every change.
//! - The collection only changes on a successful response. The placeholder
//!   is the one speculative piece of state.
//! - Transient marks (placeholder, loading ids, focus) are released by a
//!   [`Settle`] guard, so they are undone on success, on failure, and when
//!   the caller drops the future mid-request.
//! - Bulk operations await each request before issuing the next. Updates are
//!   best effort; deletes stop at the first failure.
//!
//! [`view`]: TodoController::view
//! [`subscribe`]: TodoController::subscribe

use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::TodoApi;
use crate::error::ControllerError;
use crate::notification::{Notifier, Store, NOTIFICATION_TIMEOUT};
use crate::state::ControllerState;
use crate::types::{Filter, NewTodo, Todo, TodoId, UserId};
use crate::view::TodoView;

/// Result of a best-effort bulk update.
#[derive(Debug, Default)]
pub struct BulkUpdateReport {
    pub updated: Vec<Todo>,
    pub failed: Vec<ControllerError>,
}

impl BulkUpdateReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// What an inline title edit turned into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The trimmed title matched the stored one; nothing was sent.
    Unchanged,
    Renamed(Todo),
    /// An empty title removes the item.
    Deleted,
}

/// Items "toggle all" acts on: every item when all are already completed,
/// otherwise only the active ones.
pub fn toggle_all_targets(todos: &[Todo]) -> Vec<Todo> {
    let all_completed = todos.iter().all(|todo| todo.completed);
    todos
        .iter()
        .filter(|todo| all_completed || !todo.completed)
        .cloned()
        .collect()
}

pub struct TodoController<A> {
    api: A,
    user_id: UserId,
    store: Store,
    notifier: Notifier,
}

impl<A: TodoApi> TodoController<A> {
    pub fn new(api: A, user_id: UserId) -> Self {
        Self::with_notification_timeout(api, user_id, NOTIFICATION_TIMEOUT)
    }

    pub fn with_notification_timeout(api: A, user_id: UserId, timeout: Duration) -> Self {
        let (sender, _) = watch::channel(ControllerState::default());
        let store = Arc::new(sender);
        Self {
            api,
            user_id,
            notifier: Notifier::new(Arc::clone(&store), timeout),
            store,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Receive every subsequent state change.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.store.subscribe()
    }

    pub fn snapshot(&self) -> ControllerState {
        self.store.borrow().clone()
    }

    pub fn view(&self) -> TodoView {
        self.store.borrow().view()
    }

    /// Fetch the collection. A failure is shown, not returned.
    pub async fn load(&self) {
        match self.api.list().await {
            Ok(todos) => {
                info!(count = todos.len(), "loaded todos");
                self.store.send_modify(|state| {
                    state.todos = todos.into_iter().filter(|t| !t.is_placeholder()).collect();
                });
            }
            Err(source) => {
                self.report(ControllerError::LoadFailed(source));
            }
        }
    }

    pub async fn add(&self, title: &str) -> Result<Todo, ControllerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(self.report(ControllerError::EmptyTitle));
        }

        let input = NewTodo::new(title, self.user_id);
        let placeholder = input.to_placeholder();
        let _settle = self.settle(
            |state| state.placeholder = Some(placeholder),
            |state| state.placeholder = None,
        );

        match self.api.create(&input).await {
            Ok(created) => {
                debug!(id = created.id, "todo added");
                self.store.send_modify(|state| state.append(created.clone()));
                Ok(created)
            }
            Err(source) => Err(self.report(ControllerError::AddFailed(source))),
        }
    }

    /// Replace an existing item with `todo` and adopt the server's copy.
    pub async fn update(&self, todo: Todo) -> Result<Todo, ControllerError> {
        let id = todo.id;
        self.ensure_known(id)?;
        let _settle = self.in_flight(vec![id], false);
        self.replace_one(&todo).await
    }

    pub async fn delete(&self, id: TodoId) -> Result<(), ControllerError> {
        self.ensure_known(id)?;
        let _settle = self.in_flight(vec![id], true);

        match self.api.remove(id).await {
            Ok(()) => {
                debug!(id, "todo deleted");
                self.store.send_modify(|state| state.remove(id));
                Ok(())
            }
            Err(source) => Err(self.report(ControllerError::DeleteFailed { id, source })),
        }
    }

    /// Apply `transform` to each item in turn. Every item is attempted; each
    /// failure is shown and collected in the report.
    pub async fn bulk_update<F>(&self, items: Vec<Todo>, mut transform: F) -> BulkUpdateReport
    where
        F: FnMut(&Todo) -> Todo,
    {
        let ids = items.iter().map(|todo| todo.id).collect();
        let _settle = self.in_flight(ids, false);

        let mut report = BulkUpdateReport::default();
        for todo in &items {
            match self.replace_one(&transform(todo)).await {
                Ok(received) => report.updated.push(received),
                Err(err) => report.failed.push(err),
            }
        }
        debug!(
            updated = report.updated.len(),
            failed = report.failed.len(),
            "bulk update finished"
        );
        report
    }

    /// Delete each id in turn, stopping at the first failure.
    pub async fn bulk_delete(&self, ids: Vec<TodoId>) -> Result<(), ControllerError> {
        let _settle = self.in_flight(ids.clone(), true);

        for id in ids {
            if let Err(source) = self.api.remove(id).await {
                return Err(self.report(ControllerError::BulkDeleteFailed { id, source }));
            }
            self.store.send_modify(|state| state.remove(id));
        }
        Ok(())
    }

    pub fn set_filter(&self, filter: Filter) {
        self.store.send_if_modified(|state| {
            let changed = state.filter != filter;
            state.filter = filter;
            changed
        });
    }

    pub async fn toggle_all(&self) -> BulkUpdateReport {
        let targets = toggle_all_targets(self.store.borrow().todos());
        self.bulk_update(targets, |todo| Todo {
            completed: !todo.completed,
            ..todo.clone()
        })
        .await
    }

    pub async fn clear_completed(&self) -> Result<(), ControllerError> {
        let ids = self
            .store
            .borrow()
            .todos()
            .iter()
            .filter(|todo| todo.completed)
            .map(|todo| todo.id)
            .collect();
        self.bulk_delete(ids).await
    }

    pub async fn toggle(&self, id: TodoId) -> Result<Todo, ControllerError> {
        let mut todo = self.find(id)?;
        todo.completed = !todo.completed;
        self.update(todo).await
    }

    /// Commit an inline edit of an item's title.
    pub async fn rename(&self, id: TodoId, title: &str) -> Result<EditOutcome, ControllerError> {
        let mut todo = self.find(id)?;
        let title = title.trim();

        if title == todo.title {
            return Ok(EditOutcome::Unchanged);
        }
        if title.is_empty() {
            self.delete(id).await?;
            return Ok(EditOutcome::Deleted);
        }

        todo.title = title.to_string();
        self.update(todo).await.map(EditOutcome::Renamed)
    }

    pub fn dismiss_notification(&self) {
        self.notifier.dismiss();
    }

    async fn replace_one(&self, todo: &Todo) -> Result<Todo, ControllerError> {
        match self.api.replace(todo).await {
            Ok(received) => {
                debug!(id = received.id, "todo updated");
                self.store.send_modify(|state| state.replace(received.clone()));
                Ok(received)
            }
            Err(source) => Err(self.report(ControllerError::UpdateFailed {
                id: todo.id,
                source,
            })),
        }
    }

    fn find(&self, id: TodoId) -> Result<Todo, ControllerError> {
        self.store
            .borrow()
            .find(id)
            .cloned()
            .ok_or(ControllerError::UnknownTodo(id))
    }

    fn ensure_known(&self, id: TodoId) -> Result<(), ControllerError> {
        self.find(id).map(drop)
    }

    /// Log the failure and put its message in the notification slot.
    fn report(&self, err: ControllerError) -> ControllerError {
        match err.source() {
            Some(cause) => warn!(%cause, "{err}"),
            None => warn!("{err}"),
        }
        self.notifier.show(err.user_message());
        err
    }

    fn in_flight(&self, ids: Vec<TodoId>, refocus: bool) -> Settle<'_, impl FnOnce(&mut ControllerState)> {
        let marked = ids.clone();
        self.settle(
            move |state| state.mark_loading(marked),
            move |state| {
                state.unmark_loading(&ids);
                if refocus {
                    state.request_focus();
                }
            },
        )
    }

    fn settle<F>(&self, apply: impl FnOnce(&mut ControllerState), undo: F) -> Settle<'_, F>
    where
        F: FnOnce(&mut ControllerState),
    {
        self.store.send_modify(apply);
        Settle {
            store: &self.store,
            undo: Some(undo),
        }
    }
}

/// Reverts a transient state change when dropped.
struct Settle<'a, F: FnOnce(&mut ControllerState)> {
    store: &'a Store,
    undo: Option<F>,
}

impl<F: FnOnce(&mut ControllerState)> Drop for Settle<'_, F> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.store.send_modify(undo);
        }
    }
}

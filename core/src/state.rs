//! Controller state and the transitions applied to it.
//!
//! Every mutation of [`ControllerState`] goes through one of the small
//! methods here; the controller only decides *when* to apply them. None of
//! them perform I/O, so they run inside `watch::Sender::send_modify`.

use std::collections::BTreeSet;

use crate::types::{Filter, Todo, TodoId};
use crate::view::TodoView;

/// Single-slot error notification.
///
/// `version` increases on every `show`; an expiry only applies when it
/// carries the version that is still current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    message: String,
    visible: bool,
    version: u64,
}

impl Notification {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn show(&mut self, message: impl Into<String>) -> u64 {
        self.version += 1;
        self.message = message.into();
        self.visible = true;
        self.version
    }

    /// Clear the slot if `version` is still the latest message.
    pub(crate) fn expire(&mut self, version: u64) -> bool {
        if self.version != version || (!self.visible && self.message.is_empty()) {
            return false;
        }
        self.message.clear();
        self.visible = false;
        true
    }

    pub(crate) fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// Authoritative collection, insertion order. Never contains id 0.
    pub(crate) todos: Vec<Todo>,
    pub(crate) filter: Filter,
    /// Item shown while a create request is in flight.
    pub(crate) placeholder: Option<Todo>,
    /// Ids awaiting a response.
    pub(crate) loading: BTreeSet<TodoId>,
    pub(crate) notification: Notification,
    /// Bumped whenever the entry field should take focus again.
    pub(crate) focus_requests: u64,
}

impl ControllerState {
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn placeholder(&self) -> Option<&Todo> {
        self.placeholder.as_ref()
    }

    pub fn loading(&self) -> &BTreeSet<TodoId> {
        &self.loading
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn focus_requests(&self) -> u64 {
        self.focus_requests
    }

    pub fn find(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn view(&self) -> TodoView {
        TodoView::from_state(self)
    }

    pub(crate) fn mark_loading(&mut self, ids: impl IntoIterator<Item = TodoId>) {
        self.loading.extend(ids);
    }

    pub(crate) fn unmark_loading(&mut self, ids: &[TodoId]) {
        for id in ids {
            self.loading.remove(id);
        }
    }

    pub(crate) fn append(&mut self, todo: Todo) {
        debug_assert!(!todo.is_placeholder());
        self.todos.push(todo);
    }

    /// Swap in the server's copy of an existing item. Unknown ids are ignored.
    pub(crate) fn replace(&mut self, received: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|todo| todo.id == received.id) {
            *slot = received;
        }
    }

    pub(crate) fn remove(&mut self, id: TodoId) {
        self.todos.retain(|todo| todo.id != id);
    }

    pub(crate) fn request_focus(&mut self) {
        self.focus_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: TodoId, title: &str) -> Todo {
        Todo {
            id,
            user_id: 1,
            title: title.to_string(),
            completed: false,
        }
    }

    #[test]
    fn stale_expiry_is_ignored() {
        let mut notification = Notification::default();
        let first = notification.show("first");
        let second = notification.show("second");
        assert!(!notification.expire(first));
        assert_eq!(notification.message(), "second");
        assert!(notification.expire(second));
        assert!(!notification.is_visible());
        assert_eq!(notification.message(), "");
    }

    #[test]
    fn hide_keeps_the_message() {
        let mut notification = Notification::default();
        notification.show("oops");
        assert!(notification.hide());
        assert!(!notification.hide());
        assert_eq!(notification.message(), "oops");
    }

    #[test]
    fn replace_matches_by_id_in_place() {
        let mut state = ControllerState::default();
        state.append(todo(1, "a"));
        state.append(todo(2, "b"));
        state.replace(todo(1, "a2"));
        state.replace(todo(9, "ghost"));
        let titles: Vec<_> = state.todos().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a2", "b"]);
    }

    #[test]
    fn loading_marks_are_released_per_id() {
        let mut state = ControllerState::default();
        state.mark_loading([1, 2, 3]);
        state.unmark_loading(&[1, 3]);
        assert_eq!(state.loading().iter().copied().collect::<Vec<_>>(), vec![2]);
    }
}

//! Derived view handed to the presentation layer.
//!
//! Nothing here is stored: a `TodoView` is recomputed from a state snapshot
//! whenever the presentation layer asks for one.

use std::collections::BTreeSet;

use crate::filter::filter_todos;
use crate::state::ControllerState;
use crate::types::{Filter, Todo, TodoId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoView {
    pub visible: Vec<Todo>,
    pub placeholder: Option<Todo>,
    pub filter: Filter,
    pub active_count: usize,
    pub all_completed: bool,
    pub has_completed: bool,
    pub has_todos: bool,
    pub loading: BTreeSet<TodoId>,
    /// `Some` only while the notification is shown.
    pub notification: Option<String>,
    pub focus_requests: u64,
}

impl TodoView {
    pub fn from_state(state: &ControllerState) -> Self {
        let todos = state.todos();
        let active_count = todos.iter().filter(|todo| !todo.completed).count();
        let notification = state.notification();

        Self {
            visible: filter_todos(todos, state.filter()),
            placeholder: state.placeholder().cloned(),
            filter: state.filter(),
            active_count,
            all_completed: active_count == 0,
            has_completed: todos.iter().any(|todo| todo.completed),
            has_todos: !todos.is_empty(),
            loading: state.loading().clone(),
            notification: notification
                .is_visible()
                .then(|| notification.message().to_string()),
            focus_requests: state.focus_requests(),
        }
    }

    pub fn is_loading(&self, id: TodoId) -> bool {
        self.loading.contains(&id)
    }

    /// The list section is rendered when there is anything to show in it.
    pub fn shows_list(&self) -> bool {
        self.has_todos || self.placeholder.is_some()
    }
}

//! Plain-text rendering of a [`TodoView`].

use std::fmt::Write as _;

use todos_core::{Filter, Todo, TodoView};

const LOADING: &str = " …";

pub fn render(view: &TodoView) -> String {
    let mut out = String::new();

    if view.shows_list() {
        for todo in &view.visible {
            push_item(&mut out, todo, view.is_loading(todo.id));
        }
        if let Some(placeholder) = &view.placeholder {
            push_item(&mut out, placeholder, true);
        }
    }

    if view.has_todos {
        let _ = writeln!(out, "{}", footer(view));
    }

    if let Some(message) = &view.notification {
        let _ = writeln!(out, "! {message}");
    }
    out
}

fn push_item(out: &mut String, todo: &Todo, loading: bool) {
    let mark = if todo.completed { 'x' } else { ' ' };
    let id = if todo.is_placeholder() {
        "-".to_string()
    } else {
        todo.id.to_string()
    };
    let suffix = if loading { LOADING } else { "" };
    let _ = writeln!(out, "[{mark}] {id:>4}  {}{suffix}", todo.title);
}

fn footer(view: &TodoView) -> String {
    let links: Vec<String> = Filter::ALL
        .iter()
        .map(|&filter| {
            if filter == view.filter {
                format!("[{filter}]")
            } else {
                filter.to_string()
            }
        })
        .collect();
    let mut footer = format!("{} items left  {}", view.active_count, links.join(" "));
    if view.has_completed {
        footer.push_str("  (clear-completed available)");
    }
    footer
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn todo(id: u64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            user_id: 1,
            title: title.to_string(),
            completed,
        }
    }

    fn view(todos: Vec<Todo>) -> TodoView {
        let active_count = todos.iter().filter(|t| !t.completed).count();
        TodoView {
            has_todos: !todos.is_empty(),
            has_completed: todos.iter().any(|t| t.completed),
            all_completed: active_count == 0,
            active_count,
            visible: todos,
            placeholder: None,
            filter: Filter::All,
            loading: BTreeSet::new(),
            notification: None,
            focus_requests: 0,
        }
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert_eq!(render(&view(vec![])), "");
    }

    #[test]
    fn items_and_footer() {
        let out = render(&view(vec![todo(1, "Buy milk", false), todo(2, "Walk dog", true)]));
        assert_eq!(
            out,
            "[ ]    1  Buy milk\n\
             [x]    2  Walk dog\n\
             1 items left  [All] Active Completed  (clear-completed available)\n"
        );
    }

    #[test]
    fn loading_items_and_placeholder_are_marked() {
        let mut v = view(vec![todo(1, "Buy milk", false)]);
        v.loading.insert(1);
        v.placeholder = Some(todo(0, "Pending", false));
        let out = render(&v);
        assert!(out.contains("[ ]    1  Buy milk …\n"));
        assert!(out.contains("[ ]    -  Pending …\n"));
    }

    #[test]
    fn placeholder_shows_without_todos() {
        let mut v = view(vec![]);
        v.placeholder = Some(todo(0, "First", false));
        assert_eq!(render(&v), "[ ]    -  First …\n");
    }

    #[test]
    fn notification_is_last() {
        let mut v = view(vec![]);
        v.notification = Some("Unable to load todos".to_string());
        assert_eq!(render(&v), "! Unable to load todos\n");
    }

    #[test]
    fn selected_filter_is_bracketed() {
        let mut v = view(vec![todo(1, "a", false)]);
        v.filter = Filter::Active;
        assert!(!render(&v).contains("[All]"));
        assert!(render(&v).contains("All [Active] Completed"));
    }
}

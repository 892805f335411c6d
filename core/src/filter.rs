use crate::types::{Filter, Todo};

/// Items selected by `filter`, in their original order.
pub fn filter_todos(todos: &[Todo], filter: Filter) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| filter.matches(todo))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: u64, completed: bool) -> Todo {
        Todo {
            id,
            user_id: 1,
            title: format!("todo {id}"),
            completed,
        }
    }

    fn sample() -> Vec<Todo> {
        vec![
            todo(1, false),
            todo(2, true),
            todo(3, false),
            todo(4, true),
        ]
    }

    fn ids(todos: &[Todo]) -> Vec<u64> {
        todos.iter().map(|t| t.id).collect()
    }

    #[test]
    fn all_returns_input_unchanged() {
        let todos = sample();
        assert_eq!(filter_todos(&todos, Filter::All), todos);
    }

    #[test]
    fn active_keeps_order() {
        assert_eq!(ids(&filter_todos(&sample(), Filter::Active)), vec![1, 3]);
    }

    #[test]
    fn completed_keeps_order() {
        assert_eq!(ids(&filter_todos(&sample(), Filter::Completed)), vec![2, 4]);
    }

    #[test]
    fn every_mode_yields_a_subsequence() {
        let todos = sample();
        for filter in Filter::ALL {
            let filtered = filter_todos(&todos, filter);
            let mut source = todos.iter();
            for item in &filtered {
                assert!(source.any(|t| t == item), "{filter}: order broken");
            }
        }
    }

    #[test]
    fn empty_input_is_fine() {
        for filter in Filter::ALL {
            assert!(filter_todos(&[], filter).is_empty());
        }
    }
}

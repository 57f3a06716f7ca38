//! Search filtering for the todo list.

use crate::types::Task;

/// Returns the tasks visible for `search_term`
///
/// The term is trimmed; an empty term shows every task. Otherwise a task is
/// visible when its title contains the term, ignoring case. Order is kept.
#[must_use]
pub fn filter_todos(todos: &[Task], search_term: &str) -> Vec<Task> {
    let needle = search_term.trim().to_lowercase();
    if needle.is_empty() {
        return todos.to_vec();
    }

    todos
        .iter()
        .filter(|task| task.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn todos() -> Vec<Task> {
        vec![
            Task::new(1, "Buy milk", false),
            Task::new(2, "Write documentation", true),
            Task::new(3, "Deploy to production", false),
        ]
    }

    #[test]
    fn empty_term_shows_everything() {
        assert_eq!(filter_todos(&todos(), ""), todos());
        assert_eq!(filter_todos(&todos(), "   "), todos());
    }

    #[test]
    fn matches_substring_ignoring_case() {
        let visible = filter_todos(&todos(), "MILK");
        assert_eq!(visible, vec![Task::new(1, "Buy milk", false)]);
    }

    #[test]
    fn trims_the_term() {
        let visible = filter_todos(&todos(), "  milk ");
        assert_eq!(visible, vec![Task::new(1, "Buy milk", false)]);
    }

    #[test]
    fn keeps_source_order() {
        let visible = filter_todos(&todos(), "o");
        let ids: Vec<u64> = visible.iter().map(|t| t.id.get()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn no_match_yields_nothing() {
        assert!(filter_todos(&todos(), "groceries").is_empty());
    }

    proptest! {
        #[test]
        fn visible_is_an_ordered_subset(
            titles in prop::collection::vec("[a-zA-Z ]{0,12}", 0..20),
            term in "[a-zA-Z ]{0,3}",
        ) {
            let todos: Vec<Task> = titles
                .iter()
                .enumerate()
                .map(|(i, title)| Task::new(i as u64, title.clone(), i % 2 == 0))
                .collect();

            let visible = filter_todos(&todos, &term);

            let mut source = todos.iter();
            for task in &visible {
                prop_assert!(source.any(|t| t == task));
                prop_assert!(task.title.to_lowercase().contains(&term.trim().to_lowercase()));
            }
        }
    }
}

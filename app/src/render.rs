//! Plain-text rendering of the app state.

use crate::features::app::{AppState, Route, FOOTER_TEXT};
use crate::features::header::HeaderState;
use crate::features::home::HomeState;
use crate::features::todo_item::TodoItem;
use crate::features::todos::TodosState;

/// Header line, with the navigation links when the mobile menu is open
#[must_use]
pub fn header(state: &HeaderState, route: Route) -> String {
    let mut lines = vec![format!("== {} ==  [{}]", state.title, route)];
    if state.mobile_menu_open {
        lines.push(format!("  menu: Home ({})  Todos ({})", Route::Home, Route::Todos));
    }
    lines.join("\n")
}

/// Home page
#[must_use]
pub fn home(state: &HomeState) -> String {
    let mut lines = vec![state.message.clone(), String::new()];
    lines.extend(
        state
            .features
            .iter()
            .map(|f| format!("  ({}) {}: {}", f.icon, f.title, f.description)),
    );
    lines.push(String::new());
    lines.push(format!("Greeting: {}", state.greeting.message));
    lines.push(format!("Counter: {}", state.counter.count));
    lines.join("\n")
}

/// Todo list: stats, search term and the visible items
#[must_use]
pub fn todos(state: &TodosState) -> String {
    if state.is_loading {
        return "Loading todos...".to_string();
    }

    let mut lines = vec![format!(
        "Total: {}  Completed: {}  Pending: {}",
        state.total(),
        state.completed(),
        state.pending()
    )];
    if let Some(loaded_at) = state.loaded_at {
        lines.push(format!("Loaded at {}", loaded_at.format("%Y-%m-%d %H:%M:%S UTC")));
    }
    if !state.search_term.trim().is_empty() {
        lines.push(format!("Search: \"{}\"", state.search_term));
    }

    let visible = state.visible();
    if visible.is_empty() {
        lines.push("No todos found.".to_string());
    } else {
        lines.extend(visible.iter().map(|task| format!("  {}", TodoItem::new(task).render())));
    }
    lines.join("\n")
}

/// The whole page: header, routed content, footer
#[must_use]
pub fn app(state: &AppState) -> String {
    let content = match (state.route, &state.todos) {
        (Route::Home, _) => home(&state.home),
        (Route::Todos, Some(view)) => todos(view),
        (Route::Todos, None) => String::new(),
    };
    [header(&state.header, state.route), content, FOOTER_TEXT.to_string()].join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Task;

    fn loaded() -> TodosState {
        TodosState {
            items: vec![Task::new(1, "A", false), Task::new(2, "B", true)],
            is_loading: false,
            initialized: true,
            ..TodosState::new(1)
        }
    }

    #[test]
    fn test_loading() {
        assert_eq!(todos(&TodosState::new(1)), "Loading todos...");
    }

    #[test]
    fn test_todos_stats_and_items() {
        let text = todos(&loaded());
        assert!(text.starts_with("Total: 2  Completed: 1  Pending: 1"));
        assert!(text.contains("[ ] 1 A"));
        assert!(text.contains("[x] 2 B"));
    }

    #[test]
    fn test_todos_no_match() {
        let state = TodosState {
            search_term: "zzz".to_string(),
            ..loaded()
        };
        let text = todos(&state);
        assert!(text.contains("Search: \"zzz\""));
        assert!(text.ends_with("No todos found."));
    }

    #[test]
    fn test_app_home() {
        let text = app(&AppState::default());
        assert!(text.starts_with("== TaskFlow ==  [/]"));
        assert!(text.contains("Welcome to TaskFlow"));
        assert!(text.contains("Counter: 0"));
        assert!(text.ends_with(FOOTER_TEXT));
    }

    #[test]
    fn test_header_menu() {
        let state = HeaderState {
            mobile_menu_open: true,
            ..HeaderState::default()
        };
        assert!(header(&state, Route::Todos).contains("menu: Home (/)  Todos (/todos)"));
    }
}

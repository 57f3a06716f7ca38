//! A single row of the todo list.
//!
//! The item owns no state of its own. Clicking it reports a toggle event to
//! the list, which performs the update.

use crate::types::Task;

/// Events a todo item reports to its list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoItemEvent {
    /// The item was clicked; carries the task as rendered
    Toggled(Task),
}

/// View over one task
#[derive(Debug, Clone, Copy)]
pub struct TodoItem<'a> {
    task: &'a Task,
}

impl<'a> TodoItem<'a> {
    /// Wrap a task for display
    #[must_use]
    pub const fn new(task: &'a Task) -> Self {
        Self { task }
    }

    /// The task shown by this item
    #[must_use]
    pub const fn task(&self) -> &'a Task {
        self.task
    }

    /// Event emitted when the item is clicked
    #[must_use]
    pub fn clicked(&self) -> TodoItemEvent {
        TodoItemEvent::Toggled(self.task.clone())
    }

    /// One-line rendering, e.g. `[x] 2 Buy milk`
    #[must_use]
    pub fn render(&self) -> String {
        let mark = if self.task.completed { 'x' } else { ' ' };
        format!("[{mark}] {} {}", self.task.id, self.task.title)
    }
}

//! Domain types for TaskFlow.

use serde::{Deserialize, Serialize};

/// Unique identifier of a task, as assigned by the remote API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a `TaskId` from its raw value
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task
///
/// Matches the wire shape of the todos API
/// (`{"id": 1, "title": "...", "completed": false}`); other fields the API
/// sends, such as `userId`, are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Title/description of the task
    pub title: String,
    /// Whether the task is completed
    pub completed: bool,
}

impl Task {
    /// Creates a task
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>, completed: bool) -> Self {
        Self {
            id: TaskId::new(id),
            title: title.into(),
            completed,
        }
    }

    /// A copy of this task with its completion flag inverted
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn task_id_display() {
        assert_eq!(TaskId::new(42).to_string(), "42");
    }

    #[test]
    fn toggled_flips_only_the_flag() {
        let task = Task::new(3, "Write docs", false);
        let toggled = task.toggled();

        assert_eq!(toggled.id, task.id);
        assert_eq!(toggled.title, task.title);
        assert!(toggled.completed);
        assert!(!toggled.toggled().completed);
    }

    #[test]
    fn decodes_api_shape_and_ignores_extra_fields() {
        let json = r#"[
            {"userId": 1, "id": 1, "title": "delectus aut autem", "completed": false},
            {"userId": 1, "id": 2, "title": "quis ut nam", "completed": true}
        ]"#;

        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();

        assert_eq!(
            tasks,
            vec![
                Task::new(1, "delectus aut autem", false),
                Task::new(2, "quis ut nam", true),
            ]
        );
    }
}

//! Todo list view.
//!
//! Owns the task collection, the loading flag and the search term. The
//! collection is fetched once per activation through [`TodosClient`]; toggles
//! reported by child items replace the affected task.
//!
//! # Stale results
//!
//! Every mount of the view gets an activation number. Fetch results carry the
//! activation that requested them and are ignored by any other activation, so
//! a response arriving after the view was torn down and re-mounted cannot
//! overwrite the newer view.

use super::todo_item::TodoItemEvent;
use crate::client::TodosClient;
use crate::filter::filter_todos;
use crate::types::Task;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use taskflow_core::{effect::Effect, environment::Clock, reducer::Reducer, smallvec, SmallVec};

/// Todo list state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodosState {
    /// Tasks in the order the data source returned them
    pub items: Vec<Task>,
    /// Current search term
    pub search_term: String,
    /// True until the first fetch of this activation settles
    pub is_loading: bool,
    /// Mount number of this view
    pub activation: u64,
    /// When the collection was last loaded
    pub loaded_at: Option<DateTime<Utc>>,
    /// Whether the fetch for this activation was started
    pub initialized: bool,
}

impl TodosState {
    /// Fresh, not yet initialized view for `activation`
    #[must_use]
    pub const fn new(activation: u64) -> Self {
        Self {
            items: Vec::new(),
            search_term: String::new(),
            is_loading: true,
            activation,
            loaded_at: None,
            initialized: false,
        }
    }

    /// Number of tasks
    #[must_use]
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Number of completed tasks
    #[must_use]
    pub fn completed(&self) -> usize {
        self.items.iter().filter(|t| t.completed).count()
    }

    /// Number of tasks not yet completed
    #[must_use]
    pub fn pending(&self) -> usize {
        self.total() - self.completed()
    }

    /// Tasks matching the current search term
    #[must_use]
    pub fn visible(&self) -> Vec<Task> {
        filter_todos(&self.items, &self.search_term)
    }
}

impl Default for TodosState {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Todo list actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodosAction {
    /// The view was mounted: start the fetch
    Initialize,
    /// Fetch succeeded
    TodosLoaded {
        /// Activation that requested the fetch
        activation: u64,
        /// Fetched tasks
        todos: Vec<Task>,
    },
    /// Fetch failed
    LoadFailed {
        /// Activation that requested the fetch
        activation: u64,
        /// Error description
        error: String,
    },
    /// Invert the completion flag of the task with this task's id
    ToggleTodo(Task),
    /// Event reported by a child todo item
    Item(TodoItemEvent),
    /// The search input changed
    SearchChanged(String),
    /// Reset the search term
    ClearSearch,
}

/// Environment dependencies for the todo list
#[derive(Clone)]
pub struct TodosEnvironment {
    /// Data source for tasks
    pub client: Arc<dyn TodosClient>,
    /// Clock for `loaded_at`
    pub clock: Arc<dyn Clock>,
}

impl TodosEnvironment {
    /// Creates a new `TodosEnvironment`
    #[must_use]
    pub fn new(client: Arc<dyn TodosClient>, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }
}

impl std::fmt::Debug for TodosEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodosEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list
#[derive(Debug, Clone, Copy, Default)]
pub struct TodosReducer;

impl TodosReducer {
    /// Creates a new `TodosReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Replaces the collection with one where `task`'s flag is inverted
    fn toggle(state: &mut TodosState, task: &Task) {
        state.items = state
            .items
            .iter()
            .map(|t| if t.id == task.id { t.toggled() } else { t.clone() })
            .collect();
    }

    fn fetch(env: &TodosEnvironment, activation: u64) -> Effect<TodosAction> {
        let request = env.client.fetch_todos();
        Effect::Future(Box::pin(async move {
            match request.await {
                Ok(todos) => Some(TodosAction::TodosLoaded { activation, todos }),
                Err(error) => Some(TodosAction::LoadFailed {
                    activation,
                    error: error.to_string(),
                }),
            }
        }))
    }
}

impl Reducer for TodosReducer {
    type State = TodosState;
    type Action = TodosAction;
    type Environment = TodosEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TodosAction::Initialize => {
                if state.initialized {
                    tracing::debug!(activation = state.activation, "Todos already initialized");
                    return SmallVec::new();
                }
                state.initialized = true;
                state.is_loading = true;
                smallvec![Self::fetch(env, state.activation)]
            },
            TodosAction::TodosLoaded { activation, todos } => {
                if activation != state.activation {
                    tracing::debug!(activation, current = state.activation, "Discarding stale todos");
                    return SmallVec::new();
                }
                tracing::info!(activation, count = todos.len(), "Todos loaded");
                state.items = todos;
                state.is_loading = false;
                state.loaded_at = Some(env.clock.now());
                SmallVec::new()
            },
            TodosAction::LoadFailed { activation, error } => {
                if activation != state.activation {
                    tracing::debug!(activation, current = state.activation, "Discarding stale failure");
                    return SmallVec::new();
                }
                tracing::warn!(activation, %error, "Failed to load todos");
                state.is_loading = false;
                SmallVec::new()
            },
            TodosAction::ToggleTodo(task) | TodosAction::Item(TodoItemEvent::Toggled(task)) => {
                Self::toggle(state, &task);
                SmallVec::new()
            },
            TodosAction::SearchChanged(term) => {
                state.search_term = term;
                SmallVec::new()
            },
            TodosAction::ClearSearch => {
                state.search_term.clear();
                SmallVec::new()
            },
        }
    }
}

//! # TaskFlow
//!
//! A small task list app built from reducers and effects:
//!
//! - **Header** with branding and a mobile menu
//! - **Home** page with a feature list, a greeting and a counter
//! - **Todos** view that fetches tasks from a remote API, shows
//!   total/completed/pending counts, filters by a search term and toggles
//!   completion
//!
//! The features live in [`features`]; [`features::app::AppReducer`] composes
//! them and runs inside a `taskflow_runtime::Store`.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskflow::client::InMemoryTodosClient;
//! use taskflow::features::app::{AppAction, AppEnvironment, AppReducer, AppState, Route};
//! use taskflow::features::todos::TodosEnvironment;
//! use taskflow::types::Task;
//! use taskflow_core::environment::SystemClock;
//! use taskflow_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InMemoryTodosClient::with_tasks(vec![Task::new(1, "Buy milk", false)]);
//! let env = AppEnvironment::new(TodosEnvironment::new(Arc::new(client), Arc::new(SystemClock)));
//! let store = Store::new(AppState::default(), AppReducer::new(), env);
//!
//! let mut handle = store.send(AppAction::Navigate(Route::Todos)).await?;
//! handle.wait().await;
//!
//! let pending = store.state(|s| s.todos.as_ref().map(|t| t.pending())).await;
//! assert_eq!(pending, Some(1));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod features;
pub mod filter;
pub mod render;
pub mod types;

pub use client::{HttpTodosClient, InMemoryTodosClient, TodosClient, TodosClientError};
pub use config::Config;
pub use types::{Task, TaskId};

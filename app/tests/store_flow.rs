//! The app reducer running inside a `Store`.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;
use taskflow::features::app::{AppAction, AppEnvironment, AppReducer, AppState, Route};
use taskflow::features::todos::{TodosAction, TodosEnvironment};
use taskflow::{InMemoryTodosClient, Task};
use taskflow_runtime::{Store, StoreError};
use taskflow_testing::test_clock;

type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

fn store_with(client: InMemoryTodosClient) -> AppStore {
    let env = AppEnvironment::new(TodosEnvironment::new(Arc::new(client), Arc::new(test_clock())));
    Store::new(AppState::default(), AppReducer::new(), env)
}

fn sample() -> Vec<Task> {
    vec![Task::new(1, "A", false), Task::new(2, "B", true)]
}

#[tokio::test]
async fn test_todos_load_and_toggle() {
    let store = store_with(InMemoryTodosClient::with_tasks(sample()));

    let mut handle = store.send(AppAction::Navigate(Route::Todos)).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let counts = store
        .state(|s| s.todos.as_ref().map(|t| (t.is_loading, t.total(), t.completed(), t.pending())))
        .await;
    assert_eq!(counts, Some((false, 2, 1, 1)));

    store
        .send(AppAction::Todos(TodosAction::ToggleTodo(Task::new(1, "A", false))))
        .await
        .unwrap();

    let counts = store
        .state(|s| s.todos.as_ref().map(|t| (t.total(), t.completed(), t.pending())))
        .await;
    assert_eq!(counts, Some((2, 2, 0)));
}

#[tokio::test]
async fn test_fetch_failure_leaves_empty_list() {
    let store = store_with(InMemoryTodosClient::failing("connection refused"));

    let outcome = store
        .send_and_wait_for(
            AppAction::Navigate(Route::Todos),
            |a| matches!(a, AppAction::Todos(TodosAction::LoadFailed { .. })),
            Duration::from_secs(1),
        )
        .await
        .unwrap();
    assert!(matches!(outcome, AppAction::Todos(TodosAction::LoadFailed { activation: 1, .. })));

    // The broadcast precedes the reducer run; wait for the loading flag
    let mut loading = true;
    for _ in 0..100 {
        loading = store
            .state(|s| s.todos.as_ref().is_some_and(|t| t.is_loading))
            .await;
        if !loading {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(!loading);
    assert_eq!(store.state(|s| s.todos.as_ref().map(|t| t.total())).await, Some(0));
}

#[tokio::test]
async fn test_result_after_navigating_away_is_discarded() {
    let client = InMemoryTodosClient::with_tasks(sample()).with_latency(Duration::from_millis(100));
    let store = store_with(client);

    let mut first = store.send(AppAction::Navigate(Route::Todos)).await.unwrap();
    store.send(AppAction::Navigate(Route::Home)).await.unwrap();
    first.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let state = store.state(Clone::clone).await;
    assert_eq!(state.route, Route::Home);
    assert!(state.todos.is_none());
}

#[tokio::test]
async fn test_stale_result_does_not_touch_remounted_view() {
    let client = InMemoryTodosClient::with_tasks(sample()).with_latency(Duration::from_millis(50));
    let store = store_with(client);

    let mut first = store.send(AppAction::Navigate(Route::Todos)).await.unwrap();
    store.send(AppAction::Navigate(Route::Home)).await.unwrap();
    let mut second = store.send(AppAction::Navigate(Route::Todos)).await.unwrap();

    first.wait_with_timeout(Duration::from_secs(1)).await.unwrap();
    second.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let view = store.state(|s| s.todos.clone()).await.unwrap();
    assert_eq!(view.activation, 2);
    assert!(!view.is_loading);
    assert_eq!(view.items, sample());
}

#[tokio::test]
async fn test_shutdown_discards_in_flight_fetch() {
    let client = InMemoryTodosClient::with_tasks(sample()).with_latency(Duration::from_millis(50));
    let store = store_with(client);

    store.send(AppAction::Navigate(Route::Todos)).await.unwrap();
    store.shutdown(Duration::from_secs(1)).await.unwrap();

    let loading = store.state(|s| s.todos.as_ref().map(|t| t.is_loading)).await;
    assert_eq!(loading, Some(true));

    let rejected = store.send(AppAction::Navigate(Route::Home)).await;
    assert!(matches!(rejected, Err(StoreError::ShutdownInProgress)));
}

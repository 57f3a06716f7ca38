//! TaskFlow demo session.
//!
//! Drives the app store through a short scripted session and prints each
//! screen as text:
//!
//! 1. Home page, counter clicks, mobile menu
//! 2. Todos view: fetch, stats, toggle of the first task, optional search
//! 3. Back home, then graceful shutdown
//!
//! Configuration comes from the environment (see [`taskflow::Config`]):
//!
//! ```bash
//! TASKFLOW_SEARCH=quis RUST_LOG=taskflow=debug cargo run --bin taskflow
//! ```

use anyhow::Context;
use std::sync::Arc;
use taskflow::features::app::{AppAction, AppEnvironment, AppReducer, AppState, Route};
use taskflow::features::counter::CounterAction;
use taskflow::features::header::HeaderAction;
use taskflow::features::home::HomeAction;
use taskflow::features::todo_item::TodoItem;
use taskflow::features::todos::{TodosAction, TodosEnvironment};
use taskflow::{render, Config, HttpTodosClient};
use taskflow_core::environment::SystemClock;
use taskflow_runtime::{Store, StoreError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    tracing::info!(api_url = %config.api_url, "Starting TaskFlow");

    let client = HttpTodosClient::new(config.api_url.clone(), config.http_timeout())
        .context("failed to create todos client")?;
    let env = AppEnvironment::new(TodosEnvironment::new(Arc::new(client), Arc::new(SystemClock)));
    let store: AppStore = Store::new(AppState::default(), AppReducer::new(), env);

    show(&store).await;

    for action in [CounterAction::Increment, CounterAction::Increment, CounterAction::Decrement] {
        store.send(AppAction::Home(HomeAction::Counter(action))).await?;
    }
    store.send(AppAction::Header(HeaderAction::ToggleMobileMenu)).await?;
    show(&store).await;

    let mut handle = store.send(AppAction::Navigate(Route::Todos)).await?;
    match handle.wait_with_timeout(config.http_timeout()).await {
        Ok(()) => {},
        Err(StoreError::Timeout) => tracing::warn!("Todos did not load in time"),
        Err(error) => return Err(error.into()),
    }
    show(&store).await;

    let first = store
        .state(|s| s.todos.as_ref().and_then(|t| t.visible().into_iter().next()))
        .await;
    if let Some(task) = first {
        println!("Toggling \"{}\"\n", task.title);
        let event = TodoItem::new(&task).clicked();
        store.send(AppAction::Todos(TodosAction::Item(event))).await?;
        show(&store).await;
    }

    if let Some(term) = &config.search {
        store
            .send(AppAction::Todos(TodosAction::SearchChanged(term.clone())))
            .await?;
        show(&store).await;
        store.send(AppAction::Todos(TodosAction::ClearSearch)).await?;
    }

    store.send(AppAction::Navigate(Route::Home)).await?;
    show(&store).await;

    store
        .shutdown(config.shutdown_timeout())
        .await
        .context("store did not shut down cleanly")?;
    tracing::info!("TaskFlow stopped");

    Ok(())
}

async fn show(store: &AppStore) {
    let screen = store.state(render::app).await;
    println!("{screen}\n");
}

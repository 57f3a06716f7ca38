//! App shell: header, routed content area and footer.
//!
//! The shell composes the feature reducers with `scope_reducer` and owns
//! routing. The todos view exists only while [`Route::Todos`] is shown;
//! actions addressed to it at any other time are dropped.

use super::header::{HeaderAction, HeaderReducer, HeaderState};
use super::home::{HomeAction, HomeReducer, HomeState};
use super::todos::{TodosAction, TodosEnvironment, TodosReducer, TodosState};
use std::sync::Arc;
use taskflow_core::composition::{combine_reducers, scope_reducer, CombinedReducer, SharedReducer};
use taskflow_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Footer text
pub const FOOTER_TEXT: &str = "© 2026 TaskFlow. Built with Rust & Composable Rust";

/// Content shown below the header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    /// Home page
    #[default]
    Home,
    /// Todo list
    Todos,
}

impl Route {
    /// URL path of the route
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Todos => "/todos",
        }
    }

    /// Route for a URL path, if any
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Self::Home),
            "/todos" => Some(Self::Todos),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Root state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Header
    pub header: HeaderState,
    /// Route currently shown
    pub route: Route,
    /// Home view
    pub home: HomeState,
    /// Todos view, present only while it is shown
    pub todos: Option<TodosState>,
    /// Number of todos views mounted so far
    pub activations: u64,
}

/// Root actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Forwarded to the header
    Header(HeaderAction),
    /// Forwarded to the home view
    Home(HomeAction),
    /// Forwarded to the todos view, if mounted
    Todos(TodosAction),
    /// Show another route
    Navigate(Route),
}

/// Root environment
#[derive(Clone, Debug)]
pub struct AppEnvironment {
    /// Dependencies of the todos view
    pub todos: TodosEnvironment,
}

impl AppEnvironment {
    /// Creates a new `AppEnvironment`
    #[must_use]
    pub const fn new(todos: TodosEnvironment) -> Self {
        Self { todos }
    }
}

/// Root reducer
#[derive(Clone, Debug)]
pub struct AppReducer {
    children: CombinedReducer<AppState, AppAction, AppEnvironment>,
}

impl AppReducer {
    /// Creates the root reducer with all features scoped in
    #[must_use]
    pub fn new() -> Self {
        let header: SharedReducer<AppState, AppAction, AppEnvironment> = Arc::new(scope_reducer(
            HeaderReducer::new(),
            |app: &mut AppState| Some(&mut app.header),
            |_: &AppEnvironment| &(),
            |action| match action {
                AppAction::Header(action) => Some(action),
                _ => None,
            },
            AppAction::Header,
        ));
        let home: SharedReducer<AppState, AppAction, AppEnvironment> = Arc::new(scope_reducer(
            HomeReducer::new(),
            |app: &mut AppState| Some(&mut app.home),
            |_: &AppEnvironment| &(),
            |action| match action {
                AppAction::Home(action) => Some(action),
                _ => None,
            },
            AppAction::Home,
        ));
        let todos: SharedReducer<AppState, AppAction, AppEnvironment> = Arc::new(scope_reducer(
            TodosReducer::new(),
            |app: &mut AppState| app.todos.as_mut(),
            |env: &AppEnvironment| &env.todos,
            |action| match action {
                AppAction::Todos(action) => Some(action),
                _ => None,
            },
            AppAction::Todos,
        ));

        Self {
            children: combine_reducers(vec![header, home, todos]),
        }
    }

    fn navigate(
        &self,
        state: &mut AppState,
        route: Route,
        env: &AppEnvironment,
    ) -> SmallVec<[Effect<AppAction>; 4]> {
        let mut effects =
            self.children
                .reduce(state, AppAction::Header(HeaderAction::CloseMobileMenu), env);

        if route == state.route {
            return effects;
        }

        tracing::debug!(from = %state.route, to = %route, "Navigating");
        state.route = route;

        match route {
            Route::Home => {
                state.todos = None;
                state.home = HomeState::default();
            },
            Route::Todos => {
                state.activations += 1;
                state.todos = Some(TodosState::new(state.activations));
                effects.extend(self.children.reduce(
                    state,
                    AppAction::Todos(TodosAction::Initialize),
                    env,
                ));
            },
        }

        effects
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Navigate(route) => self.navigate(state, route, env),
            action => self.children.reduce(state, action, env),
        }
    }
}

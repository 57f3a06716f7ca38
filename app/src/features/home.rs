//! Home view: welcome message, feature list, and the embedded greeting and
//! counter widgets.

use super::counter::{CounterAction, CounterReducer, CounterState};
use super::greeting::GreetingState;
use taskflow_core::composition::{scope_reducer, ScopedReducer};
use taskflow_core::{effect::Effect, reducer::Reducer, SmallVec};

/// Welcome message shown on the home page and passed to the greeting
pub const HOME_MESSAGE: &str = "Welcome to TaskFlow - Your personal task management solution";

/// One entry of the home page feature list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Icon name
    pub icon: &'static str,
    /// Short title
    pub title: &'static str,
    /// One-sentence description
    pub description: &'static str,
}

/// Features advertised on the home page
pub const FEATURES: [Feature; 3] = [
    Feature {
        icon: "clipboard",
        title: "Organize Tasks",
        description: "Keep all your tasks organized in one place with our intuitive interface.",
    },
    Feature {
        icon: "check",
        title: "Track Progress",
        description: "Mark tasks as complete and watch your productivity soar.",
    },
    Feature {
        icon: "search",
        title: "Quick Search",
        description: "Find any task instantly with powerful search and filters.",
    },
];

/// Home state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeState {
    /// Welcome message
    pub message: String,
    /// Static feature list
    pub features: Vec<Feature>,
    /// Greeting widget, showing the welcome message
    pub greeting: GreetingState,
    /// Counter widget
    pub counter: CounterState,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            message: HOME_MESSAGE.to_string(),
            features: FEATURES.to_vec(),
            greeting: GreetingState::new(HOME_MESSAGE),
            counter: CounterState::default(),
        }
    }
}

/// Home actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeAction {
    /// Forwarded to the counter widget
    Counter(CounterAction),
}

/// Home reducer
#[derive(Clone)]
pub struct HomeReducer {
    counter: ScopedReducer<HomeState, HomeAction, (), CounterReducer>,
}

impl HomeReducer {
    /// Create a new home reducer
    #[must_use]
    pub fn new() -> Self {
        Self {
            counter: scope_reducer(
                CounterReducer::new(),
                |home: &mut HomeState| Some(&mut home.counter),
                |env: &()| env,
                |action| match action {
                    HomeAction::Counter(action) => Some(action),
                },
                HomeAction::Counter,
            ),
        }
    }
}

impl Default for HomeReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HomeReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeReducer").finish_non_exhaustive()
    }
}

impl Reducer for HomeReducer {
    type State = HomeState;
    type Action = HomeAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.counter.reduce(state, action, env)
    }
}

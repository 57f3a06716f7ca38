//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Embed a child feature (its own state, action and
//!   environment) inside a parent feature
//!
//! # Examples
//!
//! ```
//! use taskflow_core::composition::{combine_reducers, scope_reducer, SharedReducer};
//! use taskflow_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Default)]
//! struct Count(i64);
//!
//! #[derive(Clone)]
//! enum CountAction {
//!     Bump,
//! }
//!
//! #[derive(Clone)]
//! struct CountReducer;
//!
//! impl Reducer for CountReducer {
//!     type State = Count;
//!     type Action = CountAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Count, _action: CountAction, _env: &()) -> SmallVec<[Effect<CountAction>; 4]> {
//!     state.0 += 1;
//!     smallvec![Effect::None]
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Page {
//!     left: Count,
//!     right: Option<Count>,
//! }
//!
//! #[derive(Clone)]
//! enum PageAction {
//!     Left(CountAction),
//!     Right(CountAction),
//! }
//!
//! let left: SharedReducer<Page, PageAction, ()> = std::sync::Arc::new(scope_reducer(
//!     CountReducer,
//!     |page: &mut Page| Some(&mut page.left),
//!     |_: &()| &(),
//!     |action| match action {
//!         PageAction::Left(action) => Some(action),
//!         PageAction::Right(_) => None,
//!     },
//!     PageAction::Left,
//! ));
//! let right: SharedReducer<Page, PageAction, ()> = std::sync::Arc::new(scope_reducer(
//!     CountReducer,
//!     |page: &mut Page| page.right.as_mut(),
//!     |_: &()| &(),
//!     |action| match action {
//!         PageAction::Right(action) => Some(action),
//!         PageAction::Left(_) => None,
//!     },
//!     PageAction::Right,
//! ));
//! let page = combine_reducers(vec![left, right]);
//!
//! let mut state = Page::default();
//! let _ = page.reduce(&mut state, PageAction::Left(CountAction::Bump), &());
//! // `right` is absent, so its actions are dropped
//! let _ = page.reduce(&mut state, PageAction::Right(CountAction::Bump), &());
//! assert_eq!(state.left.0, 1);
//! assert!(state.right.is_none());
//! ```

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::sync::Arc;

/// A shareable, type-erased reducer
pub type SharedReducer<S, A, E> = Arc<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence, and all effects are collected and concatenated.
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<SharedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    A: Clone,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E> {
    reducers: Vec<SharedReducer<S, A, E>>,
}

impl<S, A, E> Clone for CombinedReducer<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            reducers: self.reducers.iter().map(Arc::clone).collect(),
        }
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    A: Clone,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

/// Scopes a child reducer into a parent feature.
///
/// - `state` focuses the parent state on the child state. Returning `None`
///   means the child is not mounted; its actions are then dropped.
/// - `env` focuses the parent environment on the child environment.
/// - `extract` picks the child's action out of a parent action.
/// - `embed` wraps child actions (fed back by effects) into parent actions.
#[must_use]
pub fn scope_reducer<S, A, E, R>(
    reducer: R,
    state: fn(&mut S) -> Option<&mut R::State>,
    env: fn(&E) -> &R::Environment,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
) -> ScopedReducer<S, A, E, R>
where
    R: Reducer,
{
    ScopedReducer {
        reducer,
        state,
        env,
        extract,
        embed,
    }
}

/// A reducer embedded in a parent feature.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, A, E, R>
where
    R: Reducer,
{
    reducer: R,
    state: fn(&mut S) -> Option<&mut R::State>,
    env: fn(&E) -> &R::Environment,
    extract: fn(A) -> Option<R::Action>,
    embed: fn(R::Action) -> A,
}

impl<S, A, E, R> Clone for ScopedReducer<S, A, E, R>
where
    R: Reducer + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            state: self.state,
            env: self.env,
            extract: self.extract,
            embed: self.embed,
        }
    }
}

impl<S, A, E, R> Reducer for ScopedReducer<S, A, E, R>
where
    R: Reducer,
    R::Action: Send + 'static,
    A: Send + 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let Some(child_action) = (self.extract)(action) else {
            return SmallVec::new();
        };
        let Some(child_state) = (self.state)(state) else {
            return SmallVec::new();
        };

        let embed = self.embed;
        self.reducer
            .reduce(child_state, child_action, (self.env)(env))
            .into_iter()
            .map(|effect| effect.map(embed))
            .collect()
    }
}

//! Header with branding and a mobile navigation menu.

use taskflow_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Branding shown in the header
pub const APP_TITLE: &str = "TaskFlow";

/// Header state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderState {
    /// Static branding title
    pub title: String,
    /// Whether the mobile menu is expanded
    pub mobile_menu_open: bool,
}

impl Default for HeaderState {
    fn default() -> Self {
        Self {
            title: APP_TITLE.to_string(),
            mobile_menu_open: false,
        }
    }
}

/// Header actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    /// Open the menu if closed, close it if open
    ToggleMobileMenu,
    /// Close the menu
    CloseMobileMenu,
}

/// Header reducer
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderReducer;

impl HeaderReducer {
    /// Create a new header reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for HeaderReducer {
    type State = HeaderState;
    type Action = HeaderAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            HeaderAction::ToggleMobileMenu => state.mobile_menu_open = !state.mobile_menu_open,
            HeaderAction::CloseMobileMenu => state.mobile_menu_open = false,
        }
        smallvec![Effect::None]
    }
}

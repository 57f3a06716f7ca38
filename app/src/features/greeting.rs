//! Greeting widget: displays a message supplied by its parent.

/// Message shown when the parent supplies none
pub const DEFAULT_GREETING: &str = "Hello hello!";

/// Greeting state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingState {
    /// Message to display
    pub message: String,
}

impl GreetingState {
    /// Greeting with a caller-supplied message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for GreetingState {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}

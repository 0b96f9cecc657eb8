//! Common types shared across the Pitboss crates.
//!
//! This crate holds the pieces every other member needs without dragging in
//! browser or configuration machinery:
//!
//! - [`PitbossError`] and [`Result`]: shared error handling
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! It is intentionally lightweight so that all crates can depend on it
//! without heavy transitive costs.

pub mod observability;

/// Error types used across the Pitboss workspace.
#[derive(thiserror::Error, Debug)]
pub enum PitbossError {
    /// The browser driver (WebDriver session, navigation, DOM access)
    /// reported an error.
    #[error("Driver error: {0}")]
    Driver(#[from] anyhow::Error),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A bounded element wait ran out of budget before the selector
    /// matched anything.
    #[error("no element matched {selector} within {budget_ms}ms")]
    WaitTimeout { selector: String, budget_ms: u64 },
}

/// Convenient alias for results that use [`PitbossError`].
pub type Result<T> = std::result::Result<T, PitbossError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_timeout_names_the_selector_and_budget() {
        let err = PitbossError::WaitTimeout {
            selector: "#game-area".to_string(),
            budget_ms: 5000,
        };
        let rendered = err.to_string();
        assert!(rendered.contains("#game-area"));
        assert!(rendered.contains("5000ms"));
    }
}

//! Kernel error types

use thiserror::Error;

/// Errors raised while checking report settings before a run starts
#[derive(Debug, Error)]
pub enum CoreError {
    /// A transaction category set was configured without any tags
    #[error("No {0} categories configured; at least one tag is required")]
    EmptyCategorySet(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}

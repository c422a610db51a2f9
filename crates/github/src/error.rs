//! Errors raised while reading the Actions environment or writing results.

use thiserror::Error;

/// Failures of the GitHub Actions adapter.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A runner-provided environment variable is not set.
    #[error("Environment variable {name} is not set; is this running inside GitHub Actions?")]
    MissingVariable {
        /// Variable name.
        name: &'static str,
    },

    /// A required action input was not supplied.
    #[error("Input required and not supplied: {name}")]
    MissingInput {
        /// Input name as declared by the action.
        name: &'static str,
    },

    /// An action input has an unusable value.
    #[error("Invalid value for input {name}: {reason}")]
    InvalidInput {
        /// Input name as declared by the action.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A workflow command or output could not be written.
    #[error("Failed to write workflow output: {0}")]
    Output(#[from] std::io::Error),
}

//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// These are integration errors, e.g. a perception of the wrong length handed
/// to a learning pass. The learning passes themselves never fail once their
/// inputs have been accepted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Acs2Error {
    /// A perception, condition or effect does not have the configured length.
    #[error("Length mismatch: expected {expected} attributes, found {found}")]
    LengthMismatch {
        /// Configured classifier length.
        expected: usize,

        /// Length of the offending value.
        found: usize,
    },

    /// An action outside `0..number_of_possible_actions`.
    #[error("Action {action} is out of range (number of actions: {actions})")]
    ActionOutOfRange {
        /// The offending action.
        action: usize,

        /// Number of possible actions.
        actions: usize,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

/// Result type of the library.
pub type Result<T> = std::result::Result<T, Acs2Error>;

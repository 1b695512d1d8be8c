//! Error types for the QuickCalc engines

use thiserror::Error;

/// Failures surfaced by the BMI and conversion engines
///
/// Both variants are recoverable: the caller shows [`EngineError::user_message`]
/// and leaves its state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown conversion rule: {0}")]
    UnknownRule(String),
}

impl EngineError {
    /// Short, human-readable text for the presentation layer
    pub fn user_message(&self) -> &'static str {
        match self {
            EngineError::InvalidInput(_) => "Please enter a valid number",
            EngineError::UnknownRule(_) => "Invalid input",
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidInput(_) => "INVALID_INPUT",
            EngineError::UnknownRule(_) => "UNKNOWN_RULE",
        }
    }
}

/// Convenience alias used across the engine crate
pub type EngineResult<T> = Result<T, EngineError>;

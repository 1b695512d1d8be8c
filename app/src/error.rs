//! Application error handling
//!
//! Errors raised by the session host itself. Engine failures are wrapped so
//! the binary can report them with the same code/message shape.

use quickcalc_engine::EngineError;
use serde::Serialize;
use thiserror::Error;

/// Session host error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Usage: {0}")]
    Usage(String),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl AppError {
    /// Body printed for a failed command
    pub fn to_response(&self) -> ErrorResponse {
        let (code, message) = match self {
            AppError::Engine(err) => (err.code(), err.user_message().to_string()),
            AppError::Usage(msg) => ("USAGE", msg.clone()),
            AppError::Validation(_) => ("VALIDATION_ERROR", self.to_string()),
            AppError::Config(_) | AppError::ConfigLoad(_) => ("CONFIG_ERROR", self.to_string()),
        };
        ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        }
    }
}

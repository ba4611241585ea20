use thiserror::Error;

use crate::implementations::config::ConfigError;
use crate::models::outcome::OutcomeError;

/// Custom error types for the session rules system.
///
/// Rule failures are never reported through this type; they are `Outcome`s.
/// These errors cover everything around the rules: reading inputs, loading
/// configuration and decoding outcomes from untrusted data.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Outcome error: {0}")]
    OutcomeError(#[from] OutcomeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse {format} document: {message}")]
    ParseError { format: String, message: String },

    #[error("Unknown rule: {0}")]
    UnknownRule(String),
}

/// Result type specific to session rules operations
pub type RulesResult<T> = Result<T, RulesError>;

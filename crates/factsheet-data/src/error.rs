//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status from the facts endpoint
    #[error("HTTP error: {0}")]
    Http(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Endpoint template has no `{cik}` placeholder
    #[error("Invalid endpoint template: {0}")]
    InvalidTemplate(String),

    /// Value cannot be turned into a 10-digit CIK
    #[error("Invalid CIK: {0}")]
    InvalidCik(String),
}

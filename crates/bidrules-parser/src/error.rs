//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// Malformed JSON or a shape serde could not decode
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config does not conform to the schema
    #[error("Schema validation failed: {}", .0.join("; "))]
    SchemaViolation(Vec<String>),

    /// The embedded schema itself failed to compile
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;

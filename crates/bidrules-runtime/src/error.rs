//! Runtime error types

use bidrules_core::FunctionError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A schema function could not compute an outcome
    #[error("Schema function '{function}' failed: {source}")]
    SchemaFunction {
        function: String,
        source: FunctionError,
    },

    /// A result function could not describe its mutations
    #[error("Result function '{function}' failed: {source}")]
    ResultFunction {
        function: String,
        source: FunctionError,
    },

    /// Internal node without a schema function
    #[error("Malformed tree: node at depth {0} has children but no schema function")]
    MalformedTree(usize),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

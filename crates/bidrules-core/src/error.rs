//! Error types for BidRules Core

use thiserror::Error;

/// Errors raised while constructing or calling a schema/result function
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid args for function '{function}': {message}")]
    InvalidArgs { function: String, message: String },

    #[error("Function '{function}' could not read request attribute '{attribute}'")]
    MissingAttribute { function: String, attribute: String },
}

impl FunctionError {
    pub fn invalid_args(function: &str, message: impl Into<String>) -> Self {
        FunctionError::InvalidArgs {
            function: function.to_string(),
            message: message.into(),
        }
    }

    pub fn missing_attribute(function: &str, attribute: &str) -> Self {
        FunctionError::MissingAttribute {
            function: function.to_string(),
            attribute: attribute.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FunctionError>;

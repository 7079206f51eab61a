//! Compiler error types

use bidrules_core::FunctionError;
use thiserror::Error;

/// Compiler error
#[derive(Error, Debug)]
pub enum CompileError {
    /// A function spec could not be instantiated
    #[error("Function error: {0}")]
    Function(#[from] FunctionError),

    /// Rule conditions do not line up with the model group schema
    #[error("Rule {rule} has {found} conditions but the schema defines {expected} functions")]
    ConditionCountMismatch {
        rule: usize,
        expected: usize,
        found: usize,
    },

    /// Two rules share the same condition path
    #[error("Rule {rule} repeats the condition path [{path}] of an earlier rule")]
    DuplicateRule { rule: usize, path: String },

    /// Model group without schema functions or rules
    #[error("Model group has no {0}")]
    EmptyModelGroup(&'static str),

    /// Error located in a specific model group
    #[error("Rule set '{rule_set}', model group {model_group}: {source}")]
    InModelGroup {
        rule_set: String,
        model_group: usize,
        source: Box<CompileError>,
    },
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;

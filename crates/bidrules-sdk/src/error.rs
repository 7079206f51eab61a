//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Module configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Account config failed validation or decoding
    #[error("Parser error: {0}")]
    Parse(#[from] bidrules_parser::ParseError),

    /// Account config failed to compile
    #[error("Compiler error: {0}")]
    Compile(#[from] bidrules_compiler::CompileError),

    /// Tree evaluation failed
    ///
    /// The module itself recovers evaluation errors as defaults plus a
    /// warning; this variant is for hosts driving `TreeExecutor` directly.
    #[error("Runtime error: {0}")]
    Runtime(#[from] bidrules_runtime::RuntimeError),

    /// Account config declares the rules engine disabled
    #[error("Rules engine disabled for account '{0}'")]
    RulesDisabled(String),

    /// Builder called outside a tokio runtime
    #[error("No tokio runtime available to spawn the tree builder")]
    NoRuntime,
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_disabled() {
        let error = SdkError::RulesDisabled("pub1".to_string());
        assert_eq!(error.to_string(), "Rules engine disabled for account 'pub1'");
    }

    #[test]
    fn test_no_runtime() {
        assert!(SdkError::NoRuntime.to_string().contains("tokio runtime"));
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse = bidrules_parser::ParseError::SchemaViolation(vec!["bad".to_string()]);
        let error: SdkError = parse.into();
        assert!(error.to_string().contains("Parser error"));
        assert!(error.to_string().contains("bad"));
    }

    #[test]
    fn test_compile_error_conversion() {
        let compile = bidrules_compiler::CompileError::EmptyModelGroup("rules");
        let error: SdkError = compile.into();
        assert!(matches!(error, SdkError::Compile(_)));
    }

    #[test]
    fn test_runtime_error_conversion() {
        let runtime = bidrules_runtime::RuntimeError::MalformedTree(2);
        let error: SdkError = runtime.into();
        assert!(matches!(error, SdkError::Runtime(_)));
        assert!(error.to_string().contains("depth 2"));
    }

    #[test]
    fn test_error_debug_format() {
        let error = SdkError::RulesDisabled("x".to_string());
        assert!(format!("{:?}", error).contains("RulesDisabled"));
    }
}

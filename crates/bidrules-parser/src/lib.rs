//! BidRules Parser - validates and decodes rules engine configuration
//!
//! Raw per-account JSON is checked against the embedded JSON schema before
//! it is decoded into the configuration AST from `bidrules-core`.

pub mod error;
pub mod validator;

pub use error::{ParseError, Result};
pub use validator::ConfigValidator;

//! BidRules Compiler - config to decision-tree compiler
//!
//! This crate turns the configuration AST into the decision-tree IR that the
//! runtime executes. Function specs are resolved through name-keyed registries
//! and instantiated once per compiled tree.

pub mod compiler;
pub mod error;
pub mod functions;
pub mod tree_builder;

// Re-export main types
pub use compiler::{CompiledStages, RulesCompiler};
pub use error::{CompileError, Result};
pub use functions::{ResultFunctionRegistry, SchemaFunctionRegistry};
pub use tree_builder::build_rules_tree;

//! Compiled decision-tree representation
//!
//! Produced by the compiler, executed by the runtime. Nothing here is
//! mutated after a tree is published to the cache.

pub mod compiled;
pub mod tree;

pub use compiled::{CompiledModelGroup, CompiledRuleSet};
pub use tree::{Node, Tree, WILDCARD};

//! BidRules SDK - the rules engine hook module
//!
//! Ties the crates together: a per-account [`TreeCache`], a background
//! [`TreeBuilderWorker`] fed through a non-blocking [`BuildQueue`], and the
//! [`RulesEngineModule`] entry point the host's hook framework calls per stage.

pub mod builder;
pub mod config;
pub mod error;
pub mod module;
pub mod queue;
pub mod worker;

// Re-export main types
pub use builder::RulesEngineModuleBuilder;
pub use config::ModuleConfig;
pub use error::{Result, SdkError};
pub use module::{HookResult, InvocationContext, RulesEngineModule};
pub use queue::{BuildInstruction, BuildQueue, BuildReceiver, EnqueueOutcome};
pub use worker::{BuildOutcome, TreeBuilderWorker};

// Re-export commonly used types from dependencies
pub use bidrules_compiler::{ResultFunctionRegistry, SchemaFunctionRegistry};
pub use bidrules_core::{AuctionRequest, ChangeSet, Mutation, Stage};
pub use bidrules_runtime::{CacheEntry, TreeCache};

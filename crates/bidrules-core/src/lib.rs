//! BidRules Core - Core types and definitions for the rules engine module
//!
//! This crate provides the fundamental types shared across the BidRules crates:
//! - Configuration AST decoded from publisher JSON
//! - The read-only auction request view consumed by schema functions
//! - The `ChangeSet` of mutation intents produced by result functions
//! - Compiled decision-tree IR
//! - Error types

pub mod changeset;
pub mod config;
pub mod error;
pub mod function;
pub mod ir;
pub mod request;
pub mod stage;

// Re-export commonly used types
pub use changeset::{AnalyticsTag, BidderMutation, ChangeSet, Mutation, DEFAULT_SEAT_NON_BID};
pub use config::{FunctionSpec, ModelGroup, Rule, RuleSet, RulesEngineConfig};
pub use error::FunctionError;
pub use function::{RequestPayload, ResultFunction, ResultMeta, SchemaFunction};
pub use ir::{CompiledModelGroup, CompiledRuleSet, Node, Tree, WILDCARD};
pub use request::AuctionRequest;
pub use stage::Stage;

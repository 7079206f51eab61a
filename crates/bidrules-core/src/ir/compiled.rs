//! Compiled rule sets and model groups

use super::tree::Tree;
use crate::function::{ResultFunction, ResultMeta};
use std::sync::Arc;

/// Rule fired marker used when defaults are applied
pub const DEFAULT_RULE_FIRED: &str = "default";

/// A model group ready for execution
#[derive(Debug)]
pub struct CompiledModelGroup {
    pub weight: u32,
    pub version: String,
    pub analytics_key: String,
    pub defaults: Vec<Arc<dyn ResultFunction>>,
    pub tree: Tree,
}

impl CompiledModelGroup {
    /// Result function context for the given rule path
    pub fn meta(&self, rule_fired: impl Into<String>) -> ResultMeta {
        ResultMeta {
            analytics_key: self.analytics_key.clone(),
            model_version: self.version.clone(),
            rule_fired: rule_fired.into(),
        }
    }

    pub fn default_meta(&self) -> ResultMeta {
        self.meta(DEFAULT_RULE_FIRED)
    }
}

/// A rule set with its model groups stored in execution order
#[derive(Debug)]
pub struct CompiledRuleSet {
    pub name: String,
    pub version: String,
    pub model_groups: Vec<CompiledModelGroup>,
}

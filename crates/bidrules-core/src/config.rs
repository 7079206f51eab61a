//! Rules engine configuration AST
//!
//! Decoded from the per-account JSON block after schema validation. Keys on
//! the wire are camelCase.

use crate::stage::Stage;
use serde::{Deserialize, Serialize};

/// Top-level rules engine configuration for one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesEngineConfig {
    pub enabled: bool,

    /// Carried for completeness; rule generation from bidder config is
    /// owned by the host and not performed here.
    #[serde(default, alias = "generateFromBidderConfig")]
    pub generate_rules_from_bidder_config: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub rule_sets: Vec<RuleSet>,
}

/// A named set of model groups bound to one pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    pub stage: Stage,

    pub name: String,

    #[serde(default)]
    pub version: String,

    pub model_groups: Vec<ModelGroup>,
}

/// One weighted, versioned bundle of schema, rules and defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelGroup {
    #[serde(default = "default_weight")]
    pub weight: u32,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub analytics_key: String,

    /// Ordered condition functions; one per tree level
    pub schema: Vec<FunctionSpec>,

    pub rules: Vec<Rule>,

    #[serde(default)]
    pub default: Vec<FunctionSpec>,
}

/// A named function plus its opaque arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    pub function: String,

    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub args: serde_json::Value,
}

/// A path through the tree and the actions taken at its end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub conditions: Vec<String>,

    pub results: Vec<FunctionSpec>,
}

fn default_weight() -> u32 {
    100
}

impl FunctionSpec {
    pub fn new(function: impl Into<String>, args: serde_json::Value) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }
}

impl Rule {
    pub fn new(conditions: Vec<String>, results: Vec<FunctionSpec>) -> Self {
        Self {
            conditions,
            results,
        }
    }
}

impl RulesEngineConfig {
    /// Rule sets bound to the given stage, in configuration order
    pub fn rule_sets_for(&self, stage: Stage) -> impl Iterator<Item = &RuleSet> {
        self.rule_sets.iter().filter(move |rs| rs.stage == stage)
    }
}

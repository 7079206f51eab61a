//! Main compiler
//!
//! Compiles a whole rules engine configuration into per-stage rule sets.

use crate::error::{CompileError, Result};
use crate::functions::{ResultFunctionRegistry, SchemaFunctionRegistry};
use crate::tree_builder::build_rules_tree;
use bidrules_core::{
    CompiledModelGroup, CompiledRuleSet, ModelGroup, RuleSet, RulesEngineConfig, Stage,
};
use std::collections::HashMap;

/// Compiled rule sets keyed by the stage they run at
pub type CompiledStages = HashMap<Stage, Vec<CompiledRuleSet>>;

/// The rules engine compiler
#[derive(Clone, Default)]
pub struct RulesCompiler {
    schema_registry: SchemaFunctionRegistry,
    result_registry: ResultFunctionRegistry,
}

impl RulesCompiler {
    /// Compiler using the built-in function registries
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiler using custom registries
    pub fn with_registries(
        schema_registry: SchemaFunctionRegistry,
        result_registry: ResultFunctionRegistry,
    ) -> Self {
        Self {
            schema_registry,
            result_registry,
        }
    }

    pub fn schema_registry(&self) -> &SchemaFunctionRegistry {
        &self.schema_registry
    }

    pub fn result_registry(&self) -> &ResultFunctionRegistry {
        &self.result_registry
    }

    /// Compile one model group: its tree plus its default result functions
    pub fn compile_model_group(&self, group: &ModelGroup) -> Result<CompiledModelGroup> {
        let tree = build_rules_tree(group, &self.schema_registry, &self.result_registry)?;
        let defaults = self.result_registry.create_all(&group.default)?;

        Ok(CompiledModelGroup {
            weight: group.weight,
            version: group.version.clone(),
            analytics_key: group.analytics_key.clone(),
            defaults,
            tree,
        })
    }

    /// Compile a rule set
    ///
    /// Model groups are ordered by weight, heaviest first; equal weights keep
    /// their configuration order.
    pub fn compile_rule_set(&self, rule_set: &RuleSet) -> Result<CompiledRuleSet> {
        let mut model_groups = rule_set
            .model_groups
            .iter()
            .enumerate()
            .map(|(index, group)| {
                self.compile_model_group(group)
                    .map_err(|e| CompileError::InModelGroup {
                        rule_set: rule_set.name.clone(),
                        model_group: index,
                        source: Box::new(e),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        model_groups.sort_by(|a, b| b.weight.cmp(&a.weight));

        tracing::debug!(
            rule_set = %rule_set.name,
            stage = %rule_set.stage,
            model_groups = model_groups.len(),
            "compiled rule set"
        );

        Ok(CompiledRuleSet {
            name: rule_set.name.clone(),
            version: rule_set.version.clone(),
            model_groups,
        })
    }

    /// Compile every rule set of a configuration, grouped by stage
    ///
    /// Within a stage, rule sets keep their configuration order.
    pub fn compile(&self, config: &RulesEngineConfig) -> Result<CompiledStages> {
        let mut stages: CompiledStages = HashMap::new();
        for rule_set in &config.rule_sets {
            let compiled = self.compile_rule_set(rule_set)?;
            stages.entry(rule_set.stage).or_default().push(compiled);
        }
        Ok(stages)
    }
}

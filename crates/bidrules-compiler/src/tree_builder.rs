//! Decision tree construction for a single model group

use crate::error::{CompileError, Result};
use crate::functions::{ResultFunctionRegistry, SchemaFunctionRegistry};
use bidrules_core::{ModelGroup, Node, SchemaFunction, Tree};
use std::collections::HashSet;
use std::sync::Arc;

/// Build the decision tree for one model group
///
/// Schema functions are instantiated once per depth and shared by every node
/// at that depth. Each rule walks its conditions from the root, creating
/// children as needed, and attaches its result functions at the node where
/// the walk ends. Every leaf therefore sits at depth `schema.len()`.
pub fn build_rules_tree(
    group: &ModelGroup,
    schema_registry: &SchemaFunctionRegistry,
    result_registry: &ResultFunctionRegistry,
) -> Result<Tree> {
    if group.schema.is_empty() {
        return Err(CompileError::EmptyModelGroup("schema functions"));
    }
    if group.rules.is_empty() {
        return Err(CompileError::EmptyModelGroup("rules"));
    }

    let schema_functions: Vec<Arc<dyn SchemaFunction>> = group
        .schema
        .iter()
        .map(|spec| schema_registry.create_from_spec(spec))
        .collect::<std::result::Result<_, _>>()?;

    let mut root = Node::new();
    let mut seen_paths: HashSet<&[String]> = HashSet::new();

    for (index, rule) in group.rules.iter().enumerate() {
        if rule.conditions.len() != schema_functions.len() {
            return Err(CompileError::ConditionCountMismatch {
                rule: index,
                expected: schema_functions.len(),
                found: rule.conditions.len(),
            });
        }
        if !seen_paths.insert(rule.conditions.as_slice()) {
            return Err(CompileError::DuplicateRule {
                rule: index,
                path: rule.conditions.join(", "),
            });
        }

        let results = result_registry.create_all(&rule.results)?;

        let mut node = &mut root;
        for (depth, condition) in rule.conditions.iter().enumerate() {
            if node.schema_function().is_none() {
                node.set_schema_function(Arc::clone(&schema_functions[depth]));
            }
            node = node.child_or_insert(condition);
        }
        node.set_result_functions(results);
    }

    Ok(Tree::new(root))
}

//! Decision tree executor

use crate::error::{Result, RuntimeError};
use bidrules_core::{ChangeSet, CompiledModelGroup, RequestPayload, ResultFunction, ResultMeta};
use std::sync::Arc;
use tracing::{debug, warn};

/// Walks compiled model group trees against a request
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeExecutor;

impl TreeExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Execute one model group
    ///
    /// Descends from the root following the edge for each schema function
    /// outcome (exact label first, then `*`). When an outcome has no edge the
    /// walk stops and the model group defaults apply. At a leaf the rule's
    /// result functions run in order. Each iteration either descends one
    /// level or returns, so the walk is bounded by the tree depth.
    pub fn execute(&self, group: &CompiledModelGroup, payload: &RequestPayload<'_>) -> Result<ChangeSet> {
        let mut node = group.tree.root();
        let mut path: Vec<&str> = Vec::new();

        while !node.is_leaf() {
            let function = node
                .schema_function()
                .ok_or(RuntimeError::MalformedTree(path.len()))?;

            let outcome = function
                .call(payload)
                .map_err(|source| RuntimeError::SchemaFunction {
                    function: function.name().to_string(),
                    source,
                })?;

            match node.child(&outcome) {
                Some((label, child)) => {
                    path.push(label);
                    node = child;
                }
                None => {
                    debug!(
                        analytics_key = %group.analytics_key,
                        function = function.name(),
                        outcome = %outcome,
                        depth = path.len(),
                        "no matching branch, applying defaults"
                    );
                    return self.apply_defaults(group);
                }
            }
        }

        let meta = group.meta(path.join("|"));
        run_results(node.result_functions(), &meta)
    }

    /// Run a model group's default result functions
    pub fn apply_defaults(&self, group: &CompiledModelGroup) -> Result<ChangeSet> {
        run_results(&group.defaults, &group.default_meta())
    }

    /// Execute, falling back to defaults when evaluation fails
    ///
    /// The evaluation error, if any, is handed back so the caller can record
    /// it. If the defaults fail too the change set is empty.
    pub fn execute_or_default(
        &self,
        group: &CompiledModelGroup,
        payload: &RequestPayload<'_>,
    ) -> (ChangeSet, Option<RuntimeError>) {
        match self.execute(group, payload) {
            Ok(change_set) => (change_set, None),
            Err(error) => {
                let change_set = self.apply_defaults(group).unwrap_or_else(|e| {
                    warn!(
                        analytics_key = %group.analytics_key,
                        error = %e,
                        "default result functions failed"
                    );
                    ChangeSet::new()
                });
                (change_set, Some(error))
            }
        }
    }
}

fn run_results(functions: &[Arc<dyn ResultFunction>], meta: &ResultMeta) -> Result<ChangeSet> {
    let mut change_set = ChangeSet::new();
    for function in functions {
        function
            .add_change_set(&mut change_set, meta)
            .map_err(|source| RuntimeError::ResultFunction {
                function: function.name().to_string(),
                source,
            })?;
    }
    Ok(change_set)
}

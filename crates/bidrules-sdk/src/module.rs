//! Rules engine hook module

use crate::config::ModuleConfig;
use crate::queue::{BuildInstruction, BuildQueue, EnqueueOutcome};
use bidrules_core::{AuctionRequest, ChangeSet, RequestPayload, Stage};
use bidrules_runtime::{rebuild_trees, CacheEntry, TreeCache, TreeExecutor};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Per-invocation data handed over by the host's hook framework
#[derive(Debug, Clone, Copy)]
pub struct InvocationContext<'a> {
    pub account_id: &'a str,
    /// Raw rules engine config from the account, if it has one
    pub account_config: Option<&'a [u8]>,
}

impl<'a> InvocationContext<'a> {
    pub fn new(account_id: &'a str, account_config: Option<&'a [u8]>) -> Self {
        Self {
            account_id,
            account_config,
        }
    }
}

/// Outcome of one hook invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookResult {
    pub change_set: ChangeSet,
    /// Evaluation errors recovered by falling back to defaults
    pub warnings: Vec<String>,
}

impl HookResult {
    /// Nothing to apply
    pub fn is_noop(&self) -> bool {
        self.change_set.is_empty() && self.warnings.is_empty()
    }
}

/// Entry point called at each stage of the auction pipeline
///
/// Reads are served from the cache only. Cache misses and stale entries
/// are handed to the tree builder through the build queue; the request
/// that triggered the build continues without rules (on a miss) or with
/// the previous entry (when stale).
pub struct RulesEngineModule {
    cache: Arc<TreeCache>,
    queue: BuildQueue,
    executor: TreeExecutor,
    refresh_ttl: Duration,
    data_center: Option<String>,
    worker: Option<JoinHandle<()>>,
}

impl RulesEngineModule {
    /// Module without a spawned worker; the caller drains the queue
    pub fn new(cache: Arc<TreeCache>, queue: BuildQueue, config: &ModuleConfig) -> Self {
        Self {
            cache,
            queue,
            executor: TreeExecutor::new(),
            refresh_ttl: config.refresh_ttl(),
            data_center: config.data_center.clone(),
            worker: None,
        }
    }

    pub(crate) fn with_worker(mut self, worker: JoinHandle<()>) -> Self {
        self.worker = Some(worker);
        self
    }

    pub fn cache(&self) -> &Arc<TreeCache> {
        &self.cache
    }

    pub fn queue(&self) -> &BuildQueue {
        &self.queue
    }

    /// Hook for the processed-auction-request stage
    pub fn handle_processed_auction_request(
        &self,
        ctx: &InvocationContext<'_>,
        request: &AuctionRequest,
    ) -> HookResult {
        self.handle_stage(Stage::ProcessedAuctionRequest, ctx, request)
    }

    /// Run every rule set configured for `stage`
    pub fn handle_stage(
        &self,
        stage: Stage,
        ctx: &InvocationContext<'_>,
        request: &AuctionRequest,
    ) -> HookResult {
        let Some(raw_config) = ctx.account_config else {
            return HookResult::default();
        };

        let Some(entry) = self.cache.get(ctx.account_id) else {
            self.request_build(ctx.account_id, raw_config);
            return HookResult::default();
        };

        if rebuild_trees(&entry, raw_config, self.refresh_ttl, Utc::now()) {
            self.request_build(ctx.account_id, raw_config);
        }

        self.execute_stage(stage, &entry, request)
    }

    fn execute_stage(&self, stage: Stage, entry: &CacheEntry, request: &AuctionRequest) -> HookResult {
        let payload = RequestPayload::new(request).with_data_center(self.data_center.as_deref());
        let mut result = HookResult::default();

        for rule_set in entry.rule_sets(stage) {
            for group in &rule_set.model_groups {
                let (change_set, error) = self.executor.execute_or_default(group, &payload);
                if let Some(e) = error {
                    warn!(
                        rule_set = %rule_set.name,
                        analytics_key = %group.analytics_key,
                        error = %e,
                        "model group evaluation failed, applied defaults"
                    );
                    result.warnings.push(format!("{}/{}: {}", rule_set.name, group.analytics_key, e));
                }
                result.change_set.merge(change_set);
            }
        }

        result
    }

    fn request_build(&self, account_id: &str, raw_config: &[u8]) {
        let outcome = self
            .queue
            .enqueue(BuildInstruction::new(account_id, raw_config));
        debug!(account_id, ?outcome, "requested tree build");
        if outcome == EnqueueOutcome::Closed {
            warn!(account_id, "tree builder is not running");
        }
    }

    /// Close the queue and wait for the worker to finish
    pub async fn shutdown(mut self) {
        let worker = self.worker.take();
        drop(self);
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                warn!(error = %e, "tree builder task failed");
            }
        }
    }
}

impl std::fmt::Debug for RulesEngineModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulesEngineModule")
            .field("cached_accounts", &self.cache.len())
            .field("refresh_ttl", &self.refresh_ttl)
            .field("data_center", &self.data_center)
            .field("worker", &self.worker.is_some())
            .finish()
    }
}

//! Background tree builder

use crate::error::{Result, SdkError};
use crate::queue::{BuildInstruction, BuildReceiver};
use bidrules_compiler::RulesCompiler;
use bidrules_parser::ConfigValidator;
use bidrules_runtime::{config_hash, rebuild_trees, CacheEntry, TreeCache};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Result of processing one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A new entry was published
    Built,
    /// The cached entry is still current
    Skipped,
}

/// Turns build instructions into published cache entries
///
/// Failures never touch the cache, so an account with a previously good
/// configuration keeps executing it.
pub struct TreeBuilderWorker {
    cache: Arc<TreeCache>,
    validator: ConfigValidator,
    compiler: RulesCompiler,
    refresh_ttl: Duration,
}

impl TreeBuilderWorker {
    pub fn new(cache: Arc<TreeCache>, compiler: RulesCompiler, refresh_ttl: Duration) -> Result<Self> {
        Ok(Self {
            cache,
            validator: ConfigValidator::new()?,
            compiler,
            refresh_ttl,
        })
    }

    /// Parse, compile and publish one account's configuration
    ///
    /// A config switched to `"enabled": false` is rejected like any other
    /// failed build, so a previously published entry keeps serving. Disabling
    /// only takes effect once that entry is removed with [`TreeCache::delete`].
    pub fn process(&self, instruction: &BuildInstruction) -> Result<BuildOutcome> {
        let account_id = instruction.account_id.as_str();

        // Another instruction may have refreshed the entry since this one was queued
        if let Some(entry) = self.cache.get(account_id) {
            if !rebuild_trees(&entry, &instruction.raw_config, self.refresh_ttl, Utc::now()) {
                debug!(account_id, "cached trees are current, skipping build");
                return Ok(BuildOutcome::Skipped);
            }
        }

        let config = self.validator.parse(&instruction.raw_config)?;
        if !config.enabled {
            return Err(SdkError::RulesDisabled(account_id.to_string()));
        }

        let stages = self.compiler.compile(&config)?;
        let rule_sets: usize = stages.values().map(Vec::len).sum();

        self.cache.set(
            account_id,
            CacheEntry::new(config_hash(&instruction.raw_config), stages),
        );

        info!(account_id, rule_sets, "published rules trees");
        Ok(BuildOutcome::Built)
    }

    /// Process instructions until every queue handle is dropped
    pub async fn run(self, mut receiver: BuildReceiver) {
        info!("tree builder started");

        while let Some(instruction) = receiver.recv().await {
            if let Err(e) = self.process(&instruction) {
                warn!(
                    account_id = %instruction.account_id,
                    error = %e,
                    "failed to build rules trees"
                );
            }
        }

        info!("tree builder stopped");
    }
}

impl std::fmt::Debug for TreeBuilderWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBuilderWorker")
            .field("cached_accounts", &self.cache.len())
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

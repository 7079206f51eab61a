//! Per-account cache of compiled configurations
//!
//! Entries are published whole and never mutated afterwards. The TTL does
//! not evict anything; it only decides when a rebuild is worth considering:
//! an entry is stale once it is older than the TTL *and* the account's
//! config bytes no longer hash to the value it was built from.

use bidrules_core::{CompiledRuleSet, Stage};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

/// Age after which an entry is checked against the incoming config
pub const DEFAULT_REFRESH_TTL: std::time::Duration = std::time::Duration::from_secs(5 * 60);

/// Compiled configuration for one account
#[derive(Debug)]
pub struct CacheEntry {
    built_at: DateTime<Utc>,
    config_hash: String,
    rule_sets_by_stage: HashMap<Stage, Vec<CompiledRuleSet>>,
}

impl CacheEntry {
    /// Entry built now from config bytes hashing to `config_hash`
    pub fn new(config_hash: String, rule_sets_by_stage: HashMap<Stage, Vec<CompiledRuleSet>>) -> Self {
        Self::built_at(Utc::now(), config_hash, rule_sets_by_stage)
    }

    /// Entry with an explicit build time
    pub fn built_at(
        built_at: DateTime<Utc>,
        config_hash: String,
        rule_sets_by_stage: HashMap<Stage, Vec<CompiledRuleSet>>,
    ) -> Self {
        Self {
            built_at,
            config_hash,
            rule_sets_by_stage,
        }
    }

    pub fn build_time(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn config_hash(&self) -> &str {
        &self.config_hash
    }

    /// Rule sets for `stage`, empty when the config has none
    pub fn rule_sets(&self, stage: Stage) -> &[CompiledRuleSet] {
        self.rule_sets_by_stage
            .get(&stage)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
        self.rule_sets_by_stage.keys().copied()
    }

    /// True once the entry is strictly older than `ttl` at `now`
    pub fn is_expired(&self, ttl: std::time::Duration, now: DateTime<Utc>) -> bool {
        let ttl = Duration::from_std(ttl).unwrap_or(Duration::MAX);
        now.signed_duration_since(self.built_at) > ttl
    }
}

/// Lowercase hex SHA-256 of raw config bytes
///
/// Byte-level: semantically equal JSON with reordered keys or different
/// whitespace hashes differently and triggers a rebuild.
pub fn config_hash(raw_config: &[u8]) -> String {
    hex::encode(Sha256::digest(raw_config))
}

/// Whether `entry` should be rebuilt from `raw_config`
///
/// The hash is only computed once the entry has expired.
pub fn rebuild_trees(
    entry: &CacheEntry,
    raw_config: &[u8],
    ttl: std::time::Duration,
    now: DateTime<Utc>,
) -> bool {
    entry.is_expired(ttl, now) && config_hash(raw_config) != entry.config_hash
}

/// Concurrent map of account ID to published entry
///
/// Reads clone an `Arc` under a shard read lock; a `set` swaps the whole
/// entry, so readers see either the old or the new one.
#[derive(Debug, Default)]
pub struct TreeCache {
    entries: DashMap<String, Arc<CacheEntry>>,
}

impl TreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, account_id: &str) -> Option<Arc<CacheEntry>> {
        self.entries
            .get(account_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Publish `entry`, replacing any previous one
    pub fn set(&self, account_id: impl Into<String>, entry: CacheEntry) {
        self.entries.insert(account_id.into(), Arc::new(entry));
    }

    pub fn delete(&self, account_id: &str) -> Option<Arc<CacheEntry>> {
        self.entries.remove(account_id).map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

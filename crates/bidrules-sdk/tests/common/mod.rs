//! Shared fixtures for SDK tests

#![allow(dead_code)]

use bidrules_compiler::RulesCompiler;
use bidrules_parser::ConfigValidator;
use bidrules_runtime::{config_hash, CacheEntry};
use chrono::{DateTime, Utc};
use serde_json::json;

/// Account config excluding `bidder` for US traffic on `channel`
pub fn exclude_config(channel: &str, bidder: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "enabled": true,
        "ruleSets": [{
            "stage": "processed-auction-request",
            "name": "exclusions",
            "version": "1",
            "modelGroups": [{
                "weight": 100,
                "version": "1",
                "analyticsKey": "exclusions",
                "schema": [
                    {"function": "deviceCountryIn", "args": {"countries": ["USA"]}},
                    {"function": "channel"}
                ],
                "default": [{"function": "logATag", "args": {"analyticsValue": "no-match"}}],
                "rules": [{
                    "conditions": ["true", channel],
                    "results": [{"function": "excludeBidders", "args": {"bidders": [bidder]}}]
                }]
            }]
        }]
    }))
    .unwrap()
}

/// Entry compiled from `raw`, stamped with `built_at`
pub fn entry_built_at(raw: &[u8], built_at: DateTime<Utc>) -> CacheEntry {
    let config = ConfigValidator::new().unwrap().parse(raw).unwrap();
    let stages = RulesCompiler::new().compile(&config).unwrap();
    CacheEntry::built_at(built_at, config_hash(raw), stages)
}

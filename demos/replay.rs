//! Replay a handful of auction requests through the rules engine module
//!
//! Usage: `replay [account-config.json]`. Without an argument a built-in
//! sample configuration is used.

use anyhow::Context;
use bidrules_core::AuctionRequest;
use bidrules_sdk::{InvocationContext, ModuleConfig, RulesEngineModuleBuilder};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const ACCOUNT_ID: &str = "demo-publisher";

const SAMPLE_CONFIG: &str = r#"{
  "enabled": true,
  "ruleSets": [{
    "stage": "processed-auction-request",
    "name": "channel-exclusions",
    "version": "1",
    "modelGroups": [{
      "weight": 100,
      "version": "1",
      "analyticsKey": "channel-exclusions",
      "schema": [
        {"function": "deviceCountryIn", "args": {"countries": ["USA"]}},
        {"function": "eidAvailable"},
        {"function": "channel"}
      ],
      "default": [{"function": "logATag", "args": {"analyticsValue": "no-rule"}}],
      "rules": [
        {"conditions": ["true", "true", "amp"], "results": [{"function": "excludeBidders", "args": {"bidders": ["bidderA"]}}]},
        {"conditions": ["true", "true", "web"], "results": [{"function": "excludeBidders", "args": {"bidders": ["bidderB"]}}]},
        {"conditions": ["true", "false", "*"], "results": [{"function": "includeBidders", "args": {"bidders": ["bidderC"], "analyticsValue": "no-eids"}}]}
      ]
    }]
  }]
}"#;

fn sample_requests() -> Vec<AuctionRequest> {
    vec![
        AuctionRequest::new("amp-with-eid")
            .with_country("USA")
            .with_eid("liveramp.com")
            .with_channel("amp"),
        AuctionRequest::new("pbjs-with-eid")
            .with_country("USA")
            .with_eid("id5-sync.com")
            .with_channel("pbjs"),
        AuctionRequest::new("app-without-eid")
            .with_country("USA")
            .with_channel("app"),
        AuctionRequest::new("outside-usa")
            .with_country("FRA")
            .with_channel("web"),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let raw_config = match std::env::args().nth(1) {
        Some(path) => std::fs::read(&path).with_context(|| format!("reading {}", path))?,
        None => SAMPLE_CONFIG.as_bytes().to_vec(),
    };

    let config = ModuleConfig::load()?;
    let module = RulesEngineModuleBuilder::new().with_config(config).build()?;
    let ctx = InvocationContext::new(ACCOUNT_ID, Some(&raw_config));
    let requests = sample_requests();

    // The first request only schedules the build
    module.handle_processed_auction_request(&ctx, &requests[0]);
    for _ in 0..50 {
        if module.cache().get(ACCOUNT_ID).is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    if module.cache().get(ACCOUNT_ID).is_none() {
        anyhow::bail!("rules trees for '{}' were not built; check the log for errors", ACCOUNT_ID);
    }

    for request in &requests {
        let result = module.handle_processed_auction_request(&ctx, request);
        println!(
            "{}: {}",
            request.id,
            serde_json::to_string(&result.change_set)?
        );
        for warning in &result.warnings {
            println!("  warning: {}", warning);
        }
    }

    module.shutdown().await;
    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "bidrules_sdk=info,bidrules_runtime=info,bidrules_compiler=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

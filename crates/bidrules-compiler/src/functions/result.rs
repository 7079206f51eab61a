//! Built-in result (action) functions

use super::{decode_args, names};
use bidrules_core::{
    AnalyticsTag, BidderMutation, ChangeSet, FunctionError, Mutation, ResultFunction, ResultMeta,
    DEFAULT_SEAT_NON_BID,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidderAction {
    Exclude,
    Include,
}

/// Removes or restricts the bidders taking part in the auction
#[derive(Debug)]
pub struct BidderFilter {
    action: BidderAction,
    bidders: Vec<String>,
    seat_non_bid: i32,
    analytics_value: Option<String>,
}

impl ResultFunction for BidderFilter {
    fn name(&self) -> &str {
        match self.action {
            BidderAction::Exclude => names::EXCLUDE_BIDDERS,
            BidderAction::Include => names::INCLUDE_BIDDERS,
        }
    }

    fn add_change_set(&self, change_set: &mut ChangeSet, meta: &ResultMeta) -> Result<(), FunctionError> {
        let mutation = BidderMutation {
            bidders: self.bidders.clone(),
            seat_non_bid: self.seat_non_bid,
        };
        change_set.push(match self.action {
            BidderAction::Exclude => Mutation::ExcludeBidders(mutation),
            BidderAction::Include => Mutation::IncludeBidders(mutation),
        });

        if let Some(value) = &self.analytics_value {
            change_set.push(Mutation::AnalyticsTag(analytics_tag(self.name(), value, meta)));
        }
        Ok(())
    }
}

/// Attaches an analytics tag without touching bidders
#[derive(Debug)]
pub struct LogATag {
    analytics_value: String,
}

impl ResultFunction for LogATag {
    fn name(&self) -> &str {
        names::LOG_A_TAG
    }

    fn add_change_set(&self, change_set: &mut ChangeSet, meta: &ResultMeta) -> Result<(), FunctionError> {
        change_set.push(Mutation::AnalyticsTag(analytics_tag(
            names::LOG_A_TAG,
            &self.analytics_value,
            meta,
        )));
        Ok(())
    }
}

fn analytics_tag(function: &str, value: &str, meta: &ResultMeta) -> AnalyticsTag {
    AnalyticsTag {
        analytics_key: meta.analytics_key.clone(),
        analytics_value: value.to_string(),
        model_version: meta.model_version.clone(),
        rule_fired: meta.rule_fired.clone(),
        function: function.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BidderArgs {
    bidders: Vec<String>,
    #[serde(default)]
    seat_non_bid: Option<i32>,
    #[serde(default)]
    analytics_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagArgs {
    analytics_value: String,
}

fn bidder_filter(
    name: &'static str,
    action: BidderAction,
    args: &serde_json::Value,
) -> Result<Arc<dyn ResultFunction>, FunctionError> {
    let args: BidderArgs = decode_args(name, args)?;
    if args.bidders.is_empty() {
        return Err(FunctionError::invalid_args(name, "'bidders' must be a non-empty list"));
    }
    Ok(Arc::new(BidderFilter {
        action,
        bidders: args.bidders,
        seat_non_bid: args.seat_non_bid.unwrap_or(DEFAULT_SEAT_NON_BID),
        analytics_value: args.analytics_value.filter(|v| !v.is_empty()),
    }))
}

pub fn exclude_bidders(args: &serde_json::Value) -> Result<Arc<dyn ResultFunction>, FunctionError> {
    bidder_filter(names::EXCLUDE_BIDDERS, BidderAction::Exclude, args)
}

pub fn include_bidders(args: &serde_json::Value) -> Result<Arc<dyn ResultFunction>, FunctionError> {
    bidder_filter(names::INCLUDE_BIDDERS, BidderAction::Include, args)
}

pub fn log_a_tag(args: &serde_json::Value) -> Result<Arc<dyn ResultFunction>, FunctionError> {
    let args: TagArgs = decode_args(names::LOG_A_TAG, args)?;
    if args.analytics_value.is_empty() {
        return Err(FunctionError::invalid_args(
            names::LOG_A_TAG,
            "'analyticsValue' must not be empty",
        ));
    }
    Ok(Arc::new(LogATag {
        analytics_value: args.analytics_value,
    }))
}

//! Declarative mutation intents
//!
//! Result functions only describe what should happen to the auction; the
//! host's hook framework owns applying a `ChangeSet` to the bidder requests
//! and recording seat non-bid reasons.

use serde::{Deserialize, Serialize};

/// Seat non-bid code reported for bidders removed by a rule (request blocked by optimization)
pub const DEFAULT_SEAT_NON_BID: i32 = 203;

/// Bidders targeted by an include/exclude mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidderMutation {
    pub bidders: Vec<String>,
    pub seat_non_bid: i32,
}

/// Analytics activity attached to the auction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsTag {
    pub analytics_key: String,
    pub analytics_value: String,
    pub model_version: String,
    pub rule_fired: String,
    pub function: String,
}

/// A single mutation intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mutation {
    ExcludeBidders(BidderMutation),
    IncludeBidders(BidderMutation),
    AnalyticsTag(AnalyticsTag),
}

/// Ordered collection of not-yet-applied mutations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    mutations: Vec<Mutation>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
    }

    /// Append every mutation of `other`, keeping its order
    pub fn merge(&mut self, other: ChangeSet) {
        self.mutations.extend(other.mutations);
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Mutation> {
        self.mutations.iter()
    }

    pub fn excluded_bidders(&self) -> Vec<&str> {
        self.mutations
            .iter()
            .filter_map(|m| match m {
                Mutation::ExcludeBidders(b) => Some(b),
                _ => None,
            })
            .flat_map(|b| b.bidders.iter().map(String::as_str))
            .collect()
    }

    pub fn included_bidders(&self) -> Vec<&str> {
        self.mutations
            .iter()
            .filter_map(|m| match m {
                Mutation::IncludeBidders(b) => Some(b),
                _ => None,
            })
            .flat_map(|b| b.bidders.iter().map(String::as_str))
            .collect()
    }

    pub fn analytics_tags(&self) -> Vec<&AnalyticsTag> {
        self.mutations
            .iter()
            .filter_map(|m| match m {
                Mutation::AnalyticsTag(tag) => Some(tag),
                _ => None,
            })
            .collect()
    }

    pub fn into_mutations(self) -> Vec<Mutation> {
        self.mutations
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Mutation;
    type IntoIter = std::slice::Iter<'a, Mutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.mutations.iter()
    }
}

//! Auction pipeline stage identifiers
//!
//! The same kebab-case names are used in `RuleSet.stage` and by the host
//! when it invokes the module for a given hook point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point in the auction pipeline at which rule sets are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Entrypoint,
    RawAuctionRequest,
    ProcessedAuctionRequest,
    BidderRequest,
    RawBidderResponse,
    AllProcessedBidResponses,
    AuctionResponse,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Entrypoint,
        Stage::RawAuctionRequest,
        Stage::ProcessedAuctionRequest,
        Stage::BidderRequest,
        Stage::RawBidderResponse,
        Stage::AllProcessedBidResponses,
        Stage::AuctionResponse,
    ];

    /// Wire name of the stage
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Entrypoint => "entrypoint",
            Stage::RawAuctionRequest => "raw-auction-request",
            Stage::ProcessedAuctionRequest => "processed-auction-request",
            Stage::BidderRequest => "bidder-request",
            Stage::RawBidderResponse => "raw-bidder-response",
            Stage::AllProcessedBidResponses => "all-processed-bid-responses",
            Stage::AuctionResponse => "auction-response",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| format!("unknown stage: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_wire_names_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), stage);

            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage.as_str()));
        }
    }

    #[test]
    fn test_unknown_stage() {
        assert!("post-auction".parse::<Stage>().is_err());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(
            Stage::ProcessedAuctionRequest.to_string(),
            "processed-auction-request"
        );
    }
}

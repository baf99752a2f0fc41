use serde::{Deserialize, Serialize};

use tradeledger_core::{AuctionId, ItemId, Record, TraderId};

/// Auction lifecycle status. Moves INIT → OPEN → CLOSED, never backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuctionStatus {
    Init,
    Open,
    Closed,
}

impl AuctionStatus {
    pub const fn name(self) -> &'static str {
        match self {
            AuctionStatus::Init => "INIT",
            AuctionStatus::Open => "OPEN",
            AuctionStatus::Closed => "CLOSED",
        }
    }
}

impl core::fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A request to auction an item, filed by its owner with an auction house.
///
/// `open_date`/`close_date` hold placeholders until the INIT → OPEN
/// transition assigns them from the invocation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionRequest {
    pub auction_id: AuctionId,
    pub item_id: ItemId,
    pub auction_house_id: TraderId,
    pub request_date: String,
    /// Minimum acceptable bid (numeric string).
    pub reserve_price: String,
    pub status: AuctionStatus,
    pub open_date: String,
    pub close_date: String,
}

impl Record for AuctionRequest {
    const KIND: &'static str = "AUCREQ";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_form_is_uppercase() {
        assert_eq!(serde_json::to_string(&AuctionStatus::Init).unwrap(), "\"INIT\"");
        let back: AuctionStatus = serde_json::from_str("\"CLOSED\"").unwrap();
        assert_eq!(back, AuctionStatus::Closed);
    }
}

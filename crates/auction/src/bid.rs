use serde::{Deserialize, Serialize};

use tradeledger_core::{AuctionId, ItemId, Record, TraderId};

/// A bid on an open auction, keyed by `(auction id, bid no)`.
///
/// Bid-number uniqueness is the caller's responsibility; the store rejects
/// a duplicate key. `bid_time` is the host timestamp of the submitting
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub auction_id: AuctionId,
    pub bid_no: String,
    pub item_id: ItemId,
    pub buyer_id: TraderId,
    /// Numeric string, validated positive on acceptance.
    pub bid_price: String,
    pub bid_time: String,
}

impl Record for Bid {
    const KIND: &'static str = "BID";
}

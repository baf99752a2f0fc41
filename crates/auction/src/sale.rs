use serde::{Deserialize, Serialize};

use tradeledger_core::{AuctionId, ItemId, Record, TraderId};

/// How an auction settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleKind {
    /// Won by the highest bid at close.
    Sale,
    /// Force-closed by a buy-it-now offer.
    BuyNow,
}

/// Settlement row written when an auction closes with a winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub auction_id: AuctionId,
    pub item_id: ItemId,
    pub kind: SaleKind,
    pub buyer_id: TraderId,
    pub trans_date: String,
    /// When the winning offer was received.
    pub hammer_time: String,
    /// Settlement price (numeric string).
    pub hammer_price: String,
    pub details: String,
}

impl Record for Sale {
    const KIND: &'static str = "POSTTRAN";
}

use serde::{Deserialize, Serialize};

use tradeledger_core::{ItemId, Record};

/// An inventoried item that can be put up for auction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_id: ItemId,
    pub item_desc: String,
    pub item_detail: String,
    pub item_type: String,
    /// Subject/category; partitions the category table.
    pub item_subject: String,
}

impl Record for Item {
    const KIND: &'static str = "ARTINV";
}

use serde::{Deserialize, Serialize};

use tradeledger_core::{Record, TraderId};

/// A registered participant: buyer/seller, auction house, shipper, bank…
///
/// The `user_type` code (e.g. `"AH"`, `"TRD"`) partitions the category
/// table; no closed set is enforced at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trader {
    pub user_id: TraderId,
    pub name: String,
    pub user_type: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub bank: String,
    pub account_no: String,
    pub routing_no: String,
}

impl Record for Trader {
    const KIND: &'static str = "USER";
}

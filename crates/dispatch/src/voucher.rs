use serde::{Deserialize, Serialize};

use tradeledger_core::{OrderId, Record, VoucherId};

use crate::order::OrderDetails;
use crate::stage::Stage;

/// Freight voucher raised against a delivered dispatch order.
///
/// Voucher identity is derived 1:1 from the owning order; the shipment
/// detail block is denormalized from the order at creation time. `amount`
/// is computed once by the tariff engine and only changes through an
/// explicit voucher update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    #[serde(rename = "voucherOrderId")]
    pub voucher_id: VoucherId,
    pub dispatch_order_id: OrderId,
    /// Owning order's lifecycle stage, duplicated locally.
    pub stage: Stage,
    #[serde(flatten)]
    pub details: OrderDetails,
    pub time_stamp: String,
    /// Numeric-string amount.
    pub amount: String,
}

impl Record for Voucher {
    const KIND: &'static str = "VOUCHER";
}

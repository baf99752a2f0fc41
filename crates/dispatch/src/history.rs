//! Append-only audit trail for dispatch orders.

use serde::{Deserialize, Serialize};

use tradeledger_core::{LedgerResult, OrderId, Record, TxContext};
use tradeledger_store::{TableStore, WorldState};

use crate::stage::Stage;
use crate::tables;

/// One audited transition of a dispatch order or its voucher.
///
/// Rows are keyed by `(order id, timestamp)` and are never updated or
/// deleted. The timestamp is informational (host-supplied wall clock at
/// the invocation boundary), not a business ordering key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHistoryRecord {
    pub order_id: String,
    pub stage: Stage,
    pub timestamp: String,
    pub user: String,
    pub transaction_description: String,
}

impl Record for TransactionHistoryRecord {
    const KIND: &'static str = "TXHIST";
}

/// Append one history row for a successful mutation.
///
/// Caller identity is mandatory: if the host supplied none, the whole
/// invocation fails rather than recording an anonymous transition.
pub fn record_transition<S: WorldState>(
    store: &mut TableStore<S>,
    ctx: &TxContext,
    order_id: &OrderId,
    stage: Stage,
    description: &str,
) -> LedgerResult<()> {
    let record = TransactionHistoryRecord {
        order_id: order_id.to_string(),
        stage,
        timestamp: ctx.business_time(),
        user: ctx.caller()?.to_string(),
        transaction_description: description.to_string(),
    };
    store.insert(
        tables::ORDER_HISTORY,
        &[&record.order_id, &record.timestamp],
        record.to_bytes()?,
    )
}

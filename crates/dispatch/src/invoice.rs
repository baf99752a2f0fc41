use serde::{Deserialize, Serialize};

use tradeledger_core::{InvoiceId, Record, fields};

use crate::stage::Stage;

/// Invoice aggregating one or more vouchers.
///
/// `amount` is the sum of the constituent voucher amounts at creation
/// time and is not recomputed later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_id: InvoiceId,
    /// Comma-joined voucher ids.
    pub voucher_list: String,
    pub stage: Stage,
    /// Numeric-string aggregate amount.
    pub amount: String,
}

impl Invoice {
    pub fn voucher_ids(&self) -> Vec<&str> {
        fields::split_id_list(&self.voucher_list)
    }
}

impl Record for Invoice {
    const KIND: &'static str = "INVOICE";
}

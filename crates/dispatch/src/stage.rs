use serde::{Deserialize, Serialize};

use tradeledger_core::LedgerError;

/// Dispatch-order lifecycle stage.
///
/// Persisted as the numeric wire code (a string field in the payload).
/// The forward chain is ordered by [`rank`](Stage::rank), which is *not*
/// the code order: invoice generation (11) precedes invoice validation
/// (10) in the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Stage {
    Created,
    ReadyForDispatch,
    ArrivalOfTransporter,
    ReadyForShipment,
    InTransit,
    Delivered,
    Amended,
    Dropped,
    VoucherCreated,
    VoucherValidated,
    InvoiceValidated,
    InvoiceGenerated,
}

impl Stage {
    /// Numeric wire code.
    pub const fn code(self) -> u8 {
        match self {
            Stage::Created => 0,
            Stage::ReadyForDispatch => 1,
            Stage::ArrivalOfTransporter => 2,
            Stage::ReadyForShipment => 3,
            Stage::InTransit => 4,
            Stage::Delivered => 5,
            Stage::Amended => 6,
            Stage::Dropped => 7,
            Stage::VoucherCreated => 8,
            Stage::VoucherValidated => 9,
            Stage::InvoiceValidated => 10,
            Stage::InvoiceGenerated => 11,
        }
    }

    pub const fn from_code(code: u8) -> Option<Stage> {
        Some(match code {
            0 => Stage::Created,
            1 => Stage::ReadyForDispatch,
            2 => Stage::ArrivalOfTransporter,
            3 => Stage::ReadyForShipment,
            4 => Stage::InTransit,
            5 => Stage::Delivered,
            6 => Stage::Amended,
            7 => Stage::Dropped,
            8 => Stage::VoucherCreated,
            9 => Stage::VoucherValidated,
            10 => Stage::InvoiceValidated,
            11 => Stage::InvoiceGenerated,
            _ => return None,
        })
    }

    pub const fn name(self) -> &'static str {
        match self {
            Stage::Created => "CREATED",
            Stage::ReadyForDispatch => "READY_FOR_DISPATCH",
            Stage::ArrivalOfTransporter => "ARRIVAL_OF_TRANSPORTER",
            Stage::ReadyForShipment => "READY_FOR_SHIPMENT",
            Stage::InTransit => "IN_TRANSIT",
            Stage::Delivered => "DELIVERED",
            Stage::Amended => "AMENDED",
            Stage::Dropped => "DROPPED",
            Stage::VoucherCreated => "VOUCHER_CREATED",
            Stage::VoucherValidated => "VOUCHER_VALIDATED",
            Stage::InvoiceValidated => "INVOICE_VALIDATED",
            Stage::InvoiceGenerated => "INVOICE_GENERATED",
        }
    }

    /// Escape stages are reachable from anywhere via explicit update and
    /// sit outside the forward chain.
    pub const fn is_escape(self) -> bool {
        matches!(self, Stage::Amended | Stage::Dropped)
    }

    /// Position in the forward chain; escape stages have none.
    const fn rank(self) -> Option<u8> {
        Some(match self {
            Stage::Created => 0,
            Stage::ReadyForDispatch => 1,
            Stage::ArrivalOfTransporter => 2,
            Stage::ReadyForShipment => 3,
            Stage::InTransit => 4,
            Stage::Delivered => 5,
            Stage::VoucherCreated => 6,
            Stage::VoucherValidated => 7,
            Stage::InvoiceGenerated => 8,
            Stage::InvoiceValidated => 9,
            Stage::Amended | Stage::Dropped => return None,
        })
    }

    /// Whether an explicit update may move an order from `self` to `next`.
    ///
    /// Transitions are monotonic along the forward chain (re-asserting the
    /// current stage is allowed); dropped orders are terminal; amended
    /// orders may resume at any stage.
    pub fn allows(self, next: Stage) -> bool {
        if self == Stage::Dropped {
            return next == Stage::Dropped;
        }
        if next.is_escape() || self == Stage::Amended {
            return true;
        }
        match (self.rank(), next.rank()) {
            (Some(current), Some(target)) => target >= current,
            // Unreachable: escapes are handled above.
            _ => false,
        }
    }
}

impl From<Stage> for String {
    fn from(stage: Stage) -> Self {
        stage.code().to_string()
    }
}

impl TryFrom<String> for Stage {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(Stage::from_code)
            .ok_or_else(|| LedgerError::validation(format!("unknown stage code {value:?}")))
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in 0..=11 {
            let stage = Stage::from_code(code).unwrap();
            assert_eq!(stage.code(), code);
        }
        assert!(Stage::from_code(12).is_none());
    }

    #[test]
    fn wire_form_is_the_numeric_code() {
        let json = serde_json::to_string(&Stage::VoucherCreated).unwrap();
        assert_eq!(json, "\"8\"");
        let back: Stage = serde_json::from_str("\"11\"").unwrap();
        assert_eq!(back, Stage::InvoiceGenerated);
        assert!(serde_json::from_str::<Stage>("\"99\"").is_err());
    }

    #[test]
    fn forward_chain_is_monotonic() {
        assert!(Stage::Created.allows(Stage::ReadyForDispatch));
        assert!(Stage::Created.allows(Stage::Created));
        assert!(Stage::InTransit.allows(Stage::Delivered));
        assert!(!Stage::Delivered.allows(Stage::InTransit));
        // Invoice generation precedes invoice validation despite the codes.
        assert!(Stage::InvoiceGenerated.allows(Stage::InvoiceValidated));
        assert!(!Stage::InvoiceValidated.allows(Stage::InvoiceGenerated));
    }

    #[test]
    fn escape_stages() {
        assert!(Stage::InTransit.allows(Stage::Amended));
        assert!(Stage::InTransit.allows(Stage::Dropped));
        // Amended orders may resume anywhere; dropped orders are terminal.
        assert!(Stage::Amended.allows(Stage::ReadyForShipment));
        assert!(!Stage::Dropped.allows(Stage::Created));
        assert!(Stage::Dropped.allows(Stage::Dropped));
    }
}

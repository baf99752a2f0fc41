//! Invocation context supplied by the host at the transaction boundary.

use chrono::{DateTime, Utc};

use crate::error::{LedgerError, LedgerResult};
use crate::fields::BUSINESS_TIME_FORMAT;

/// Compact stamp used for record `timeStamp` fields.
const COMPACT_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Per-invocation metadata from the host ledger runtime.
///
/// Everything nondeterministic — wall-clock time, caller identity,
/// transaction id — enters ledger code through this struct. The host hands
/// every replica the same values for a given transaction, so business logic
/// below this boundary stays replayable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxContext {
    tx_id: String,
    caller: Option<String>,
    timestamp: DateTime<Utc>,
}

impl TxContext {
    pub fn new(
        tx_id: impl Into<String>,
        caller: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            tx_id: tx_id.into(),
            caller: Some(caller.into()),
            timestamp,
        }
    }

    /// Context for a transaction whose caller metadata was not supplied.
    ///
    /// Audited operations will fail against such a context: identity
    /// metadata is mandatory, not best-effort.
    pub fn anonymous(tx_id: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            tx_id: tx_id.into(),
            caller: None,
            timestamp,
        }
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    /// Caller identity, or a fatal error when the host supplied none.
    pub fn caller(&self) -> LedgerResult<&str> {
        self.caller.as_deref().ok_or_else(|| {
            LedgerError::validation(format!(
                "caller identity unavailable for transaction {}",
                self.tx_id
            ))
        })
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Business timestamp in the ledger's `%Y-%m-%d %H:%M:%S` shape.
    pub fn business_time(&self) -> String {
        self.timestamp.format(BUSINESS_TIME_FORMAT).to_string()
    }

    /// Compact `%Y%m%d%H%M%S` stamp for record `timeStamp` fields.
    pub fn compact_time(&self) -> String {
        self.timestamp.format(COMPACT_TIME_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 7, 17, 15, 20, 0).unwrap()
    }

    #[test]
    fn formats_both_time_shapes() {
        let ctx = TxContext::new("tx-1", "officer-a", at());
        assert_eq!(ctx.business_time(), "2016-07-17 15:20:00");
        assert_eq!(ctx.compact_time(), "20160717152000");
    }

    #[test]
    fn missing_caller_identity_is_fatal() {
        let ctx = TxContext::anonymous("tx-2", at());
        assert!(matches!(ctx.caller(), Err(LedgerError::Validation(_))));
        let ctx = TxContext::new("tx-3", "officer-a", at());
        assert_eq!(ctx.caller().unwrap(), "officer-a");
    }
}

//! Strongly-typed identifiers used across both business variants.
//!
//! Identifiers are host-supplied opaque strings; the newtypes exist so the
//! compiler keeps an order id from ending up where a voucher id belongs.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

macro_rules! impl_string_id {
    ($t:ident, $name:literal) => {
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $t(String);

        impl $t {
            /// Wrap a host-supplied identifier. Must be non-empty.
            pub fn new(raw: impl Into<String>) -> Result<Self, LedgerError> {
                let raw = raw.into();
                if raw.trim().is_empty() {
                    return Err(LedgerError::validation(concat!(
                        $name,
                        " must not be empty"
                    )));
                }
                Ok(Self(raw))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_string_id!(OrderId, "dispatch order id");
impl_string_id!(AssetId, "asset id");
impl_string_id!(VoucherId, "voucher id");
impl_string_id!(InvoiceId, "invoice id");
impl_string_id!(DocumentId, "document id");
impl_string_id!(AuctionId, "auction id");
impl_string_id!(ItemId, "item id");
impl_string_id!(TraderId, "trader id");

impl From<&OrderId> for VoucherId {
    /// Voucher identity is derived 1:1 from the owning dispatch order.
    fn from(order_id: &OrderId) -> Self {
        Self(order_id.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_identifier() {
        assert!(matches!(
            OrderId::new(""),
            Err(LedgerError::Validation(_))
        ));
        assert!(matches!(
            TraderId::new("   "),
            Err(LedgerError::Validation(_))
        ));
    }

    #[test]
    fn voucher_id_mirrors_order_id() {
        let order = OrderId::new("OBD-001").unwrap();
        let voucher = VoucherId::from(&order);
        assert_eq!(voucher.as_str(), "OBD-001");
    }
}

//! Closed enumeration of the read-only invocation surface.
//!
//! Queries look records up by exact key or table prefix. Multi-row
//! results come back as a JSON array, single rows as the raw stored
//! payload.

use tradeledger_core::{AuctionId, InvoiceId, ItemId, LedgerError, LedgerResult, OrderId, TraderId};

/// One read-only invocation, fully typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    GetDispatchOrder { order_id: OrderId },
    GetAllDispatchOrders,
    /// Leading key components: asset id, then owner.
    GetAssets { prefix: Vec<String> },
    /// Leading key components: document id, then created-on.
    GetDocuments { prefix: Vec<String> },
    GetVouchers { prefix: Vec<String> },
    GetInvoice { invoice_id: InvoiceId },
    GetHistory { order_id: OrderId },
    GetUser { user_id: TraderId },
    GetItem { item_id: ItemId },
    GetAuctionRequest { auction_id: AuctionId },
    GetBid { auction_id: AuctionId, bid_no: String },
    GetHighestBid { auction_id: AuctionId },
    GetLastBid { auction_id: AuctionId },
    GetNoOfBids { auction_id: AuctionId },
    GetUsersByCategory { user_type: String },
    GetInitAuctions,
    GetOpenAuctions,
    GetVersion,
}

impl Query {
    pub fn parse(function: &str, args: &[String]) -> LedgerResult<Self> {
        match function {
            "getDispatchOrder" => {
                expect_args(function, args, 1)?;
                Ok(Query::GetDispatchOrder {
                    order_id: OrderId::new(args[0].as_str())?,
                })
            }
            "getAllDispatchOrders" => {
                expect_args(function, args, 0)?;
                Ok(Query::GetAllDispatchOrders)
            }
            "getAssets" => Ok(Query::GetAssets {
                prefix: prefix_args(function, args, 2)?,
            }),
            "getDocuments" => Ok(Query::GetDocuments {
                prefix: prefix_args(function, args, 2)?,
            }),
            "getVouchers" => Ok(Query::GetVouchers {
                prefix: prefix_args(function, args, 1)?,
            }),
            "getInvoice" => {
                expect_args(function, args, 1)?;
                Ok(Query::GetInvoice {
                    invoice_id: InvoiceId::new(args[0].as_str())?,
                })
            }
            "getHistory" => {
                expect_args(function, args, 1)?;
                Ok(Query::GetHistory {
                    order_id: OrderId::new(args[0].as_str())?,
                })
            }
            "getUser" => {
                expect_args(function, args, 1)?;
                Ok(Query::GetUser {
                    user_id: TraderId::new(args[0].as_str())?,
                })
            }
            "getItem" => {
                expect_args(function, args, 1)?;
                Ok(Query::GetItem {
                    item_id: ItemId::new(args[0].as_str())?,
                })
            }
            "getAuctionRequest" => {
                expect_args(function, args, 1)?;
                Ok(Query::GetAuctionRequest {
                    auction_id: AuctionId::new(args[0].as_str())?,
                })
            }
            "getBid" => {
                expect_args(function, args, 2)?;
                Ok(Query::GetBid {
                    auction_id: AuctionId::new(args[0].as_str())?,
                    bid_no: args[1].clone(),
                })
            }
            "getHighestBid" => {
                expect_args(function, args, 1)?;
                Ok(Query::GetHighestBid {
                    auction_id: AuctionId::new(args[0].as_str())?,
                })
            }
            "getLastBid" => {
                expect_args(function, args, 1)?;
                Ok(Query::GetLastBid {
                    auction_id: AuctionId::new(args[0].as_str())?,
                })
            }
            "getNoOfBids" => {
                expect_args(function, args, 1)?;
                Ok(Query::GetNoOfBids {
                    auction_id: AuctionId::new(args[0].as_str())?,
                })
            }
            "getUsersByCategory" => {
                expect_args(function, args, 1)?;
                Ok(Query::GetUsersByCategory {
                    user_type: args[0].clone(),
                })
            }
            "getInitAuctions" => {
                expect_args(function, args, 0)?;
                Ok(Query::GetInitAuctions)
            }
            "getOpenAuctions" => {
                expect_args(function, args, 0)?;
                Ok(Query::GetOpenAuctions)
            }
            "getVersion" => {
                expect_args(function, args, 0)?;
                Ok(Query::GetVersion)
            }
            other => Err(LedgerError::validation(format!("unknown query {other:?}"))),
        }
    }

    /// Wire name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Query::GetDispatchOrder { .. } => "getDispatchOrder",
            Query::GetAllDispatchOrders => "getAllDispatchOrders",
            Query::GetAssets { .. } => "getAssets",
            Query::GetDocuments { .. } => "getDocuments",
            Query::GetVouchers { .. } => "getVouchers",
            Query::GetInvoice { .. } => "getInvoice",
            Query::GetHistory { .. } => "getHistory",
            Query::GetUser { .. } => "getUser",
            Query::GetItem { .. } => "getItem",
            Query::GetAuctionRequest { .. } => "getAuctionRequest",
            Query::GetBid { .. } => "getBid",
            Query::GetHighestBid { .. } => "getHighestBid",
            Query::GetLastBid { .. } => "getLastBid",
            Query::GetNoOfBids { .. } => "getNoOfBids",
            Query::GetUsersByCategory { .. } => "getUsersByCategory",
            Query::GetInitAuctions => "getInitAuctions",
            Query::GetOpenAuctions => "getOpenAuctions",
            Query::GetVersion => "getVersion",
        }
    }
}

fn expect_args(function: &str, args: &[String], want: usize) -> LedgerResult<()> {
    if args.len() != want {
        return Err(LedgerError::validation(format!(
            "{function} expects {want} args, got {}",
            args.len()
        )));
    }
    Ok(())
}

fn prefix_args(function: &str, args: &[String], max: usize) -> LedgerResult<Vec<String>> {
    if args.len() > max {
        return Err(LedgerError::validation(format!(
            "{function} expects at most {max} key components, got {}",
            args.len()
        )));
    }
    Ok(args.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_query_is_rejected() {
        let err = Query::parse("getEverything", &[]).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn prefix_queries_are_bounded_by_key_arity() {
        let args: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let err = Query::parse("getAssets", &args).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        let query = Query::parse("getAssets", &args[..1]).unwrap();
        assert_eq!(
            query,
            Query::GetAssets {
                prefix: vec!["a".into()]
            }
        );
    }

    #[test]
    fn exact_queries_check_their_count() {
        let err = Query::parse("getBid", &["1111".to_string()]).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }
}

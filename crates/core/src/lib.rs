//! `tradeledger-core` — shared foundation for the ledger crates.
//!
//! This crate contains **pure domain** primitives (no storage, no host
//! bindings): the error taxonomy, typed identifiers, the record codec and
//! the invocation context.

pub mod context;
pub mod error;
pub mod fields;
pub mod id;
pub mod record;

pub use context::TxContext;
pub use error::{LedgerError, LedgerResult};
pub use id::{
    AssetId, AuctionId, DocumentId, InvoiceId, ItemId, OrderId, TraderId, VoucherId,
};
pub use record::Record;

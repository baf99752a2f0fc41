//! Shipment dispatch domain module.
//!
//! Lifecycle of physical-goods shipment orders — creation, asset mapping,
//! delivery, voucher, invoice — implemented as deterministic business
//! logic over the keyed record store. Nothing here performs IO beyond the
//! store handed in, and nothing reads the clock: time and caller identity
//! arrive through the invocation context.

pub mod asset;
pub mod document;
pub mod history;
pub mod invoice;
pub mod order;
pub mod service;
pub mod stage;
pub mod tables;
pub mod voucher;

pub use asset::{Asset, MAPPED};
pub use document::Document;
pub use history::TransactionHistoryRecord;
pub use invoice::Invoice;
pub use order::{DispatchOrder, OrderDetails};
pub use service::DispatchService;
pub use stage::Stage;
pub use voucher::Voucher;

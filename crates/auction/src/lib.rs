//! Auction trading domain module.
//!
//! Item/trader registration and the auction open/bid/close/buy-now
//! protocol, implemented as deterministic business logic over the keyed
//! record store. Time and caller identity come from the invocation
//! context; closing after a duration is an externally scheduled
//! invocation, never an in-process timer.

pub mod bid;
pub mod item;
pub mod request;
pub mod sale;
pub mod service;
pub mod tables;
pub mod trader;

pub use bid::Bid;
pub use item::Item;
pub use request::{AuctionRequest, AuctionStatus};
pub use sale::{Sale, SaleKind};
pub use service::AuctionService;
pub use trader::Trader;

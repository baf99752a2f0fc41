//! Auction-variant table layout.
//!
//! The `*_by_category`, `auctions_init` and `auctions_open` tables are
//! redundant projections of their primary tables, kept in sync by the
//! service inside one invocation so collaborators can enumerate by prefix
//! scan.

/// Traders by user id.
pub const TRADERS: &str = "traders";
/// Trader projection by (partition, user type, user id).
pub const TRADERS_BY_CATEGORY: &str = "traders_by_category";
/// Items by item id.
pub const ITEMS: &str = "items";
/// Item projection by (partition, subject, item id).
pub const ITEMS_BY_CATEGORY: &str = "items_by_category";
/// Auction requests by auction id.
pub const AUCTIONS: &str = "auctions";
/// Bucket of auctions still in INIT, by (partition, auction id).
pub const AUCTIONS_INIT: &str = "auctions_init";
/// Bucket of auctions currently OPEN, by (partition, auction id).
pub const AUCTIONS_OPEN: &str = "auctions_open";
/// Bids by (auction id, bid no).
pub const BIDS: &str = "bids";
/// Settlements by (auction id, item id).
pub const SALES: &str = "sales";

/// Fixed partition component of the bucket/category tables (legacy wire
/// value; its only job is giving prefix scans a common leading key).
pub const BUCKET_PARTITION: &str = "2016";

/// Declared (table, key arity) pairs; deploy drops and recreates them all.
pub const SCHEMA: &[(&str, usize)] = &[
    (TRADERS, 1),
    (TRADERS_BY_CATEGORY, 3),
    (ITEMS, 1),
    (ITEMS_BY_CATEGORY, 3),
    (AUCTIONS, 1),
    (AUCTIONS_INIT, 2),
    (AUCTIONS_OPEN, 2),
    (BIDS, 2),
    (SALES, 2),
];

//! Shipment-variant table layout.

/// Orders by id.
pub const ORDERS: &str = "orders";
/// Assets by (asset id, owner).
pub const ASSETS: &str = "assets";
/// Documents by (document id, created-on).
pub const DOCUMENTS: &str = "documents";
/// Vouchers by id (derived from the owning order id).
pub const VOUCHERS: &str = "vouchers";
/// Invoices by id.
pub const INVOICES: &str = "invoices";
/// Audit trail by (order id, timestamp).
pub const ORDER_HISTORY: &str = "order_history";

/// Declared (table, key arity) pairs; deploy drops and recreates them all.
pub const SCHEMA: &[(&str, usize)] = &[
    (ORDERS, 1),
    (ASSETS, 2),
    (DOCUMENTS, 2),
    (VOUCHERS, 1),
    (INVOICES, 1),
    (ORDER_HISTORY, 2),
];

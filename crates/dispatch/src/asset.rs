use serde::{Deserialize, Serialize};

use tradeledger_core::{AssetId, Record};

/// Stage marker set on an asset once it is assigned to an order.
pub const MAPPED: &str = "Mapped";

/// A physical good that can be mapped onto a dispatch order.
///
/// An asset belongs to at most one order at a time; re-mapping simply
/// overwrites the back-reference (last mapping wins, no reference count).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_id: AssetId,
    pub part_number: String,
    pub part_description: String,
    pub owner: String,
    /// Free-form marker; [`MAPPED`] once assigned.
    pub stage: String,
    pub batch_number: String,
    pub manufacture_date: String,
    /// Indian trade classification (harmonized system) code.
    pub itchs: String,
    pub excise_chapter_number: String,
    /// Back-reference to the owning order, empty until mapped.
    pub order_id: String,
}

impl Record for Asset {
    const KIND: &'static str = "ASSET";
}

use serde::{Deserialize, Serialize};

use tradeledger_core::{DocumentId, Record};

/// Free-form attachment referenced from dispatch orders.
///
/// Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_id: DocumentId,
    pub document_name: String,
    pub document_type: String,
    pub document_string: String,
    pub created_on: String,
}

impl Record for Document {
    const KIND: &'static str = "DOC";
}

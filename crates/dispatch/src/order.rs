use serde::{Deserialize, Serialize};

use tradeledger_core::{OrderId, Record};

use crate::stage::Stage;

/// Shipment, customer and transporter detail carried by a dispatch order
/// (and denormalized onto its voucher).
///
/// The full field set travels on every create/update — partial update is
/// not part of the wire contract. All fields are opaque strings; numeric
/// and date readings happen at the point of use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub customer: String,
    pub transporter: String,
    pub seller: String,
    /// Comma-joined asset ids mapped to this order.
    pub asset_ids: String,
    pub asn_number: String,
    pub source: String,
    pub shipment_type: String,
    pub contract_type: String,
    pub delivery_term: String,
    pub dispatch_date: String,
    pub transporter_ref: String,
    pub loading_type: String,
    pub vehicle_type: String,
    pub weight: String,
    pub consignment: String,
    pub quantity: String,
    pub part_number: String,
    pub part_name: String,
    pub order_ref_num: String,
    pub created_on: String,
    pub document_id1: String,
    pub document_id2: String,
    pub document_id3: String,
    pub document_id4: String,
    pub drop_description: String,
    pub delivery_description: String,
    pub in_transit_dispatch_officer_signed: String,
    pub in_transit_transporter_signed: String,
    pub transaction_description: String,
}

/// Current-state record of one outbound shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOrder {
    pub dispatch_order_id: OrderId,
    pub stage: Stage,
    #[serde(flatten)]
    pub details: OrderDetails,
    /// Advanced on every mutation (compact host timestamp).
    pub time_stamp: String,
}

impl DispatchOrder {
    /// A freshly created order always starts at [`Stage::Created`].
    pub fn created(dispatch_order_id: OrderId, details: OrderDetails, time_stamp: String) -> Self {
        Self {
            dispatch_order_id,
            stage: Stage::Created,
            details,
            time_stamp,
        }
    }
}

impl Record for DispatchOrder {
    const KIND: &'static str = "OBD";
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Detail block for a partial-load Maruthi Pune shipment.
    pub(crate) fn details() -> OrderDetails {
        OrderDetails {
            customer: "Maruthi Pune".into(),
            transporter: "VRL Logistics".into(),
            seller: "Plant 2".into(),
            asset_ids: String::new(),
            asn_number: "ASN-7".into(),
            source: "Pune".into(),
            shipment_type: "Outbound".into(),
            contract_type: "Annual".into(),
            delivery_term: "DDP".into(),
            dispatch_date: "2016-07-18".into(),
            transporter_ref: "TR-19".into(),
            loading_type: "LTL".into(),
            vehicle_type: "16 Tonner".into(),
            weight: "10".into(),
            consignment: "C-11".into(),
            quantity: "120".into(),
            part_number: "P-553".into(),
            part_name: "Axle housing".into(),
            order_ref_num: "REF-90".into(),
            created_on: "2016-07-17".into(),
            document_id1: String::new(),
            document_id2: String::new(),
            document_id3: String::new(),
            document_id4: String::new(),
            drop_description: String::new(),
            delivery_description: String::new(),
            in_transit_dispatch_officer_signed: String::new(),
            in_transit_transporter_signed: String::new(),
            transaction_description: "order created".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_wire_field_names() {
        let order = DispatchOrder::created(
            OrderId::new("OBD-1").unwrap(),
            fixtures::details(),
            "20160717152000".into(),
        );
        let json: serde_json::Value =
            serde_json::from_slice(&order.to_bytes().unwrap()).unwrap();
        assert_eq!(json["dispatchOrderId"], "OBD-1");
        assert_eq!(json["stage"], "0");
        assert_eq!(json["loadingType"], "LTL");
        assert_eq!(json["timeStamp"], "20160717152000");

        let back = DispatchOrder::from_bytes(&order.to_bytes().unwrap()).unwrap();
        assert_eq!(back, order);
    }
}

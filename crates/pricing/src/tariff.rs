//! Freight tariff table.
//!
//! Voucher amounts are a pure function of `(loading type, vehicle type,
//! customer, weight)` at voucher-creation time. Combinations without a
//! tariff entry price at **zero**; that is an inherited business rule kept
//! on purpose, not an error path.

/// Partial-load shipments are billed per weight unit.
pub const PARTIAL_LOAD: &str = "LTL";

/// Full-load shipments are billed at the vehicle's rated tonnage.
pub const FULL_LOAD: &str = "FTL";

/// Per-unit freight rates by customer account.
const RATE_CARD: &[(&str, u64)] = &[
    ("Maruthi Pune", 2500),
    ("Ashok Leyland Hosur", 125),
    ("Ford Chennai", 1100),
];

fn unit_rate(customer: &str) -> Option<u64> {
    RATE_CARD
        .iter()
        .find(|(name, _)| *name == customer)
        .map(|(_, rate)| *rate)
}

/// Rated tonnage of a full-load vehicle.
fn tonnage(vehicle_type: &str) -> Option<u64> {
    match vehicle_type {
        "16 Tonner" => Some(16),
        "21 Tonner" => Some(21),
        _ => None,
    }
}

/// Compute the voucher amount for a shipment.
pub fn voucher_amount(
    loading_type: &str,
    vehicle_type: &str,
    customer: &str,
    weight: u64,
) -> u64 {
    match loading_type {
        PARTIAL_LOAD => unit_rate(customer).map_or(0, |rate| rate * weight),
        FULL_LOAD => match (unit_rate(customer), tonnage(vehicle_type)) {
            (Some(rate), Some(tons)) => rate * tons,
            _ => 0,
        },
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_load_bills_per_weight_unit() {
        assert_eq!(voucher_amount("LTL", "16 Tonner", "Maruthi Pune", 10), 25_000);
        assert_eq!(voucher_amount("LTL", "", "Ashok Leyland Hosur", 4), 500);
        assert_eq!(voucher_amount("LTL", "", "Ford Chennai", 2), 2_200);
    }

    #[test]
    fn full_load_bills_at_rated_tonnage() {
        // Weight is ignored for full loads.
        assert_eq!(voucher_amount("FTL", "16 Tonner", "Ashok Leyland Hosur", 999), 2_000);
        assert_eq!(voucher_amount("FTL", "21 Tonner", "Maruthi Pune", 0), 52_500);
        assert_eq!(voucher_amount("FTL", "21 Tonner", "Ford Chennai", 1), 23_100);
    }

    #[test]
    fn unknown_combinations_price_at_zero() {
        assert_eq!(voucher_amount("LTL", "", "Unknown Works", 10), 0);
        assert_eq!(voucher_amount("FTL", "12 Tonner", "Maruthi Pune", 10), 0);
        assert_eq!(voucher_amount("AIR", "16 Tonner", "Maruthi Pune", 10), 0);
    }
}

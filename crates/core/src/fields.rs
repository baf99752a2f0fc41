//! Field-parsing helpers shared by both variants.
//!
//! Persisted fields are flat strings; the helpers below are the single
//! place where numeric and date fields are given a typed reading.

use chrono::NaiveDateTime;

use crate::error::{LedgerError, LedgerResult};

/// Ledger-wide business timestamp shape (dates are stored as strings).
pub const BUSINESS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse an integer field, naming the field in the failure.
pub fn parse_int(field: &str, value: &str) -> LedgerResult<i64> {
    value.trim().parse::<i64>().map_err(|_| {
        LedgerError::validation(format!("{field} must be an integer, got {value:?}"))
    })
}

/// Parse a strictly positive integer field.
pub fn parse_positive_int(field: &str, value: &str) -> LedgerResult<i64> {
    let parsed = parse_int(field, value)?;
    if parsed <= 0 {
        return Err(LedgerError::validation(format!(
            "{field} must be positive, got {value:?}"
        )));
    }
    Ok(parsed)
}

/// Split a comma-joined identifier list, dropping blanks.
///
/// Comma-joined lists are the only multi-valued fields in the data model
/// (asset lists on orders, voucher lists on invoices).
pub fn split_id_list(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Parse a business timestamp field (`%Y-%m-%d %H:%M:%S`).
pub fn parse_business_time(field: &str, value: &str) -> LedgerResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, BUSINESS_TIME_FORMAT).map_err(|_| {
        LedgerError::validation(format!(
            "{field} must be a {BUSINESS_TIME_FORMAT} timestamp, got {value:?}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_and_names_the_field() {
        assert_eq!(parse_int("weight", "16").unwrap(), 16);
        let err = parse_int("weight", "sixteen").unwrap_err();
        assert!(matches!(err, LedgerError::Validation(msg) if msg.contains("weight")));
    }

    #[test]
    fn positive_rejects_zero_and_negative() {
        assert!(parse_positive_int("bid price", "0").is_err());
        assert!(parse_positive_int("bid price", "-5").is_err());
        assert_eq!(parse_positive_int("bid price", "400").unwrap(), 400);
    }

    #[test]
    fn splits_id_lists() {
        assert_eq!(split_id_list("A1,A2, A3"), vec!["A1", "A2", "A3"]);
        assert_eq!(split_id_list("A1,,"), vec!["A1"]);
        assert!(split_id_list("").is_empty());
    }

    #[test]
    fn parses_business_timestamps() {
        let ts = parse_business_time("close date", "2016-05-23 11:00:00").unwrap();
        assert_eq!(ts.format(BUSINESS_TIME_FORMAT).to_string(), "2016-05-23 11:00:00");
        assert!(parse_business_time("close date", "23/05/2016").is_err());
    }
}

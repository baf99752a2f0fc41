//! Record codec: typed entities to and from opaque byte payloads.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{LedgerError, LedgerResult};

/// A persistable record.
///
/// Payloads are JSON; the shape of each record is fixed by its serde
/// derive. A payload that does not match the expected shape is a hard
/// `Decode` failure, never silently ignored — record kind is carried by
/// the typed variant handling it, not recovered by peeking at fields.
pub trait Record: Serialize + DeserializeOwned {
    /// Stable record kind tag (wire-format discriminator).
    const KIND: &'static str;

    fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| LedgerError::decode(format!("{} encode: {e}", Self::KIND)))
    }

    fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| LedgerError::decode(format!("{} payload: {e}", Self::KIND)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Probe {
        name: String,
        count: u32,
    }

    impl Record for Probe {
        const KIND: &'static str = "PROBE";
    }

    #[test]
    fn round_trips_through_bytes() {
        let probe = Probe {
            name: "widget".into(),
            count: 3,
        };
        let bytes = probe.to_bytes().unwrap();
        assert_eq!(Probe::from_bytes(&bytes).unwrap(), probe);
    }

    #[test]
    fn shape_mismatch_is_a_decode_error() {
        let err = Probe::from_bytes(br#"{"name":"widget"}"#).unwrap_err();
        assert!(matches!(err, LedgerError::Decode(msg) if msg.contains("PROBE")));
    }
}

//! `tradeledger-store` — keyed record store over the host ledger.
//!
//! Emulates multi-index table semantics (composite keys, prefix scans) on
//! top of the flat get/put/delete/range surface the host exposes.

pub mod in_memory;
pub mod table;
pub mod world_state;

pub use in_memory::InMemoryWorldState;
pub use table::{MAX_KEY_ARITY, Row, TableStore};
pub use world_state::WorldState;

//! Tracing/logging setup for the process embedding the ledger logic.
//!
//! The ledger crates only *emit* `tracing` events; installing a
//! subscriber is the host's decision, made once at process start.

/// Initialize process-wide observability (tracing/logging).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

//! `tradeledger-pricing` — deterministic voucher tariff computation.

pub mod tariff;

pub use tariff::{FULL_LOAD, PARTIAL_LOAD, voucher_amount};

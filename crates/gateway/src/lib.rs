//! `tradeledger-gateway` — the invocation surface of the application.
//!
//! Maps the host's `(function name, positional args)` wire shape onto
//! typed commands and queries, and executes them through the engine.

pub mod command;
pub mod engine;
pub mod query;

pub use command::Command;
pub use engine::{APP_VERSION, Engine};
pub use query::Query;

//! Composite-key table emulation over the flat world state.
//!
//! The host ledger is a single flat key space. A *table* here is a named
//! partition of that space with a fixed key arity (1–4); rows are framed
//! composite keys plus an opaque payload. Secondary access patterns are
//! realized by writing the same logical payload into more than one table
//! under different key prefixes — every such projection must be kept in
//! sync by the business operation inside one invocation, because the only
//! atomicity available is "all writes of this invocation commit together".

use std::collections::BTreeMap;

use tradeledger_core::{LedgerError, LedgerResult};

use crate::world_state::WorldState;

/// Separator framing composite-key components inside the flat key space.
/// Components themselves must never contain it.
const KEY_SEP: char = '\u{0}';

/// Largest key arity a table may declare.
pub const MAX_KEY_ARITY: usize = 4;

/// A materialized row returned by a prefix query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Decoded composite key components.
    pub key: Vec<String>,
    /// Opaque payload as stored.
    pub payload: Vec<u8>,
}

/// Declared tables and their key arities.
#[derive(Debug, Default, Clone)]
struct Catalog {
    tables: BTreeMap<String, usize>,
}

impl Catalog {
    fn declare(&mut self, name: &str, arity: usize) -> LedgerResult<()> {
        if name.is_empty() || name.contains(KEY_SEP) {
            return Err(LedgerError::validation(format!(
                "invalid table name {name:?}"
            )));
        }
        if arity == 0 || arity > MAX_KEY_ARITY {
            return Err(LedgerError::validation(format!(
                "table {name} key arity must be 1..={MAX_KEY_ARITY}, got {arity}"
            )));
        }
        match self.tables.get(name) {
            // Re-declaring the same shape is idempotent.
            Some(existing) if *existing == arity => Ok(()),
            Some(existing) => Err(LedgerError::validation(format!(
                "table {name} already declared with key arity {existing}"
            ))),
            None => {
                self.tables.insert(name.to_string(), arity);
                Ok(())
            }
        }
    }

    fn arity(&self, name: &str) -> LedgerResult<usize> {
        self.tables
            .get(name)
            .copied()
            .ok_or_else(|| LedgerError::validation(format!("table {name} is not declared")))
    }
}

/// Generic composite-key CRUD + range query over the host ledger.
///
/// Payloads are opaque to the store; uniqueness is on the full key tuple.
#[derive(Debug)]
pub struct TableStore<S> {
    state: S,
    catalog: Catalog,
}

impl<S> TableStore<S> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            catalog: Catalog::default(),
        }
    }

    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: WorldState> TableStore<S> {
    /// Declare a table with a fixed-arity composite key.
    ///
    /// Idempotent for an identical shape; redeclaring with a different
    /// arity is rejected.
    pub fn create_table(&mut self, name: &str, key_arity: usize) -> LedgerResult<()> {
        self.catalog.declare(name, key_arity)
    }

    /// Full re-init: drop every row of the listed tables and (re)declare
    /// them. Invoked at deploy time.
    pub fn reset_tables(&mut self, tables: &[(&str, usize)]) -> LedgerResult<()> {
        for &(name, arity) in tables {
            self.catalog.declare(name, arity)?;
            let prefix = encode_prefix(name, &[]);
            let stale = self.state.scan_prefix(&prefix);
            for (key, _) in &stale {
                self.state.delete(key);
            }
            tracing::debug!(table = name, dropped = stale.len(), "table reset");
        }
        Ok(())
    }

    /// Create a row. Fails with `Conflict` if the full key already exists.
    pub fn insert(&mut self, table: &str, key: &[&str], payload: Vec<u8>) -> LedgerResult<()> {
        let flat = self.full_key(table, key)?;
        if self.state.get(&flat).is_some() {
            return Err(LedgerError::conflict(format!(
                "{table}[{}] already exists",
                key.join("/")
            )));
        }
        self.state.put(&flat, payload);
        Ok(())
    }

    /// Overwrite an existing row. Fails with `NotFound` if the key is
    /// absent — update semantics, never create-or-update.
    pub fn replace(&mut self, table: &str, key: &[&str], payload: Vec<u8>) -> LedgerResult<()> {
        let flat = self.full_key(table, key)?;
        if self.state.get(&flat).is_none() {
            return Err(LedgerError::not_found(format!(
                "{table}[{}]",
                key.join("/")
            )));
        }
        self.state.put(&flat, payload);
        Ok(())
    }

    /// Payload for a fully-specified key, or `NotFound`.
    pub fn get_exact(&self, table: &str, key: &[&str]) -> LedgerResult<Vec<u8>> {
        self.find(table, key)?.ok_or_else(|| {
            LedgerError::not_found(format!("{table}[{}]", key.join("/")))
        })
    }

    /// Existence-tolerant variant of [`get_exact`](Self::get_exact), for
    /// create paths that must distinguish "absent" from failure.
    pub fn find(&self, table: &str, key: &[&str]) -> LedgerResult<Option<Vec<u8>>> {
        let flat = self.full_key(table, key)?;
        Ok(self.state.get(&flat))
    }

    /// All rows whose leading key components match `partial`, in
    /// store-native order.
    pub fn query_by_prefix(&self, table: &str, partial: &[&str]) -> LedgerResult<Vec<Row>> {
        let arity = self.catalog.arity(table)?;
        if partial.len() > arity {
            return Err(LedgerError::validation(format!(
                "table {table} prefix has {} components, key arity is {arity}",
                partial.len()
            )));
        }
        validate_components(table, partial)?;
        let prefix = encode_prefix(table, partial);
        self.state
            .scan_prefix(&prefix)
            .into_iter()
            .map(|(flat, payload)| {
                Ok(Row {
                    key: decode_key(table, &flat)?,
                    payload,
                })
            })
            .collect()
    }

    /// Remove a row. Fails with `NotFound` if the key is absent.
    pub fn delete(&mut self, table: &str, key: &[&str]) -> LedgerResult<()> {
        let flat = self.full_key(table, key)?;
        if !self.state.delete(&flat) {
            return Err(LedgerError::not_found(format!(
                "{table}[{}]",
                key.join("/")
            )));
        }
        Ok(())
    }

    fn full_key(&self, table: &str, key: &[&str]) -> LedgerResult<String> {
        let arity = self.catalog.arity(table)?;
        if key.len() != arity {
            return Err(LedgerError::validation(format!(
                "table {table} key has {} components, declared arity is {arity}",
                key.len()
            )));
        }
        validate_components(table, key)?;
        Ok(encode_prefix(table, key))
    }
}

fn validate_components(table: &str, components: &[&str]) -> LedgerResult<()> {
    for component in components {
        if component.is_empty() || component.contains(KEY_SEP) {
            return Err(LedgerError::validation(format!(
                "table {table} key component {component:?} is invalid"
            )));
        }
    }
    Ok(())
}

/// Frame `table` plus leading key components into the flat key space.
///
/// Every component is terminated by the separator, so a prefix of n
/// components matches exactly the rows whose first n components are equal
/// (never a longer component sharing the same leading bytes).
fn encode_prefix(table: &str, components: &[&str]) -> String {
    let mut flat = String::new();
    flat.push(KEY_SEP);
    flat.push_str(table);
    flat.push(KEY_SEP);
    for component in components {
        flat.push_str(component);
        flat.push(KEY_SEP);
    }
    flat
}

fn decode_key(table: &str, flat: &str) -> LedgerResult<Vec<String>> {
    let body = flat
        .strip_prefix(KEY_SEP)
        .and_then(|rest| rest.strip_suffix(KEY_SEP))
        .ok_or_else(|| LedgerError::decode(format!("malformed row key in table {table}")))?;
    let mut parts = body.split(KEY_SEP);
    if parts.next() != Some(table) {
        return Err(LedgerError::decode(format!(
            "row key does not belong to table {table}"
        )));
    }
    Ok(parts.map(str::to_string).collect())
}

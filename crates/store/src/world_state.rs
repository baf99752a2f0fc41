//! Host ledger surface.

/// Flat keyed world state exposed by the host ledger runtime.
///
/// One invocation owns the state mutably for its duration; reads observe
/// the invocation's own prior writes but never another invocation's
/// uncommitted ones. Committing or discarding the whole write set is the
/// host's job — nothing below this trait partially commits on its own.
pub trait WorldState {
    /// Fetch the payload stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `value` under `key`, overwriting any previous payload.
    fn put(&mut self, key: &str, value: Vec<u8>);

    /// Remove `key`. Returns whether a row existed.
    fn delete(&mut self, key: &str) -> bool;

    /// All rows whose key starts with `prefix`, in store-native key order.
    ///
    /// The order is an artifact of the store, not of any business field;
    /// callers needing a business ordering must sort explicitly.
    fn scan_prefix(&self, prefix: &str) -> Vec<(String, Vec<u8>)>;
}

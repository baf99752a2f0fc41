use std::collections::BTreeMap;
use std::ops::Bound;

use crate::world_state::WorldState;

/// In-memory world state.
///
/// Intended for tests/dev. Not optimized for performance. Scan order is
/// lexicographic over the encoded keys, which callers must still treat as
/// store-native (unspecified) order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWorldState {
    rows: BTreeMap<String, Vec<u8>>,
}

impl InMemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl WorldState for InMemoryWorldState {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.rows.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Vec<u8>) {
        self.rows.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) -> bool {
        self.rows.remove(key).is_some()
    }

    fn scan_prefix(&self, prefix: &str) -> Vec<(String, Vec<u8>)> {
        self.rows
            .range::<String, _>((Bound::Included(prefix.to_string()), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete() {
        let mut state = InMemoryWorldState::new();
        assert!(state.is_empty());

        state.put("a", b"1".to_vec());
        assert_eq!(state.get("a"), Some(b"1".to_vec()));

        state.put("a", b"2".to_vec());
        assert_eq!(state.get("a"), Some(b"2".to_vec()));
        assert_eq!(state.len(), 1);

        assert!(state.delete("a"));
        assert!(!state.delete("a"));
        assert_eq!(state.get("a"), None);
    }

    #[test]
    fn scan_is_bounded_by_prefix() {
        let mut state = InMemoryWorldState::new();
        state.put("k/a", b"1".to_vec());
        state.put("k/b", b"2".to_vec());
        state.put("l/a", b"3".to_vec());

        let hits = state.scan_prefix("k/");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].0, "k/a");
        assert_eq!(hits[1].0, "k/b");
    }
}

//! Expansion tracking keyed by node identity.
//!
//! Entries are keys, not positions: they stay meaningful across any reorder
//! as long as the node's key-producing attribute is unchanged. All operations
//! are total over arbitrary keys; a stale key left behind by an external
//! deletion is silently ignored, never an error.

use std::hash::Hash;

use ahash::AHashSet;

/// Set of expanded node keys.
///
/// # Example
///
/// ```
/// use trellis_tree::ExpansionState;
///
/// let mut expanded = ExpansionState::new();
/// expanded.toggle(5);
/// assert!(expanded.is_expanded(&5));
/// expanded.toggle(5);
/// assert!(expanded.is_empty());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(
    feature = "state-persistence",
    serde(bound(
        serialize = "K: serde::Serialize + Eq + std::hash::Hash",
        deserialize = "K: serde::Deserialize<'de> + Eq + std::hash::Hash"
    ))
)]
pub struct ExpansionState<K> {
    keys: AHashSet<K>,
}

impl<K> Default for ExpansionState<K> {
    fn default() -> Self {
        Self {
            keys: AHashSet::new(),
        }
    }
}

impl<K: Eq + Hash> PartialEq for ExpansionState<K> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl<K: Eq + Hash> Eq for ExpansionState<K> {}

impl<K: Eq + Hash> ExpansionState<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand if collapsed, collapse if expanded.
    ///
    /// Returns `true` when the key ends up expanded.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    /// Expand; no-op when already expanded.
    pub fn open(&mut self, key: K) {
        self.keys.insert(key);
    }

    /// Collapse; no-op when already collapsed.
    pub fn close(&mut self, key: &K) {
        self.keys.remove(key);
    }

    /// Whether the key is currently expanded.
    #[must_use]
    pub fn is_expanded(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Number of expanded keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Collapse everything.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Iterate the expanded keys in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }
}

impl<K: Eq + Hash> FromIterator<K> for ExpansionState<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash> Extend<K> for ExpansionState<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_on_empty_set_expands() {
        let mut expanded = ExpansionState::new();
        assert!(expanded.toggle(5));
        assert!(expanded.is_expanded(&5));
        assert_eq!(expanded.len(), 1);
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut expanded: ExpansionState<u32> = [1, 2, 3].into_iter().collect();
        let before = expanded.clone();
        expanded.toggle(2);
        expanded.toggle(2);
        assert_eq!(expanded, before);
        expanded.toggle(9);
        expanded.toggle(9);
        assert_eq!(expanded, before);
    }

    #[test]
    fn open_is_idempotent() {
        let mut expanded = ExpansionState::new();
        expanded.open("a");
        expanded.open("a");
        assert_eq!(expanded.len(), 1);
        assert!(expanded.is_expanded(&"a"));
    }

    #[test]
    fn close_and_stale_keys_are_silent() {
        let mut expanded: ExpansionState<u32> = [1].into_iter().collect();
        expanded.close(&1);
        expanded.close(&1);
        expanded.close(&42); // never observed, still fine
        assert!(expanded.is_empty());
    }

    #[test]
    fn clear_and_iter() {
        let mut expanded: ExpansionState<u32> = [1, 2].into_iter().collect();
        let mut seen: Vec<u32> = expanded.iter().copied().collect();
        seen.sort_unstable();
        assert_eq!(seen, [1, 2]);
        expanded.clear();
        assert!(expanded.is_empty());
    }

    #[cfg(feature = "state-persistence")]
    #[test]
    fn serde_round_trip() {
        let expanded: ExpansionState<String> =
            ["a".to_string(), "b".to_string()].into_iter().collect();
        let json = serde_json::to_string(&expanded).unwrap();
        let back: ExpansionState<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expanded);
    }
}

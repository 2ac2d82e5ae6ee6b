//! Selection tracking behind a pluggable seam.
//!
//! The façade treats selection as an external collaborator: anything
//! implementing [`SelectionModel`] plugs in. [`MultiSelection`] is the stock
//! implementation with single and multiple modes. Like expansion, selection
//! is keyed by node identity and survives reorders untouched.

use std::hash::Hash;

use ahash::AHashSet;

/// Selection behavior the tree façade delegates to.
///
/// All operations are total: acting on a key the tree no longer contains is
/// fine and has no effect beyond the set itself.
pub trait SelectionModel<K> {
    /// Whether the key is currently selected.
    fn is_selected(&self, key: &K) -> bool;

    /// Select a key. Single-selection implementations replace the current
    /// selection.
    fn select(&mut self, key: K);

    /// Deselect a key; no-op when absent.
    fn deselect(&mut self, key: &K);

    /// Symmetric-difference update.
    fn toggle(&mut self, key: K);

    /// Deselect everything.
    fn clear(&mut self);

    /// Select every yielded key, subject to the implementation's mode.
    fn select_all(&mut self, keys: &mut dyn Iterator<Item = K>);

    /// Snapshot of the currently selected keys, in no particular order.
    fn selected(&self) -> Vec<K>
    where
        K: Clone;

    /// Number of selected keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Single- or multiple-selection policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum SelectionMode {
    /// At most one key selected; `select` replaces.
    Single,
    /// Any number of keys selected.
    #[default]
    Multiple,
}

/// Stock selection model backing the façade by default.
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
pub struct MultiSelection<K> {
    mode: SelectionMode,
    keys: AHashSet<K>,
}

impl<K> Default for MultiSelection<K> {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            keys: AHashSet::new(),
        }
    }
}

impl<K: Eq + Hash> PartialEq for MultiSelection<K> {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode && self.keys == other.keys
    }
}

impl<K: Eq + Hash> Eq for MultiSelection<K> {}

impl<K: Eq + Hash> MultiSelection<K> {
    #[must_use]
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            keys: AHashSet::new(),
        }
    }

    /// The configured policy.
    #[must_use]
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Replace the selection wholesale (controlled usage).
    ///
    /// In single mode only the first yielded key is kept.
    pub fn set_selected(&mut self, keys: impl IntoIterator<Item = K>) {
        self.keys.clear();
        match self.mode {
            SelectionMode::Single => self.keys.extend(keys.into_iter().take(1)),
            SelectionMode::Multiple => self.keys.extend(keys),
        }
    }

    /// Iterate the selected keys in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }
}

impl<K: Eq + Hash> SelectionModel<K> for MultiSelection<K> {
    fn is_selected(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    fn select(&mut self, key: K) {
        if self.mode == SelectionMode::Single {
            self.keys.clear();
        }
        self.keys.insert(key);
    }

    fn deselect(&mut self, key: &K) {
        self.keys.remove(key);
    }

    fn toggle(&mut self, key: K) {
        if self.keys.remove(&key) {
            return;
        }
        self.select(key);
    }

    fn clear(&mut self) {
        self.keys.clear();
    }

    /// Select-all is only meaningful for multiple selection; single mode
    /// ignores it.
    fn select_all(&mut self, keys: &mut dyn Iterator<Item = K>) {
        if self.mode == SelectionMode::Multiple {
            self.keys.extend(keys);
        }
    }

    fn selected(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys.iter().cloned().collect()
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

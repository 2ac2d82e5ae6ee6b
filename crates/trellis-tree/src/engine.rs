//! Façade composing path patching with expansion and selection state.
//!
//! [`TreeState`] owns one tree plus its two identity-keyed state sets and
//! exposes the operations a presentation layer drives: `reorder`, `toggle`,
//! `open`, selection pass-through, and snapshot reads. Every call is
//! synchronous and leaves the new snapshot readable immediately; the façade
//! holds no queued state between calls.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::node::{Keyed, Nested, Tree};
use crate::patch::{Move, PatchQueue};
use crate::path::TreePath;
use crate::selection::{MultiSelection, SelectionModel};
use crate::state::ExpansionState;

/// Read-only view of the three pieces of state.
pub struct Snapshot<'a, T: Nested + Keyed, S> {
    pub tree: &'a [Arc<T>],
    pub expanded: &'a ExpansionState<T::Key>,
    pub selection: &'a S,
}

/// Owning façade over one tree plus its expansion and selection state.
///
/// The tree is replaced wholesale on each successful commit; expansion and
/// selection flow independently, keyed by node identity, and interleave
/// freely with tree commits. Single-writer: callers serialize access.
///
/// `reorder` builds a one-operation queue and commits it on the spot. A
/// session that batches several moves builds a [`PatchQueue`] itself and
/// hands it to [`commit`](Self::commit) once; cancelling the session is
/// dropping the queue.
pub struct TreeState<T: Nested + Keyed, S = MultiSelection<<T as Keyed>::Key>> {
    items: Tree<T>,
    expanded: ExpansionState<T::Key>,
    selection: S,
    on_items_change: Option<Box<dyn FnMut(&Tree<T>)>>,
    on_expanded_change: Option<Box<dyn FnMut(&ExpansionState<T::Key>)>>,
    on_selection_change: Option<Box<dyn FnMut(&S)>>,
}

impl<T, S> TreeState<T, S>
where
    T: Nested + Keyed,
    S: SelectionModel<T::Key> + Default,
{
    /// Take ownership of a tree with empty expansion and selection state.
    #[must_use]
    pub fn new(items: Tree<T>) -> Self {
        Self {
            items,
            expanded: ExpansionState::default(),
            selection: S::default(),
            on_items_change: None,
            on_expanded_change: None,
            on_selection_change: None,
        }
    }
}

impl<T, S> TreeState<T, S>
where
    T: Nested + Keyed,
    S: SelectionModel<T::Key>,
{
    /// Seed the initially expanded keys.
    #[must_use]
    pub fn with_expanded(mut self, expanded: ExpansionState<T::Key>) -> Self {
        self.expanded = expanded;
        self
    }

    /// Swap in a selection model (mode, pre-selected keys).
    #[must_use]
    pub fn with_selection(mut self, selection: S) -> Self {
        self.selection = selection;
        self
    }

    /// Hook invoked after every successful tree commit.
    #[must_use]
    pub fn on_items_change(mut self, hook: impl FnMut(&Tree<T>) + 'static) -> Self {
        self.on_items_change = Some(Box::new(hook));
        self
    }

    /// Hook invoked whenever the expanded set changes.
    #[must_use]
    pub fn on_expanded_change(
        mut self,
        hook: impl FnMut(&ExpansionState<T::Key>) + 'static,
    ) -> Self {
        self.on_expanded_change = Some(Box::new(hook));
        self
    }

    /// Hook invoked whenever the selection changes.
    #[must_use]
    pub fn on_selection_change(mut self, hook: impl FnMut(&S) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(hook));
        self
    }

    // ── Tree ────────────────────────────────────────────────────────────

    /// Current root sequence.
    #[must_use]
    pub fn items(&self) -> &[Arc<T>] {
        &self.items
    }

    /// Move the node at `from` under the node at `to`.
    ///
    /// `index` is the insert-before position within the destination's
    /// children; `None` appends.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures; the tree is unchanged in that case.
    pub fn reorder(
        &mut self,
        from: impl Into<TreePath>,
        to: impl Into<TreePath>,
        index: Option<usize>,
    ) -> Result<()> {
        let op = Move {
            from: from.into(),
            to: to.into(),
            index,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(from = %op.from, to = %op.to, index = ?op.index, "tree.reorder");

        let mut queue = PatchQueue::new();
        queue.push(op);
        self.commit(&mut queue)
    }

    /// Apply a batched session in order and atomically: observers only ever
    /// see the pre-commit and post-commit trees.
    ///
    /// The queue is cleared whether or not the commit succeeds.
    ///
    /// # Errors
    ///
    /// The first failing move aborts the whole commit; the tree is unchanged
    /// and no notification fires.
    pub fn commit(&mut self, queue: &mut PatchQueue) -> Result<()> {
        #[cfg(feature = "tracing")]
        tracing::debug!(ops = queue.len(), "tree.commit");

        self.items = queue.commit(&self.items)?;
        if let Some(hook) = &mut self.on_items_change {
            hook(&self.items);
        }
        Ok(())
    }

    /// Replace the tree wholesale (controlled usage).
    pub fn set_items(&mut self, items: Tree<T>) {
        self.items = items;
        if let Some(hook) = &mut self.on_items_change {
            hook(&self.items);
        }
    }

    // ── Expansion ───────────────────────────────────────────────────────

    /// Expand if collapsed, collapse if expanded.
    pub fn toggle(&mut self, key: T::Key) {
        self.expanded.toggle(key);
        #[cfg(feature = "tracing")]
        tracing::debug!(expanded = self.expanded.len(), "tree.toggle");
        if let Some(hook) = &mut self.on_expanded_change {
            hook(&self.expanded);
        }
    }

    /// Expand; a key that is already open notifies nobody.
    pub fn open(&mut self, key: T::Key) {
        if self.expanded.is_expanded(&key) {
            return;
        }
        self.expanded.open(key);
        if let Some(hook) = &mut self.on_expanded_change {
            hook(&self.expanded);
        }
    }

    /// Collapse; a key that is already closed notifies nobody.
    pub fn close(&mut self, key: &T::Key) {
        if !self.expanded.is_expanded(key) {
            return;
        }
        self.expanded.close(key);
        if let Some(hook) = &mut self.on_expanded_change {
            hook(&self.expanded);
        }
    }

    /// Current expanded set.
    #[must_use]
    pub fn expanded(&self) -> &ExpansionState<T::Key> {
        &self.expanded
    }

    // ── Selection pass-through ──────────────────────────────────────────

    /// Select a key.
    pub fn select(&mut self, key: T::Key) {
        self.selection.select(key);
        if let Some(hook) = &mut self.on_selection_change {
            hook(&self.selection);
        }
    }

    /// Deselect a key; stale keys are silently ignored.
    pub fn deselect(&mut self, key: &T::Key) {
        self.selection.deselect(key);
        if let Some(hook) = &mut self.on_selection_change {
            hook(&self.selection);
        }
    }

    /// Symmetric-difference update of the selection.
    pub fn toggle_selection(&mut self, key: T::Key) {
        self.selection.toggle(key);
        if let Some(hook) = &mut self.on_selection_change {
            hook(&self.selection);
        }
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        if let Some(hook) = &mut self.on_selection_change {
            hook(&self.selection);
        }
    }

    /// Select the key of every node currently in the tree.
    pub fn select_all(&mut self) {
        let mut keys = Vec::new();
        collect_keys(&self.items, &mut keys);
        self.selection.select_all(&mut keys.into_iter());
        if let Some(hook) = &mut self.on_selection_change {
            hook(&self.selection);
        }
    }

    /// Whether the key is currently selected.
    #[must_use]
    pub fn is_selected(&self, key: &T::Key) -> bool {
        self.selection.is_selected(key)
    }

    /// Current selection model.
    #[must_use]
    pub fn selection(&self) -> &S {
        &self.selection
    }

    /// The full `{tree, expanded, selection}` view.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_, T, S> {
        Snapshot {
            tree: &self.items,
            expanded: &self.expanded,
            selection: &self.selection,
        }
    }
}

fn collect_keys<T: Nested + Keyed>(nodes: &[Arc<T>], out: &mut Vec<T::Key>) {
    for node in nodes {
        out.push(node.key());
        if let Some(children) = node.children() {
            collect_keys(children, out);
        }
    }
}

impl<T, S> fmt::Debug for TreeState<T, S>
where
    T: Nested + Keyed + fmt::Debug,
    T::Key: fmt::Debug,
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeState")
            .field("items", &self.items)
            .field("expanded", &self.expanded)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::PatchError;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        id: u32,
        children: Option<Vec<Arc<Rec>>>,
    }

    impl Nested for Rec {
        fn children(&self) -> Option<&[Arc<Self>]> {
            self.children.as_deref()
        }

        fn children_mut(&mut self) -> &mut Vec<Arc<Self>> {
            self.children.get_or_insert_with(Vec::new)
        }
    }

    impl Keyed for Rec {
        type Key = u32;

        fn key(&self) -> u32 {
            self.id
        }
    }

    fn leaf(id: u32) -> Arc<Rec> {
        Arc::new(Rec { id, children: None })
    }

    fn branch(id: u32, children: Vec<Arc<Rec>>) -> Arc<Rec> {
        Arc::new(Rec {
            id,
            children: Some(children),
        })
    }

    /// `[A { B, C }, D {}]` with A=1, B=2, C=3, D=4.
    fn sample() -> Tree<Rec> {
        vec![branch(1, vec![leaf(2), leaf(3)]), branch(4, Vec::new())]
    }

    fn child_ids(node: &Rec) -> Vec<u32> {
        node.children
            .as_deref()
            .map(|c| c.iter().map(|n| n.id).collect())
            .unwrap_or_default()
    }

    #[test]
    fn reorder_moves_and_exposes_the_new_snapshot() {
        let mut state: TreeState<Rec> = TreeState::new(sample());
        state.reorder([0, 0], [1], None).unwrap();

        let snapshot = state.snapshot();
        assert_eq!(child_ids(&snapshot.tree[0]), [3]);
        assert_eq!(child_ids(&snapshot.tree[1]), [2]);
    }

    #[test]
    fn reorder_failure_leaves_everything_in_place() {
        let mut state: TreeState<Rec> = TreeState::new(sample());
        assert_eq!(
            state.reorder([9, 9], [1], None).unwrap_err(),
            PatchError::OutOfRange {
                depth: 0,
                index: 9,
                len: 2
            }
        );
        assert_eq!(child_ids(&state.items()[0]), [2, 3]);
    }

    #[test]
    fn expansion_survives_a_reorder() {
        let mut state: TreeState<Rec> = TreeState::new(sample());
        state.open(2);
        state.select(2);
        state.reorder([0, 0], [1], None).unwrap();

        // Node 2 changed position, not identity.
        assert!(state.expanded().is_expanded(&2));
        assert!(state.is_selected(&2));
    }

    #[test]
    fn batched_commit_is_atomic_on_failure() {
        let mut state: TreeState<Rec> = TreeState::new(sample());
        let mut queue = PatchQueue::new();
        queue.push(Move::new([0, 0], [1]));
        queue.push(Move::new([7], [0]));

        assert!(state.commit(&mut queue).is_err());
        assert!(queue.is_empty());
        assert_eq!(child_ids(&state.items()[0]), [2, 3]);
    }

    #[test]
    fn items_hook_fires_per_successful_commit_only() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let mut state: TreeState<Rec> =
            TreeState::new(sample()).on_items_change(move |_| seen.set(seen.get() + 1));

        state.reorder([0, 0], [1], None).unwrap();
        assert_eq!(calls.get(), 1);

        let _ = state.reorder([9], [1], None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn expanded_hook_skips_redundant_open_and_close() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let mut state: TreeState<Rec> =
            TreeState::new(sample()).on_expanded_change(move |_| seen.set(seen.get() + 1));

        state.open(2);
        state.open(2);
        assert_eq!(calls.get(), 1);
        state.close(&2);
        state.close(&2);
        assert_eq!(calls.get(), 2);
        state.toggle(2);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn selection_hook_fires_on_every_pass_through() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let mut state: TreeState<Rec> =
            TreeState::new(sample()).on_selection_change(move |_| seen.set(seen.get() + 1));

        state.select(2);
        state.toggle_selection(3);
        state.deselect(&2);
        state.clear_selection();
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn select_all_walks_the_whole_tree() {
        let mut state: TreeState<Rec> = TreeState::new(sample());
        state.select_all();
        for id in [1, 2, 3, 4] {
            assert!(state.is_selected(&id));
        }
        assert_eq!(state.selection().len(), 4);
    }

    #[test]
    fn seeded_expansion_and_selection() {
        let expanded: ExpansionState<u32> = [1].into_iter().collect();
        let state: TreeState<Rec> = TreeState::new(sample()).with_expanded(expanded);
        assert!(state.expanded().is_expanded(&1));
        assert!(!state.expanded().is_expanded(&4));
    }

    #[test]
    fn set_items_replaces_wholesale() {
        let mut state: TreeState<Rec> = TreeState::new(sample());
        state.set_items(vec![leaf(42)]);
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].id, 42);
    }
}

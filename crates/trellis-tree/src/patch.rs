//! Move operations and the transient patch queue.
//!
//! Invariants:
//! - Operations are applied in queue order; later operations observe the
//!   structural effects of earlier ones.
//! - `from` is resolved and removed before `to` is resolved, so `to` is read
//!   against the post-removal tree.
//! - No partial application: any resolution failure surfaces the error and
//!   the caller's tree is untouched.

use crate::error::Result;
use crate::node::{Nested, Tree};
use crate::path::TreePath;
use crate::resolve::locate;

/// Relocation of the node at `from` to become a child of the node at `to`.
///
/// A move is functionally a remove at `from` immediately followed by an
/// insert under `to` with the removed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// Address of the node to relocate.
    pub from: TreePath,
    /// Address of the destination parent, read against the post-removal tree.
    pub to: TreePath,
    /// Insert-before position within the destination's children; `None`
    /// appends. Positions past the end clamp to append.
    pub index: Option<usize>,
}

impl Move {
    /// Move the node at `from` under `to`, appended at the end.
    #[must_use]
    pub fn new(from: impl Into<TreePath>, to: impl Into<TreePath>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            index: None,
        }
    }

    /// Pin the insert position within the destination's children.
    #[must_use]
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Apply a single move, returning the new tree.
///
/// The input tree is never mutated; the result shares every node not on the
/// `from`/`to` path chains with it. The moved node itself keeps its identity.
///
/// A move with an empty `to`, or with `from` equal to `to`, is a no-op and
/// returns a tree sharing every node with the input.
///
/// # Errors
///
/// Propagates [`PatchError`](crate::PatchError) from either resolution; the
/// caller's tree is unchanged in that case.
pub fn apply<T: Nested>(tree: &Tree<T>, op: &Move) -> Result<Tree<T>> {
    // A move without a destination, or onto itself, changes nothing.
    if op.to.is_empty() || op.from == op.to {
        return Ok(tree.clone());
    }

    let mut working = tree.clone();

    let moved = locate(&mut working, &op.from)?.remove();

    let mut target = locate(&mut working, &op.to)?;
    let children = target.node_mut().children_mut();
    match op.index {
        Some(index) => children.insert(index.min(children.len()), moved),
        None => children.push(moved),
    }

    Ok(working)
}

/// Ordered buffer of pending moves for one interaction session.
///
/// Accumulate with [`push`](Self::push), then [`commit`](Self::commit) once.
/// Dropping or [`cancel`](Self::cancel)ing an uncommitted queue needs no
/// compensating action because nothing was applied. A queue must not be
/// shared across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchQueue {
    ops: Vec<Move>,
}

impl PatchQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a move.
    pub fn push(&mut self, op: Move) {
        self.ops.push(op);
    }

    /// Number of pending moves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply the pending moves in order, each against the previous result.
    ///
    /// The queue is cleared whether or not the commit succeeds; either way
    /// the session is over.
    ///
    /// # Errors
    ///
    /// The first failing move aborts the commit and the caller's tree is
    /// unchanged; intermediate results are discarded.
    pub fn commit<T: Nested>(&mut self, tree: &Tree<T>) -> Result<Tree<T>> {
        let ops = std::mem::take(&mut self.ops);
        let mut working = tree.clone();
        for op in &ops {
            working = apply(&working, op)?;
        }
        Ok(working)
    }

    /// Discard the pending moves without applying them.
    pub fn cancel(&mut self) {
        self.ops.clear();
    }
}

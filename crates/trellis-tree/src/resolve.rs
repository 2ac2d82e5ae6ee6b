//! Copy-on-write path resolution.
//!
//! [`locate`] walks a path and duplicates exactly the containers and nodes
//! along it, threading the duplicates back into the working tree. Siblings
//! and unrelated subtrees keep their original `Arc`s, so any subtree the walk
//! did not touch stays pointer-identical to its counterpart in the input.
//!
//! Duplication is lazy in both directions: an ancestor is cloned only if its
//! `Arc` is still shared (a second resolution over the same spine reuses the
//! first resolution's copies), and the resolved node itself is cloned only
//! when [`Locator::node_mut`] is actually called.

use std::sync::Arc;

use crate::error::{PatchError, Result};
use crate::node::{Nested, Tree};
use crate::path::TreePath;

/// Resolved position inside a working tree.
///
/// Borrows the sibling sequence holding the node: the root sequence for a
/// length-1 path, otherwise the freshly duplicated parent's children. This is
/// the node/parent-or-none/index triple collapsed into the one thing both
/// callers need, the container to splice.
#[derive(Debug)]
pub struct Locator<'t, T: Nested> {
    siblings: &'t mut Vec<Arc<T>>,
    index: usize,
    has_parent: bool,
}

impl<'t, T: Nested> Locator<'t, T> {
    /// The resolved node.
    #[must_use]
    pub fn node(&self) -> &Arc<T> {
        &self.siblings[self.index]
    }

    /// Mutable access to the resolved node, cloning it out of shared storage
    /// if anything else still holds it.
    pub fn node_mut(&mut self) -> &mut T {
        Arc::make_mut(&mut self.siblings[self.index])
    }

    /// Index of the node within its sibling sequence.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// `false` when the node sits at root level.
    #[must_use]
    pub fn has_parent(&self) -> bool {
        self.has_parent
    }

    /// Detach the node from its sibling sequence; later siblings shift left.
    #[must_use]
    pub fn remove(self) -> Arc<T> {
        self.siblings.remove(self.index)
    }
}

/// Resolve `path` in `tree`, duplicating the spine along the way.
///
/// `tree` must be the caller's working copy. On error it may already hold
/// partially duplicated ancestors and should be discarded; caller-visible
/// trees are never mutated because they are never handed in here.
///
/// # Errors
///
/// [`PatchError::InvalidPath`] for an empty path. [`PatchError::OutOfRange`]
/// when an index exceeds the sequence at its depth; a node without a child
/// sequence resolves as a zero-length sequence, so walking into a leaf fails
/// the same way.
pub fn locate<'t, T: Nested>(tree: &'t mut Tree<T>, path: &TreePath) -> Result<Locator<'t, T>> {
    let (ancestors, last) = path.split_last().ok_or(PatchError::InvalidPath)?;

    let mut siblings: &'t mut Vec<Arc<T>> = tree;
    for (depth, &index) in ancestors.iter().enumerate() {
        let len = siblings.len();
        let node = siblings
            .get_mut(index)
            .ok_or(PatchError::OutOfRange { depth, index, len })?;
        siblings = Arc::make_mut(node).children_mut();
    }

    let len = siblings.len();
    if last >= len {
        return Err(PatchError::OutOfRange {
            depth: path.len() - 1,
            index: last,
            len,
        });
    }

    Ok(Locator {
        siblings,
        index: last,
        has_parent: !ancestors.is_empty(),
    })
}

//! Caller-implemented seams: the typed children accessor and key extraction.
//!
//! The engine never inspects node payloads. It touches exactly two things:
//! the designated children sequence (through [`Nested`]) and the identity key
//! (through [`Keyed`]). Everything else in a node is opaque and travels
//! untouched through every patch.

use std::hash::Hash;
use std::sync::Arc;

/// Ordered root sequence of a tree.
///
/// Child sequences hold `Arc<T>` so that copy-on-write duplicates only the
/// spine of an edit: siblings and unrelated subtrees keep their original
/// allocation across a patch.
pub type Tree<T> = Vec<Arc<T>>;

/// A record with a designated ordered-children sequence.
///
/// This is the strongly typed replacement for a "children field name": the
/// implementation decides which field holds the child sequence, and the
/// engine addresses it only through these two methods. The sequence is always
/// ordered, never a keyed map.
pub trait Nested: Clone {
    /// The ordered children, or `None` when the node carries no child
    /// sequence at all. An empty sequence and an absent one both read as a
    /// leaf.
    fn children(&self) -> Option<&[Arc<Self>]>;

    /// Mutable access to the child sequence, materializing an empty one when
    /// the node had none.
    fn children_mut(&mut self) -> &mut Vec<Arc<Self>>;
}

/// Identity extraction for expansion and selection tracking.
///
/// Keys never feed the patch algorithm, which addresses nodes purely by
/// position; they exist so expansion and selection state stay meaningful
/// after any reorder.
pub trait Keyed {
    /// Opaque, comparable node identity.
    type Key: Clone + Eq + Hash;

    /// The key of this node.
    fn key(&self) -> Self::Key;
}

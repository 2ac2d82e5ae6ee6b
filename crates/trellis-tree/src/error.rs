//! Errors surfaced by path resolution and patch application.

use thiserror::Error;

/// Failure modes of locating a path or applying a move.
///
/// No operation is applied partially: on any error the caller's tree is
/// unchanged. Expansion and selection updates never produce these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PatchError {
    /// A path index exceeded the bounds of the sequence at some depth.
    #[error("index {index} out of range at depth {depth} (sequence holds {len} items)")]
    OutOfRange {
        /// Zero-based depth within the path at which resolution failed.
        depth: usize,
        /// The offending index.
        index: usize,
        /// Length of the sequence at that depth.
        len: usize,
    },
    /// An empty path was given where a node address is required.
    #[error("empty path cannot address a node")]
    InvalidPath,
}

pub type Result<T> = std::result::Result<T, PatchError>;

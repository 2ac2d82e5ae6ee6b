#![forbid(unsafe_code)]

//! Tree patch engine for interactive reordering of hierarchical data.
//!
//! Given an ordered, nested collection and a positional move operation, the
//! engine produces a new tree that reflects the move while every untouched
//! subtree keeps its original identity: duplication is copy-on-write along
//! the affected paths only, so drag-and-drop reordering never costs the
//! caller reference stability for unrelated subtrees and never mutates
//! caller-owned data in place.
//!
//! Expansion and selection are tracked as identity-keyed sets decoupled from
//! tree shape, so they survive any reorder. Everything is synchronous and
//! single-writer; rendering and gesture capture live with the caller.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trellis_tree::{Keyed, Nested, TreeState};
//!
//! #[derive(Clone)]
//! struct Item {
//!     id: u32,
//!     children: Vec<Arc<Item>>,
//! }
//!
//! impl Nested for Item {
//!     fn children(&self) -> Option<&[Arc<Self>]> {
//!         Some(self.children.as_slice())
//!     }
//!
//!     fn children_mut(&mut self) -> &mut Vec<Arc<Self>> {
//!         &mut self.children
//!     }
//! }
//!
//! impl Keyed for Item {
//!     type Key = u32;
//!
//!     fn key(&self) -> u32 {
//!         self.id
//!     }
//! }
//!
//! let item = |id| Arc::new(Item { id, children: Vec::new() });
//! let tree = vec![
//!     Arc::new(Item { id: 1, children: vec![item(2), item(3)] }),
//!     item(4),
//! ];
//!
//! let mut state: TreeState<Item> = TreeState::new(tree);
//! // Move node 2 out from under node 1 to become node 4's child.
//! state.reorder([0, 0], [1], None)?;
//! assert_eq!(state.items()[1].children[0].id, 2);
//!
//! // Expansion is keyed by identity, so it survives the move.
//! state.open(2);
//! state.reorder([1, 0], [0], Some(0))?;
//! assert!(state.expanded().is_expanded(&2));
//! # Ok::<(), trellis_tree::PatchError>(())
//! ```

pub mod engine;
pub mod error;
pub mod node;
pub mod patch;
pub mod path;
pub mod resolve;
pub mod selection;
pub mod state;

pub use engine::{Snapshot, TreeState};
pub use error::{PatchError, Result};
pub use node::{Keyed, Nested, Tree};
pub use patch::{Move, PatchQueue, apply};
pub use path::TreePath;
pub use resolve::{Locator, locate};
pub use selection::{MultiSelection, SelectionMode, SelectionModel};
pub use state::ExpansionState;

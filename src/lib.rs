//! An ordered set backed by an AVL tree whose nodes live in an arena.
//!
//! Every node carries a three-valued balance indicator instead of a height.
//! Inserts and removes walk down recursively and report back up whether the
//! subtree grew or shrank, rebalancing with single or double rotations where
//! an indicator would overflow.
//!
//! ```
//! use arena_avl::AvlTreeSet;
//!
//! let mut set = AvlTreeSet::new();
//! for value in [10, 20, 30] {
//!     set.insert(value);
//! }
//! assert_eq!(set.structure_string(), "\n  1: 20\n  2: 10 30");
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
//! ```

mod balance;
mod cursor;
mod error;
mod iter;
mod render;
mod set;
mod tree;

pub use cursor::Cursor;
pub use error::{Error, Result};
pub use iter::Iter;
pub use set::{AvlTreeSet, Lookup};

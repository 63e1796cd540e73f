//! Ordered map, set and multiset collections built on a single arena-backed red black tree.
//!
//! Nodes live in a `TypedArena` and refer to each other through `Handle`s, so parent links are
//! plain indices rather than owning pointers. Node allocation is fallible: every operation that
//! allocates returns `Error::AllocationFailed` instead of aborting, and collections built with a
//! node limit report the failure once the limit is reached.
//!
//! # Examples
//!
//! ```
//! use rb_collections::red_black_tree::{RedBlackMap, RedBlackMultiSet};
//!
//! let mut map = RedBlackMap::new();
//! map.insert(2, "b")?;
//! map.insert(1, "a")?;
//! assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &2]);
//!
//! let mut set = RedBlackMultiSet::new();
//! set.insert_many(vec![3, 1, 3])?;
//! assert_eq!(set.count(&3), 2);
//! # Ok::<(), rb_collections::Error>(())
//! ```

mod entry;
pub mod arena;
pub mod error;
pub mod red_black_tree;

pub use crate::error::{Error, Result};

//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! A single arena-backed tree engine stores every node. `RedBlackMap` and `RedBlackSet` keep
//! keys unique while `RedBlackMultiSet` keeps every occurrence of a key in insertion order.

mod iter;
mod map;
mod multiset;
mod node;
mod serialize;
mod set;
mod tree;

pub use self::iter::{
    Cursor, CursorMut, IntoIter, Iter, Keys, Range, SetCursorMut, SetIntoIter, SetIter, SetRange,
    Values,
};
pub use self::map::RedBlackMap;
pub use self::multiset::RedBlackMultiSet;
pub use self::set::RedBlackSet;

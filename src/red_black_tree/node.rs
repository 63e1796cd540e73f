use crate::arena::Handle;
use crate::entry::Entry;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// The child handles own their subtrees through the arena; `parent` is a back-reference used only
/// to walk upwards during traversal and rebalancing.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub color: Color,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U) -> Self {
        Node {
            entry: Entry { key, value },
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Returns the child on the given side: the left child if `left` is `true`.
    pub fn child(&self, left: bool) -> Option<Handle> {
        if left {
            self.left
        } else {
            self.right
        }
    }

    pub fn child_mut(&mut self, left: bool) -> &mut Option<Handle> {
        if left {
            &mut self.left
        } else {
            &mut self.right
        }
    }
}

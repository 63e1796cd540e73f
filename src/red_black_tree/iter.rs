use crate::arena::{Handle, TypedArena};
use crate::red_black_tree::node::Node;
use crate::red_black_tree::tree::Tree;
use std::fmt;
use std::ptr;
use std::vec;

/// A position in a red black collection.
///
/// A cursor either points at an element or at the end position, which sits between the last and
/// the first element. Moving forward from the end position wraps to the first element and moving
/// backward from it wraps to the last element. Accessors return `None` at the end position.
pub struct Cursor<'a, T, U> {
    tree: &'a Tree<T, U>,
    handle: Option<Handle>,
}

impl<'a, T, U> Cursor<'a, T, U> {
    pub(crate) fn new(tree: &'a Tree<T, U>, handle: Option<Handle>) -> Self {
        Cursor { tree, handle }
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.handle.is_none()
    }

    /// Returns the key at the cursor.
    pub fn key(&self) -> Option<&'a T> {
        let tree = self.tree;
        self.handle.map(|handle| &tree.entry(handle).key)
    }

    /// Returns the value at the cursor.
    pub fn value(&self) -> Option<&'a U> {
        let tree = self.tree;
        self.handle.map(|handle| &tree.entry(handle).value)
    }

    /// Returns the key-value pair at the cursor.
    pub fn get(&self) -> Option<(&'a T, &'a U)> {
        let tree = self.tree;
        self.handle.map(|handle| {
            let entry = tree.entry(handle);
            (&entry.key, &entry.value)
        })
    }

    /// Moves the cursor to the next element in-order.
    pub fn move_next(&mut self) {
        self.handle = match self.handle {
            Some(handle) => self.tree.successor(handle),
            None => self.tree.first(),
        };
    }

    /// Moves the cursor to the previous element in-order.
    pub fn move_prev(&mut self) {
        self.handle = match self.handle {
            Some(handle) => self.tree.predecessor(handle),
            None => self.tree.last(),
        };
    }
}

impl<'a, T, U> Clone for Cursor<'a, T, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, U> Copy for Cursor<'a, T, U> {}

impl<'a, T, U> PartialEq for Cursor<'a, T, U> {
    fn eq(&self, other: &Cursor<'a, T, U>) -> bool {
        ptr::eq(self.tree, other.tree) && self.handle == other.handle
    }
}

impl<'a, T, U> Eq for Cursor<'a, T, U> {}

impl<'a, T, U> fmt::Debug for Cursor<'a, T, U>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// A position in a red black collection that may remove the element it points at or modify its
/// value.
///
/// Like `Cursor`, a mutable cursor either points at an element or at the end position and wraps
/// around when moved past either end.
pub struct CursorMut<'a, T, U> {
    tree: &'a mut Tree<T, U>,
    handle: Option<Handle>,
}

impl<'a, T, U> CursorMut<'a, T, U> {
    pub(crate) fn new(tree: &'a mut Tree<T, U>, handle: Option<Handle>) -> Self {
        CursorMut { tree, handle }
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.handle.is_none()
    }

    /// Returns the key at the cursor.
    pub fn key(&self) -> Option<&T> {
        let tree = &*self.tree;
        self.handle.map(|handle| &tree.entry(handle).key)
    }

    /// Returns the value at the cursor.
    pub fn value(&self) -> Option<&U> {
        let tree = &*self.tree;
        self.handle.map(|handle| &tree.entry(handle).value)
    }

    /// Returns a mutable reference to the value at the cursor.
    pub fn value_mut(&mut self) -> Option<&mut U> {
        match self.handle {
            Some(handle) => Some(self.tree.value_mut(handle)),
            None => None,
        }
    }

    /// Returns a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, T, U> {
        Cursor::new(&*self.tree, self.handle)
    }

    /// Moves the cursor to the next element in-order.
    pub fn move_next(&mut self) {
        self.handle = match self.handle {
            Some(handle) => self.tree.successor(handle),
            None => self.tree.first(),
        };
    }

    /// Moves the cursor to the previous element in-order.
    pub fn move_prev(&mut self) {
        self.handle = match self.handle {
            Some(handle) => self.tree.predecessor(handle),
            None => self.tree.last(),
        };
    }

    /// Removes the element at the cursor and returns it. The cursor moves to the element that
    /// followed the removed one. Returns `None` and does nothing at the end position.
    pub fn remove_current(&mut self) -> Option<(T, U)> {
        let handle = self.handle?;
        let (entry, next) = self.tree.remove_and_step(handle);
        self.handle = next;
        Some(entry.into_pair())
    }
}

impl<'a, T, U> fmt::Debug for CursorMut<'a, T, U>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.as_cursor().get()).finish()
    }
}

/// An iterator over the entries of a red black collection.
///
/// This iterator traverses the elements in-order by following parent links, so it needs no
/// auxiliary stack.
pub struct Iter<'a, T, U> {
    tree: &'a Tree<T, U>,
    front: Option<Handle>,
    back: Option<Handle>,
    len: usize,
}

impl<'a, T, U> Iter<'a, T, U> {
    pub(crate) fn new(tree: &'a Tree<T, U>) -> Self {
        Iter {
            tree,
            front: tree.first(),
            back: tree.last(),
            len: tree.len(),
        }
    }
}

impl<'a, T, U> Iterator for Iter<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.front?;
        self.len -= 1;
        self.front = tree.successor(handle);
        let entry = tree.entry(handle);
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T, U> DoubleEndedIterator for Iter<'a, T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.back?;
        self.len -= 1;
        self.back = tree.predecessor(handle);
        let entry = tree.entry(handle);
        Some((&entry.key, &entry.value))
    }
}

impl<'a, T, U> ExactSizeIterator for Iter<'a, T, U> {}

impl<'a, T, U> Clone for Iter<'a, T, U> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            len: self.len,
        }
    }
}

/// An iterator over a contiguous in-order run of entries, bounded by a first element and the
/// element just past the run.
pub struct Range<'a, T, U> {
    tree: &'a Tree<T, U>,
    front: Option<Handle>,
    back: Option<Handle>,
}

impl<'a, T, U> Range<'a, T, U> {
    pub(crate) fn new(tree: &'a Tree<T, U>, lower: Option<Handle>, upper: Option<Handle>) -> Self {
        if lower == upper {
            return Range {
                tree,
                front: None,
                back: None,
            };
        }
        let back = match upper {
            Some(upper) => tree.predecessor(upper),
            None => tree.last(),
        };
        Range {
            tree,
            front: lower,
            back,
        }
    }
}

impl<'a, T, U> Iterator for Range<'a, T, U> {
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let handle = self.front?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = tree.successor(handle);
        }
        let entry = tree.entry(handle);
        Some((&entry.key, &entry.value))
    }
}

impl<'a, T, U> DoubleEndedIterator for Range<'a, T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let handle = self.back?;
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = tree.predecessor(handle);
        }
        let entry = tree.entry(handle);
        Some((&entry.key, &entry.value))
    }
}

/// An owning iterator over the entries of a red black collection.
///
/// This iterator yields owned entries in-order.
pub struct IntoIter<T, U> {
    arena: TypedArena<Node<T, U>>,
    order: vec::IntoIter<Handle>,
}

impl<T, U> IntoIter<T, U> {
    pub(crate) fn new(arena: TypedArena<Node<T, U>>, order: Vec<Handle>) -> Self {
        IntoIter {
            arena,
            order: order.into_iter(),
        }
    }
}

impl<T, U> Iterator for IntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        let IntoIter { arena, order } = self;
        order.next().map(|handle| arena.free(handle).entry.into_pair())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T, U> DoubleEndedIterator for IntoIter<T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let IntoIter { arena, order } = self;
        order.next_back().map(|handle| arena.free(handle).entry.into_pair())
    }
}

impl<T, U> ExactSizeIterator for IntoIter<T, U> {}

/// An iterator over the keys of a `RedBlackMap<T, U>`.
pub struct Keys<'a, T, U> {
    pub(crate) iter: Iter<'a, T, U>,
}

impl<'a, T, U> Iterator for Keys<'a, T, U> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|pair| pair.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T, U> DoubleEndedIterator for Keys<'a, T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|pair| pair.0)
    }
}

/// An iterator over the values of a `RedBlackMap<T, U>`.
pub struct Values<'a, T, U> {
    pub(crate) iter: Iter<'a, T, U>,
}

impl<'a, T, U> Iterator for Values<'a, T, U> {
    type Item = &'a U;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|pair| pair.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T, U> DoubleEndedIterator for Values<'a, T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|pair| pair.1)
    }
}

/// An iterator for `RedBlackSet<T>` and `RedBlackMultiSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct SetIter<'a, T> {
    pub(crate) iter: Iter<'a, T, ()>,
}

impl<'a, T> Iterator for SetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|pair| pair.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T> DoubleEndedIterator for SetIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|pair| pair.0)
    }
}

impl<'a, T> ExactSizeIterator for SetIter<'a, T> {}

/// An owning iterator for `RedBlackSet<T>` and `RedBlackMultiSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct SetIntoIter<T> {
    pub(crate) iter: IntoIter<T, ()>,
}

impl<T> Iterator for SetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|pair| pair.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> DoubleEndedIterator for SetIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(|pair| pair.0)
    }
}

impl<T> ExactSizeIterator for SetIntoIter<T> {}

/// A mutable cursor for `RedBlackSet<T>` and `RedBlackMultiSet<T>`.
pub struct SetCursorMut<'a, T> {
    pub(crate) cursor: CursorMut<'a, T, ()>,
}

impl<'a, T> SetCursorMut<'a, T> {
    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.cursor.is_end()
    }

    /// Returns the key at the cursor.
    pub fn key(&self) -> Option<&T> {
        self.cursor.key()
    }

    /// Moves the cursor to the next key in-order.
    pub fn move_next(&mut self) {
        self.cursor.move_next();
    }

    /// Moves the cursor to the previous key in-order.
    pub fn move_prev(&mut self) {
        self.cursor.move_prev();
    }

    /// Removes the key at the cursor and returns it. The cursor moves to the key that followed
    /// the removed one.
    pub fn remove_current(&mut self) -> Option<T> {
        self.cursor.remove_current().map(|pair| pair.0)
    }
}

/// An iterator over a contiguous run of keys of a `RedBlackMultiSet<T>`.
pub struct SetRange<'a, T> {
    pub(crate) range: Range<'a, T, ()>,
}

impl<'a, T> Iterator for SetRange<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|pair| pair.0)
    }
}

impl<'a, T> DoubleEndedIterator for SetRange<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(|pair| pair.0)
    }
}

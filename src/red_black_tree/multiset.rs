use crate::error::{Error, Result};
use crate::red_black_tree::iter::{
    Cursor, CursorMut, Iter, Range, SetCursorMut, SetIntoIter, SetIter, SetRange,
};
use crate::red_black_tree::tree::{self, Tree};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// An ordered multiset implemented using a red black tree.
///
/// Equal keys are kept in insertion order: a newly inserted key is placed after every key that
/// compares equal to it.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackMultiSet;
///
/// let mut set = RedBlackMultiSet::new();
/// set.insert(1).unwrap();
/// set.insert(1).unwrap();
/// set.insert(2).unwrap();
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.count(&1), 2);
///
/// assert_eq!(set.remove(&1), Some(1));
/// assert_eq!(set.count(&1), 1);
/// ```
pub struct RedBlackMultiSet<T> {
    tree: Tree<T, ()>,
}

impl<T> RedBlackMultiSet<T> {
    /// Constructs a new, empty `RedBlackMultiSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiSet;
    ///
    /// let set: RedBlackMultiSet<u32> = RedBlackMultiSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(tree::DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackMultiSet<T>` whose nodes are allocated `chunk_size` at a
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackMultiSet {
            tree: Tree::new(chunk_size),
        }
    }

    /// Constructs a new, empty `RedBlackMultiSet<T>` that holds at most `limit` keys.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_limit(chunk_size: usize, limit: usize) -> Self {
        RedBlackMultiSet {
            tree: Tree::with_limit(chunk_size, limit),
        }
    }

    /// Inserts a key into the multiset after every key equal to it and returns a cursor at the
    /// new key.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if a new node cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiSet;
    ///
    /// let mut set = RedBlackMultiSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    ///
    /// let mut cursor = set.insert(1).unwrap();
    /// cursor.move_next();
    /// assert_eq!(cursor.key(), Some(&2));
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn insert(&mut self, key: T) -> Result<Cursor<'_, T, ()>>
    where
        T: Ord,
    {
        let handle = self.tree.insert(key, ())?;
        Ok(Cursor::new(&self.tree, Some(handle)))
    }

    /// Inserts every key of an iterator.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if a new node cannot be allocated. Keys before the
    /// failing one remain inserted.
    pub fn insert_many<I>(&mut self, iter: I) -> Result<()>
    where
        T: Ord,
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key)?;
        }
        Ok(())
    }

    /// Removes one occurrence of a key from the multiset, returning it if it existed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiSet;
    ///
    /// let mut set = RedBlackMultiSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key).map(|entry| entry.key)
    }

    /// Removes every occurrence of a key from the multiset, returning how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiSet;
    ///
    /// let mut set = RedBlackMultiSet::new();
    /// set.insert_many(vec![1, 2, 1, 1]).unwrap();
    /// assert_eq!(set.remove_all(&1), 3);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn remove_all<V>(&mut self, key: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut removed = 0;
        while self.tree.remove(key).is_some() {
            removed += 1;
        }
        removed
    }

    /// Returns the number of occurrences of a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiSet;
    ///
    /// let mut set = RedBlackMultiSet::new();
    /// set.insert_many(vec![3, 1, 3, 5, 3]).unwrap();
    /// assert_eq!(set.count(&3), 3);
    /// assert_eq!(set.count(&4), 0);
    /// ```
    pub fn count<V>(&self, key: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.count(key)
    }

    /// Checks if a key exists in the multiset.
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Returns a cursor at the first occurrence of a key, or at the end position if the key does
    /// not exist.
    pub fn find<V>(&self, key: &V) -> Cursor<'_, T, ()>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.find(key))
    }

    /// Returns a cursor at the first key that is not less than a particular key.
    pub fn lower_bound<V>(&self, key: &V) -> Cursor<'_, T, ()>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.lower_bound(key))
    }

    /// Returns a cursor at the first key that is greater than a particular key.
    pub fn upper_bound<V>(&self, key: &V) -> Cursor<'_, T, ()>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.upper_bound(key))
    }

    /// Returns an iterator over every occurrence of a key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiSet;
    ///
    /// let mut set = RedBlackMultiSet::new();
    /// set.insert_many(vec![3, 1, 3, 5, 3]).unwrap();
    /// assert_eq!(set.equal_range(&3).collect::<Vec<&u32>>(), vec![&3, &3, &3]);
    /// assert_eq!(set.equal_range(&4).next(), None);
    /// ```
    pub fn equal_range<V>(&self, key: &V) -> SetRange<'_, T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let (lower, upper) = self.tree.equal_range(key);
        SetRange {
            range: Range::new(&self.tree, lower, upper),
        }
    }

    /// Returns a cursor at the minimum key, or at the end position if the multiset is empty.
    pub fn begin(&self) -> Cursor<'_, T, ()> {
        Cursor::new(&self.tree, self.tree.first())
    }

    /// Returns a cursor at the end position of the multiset.
    pub fn end(&self) -> Cursor<'_, T, ()> {
        Cursor::new(&self.tree, None)
    }

    /// Returns a mutable cursor at the minimum key, or at the end position if the multiset is
    /// empty.
    pub fn begin_mut(&mut self) -> SetCursorMut<'_, T> {
        let first = self.tree.first();
        SetCursorMut {
            cursor: CursorMut::new(&mut self.tree, first),
        }
    }

    /// Returns a mutable cursor at the first key that is not less than a particular key. Removing
    /// through the cursor removes a single occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiSet;
    ///
    /// let mut set = RedBlackMultiSet::new();
    /// set.insert_many(vec![1, 3, 3, 5]).unwrap();
    ///
    /// let mut cursor = set.lower_bound_mut(&3);
    /// assert_eq!(cursor.remove_current(), Some(3));
    /// assert_eq!(cursor.key(), Some(&3));
    /// assert_eq!(set.count(&3), 1);
    /// ```
    pub fn lower_bound_mut<V>(&mut self, key: &V) -> SetCursorMut<'_, T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let handle = self.tree.lower_bound(key);
        SetCursorMut {
            cursor: CursorMut::new(&mut self.tree, handle),
        }
    }

    /// Returns the number of keys in the multiset, counting every occurrence.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the multiset is empty.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the multiset, removing all keys.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two multisets.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Moves every key of `other` into `self`, leaving `other` empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if a new node cannot be allocated. Keys that were not
    /// moved stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMultiSet;
    ///
    /// let mut set = RedBlackMultiSet::new();
    /// set.insert_many(vec![1, 2]).unwrap();
    /// let mut other = RedBlackMultiSet::new();
    /// other.insert_many(vec![2, 3]).unwrap();
    ///
    /// set.merge(&mut other).unwrap();
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &2, &3]);
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut Self) -> Result<()>
    where
        T: Ord,
    {
        self.tree.merge(&mut other.tree)
    }

    /// Returns the minimum key of the multiset. Returns `None` if the multiset is empty.
    pub fn min(&self) -> Option<&T> {
        self.begin().key()
    }

    /// Returns the maximum key of the multiset. Returns `None` if the multiset is empty.
    pub fn max(&self) -> Option<&T> {
        self.tree
            .last()
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns the minimum key of the multiset.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` if the multiset is empty.
    pub fn first(&self) -> Result<&T> {
        self.min().ok_or(Error::Empty)
    }

    /// Returns the maximum key of the multiset.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` if the multiset is empty.
    pub fn last(&self) -> Result<&T> {
        self.max().ok_or(Error::Empty)
    }

    /// Removes and returns the minimum key. Returns `None` if the multiset is empty.
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first().map(|entry| entry.key)
    }

    /// Removes and returns the maximum key. Returns `None` if the multiset is empty.
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last().map(|entry| entry.key)
    }

    /// Returns a deep copy of the multiset.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        Ok(RedBlackMultiSet {
            tree: self.tree.try_clone()?,
        })
    }

    /// Returns an iterator over the multiset. The iterator will yield keys using in-order
    /// traversal.
    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter {
            iter: Iter::new(&self.tree),
        }
    }
}

impl<T> IntoIterator for RedBlackMultiSet<T> {
    type IntoIter = SetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackMultiSet<T>
where
    T: 'a,
{
    type IntoIter = SetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for RedBlackMultiSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RedBlackMultiSet<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        RedBlackMultiSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T> PartialEq for RedBlackMultiSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackMultiSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackMultiSet<T> where T: Eq {}

impl<T> PartialOrd for RedBlackMultiSet<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &RedBlackMultiSet<T>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T> Ord for RedBlackMultiSet<T>
where
    T: Ord,
{
    fn cmp(&self, other: &RedBlackMultiSet<T>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T> fmt::Debug for RedBlackMultiSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

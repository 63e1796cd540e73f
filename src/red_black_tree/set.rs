use crate::error::{Error, Result};
use crate::red_black_tree::iter::{Cursor, CursorMut, Iter, SetCursorMut, SetIntoIter, SetIter};
use crate::red_black_tree::tree::{self, Tree};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// An ordered set implemented using a red black tree.
///
/// Keys are unique: inserting a key that is already in the set fails and leaves the set
/// unchanged.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0).unwrap();
/// set.insert(3).unwrap();
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(RedBlackSet::min(&set), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct RedBlackSet<T> {
    tree: Tree<T, ()>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(tree::DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackSet<T>` whose nodes are allocated `chunk_size` at a
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackSet {
            tree: Tree::new(chunk_size),
        }
    }

    /// Constructs a new, empty `RedBlackSet<T>` that holds at most `limit` keys.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::with_limit(16, 1);
    /// assert!(set.insert(1).is_ok());
    /// assert!(set.insert(2).is_err());
    /// ```
    pub fn with_limit(chunk_size: usize, limit: usize) -> Self {
        RedBlackSet {
            tree: Tree::with_limit(chunk_size, limit),
        }
    }

    /// Inserts a key into the set. Returns a cursor at the key and `true` if the key was inserted,
    /// or `false` if it already exists.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if a new node cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1).unwrap().1);
    /// assert!(set.contains(&1));
    ///
    /// let (cursor, inserted) = set.insert(1).unwrap();
    /// assert_eq!(cursor.key(), Some(&1));
    /// assert!(!inserted);
    /// ```
    pub fn insert(&mut self, key: T) -> Result<(Cursor<'_, T, ()>, bool)>
    where
        T: Ord,
    {
        if let Some(handle) = self.tree.find(&key) {
            return Ok((Cursor::new(&self.tree, Some(handle)), false));
        }
        let handle = self.tree.insert(key, ())?;
        Ok((Cursor::new(&self.tree, Some(handle)), true))
    }

    /// Inserts every key of an iterator, returning whether each key was inserted.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if a new node cannot be allocated. Keys before the
    /// failing one remain inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert_eq!(set.insert_many(vec![1, 2, 1]), Ok(vec![true, true, false]));
    /// ```
    pub fn insert_many<I>(&mut self, iter: I) -> Result<Vec<bool>>
    where
        T: Ord,
        I: IntoIterator<Item = T>,
    {
        iter.into_iter()
            .map(|key| self.insert(key).map(|(_, inserted)| inserted))
            .collect()
    }

    /// Removes a key from the set. If the key exists in the set, it will return the associated
    /// key. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
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

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Returns a cursor at a particular key, or at the end position if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.find(&1).key(), Some(&1));
    /// assert!(set.find(&2).is_end());
    /// ```
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

    /// Returns a cursor at the minimum key, or at the end position if the set is empty.
    pub fn begin(&self) -> Cursor<'_, T, ()> {
        Cursor::new(&self.tree, self.tree.first())
    }

    /// Returns a cursor at the end position of the set.
    pub fn end(&self) -> Cursor<'_, T, ()> {
        Cursor::new(&self.tree, None)
    }

    /// Returns a mutable cursor at the minimum key, or at the end position if the set is empty.
    pub fn begin_mut(&mut self) -> SetCursorMut<'_, T> {
        let first = self.tree.first();
        SetCursorMut {
            cursor: CursorMut::new(&mut self.tree, first),
        }
    }

    /// Returns a mutable cursor at the first key that is not less than a particular key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert_many(vec![1, 3, 5]).unwrap();
    ///
    /// let mut cursor = set.lower_bound_mut(&2);
    /// assert_eq!(cursor.remove_current(), Some(3));
    /// assert_eq!(cursor.key(), Some(&5));
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

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two sets.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Moves every key of `other` into `self` and leaves `other` empty. Keys already in `self`
    /// are dropped from `other`.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if a new node cannot be allocated. Keys that were not
    /// moved yet stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert_many(vec![1, 2]).unwrap();
    /// let mut other = RedBlackSet::new();
    /// other.insert_many(vec![2, 3]).unwrap();
    ///
    /// set.merge(&mut other).unwrap();
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut Self) -> Result<()>
    where
        T: Ord,
    {
        self.tree.merge_unique(&mut other.tree)
    }

    /// Returns a key in the set that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .floor(key)
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns a key in the set that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.lower_bound(key).key()
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(RedBlackSet::min(&set), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.begin().key()
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(RedBlackSet::max(&set), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree
            .last()
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns the minimum key of the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` if the set is empty.
    pub fn first(&self) -> Result<&T> {
        self.min().ok_or(Error::Empty)
    }

    /// Returns the maximum key of the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` if the set is empty.
    pub fn last(&self) -> Result<&T> {
        self.max().ok_or(Error::Empty)
    }

    /// Removes and returns the minimum key. Returns `None` if the set is empty.
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.pop_first().map(|entry| entry.key)
    }

    /// Removes and returns the maximum key. Returns `None` if the set is empty.
    pub fn pop_last(&mut self) -> Option<T> {
        self.tree.pop_last().map(|entry| entry.key)
    }

    /// Returns a deep copy of the set.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
    {
        Ok(RedBlackSet {
            tree: self.tree.try_clone()?,
        })
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter {
            iter: Iter::new(&self.tree),
        }
    }
}

impl<T> IntoIterator for RedBlackSet<T> {
    type IntoIter = SetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        SetIntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = SetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for RedBlackSet<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        RedBlackSet {
            tree: self.tree.clone(),
        }
    }
}

impl<T> PartialEq for RedBlackSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for RedBlackSet<T> where T: Eq {}

impl<T> PartialOrd for RedBlackSet<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &RedBlackSet<T>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T> Ord for RedBlackSet<T>
where
    T: Ord,
{
    fn cmp(&self, other: &RedBlackSet<T>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackSet;
    use crate::error::Error;

    fn set_of(keys: &[u32]) -> RedBlackSet<u32> {
        let mut set = RedBlackSet::new();
        set.insert_many(keys.iter().cloned()).unwrap();
        set
    }

    #[test]
    fn test_len_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: RedBlackSet<u32> = RedBlackSet::new();
        assert_eq!(RedBlackSet::min(&set), None);
        assert_eq!(RedBlackSet::max(&set), None);
        assert_eq!(set.first(), Err(Error::Empty));
        assert_eq!(set.last(), Err(Error::Empty));
    }

    #[test]
    fn test_insert() {
        let mut set = RedBlackSet::new();
        let (cursor, inserted) = set.insert(1).unwrap();
        assert_eq!(cursor.key(), Some(&1));
        assert!(inserted);
        assert!(set.contains(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = RedBlackSet::new();
        assert_eq!(set.insert_many(vec![1, 2]), Ok(vec![true, true]));
        let (mut cursor, inserted) = set.insert(1).unwrap();
        assert!(!inserted);
        cursor.move_next();
        assert_eq!(cursor.key(), Some(&2));
        set.remove(&2);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = RedBlackSet::new();
        set.insert(1).unwrap();
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
    }

    #[test]
    fn test_remove_absent() {
        let mut set = set_of(&[1, 2, 3]);
        let before = set.clone();
        assert_eq!(set.remove(&4), None);
        assert_eq!(set, before);
    }

    #[test]
    fn test_min_max() {
        let set = set_of(&[1, 3, 5]);
        assert_eq!(RedBlackSet::min(&set), Some(&1));
        assert_eq!(RedBlackSet::max(&set), Some(&5));
        assert_eq!(set.first(), Ok(&1));
        assert_eq!(set.last(), Ok(&5));
    }

    #[test]
    fn test_floor_ceil() {
        let set = set_of(&[1, 3, 5]);

        assert_eq!(set.floor(&0), None);
        assert_eq!(set.floor(&2), Some(&1));
        assert_eq!(set.floor(&4), Some(&3));
        assert_eq!(set.floor(&6), Some(&5));

        assert_eq!(set.ceil(&0), Some(&1));
        assert_eq!(set.ceil(&2), Some(&3));
        assert_eq!(set.ceil(&4), Some(&5));
        assert_eq!(set.ceil(&6), None);
    }

    #[test]
    fn test_bounds() {
        let set = set_of(&[1, 3, 5, 7]);
        assert_eq!(set.lower_bound(&4).key(), Some(&5));
        assert_eq!(set.lower_bound(&5).key(), Some(&5));
        assert!(set.lower_bound(&8).is_end());
        assert_eq!(set.upper_bound(&5).key(), Some(&7));
        assert!(set.find(&4).is_end());
    }

    #[test]
    fn test_merge() {
        let mut set = set_of(&[1, 3]);
        let mut other = set_of(&[2, 3, 4]);
        set.merge(&mut other).unwrap();
        assert_eq!(set, set_of(&[1, 2, 3, 4]));
        assert!(other.is_empty());
        assert_eq!(other.iter().next(), None);
    }

    #[test]
    fn test_merge_allocation_failure() {
        let mut set = RedBlackSet::with_limit(4, 2);
        set.insert(3).unwrap();
        let mut other = set_of(&[1, 3, 5]);
        assert_eq!(
            set.merge(&mut other),
            Err(Error::AllocationFailed { limit: Some(2) }),
        );
        assert_eq!(set, set_of(&[1, 3]));
        assert_eq!(other, set_of(&[5]));
    }

    #[test]
    fn test_cursor_mut() {
        let mut set = set_of(&[1, 2, 3, 4, 5, 6]);
        let mut cursor = set.begin_mut();
        while let Some(key) = cursor.key().cloned() {
            if key % 3 == 0 {
                assert_eq!(cursor.remove_current(), Some(key));
            } else {
                cursor.move_next();
            }
        }
        cursor.move_prev();
        assert_eq!(cursor.key(), Some(&5));
        assert_eq!(set, set_of(&[1, 2, 4, 5]));
    }

    #[test]
    fn test_swap() {
        let mut set = set_of(&[1]);
        let mut other = set_of(&[2, 3]);
        set.swap(&mut other);
        assert_eq!(set, set_of(&[2, 3]));
        assert_eq!(other, set_of(&[1]));
    }

    #[test]
    fn test_pop_first_last() {
        let mut set = set_of(&[1, 2, 3]);
        assert_eq!(set.pop_first(), Some(1));
        assert_eq!(set.pop_last(), Some(3));
        assert_eq!(set.pop_first(), Some(2));
        assert_eq!(set.pop_last(), None);
    }

    #[test]
    fn test_clone_independence() {
        let set = set_of(&[1, 2, 3]);
        let mut clone = set.clone();
        clone.insert(4).unwrap();
        clone.remove(&1);
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
        assert_eq!(clone.iter().collect::<Vec<&u32>>(), vec![&2, &3, &4]);
    }

    #[test]
    fn test_ordering() {
        assert!(set_of(&[1, 2]) < set_of(&[1, 3]));
        assert!(set_of(&[1, 2]) < set_of(&[1, 2, 3]));
        assert!(set_of(&[2]) > set_of(&[1, 5]));
        assert!(set_of(&[1, 2]) <= set_of(&[1, 2]));
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", set_of(&[2, 1])), "{1, 2}");
    }

    #[test]
    fn test_into_iter() {
        let set = set_of(&[1, 5, 3]);
        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let set = set_of(&[1, 5, 3]);
        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!(set.iter().rev().collect::<Vec<&u32>>(), vec![&5, &3, &1]);
    }
}

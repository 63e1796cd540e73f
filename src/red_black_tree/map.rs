use crate::error::{Error, Result};
use crate::red_black_tree::iter::{Cursor, CursorMut, IntoIter, Iter, Keys, Values};
use crate::red_black_tree::tree::{self, Tree};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors each node red or black. No
/// red node has a red child and every path from a node to an empty subtree passes through the same
/// number of black nodes, which bounds the height of the tree by twice the logarithm of its size.
///
/// Keys are unique: `insert` refuses to replace an existing entry, while `insert_or_assign`
/// overwrites the value in place.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1).unwrap();
/// map.insert(3, 4).unwrap();
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(RedBlackMap::min(&map), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct RedBlackMap<T, U> {
    tree: Tree<T, U>,
}

impl<T, U> RedBlackMap<T, U> {
    /// Constructs a new, empty `RedBlackMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(tree::DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `RedBlackMap<T, U>` whose nodes are allocated `chunk_size` at a
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::with_chunk_size(1024);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        RedBlackMap {
            tree: Tree::new(chunk_size),
        }
    }

    /// Constructs a new, empty `RedBlackMap<T, U>` that holds at most `limit` entries. Insertions
    /// past the limit fail with `Error::AllocationFailed`.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::with_limit(16, 1);
    /// assert!(map.insert(1, 1).is_ok());
    /// assert!(map.insert(2, 2).is_err());
    /// ```
    pub fn with_limit(chunk_size: usize, limit: usize) -> Self {
        RedBlackMap {
            tree: Tree::with_limit(chunk_size, limit),
        }
    }

    /// Inserts a key-value pair into the map. Returns a cursor at the entry with the key and
    /// `true` if the pair was inserted, or `false` if the key already exists, in which case the map
    /// is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if a new node cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let (cursor, inserted) = map.insert(1, 1).unwrap();
    /// assert_eq!(cursor.get(), Some((&1, &1)));
    /// assert!(inserted);
    ///
    /// let (cursor, inserted) = map.insert(1, 2).unwrap();
    /// assert_eq!(cursor.value(), Some(&1));
    /// assert!(!inserted);
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Result<(Cursor<'_, T, U>, bool)>
    where
        T: Ord,
    {
        if let Some(handle) = self.tree.find(&key) {
            return Ok((Cursor::new(&self.tree, Some(handle)), false));
        }
        let handle = self.tree.insert(key, value)?;
        Ok((Cursor::new(&self.tree, Some(handle)), true))
    }

    /// Inserts a key-value pair into the map, or replaces the value if the key already exists.
    /// Returns the replaced value. Replacing a value does not change the shape of the tree.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if a new node cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert_or_assign(1, 1), Ok(None));
    /// assert_eq!(map.insert_or_assign(1, 2), Ok(Some(1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert_or_assign(&mut self, key: T, value: U) -> Result<Option<U>>
    where
        T: Ord,
    {
        match self.tree.find(&key) {
            Some(handle) => Ok(Some(mem::replace(self.tree.value_mut(handle), value))),
            None => {
                self.tree.insert(key, value)?;
                Ok(None)
            },
        }
    }

    /// Inserts every key-value pair of an iterator, returning whether each pair was inserted.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if a new node cannot be allocated. Pairs before the
    /// failing one remain inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert_many(vec![(1, 1), (2, 2), (1, 3)]), Ok(vec![true, true, false]));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn insert_many<I>(&mut self, iter: I) -> Result<Vec<bool>>
    where
        T: Ord,
        I: IntoIterator<Item = (T, U)>,
    {
        iter.into_iter()
            .map(|(key, value)| self.insert(key, value).map(|(_, inserted)| inserted))
            .collect()
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key).map(|entry| entry.into_pair())
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.contains(key)
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .find(key)
            .map(|handle| &self.tree.entry(handle).value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        match self.tree.find(key) {
            Some(handle) => Some(self.tree.value_mut(handle)),
            None => None,
        }
    }

    /// Returns an immutable reference to the value associated with a particular key.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyNotFound` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    /// use rb_collections::Error;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.at(&1), Ok(&1));
    /// assert_eq!(map.at(&2), Err(Error::KeyNotFound));
    /// ```
    pub fn at<V>(&self, key: &V) -> Result<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value associated with a particular key.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyNotFound` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// *map.at_mut(&1).unwrap() += 1;
    /// assert_eq!(map.at(&1), Ok(&2));
    /// assert!(map.at_mut(&2).is_err());
    /// ```
    pub fn at_mut<V>(&mut self, key: &V) -> Result<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a cursor at the entry with a particular key, or at the end position if such a key
    /// does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 2).unwrap();
    /// assert_eq!(map.find(&1).get(), Some((&1, &2)));
    /// assert!(map.find(&0).is_end());
    /// ```
    pub fn find<V>(&self, key: &V) -> Cursor<'_, T, U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.find(key))
    }

    /// Returns a cursor at the first entry whose key is not less than a particular key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.lower_bound(&1).key(), Some(&1));
    /// assert_eq!(map.lower_bound(&2).key(), Some(&3));
    /// assert!(map.lower_bound(&4).is_end());
    /// ```
    pub fn lower_bound<V>(&self, key: &V) -> Cursor<'_, T, U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.lower_bound(key))
    }

    /// Returns a cursor at the first entry whose key is greater than a particular key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.upper_bound(&1).key(), Some(&3));
    /// assert!(map.upper_bound(&3).is_end());
    /// ```
    pub fn upper_bound<V>(&self, key: &V) -> Cursor<'_, T, U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        Cursor::new(&self.tree, self.tree.upper_bound(key))
    }

    /// Returns a cursor at the first entry of the map, or at the end position if the map is
    /// empty.
    pub fn begin(&self) -> Cursor<'_, T, U> {
        Cursor::new(&self.tree, self.tree.first())
    }

    /// Returns a cursor at the end position of the map.
    pub fn end(&self) -> Cursor<'_, T, U> {
        Cursor::new(&self.tree, None)
    }

    /// Returns a mutable cursor at the minimum key, or at the end position if the map is empty.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T, U> {
        let first = self.tree.first();
        CursorMut::new(&mut self.tree, first)
    }

    /// Returns a mutable cursor at the first key that is not less than a particular key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert_many(vec![(1, 1), (2, 2), (3, 3)]).unwrap();
    ///
    /// let mut cursor = map.lower_bound_mut(&2);
    /// assert_eq!(cursor.remove_current(), Some((2, 2)));
    /// assert_eq!(cursor.key(), Some(&3));
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn lower_bound_mut<V>(&mut self, key: &V) -> CursorMut<'_, T, U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let handle = self.tree.lower_bound(key);
        CursorMut::new(&mut self.tree, handle)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Swaps the contents of two maps.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let mut other = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.swap(&mut other);
    /// assert!(map.is_empty());
    /// assert_eq!(other.get(&1), Some(&1));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }

    /// Moves every entry of `other` into `self` in ascending order and leaves `other` empty. An
    /// entry whose key already exists in `self` is dropped and `self` keeps its own value.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if a new node cannot be allocated. Entries that were not
    /// moved yet stay in `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// let mut other = RedBlackMap::new();
    /// other.insert(1, 10).unwrap();
    /// other.insert(2, 20).unwrap();
    ///
    /// map.merge(&mut other).unwrap();
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.get(&2), Some(&20));
    /// assert!(other.is_empty());
    /// ```
    pub fn merge(&mut self, other: &mut Self) -> Result<()>
    where
        T: Ord,
    {
        self.tree.merge_unique(&mut other.tree)
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
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

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .lower_bound(key)
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(RedBlackMap::min(&map), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree
            .first()
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(RedBlackMap::max(&map), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree
            .last()
            .map(|handle| &self.tree.entry(handle).key)
    }

    /// Returns the entry with the minimum key.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    /// use rb_collections::Error;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.first(), Err(Error::Empty));
    /// map.insert(1, 2).unwrap();
    /// assert_eq!(map.first(), Ok((&1, &2)));
    /// ```
    pub fn first(&self) -> Result<(&T, &U)> {
        self.begin().get().ok_or(Error::Empty)
    }

    /// Returns the entry with the maximum key.
    ///
    /// # Errors
    ///
    /// Returns `Error::Empty` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    /// use rb_collections::Error;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.last(), Err(Error::Empty));
    /// map.insert(1, 2).unwrap();
    /// map.insert(3, 4).unwrap();
    /// assert_eq!(map.last(), Ok((&3, &4)));
    /// ```
    pub fn last(&self) -> Result<(&T, &U)> {
        let mut cursor = self.end();
        cursor.move_prev();
        cursor.get().ok_or(Error::Empty)
    }

    /// Removes and returns the entry with the minimum key. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// assert_eq!(map.pop_first(), Some((1, 1)));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn pop_first(&mut self) -> Option<(T, U)> {
        self.tree.pop_first().map(|entry| entry.into_pair())
    }

    /// Removes and returns the entry with the maximum key. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// assert_eq!(map.pop_last(), Some((2, 2)));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn pop_last(&mut self) -> Option<(T, U)> {
        self.tree.pop_last().map(|entry| entry.into_pair())
    }

    /// Returns a deep copy of the map.
    ///
    /// # Errors
    ///
    /// Returns `Error::AllocationFailed` if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
        U: Clone,
    {
        Ok(RedBlackMap {
            tree: self.tree.try_clone()?,
        })
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, U> {
        Iter::new(&self.tree)
    }

    /// Returns an iterator over the keys of the map in ascending order.
    pub fn keys(&self) -> Keys<'_, T, U> {
        Keys { iter: self.iter() }
    }

    /// Returns an iterator over the values of the map in ascending key order.
    pub fn values(&self) -> Values<'_, T, U> {
        Values { iter: self.iter() }
    }
}

impl<T, U> IntoIterator for RedBlackMap<T, U> {
    type IntoIter = IntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T, U> IntoIterator for &'a RedBlackMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = Iter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, U> Default for RedBlackMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> Clone for RedBlackMap<T, U>
where
    T: Clone,
    U: Clone,
{
    fn clone(&self) -> Self {
        RedBlackMap {
            tree: self.tree.clone(),
        }
    }
}

impl<T, U> PartialEq for RedBlackMap<T, U>
where
    T: PartialEq,
    U: PartialEq,
{
    fn eq(&self, other: &RedBlackMap<T, U>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for RedBlackMap<T, U>
where
    T: Eq,
    U: Eq,
{
}

impl<T, U> PartialOrd for RedBlackMap<T, U>
where
    T: PartialOrd,
    U: PartialOrd,
{
    fn partial_cmp(&self, other: &RedBlackMap<T, U>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T, U> Ord for RedBlackMap<T, U>
where
    T: Ord,
    U: Ord,
{
    fn cmp(&self, other: &RedBlackMap<T, U>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T, U> fmt::Debug for RedBlackMap<T, U>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, T, U, V> Index<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

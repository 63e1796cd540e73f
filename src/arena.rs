//! Chunked slab allocator that owns the nodes of a tree.

use crate::error::{Error, Result};
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A copyable reference to an object stored in a `TypedArena<T>`.
///
/// A handle does not own the object it refers to: the arena does. Handles are only meaningful
/// for the arena that produced them and become stale once the object is freed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// A slab allocator that only allocates a single type of object.
///
/// Objects live in fixed-size chunks that are never reallocated, so a `Handle` stays valid until
/// its object is freed. Freed blocks are threaded onto a free list and reused before any new chunk
/// is reserved. An optional limit bounds the number of live objects, which makes allocation
/// failure an ordinary, observable outcome.
///
/// # Examples
///
/// ```
/// use rb_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::with_limit(16, 1);
///
/// let x = arena.try_allocate(1).unwrap();
/// assert_eq!(arena[x], 1);
/// assert!(arena.try_allocate(2).is_err());
///
/// arena[x] += 1;
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.try_allocate(2).is_ok());
/// ```
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    limit: Option<usize>,
    len: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    /// Constructs a new, empty `TypedArena<T>` with a specific number of objects per chunk and no
    /// limit on the number of live objects.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// assert!(arena.is_empty());
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "Expected a positive chunk size.");
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size,
            limit: None,
            len: 0,
            capacity: 0,
        }
    }

    /// Constructs a new, empty `TypedArena<T>` that holds at most `limit` live objects.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::with_limit(1024, 10);
    /// assert_eq!(arena.limit(), Some(10));
    /// ```
    pub fn with_limit(chunk_size: usize, limit: usize) -> Self {
        TypedArena {
            limit: Some(limit),
            ..Self::new(chunk_size)
        }
    }

    /// Ensures that there is room for one more object, reserving a new chunk if needed. Once this
    /// returns `Ok`, the next allocation cannot fail. Fails without modifying the arena if the
    /// limit is reached or a new chunk cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::with_limit(1024, 1);
    /// assert!(arena.reserve().is_ok());
    /// arena.allocate(0);
    /// assert!(arena.reserve().is_err());
    /// ```
    pub fn reserve(&mut self) -> Result<()> {
        if self.limit.map_or(false, |limit| self.len >= limit) {
            log::warn!("arena limit of {:?} objects reached", self.limit);
            return Err(Error::AllocationFailed { limit: self.limit });
        }

        if self.len == self.capacity {
            let mut chunk = Vec::new();
            if chunk.try_reserve_exact(self.chunk_size).is_err() {
                log::warn!("failed to reserve arena chunk of {} objects", self.chunk_size);
                return Err(Error::AllocationFailed { limit: self.limit });
            }
            self.chunks.push(chunk);
            self.capacity += self.chunk_size;
        }
        Ok(())
    }

    /// Allocates an object in the arena and returns its handle. Fails without modifying the arena
    /// if the limit is reached or a new chunk cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::with_limit(1024, 1);
    /// assert!(arena.try_allocate(0).is_ok());
    /// assert!(arena.try_allocate(0).is_err());
    /// ```
    pub fn try_allocate(&mut self, value: T) -> Result<Handle> {
        self.reserve()?;
        self.len += 1;

        match self.head.take() {
            None => {
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Block::Occupied(value));
                Ok(Handle {
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                })
            },
            Some(handle) => {
                let vacant_block = mem::replace(
                    &mut self.chunks[handle.chunk_index][handle.block_index],
                    Block::Occupied(value),
                );
                match vacant_block {
                    Block::Vacant(next_handle) => {
                        self.head = next_handle;
                        Ok(handle)
                    },
                    Block::Occupied(_) => panic!("Expected a vacant block on the free list."),
                }
            },
        }
    }

    /// Allocates an object in the arena and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena[x], 0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        match self.try_allocate(value) {
            Ok(handle) => handle,
            Err(error) => panic!("Error: {}.", error),
        }
    }

    /// Deallocates an object in the arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let block = &mut self.chunks[handle.chunk_index][handle.block_index];
        if let Block::Vacant(_) = block {
            panic!("Error: attempting to free vacant block.");
        }
        match mem::replace(block, Block::Vacant(self.head.take())) {
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle);
                value
            },
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle
    /// does not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle does
    /// not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the maximum number of live objects, if the arena is bounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the number of objects per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Destroys every object in the arena and releases its chunks. All handles become stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// assert_eq!(arena.get(x), None);
    /// ```
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.head = None;
        self.len = 0;
        self.capacity = 0;
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};
    use crate::error::Error;

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        arena.free(Handle {
            chunk_index: 0,
            block_index: 0,
        });
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        arena.free(handle);
        arena.free(handle);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 0
            },
        );
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 1
            },
        );
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 1,
                block_index: 0
            },
        );
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_block() {
        let mut arena = TypedArena::new(1024);
        let first = arena.allocate(0);
        let second = arena.allocate(1);
        assert_eq!(arena.free(first), 0);
        assert_eq!(arena.free(second), 1);
        assert_eq!(arena.allocate(2), second);
        assert_eq!(arena.allocate(3), first);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_try_allocate_limit() {
        let mut arena = TypedArena::with_limit(1, 2);
        let handle = arena.try_allocate(0).unwrap();
        arena.try_allocate(1).unwrap();
        assert_eq!(
            arena.try_allocate(2),
            Err(Error::AllocationFailed { limit: Some(2) }),
        );
        assert_eq!(arena.len(), 2);

        arena.free(handle);
        assert_eq!(arena.try_allocate(3), Ok(handle));
        assert_eq!(arena[handle], 3);
    }

    #[test]
    #[should_panic]
    fn test_allocate_past_limit() {
        let mut arena = TypedArena::with_limit(1024, 0);
        arena.allocate(0);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        arena.free(handle);
        assert_eq!(arena.get(handle), None);
        assert_eq!(arena.get_mut(handle), None);
    }

    #[test]
    fn test_get_invalid_block() {
        let arena: TypedArena<u32> = TypedArena::new(1024);
        assert_eq!(
            arena.get(Handle {
                chunk_index: 0,
                block_index: 0
            }),
            None,
        );
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(1024);
        let handle = arena.allocate(0);
        *arena.get_mut(handle).unwrap() = 1;
        assert_eq!(arena.get(handle), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new(2);
        for i in 0..5 {
            arena.allocate(i);
        }
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 0
            },
        );
    }
}

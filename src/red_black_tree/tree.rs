use crate::arena::{Handle, TypedArena};
use crate::entry::Entry;
use crate::error::Result;
use crate::red_black_tree::iter::IntoIter;
use crate::red_black_tree::node::{Color, Node};
use std::borrow::Borrow;
use std::mem;

pub const DEFAULT_CHUNK_SIZE: usize = 64;

/// The ordered tree engine shared by every red black collection.
///
/// Nodes live in a `TypedArena` owned by the tree; child and parent links are arena handles.
/// Equal keys are allowed and form contiguous in-order runs, so unique-key collections must reject
/// duplicates before calling `insert`.
pub struct Tree<T, U> {
    arena: TypedArena<Node<T, U>>,
    root: Option<Handle>,
}

impl<T, U> Tree<T, U> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            arena: TypedArena::new(chunk_size),
            root: None,
        }
    }

    pub fn with_limit(chunk_size: usize, limit: usize) -> Self {
        Tree {
            arena: TypedArena::with_limit(chunk_size, limit),
            root: None,
        }
    }

    fn empty_like(&self) -> Self {
        match self.arena.limit() {
            Some(limit) => Tree::with_limit(self.arena.chunk_size(), limit),
            None => Tree::new(self.arena.chunk_size()),
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[cfg(test)]
    pub fn root(&self) -> Option<Handle> {
        self.root
    }

    #[cfg(test)]
    pub fn node(&self, handle: Handle) -> &Node<T, U> {
        &self.arena[handle]
    }

    pub fn entry(&self, handle: Handle) -> &Entry<T, U> {
        &self.arena[handle].entry
    }

    /// Values may be replaced in place; keys may not, since that could break the search order.
    pub fn value_mut(&mut self, handle: Handle) -> &mut U {
        &mut self.arena[handle].entry.value
    }

    fn is_red(&self, handle: Option<Handle>) -> bool {
        match handle {
            None => false,
            Some(handle) => self.arena[handle].is_red(),
        }
    }

    fn set_color(&mut self, handle: Handle, color: Color) {
        self.arena[handle].color = color;
    }

    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = &mut self.arena[parent];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            },
        }
    }

    // Moves `handle` down on the `left` side (a left rotation when `left` is `true`), lifting its
    // child on the opposite side into its place.
    fn rotate(&mut self, handle: Handle, left: bool) {
        let pivot = self.arena[handle]
            .child(!left)
            .expect("Expected pivot child node to be `Some`.");
        let inner = self.arena[pivot].child(left);
        *self.arena[handle].child_mut(!left) = inner;
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(handle);
        }

        let parent = self.arena[handle].parent;
        self.arena[pivot].parent = parent;
        self.replace_child(parent, handle, Some(pivot));

        *self.arena[pivot].child_mut(left) = Some(handle);
        self.arena[handle].parent = Some(pivot);
    }

    /// Inserts a new node and returns its handle. Equal keys descend to the right, so this always
    /// creates a node. Fails without modifying the tree if the node cannot be allocated.
    pub fn insert(&mut self, key: T, value: U) -> Result<Handle>
    where
        T: Ord,
    {
        self.arena.reserve()?;
        Ok(self.link(key, value))
    }

    // precondition: the arena has room for one more node
    fn link(&mut self, key: T, value: U) -> Handle
    where
        T: Ord,
    {
        let mut parent = None;
        let mut is_left = false;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            parent = Some(handle);
            is_left = key < node.entry.key;
            curr = node.child(is_left);
        }

        let mut new_node = Node::new(key, value);
        new_node.parent = parent;
        let handle = self.arena.allocate(new_node);
        match parent {
            None => self.root = Some(handle),
            Some(parent) => *self.arena[parent].child_mut(is_left) = Some(handle),
        }

        self.fix_insert(handle);
        handle
    }

    fn fix_insert(&mut self, mut handle: Handle) {
        while let Some(parent) = self.arena[handle].parent {
            if !self.arena[parent].is_red() {
                break;
            }

            // a red node is never the root, so the grandparent exists
            let grandparent = self.arena[parent]
                .parent
                .expect("Expected red node to have a parent.");
            let parent_is_left = self.arena[grandparent].left == Some(parent);
            let uncle = self.arena[grandparent].child(!parent_is_left);

            match uncle.filter(|uncle| self.arena[*uncle].is_red()) {
                Some(uncle) => {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    handle = grandparent;
                },
                None => {
                    let mut parent = parent;
                    if self.arena[parent].child(!parent_is_left) == Some(handle) {
                        self.rotate(parent, parent_is_left);
                        handle = parent;
                        parent = self.arena[handle]
                            .parent
                            .expect("Expected rotated node to have a parent.");
                    }
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate(grandparent, !parent_is_left);
                    break;
                },
            }
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Removes the first node matching `key` and returns its entry. Returns `None` if no node
    /// matches.
    pub fn remove<V>(&mut self, key: &V) -> Option<Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find(key).map(|handle| self.remove_at(handle))
    }

    /// Removes the entry stored at `handle`. A node with two children trades its entry with its
    /// in-order successor, and the successor's node is the one unlinked; `handle` then refers to
    /// the successor's entry.
    pub fn remove_at(&mut self, handle: Handle) -> Entry<T, U> {
        let target = match (self.arena[handle].left, self.arena[handle].right) {
            (Some(_), Some(right)) => self.extreme(right, true),
            _ => handle,
        };

        let (child, parent, color) = {
            let node = &self.arena[target];
            (node.left.or(node.right), node.parent, node.color)
        };
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        self.replace_child(parent, target, child);

        let mut node = self.arena.free(target);
        if target != handle {
            mem::swap(&mut self.arena[handle].entry, &mut node.entry);
        }

        if color == Color::Black {
            self.fix_remove(child, parent);
        }
        node.entry
    }

    /// Removes the entry stored at `handle` and returns it together with the position of the entry
    /// that followed it in in-order.
    pub fn remove_and_step(&mut self, handle: Handle) -> (Entry<T, U>, Option<Handle>) {
        let node = &self.arena[handle];
        let next = if node.left.is_some() && node.right.is_some() {
            // the successor's entry moves into `handle`
            Some(handle)
        } else {
            self.successor(handle)
        };
        (self.remove_at(handle), next)
    }

    // `node` carries an extra black; `parent` is tracked separately because `node` may be absent.
    fn fix_remove(&mut self, mut node: Option<Handle>, mut parent: Option<Handle>) {
        while node != self.root && !self.is_red(node) {
            let curr_parent = match parent {
                Some(parent) => parent,
                None => break,
            };
            let is_left = self.arena[curr_parent].left == node;
            let mut sibling = self.arena[curr_parent]
                .child(!is_left)
                .expect("Expected doubly black node to have a sibling.");

            if self.arena[sibling].is_red() {
                self.set_color(sibling, Color::Black);
                self.set_color(curr_parent, Color::Red);
                self.rotate(curr_parent, is_left);
                sibling = self.arena[curr_parent]
                    .child(!is_left)
                    .expect("Expected doubly black node to have a sibling.");
            }

            let near = self.arena[sibling].child(is_left);
            let far = self.arena[sibling].child(!is_left);
            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, Color::Red);
                node = Some(curr_parent);
                parent = self.arena[curr_parent].parent;
                continue;
            }

            if !self.is_red(far) {
                if let Some(near) = near {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, !is_left);
                sibling = self.arena[curr_parent]
                    .child(!is_left)
                    .expect("Expected doubly black node to have a sibling.");
            }

            let parent_color = self.arena[curr_parent].color;
            self.set_color(sibling, parent_color);
            self.set_color(curr_parent, Color::Black);
            if let Some(far) = self.arena[sibling].child(!is_left) {
                self.set_color(far, Color::Black);
            }
            self.rotate(curr_parent, is_left);
            node = self.root;
            break;
        }

        if let Some(node) = node {
            self.set_color(node, Color::Black);
        }
    }

    /// Returns the first node in in-order whose key equals `key`.
    pub fn find<V>(&self, key: &V) -> Option<Handle>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.lower_bound(key)
            .filter(|handle| self.arena[*handle].entry.key.borrow() == key)
    }

    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns the number of nodes whose key equals `key` by walking the contiguous run of equal
    /// keys.
    pub fn count<V>(&self, key: &V) -> usize
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut count = 0;
        let mut curr = self.find(key);
        while let Some(handle) = curr {
            if self.arena[handle].entry.key.borrow() != key {
                break;
            }
            count += 1;
            curr = self.successor(handle);
        }
        count
    }

    /// Returns the first node whose key is not less than `key`.
    pub fn lower_bound<V>(&self, key: &V) -> Option<Handle>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut best = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            if node.entry.key.borrow() < key {
                curr = node.right;
            } else {
                best = Some(handle);
                curr = node.left;
            }
        }
        best
    }

    /// Returns the first node whose key is strictly greater than `key`.
    pub fn upper_bound<V>(&self, key: &V) -> Option<Handle>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut best = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            if node.entry.key.borrow() > key {
                best = Some(handle);
                curr = node.left;
            } else {
                curr = node.right;
            }
        }
        best
    }

    /// Returns the half-open run `[lower_bound(key), upper_bound(key))` of nodes equal to `key`.
    pub fn equal_range<V>(&self, key: &V) -> (Option<Handle>, Option<Handle>)
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// Returns the last node whose key is less than or equal to `key`.
    pub fn floor<V>(&self, key: &V) -> Option<Handle>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut best = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            if node.entry.key.borrow() > key {
                curr = node.left;
            } else {
                best = Some(handle);
                curr = node.right;
            }
        }
        best
    }

    fn extreme(&self, mut handle: Handle, left: bool) -> Handle {
        while let Some(child) = self.arena[handle].child(left) {
            handle = child;
        }
        handle
    }

    pub fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, true))
    }

    pub fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, false))
    }

    // Walks one step in in-order (forward) or reverse in-order using parent links only.
    fn step(&self, handle: Handle, forward: bool) -> Option<Handle> {
        if let Some(child) = self.arena[handle].child(!forward) {
            return Some(self.extreme(child, forward));
        }

        let mut curr = handle;
        let mut parent = self.arena[curr].parent;
        while let Some(handle) = parent {
            if self.arena[handle].child(!forward) != Some(curr) {
                break;
            }
            curr = handle;
            parent = self.arena[handle].parent;
        }
        parent
    }

    pub fn successor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, true)
    }

    pub fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, false)
    }

    pub fn pop_first(&mut self) -> Option<Entry<T, U>> {
        self.first().map(|handle| self.remove_at(handle))
    }

    pub fn pop_last(&mut self) -> Option<Entry<T, U>> {
        self.last().map(|handle| self.remove_at(handle))
    }

    /// Destroys every node in a single pass over the arena.
    pub fn clear(&mut self) {
        log::trace!("clearing tree of {} nodes", self.len());
        self.arena.clear();
        self.root = None;
    }

    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves every entry of `other` into `self` in ascending order by re-insertion, leaving
    /// `other` empty. If a node cannot be allocated, the entries not yet moved stay in `other`.
    pub fn merge(&mut self, other: &mut Self) -> Result<()>
    where
        T: Ord,
    {
        log::debug!("merging {} nodes into tree of {} nodes", other.len(), self.len());
        while let Some(handle) = other.first() {
            self.arena.reserve()?;
            let Entry { key, value } = other.remove_at(handle);
            self.link(key, value);
        }
        Ok(())
    }

    /// Like `merge`, but an entry whose key is already present in `self` is dropped instead of
    /// inserted, so `self` keeps its own entry. On success `other` is left empty. If a node cannot
    /// be allocated, the entries not yet moved stay in `other`.
    pub fn merge_unique(&mut self, other: &mut Self) -> Result<()>
    where
        T: Ord,
    {
        log::debug!("merging {} nodes into tree of {} nodes", other.len(), self.len());
        while let Some(handle) = other.first() {
            if self.contains(&other.entry(handle).key) {
                other.remove_at(handle);
                continue;
            }
            self.arena.reserve()?;
            let Entry { key, value } = other.remove_at(handle);
            self.link(key, value);
        }
        Ok(())
    }

    /// Returns a structure-preserving deep copy of the tree. Copies are made iteratively with an
    /// explicit stack; each copied child is linked to its already-copied parent.
    pub fn try_clone(&self) -> Result<Self>
    where
        T: Clone,
        U: Clone,
    {
        log::trace!("cloning tree of {} nodes", self.len());
        let mut ret = self.empty_like();
        let root = match self.root {
            Some(root) => root,
            None => return Ok(ret),
        };

        let new_root = ret.arena.try_allocate(self.copy_node(root, None))?;
        ret.root = Some(new_root);
        let mut stack = vec![(root, new_root)];
        while let Some((source, copy)) = stack.pop() {
            for &left in &[true, false] {
                if let Some(child) = self.arena[source].child(left) {
                    let child_copy = ret.arena.try_allocate(self.copy_node(child, Some(copy)))?;
                    *ret.arena[copy].child_mut(left) = Some(child_copy);
                    stack.push((child, child_copy));
                }
            }
        }
        Ok(ret)
    }

    fn copy_node(&self, handle: Handle, parent: Option<Handle>) -> Node<T, U>
    where
        T: Clone,
        U: Clone,
    {
        let node = &self.arena[handle];
        Node {
            entry: node.entry.clone(),
            color: node.color,
            left: None,
            right: None,
            parent,
        }
    }
}

impl<T, U> IntoIterator for Tree<T, U> {
    type IntoIter = IntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        let mut order = Vec::with_capacity(self.len());
        let mut curr = self.first();
        while let Some(handle) = curr {
            order.push(handle);
            curr = self.successor(handle);
        }
        IntoIter::new(self.arena, order)
    }
}

impl<T, U> Clone for Tree<T, U>
where
    T: Clone,
    U: Clone,
{
    fn clone(&self) -> Self {
        self.try_clone()
            .expect("Expected clone to fit within the node limit of the source tree.")
    }
}

#[cfg(test)]
pub mod tests {
    use super::Tree;
    use crate::arena::Handle;
    use crate::error::Error;
    use crate::red_black_tree::node::Color;
    use rand::Rng;

    // Returns the black height of the subtree rooted at `handle`.
    fn check_subtree<T: Ord, U>(
        tree: &Tree<T, U>,
        handle: Option<Handle>,
        parent: Option<Handle>,
    ) -> usize {
        match handle {
            None => 1,
            Some(handle) => {
                let node = tree.node(handle);
                assert_eq!(node.parent, parent);
                if node.color == Color::Red {
                    assert!(!tree.is_red(node.left));
                    assert!(!tree.is_red(node.right));
                }
                let left_height = check_subtree(tree, node.left, Some(handle));
                let right_height = check_subtree(tree, node.right, Some(handle));
                assert_eq!(left_height, right_height);
                match node.color {
                    Color::Black => left_height + 1,
                    Color::Red => left_height,
                }
            },
        }
    }

    pub fn check_invariants<T: Ord, U>(tree: &Tree<T, U>) {
        if let Some(root) = tree.root() {
            assert_eq!(tree.node(root).color, Color::Black);
        }
        check_subtree(tree, tree.root(), None);

        let mut count = 0;
        let mut prev: Option<Handle> = None;
        let mut curr = tree.first();
        while let Some(handle) = curr {
            if let Some(prev) = prev {
                assert!(tree.entry(prev).key <= tree.entry(handle).key);
                assert_eq!(tree.predecessor(handle), Some(prev));
            }
            count += 1;
            prev = Some(handle);
            curr = tree.successor(handle);
        }
        assert_eq!(prev, tree.last());
        assert_eq!(count, tree.len());
    }

    fn keys<T: Clone, U>(tree: &Tree<T, U>) -> Vec<T> {
        let mut ret = Vec::new();
        let mut curr = tree.first();
        while let Some(handle) = curr {
            ret.push(tree.entry(handle).key.clone());
            curr = tree.successor(handle);
        }
        ret
    }

    fn tree_of(keys: &[u32]) -> Tree<u32, ()> {
        let mut tree = Tree::new(4);
        for key in keys {
            tree.insert(*key, ()).unwrap();
        }
        tree
    }

    #[test]
    fn test_empty() {
        let tree: Tree<u32, ()> = Tree::new(4);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.last(), None);
        check_invariants(&tree);
    }

    #[test]
    fn test_insert_ascending() {
        let mut tree = Tree::new(4);
        for key in 0..256 {
            tree.insert(key, key).unwrap();
            check_invariants(&tree);
        }
        assert_eq!(keys(&tree), (0..256).collect::<Vec<u32>>());
    }

    #[test]
    fn test_insert_random() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = Tree::new(16);
        let mut expected = Vec::new();
        for _ in 0..1000 {
            let key = rng.gen_range(0, 200);
            tree.insert(key, ()).unwrap();
            expected.push(key);
            check_invariants(&tree);
        }
        expected.sort();
        assert_eq!(keys(&tree), expected);
    }

    #[test]
    fn test_insert_remove_random() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = Tree::new(16);
        let mut expected = Vec::new();
        for _ in 0..2000 {
            let key = rng.gen_range(0, 100);
            if rng.gen::<bool>() {
                tree.insert(key, ()).unwrap();
                expected.push(key);
            } else {
                let removed = tree.remove(&key).map(|entry| entry.key);
                let position = expected.iter().position(|other| *other == key);
                assert_eq!(removed, position.map(|position| expected.remove(position)));
            }
            check_invariants(&tree);
        }
        expected.sort();
        assert_eq!(keys(&tree), expected);
    }

    #[test]
    fn test_remove_all_in_random_order() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = Tree::new(8);
        let mut inserted = Vec::new();
        for _ in 0..500 {
            let key = rng.gen::<u32>();
            tree.insert(key, ()).unwrap();
            inserted.push(key);
        }
        rng.shuffle(&mut inserted);

        for key in &inserted {
            assert_eq!(tree.remove(key).map(|entry| entry.key), Some(*key));
            check_invariants(&tree);
        }
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.root(), None);
    }

    #[test]
    fn test_remove_absent() {
        let mut tree = tree_of(&[1, 3, 5]);
        assert!(tree.remove(&4).is_none());
        assert_eq!(tree.len(), 3);
        assert_eq!(keys(&tree), vec![1, 3, 5]);
        check_invariants(&tree);
    }

    #[test]
    fn test_remove_root_of_two_node_tree() {
        let mut tree = tree_of(&[5, 10]);
        assert_eq!(tree.remove(&5).map(|entry| entry.key), Some(5));

        let root = tree.root().unwrap();
        assert_eq!(tree.entry(root).key, 10);
        assert_eq!(tree.node(root).color, Color::Black);
        assert_eq!(tree.node(root).parent, None);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_remove_last_node() {
        let mut tree = tree_of(&[1]);
        assert!(tree.remove(&1).is_some());
        assert!(tree.is_empty());
        assert_eq!(tree.first(), None);
        tree.insert(2, ()).unwrap();
        assert_eq!(keys(&tree), vec![2]);
    }

    #[test]
    fn test_remove_at_two_children() {
        let mut tree = tree_of(&[2, 1, 3]);
        let root = tree.root().unwrap();
        assert_eq!(tree.remove_at(root).key, 2);
        assert_eq!(tree.entry(root).key, 3);
        assert_eq!(keys(&tree), vec![1, 3]);
        check_invariants(&tree);
    }

    #[test]
    fn test_remove_and_step() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = Tree::new(8);
        for _ in 0..300 {
            tree.insert(rng.gen_range(0, 100), ()).unwrap();
        }
        let mut expected = keys(&tree);

        let mut removed = Vec::new();
        let mut curr = tree.first();
        while let Some(handle) = curr {
            if tree.entry(handle).key % 3 == 0 {
                let (entry, next) = tree.remove_and_step(handle);
                removed.push(entry.key);
                curr = next;
                check_invariants(&tree);
            } else {
                curr = tree.successor(handle);
            }
        }

        let expected_removed = expected
            .iter()
            .cloned()
            .filter(|key| key % 3 == 0)
            .collect::<Vec<u32>>();
        expected.retain(|key| key % 3 != 0);
        assert_eq!(removed, expected_removed);
        assert_eq!(keys(&tree), expected);
    }

    #[test]
    fn test_bounds() {
        let tree = tree_of(&[1, 3, 5, 7]);
        let key_of = |handle: Option<Handle>| handle.map(|handle| tree.entry(handle).key);

        assert_eq!(key_of(tree.lower_bound(&4)), Some(5));
        assert_eq!(key_of(tree.lower_bound(&5)), Some(5));
        assert_eq!(key_of(tree.lower_bound(&8)), None);
        assert_eq!(key_of(tree.lower_bound(&0)), Some(1));

        assert_eq!(key_of(tree.upper_bound(&4)), Some(5));
        assert_eq!(key_of(tree.upper_bound(&5)), Some(7));
        assert_eq!(key_of(tree.upper_bound(&7)), None);

        assert_eq!(key_of(tree.floor(&0)), None);
        assert_eq!(key_of(tree.floor(&4)), Some(3));
        assert_eq!(key_of(tree.floor(&7)), Some(7));
    }

    #[test]
    fn test_equal_range() {
        let tree = tree_of(&[3, 1, 3, 5, 3]);
        let (lower, upper) = tree.equal_range(&3);

        let mut run = Vec::new();
        let mut curr = lower;
        while curr != upper {
            let handle = curr.unwrap();
            run.push(tree.entry(handle).key);
            curr = tree.successor(handle);
        }
        assert_eq!(run, vec![3, 3, 3]);
        assert_eq!(upper.map(|handle| tree.entry(handle).key), Some(5));
        assert_eq!(tree.count(&3), 3);
        assert_eq!(tree.count(&1), 1);
        assert_eq!(tree.count(&4), 0);

        let (lower, upper) = tree.equal_range(&4);
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_find_returns_first_of_run() {
        let mut tree = Tree::new(4);
        for value in 0..10 {
            tree.insert(1, value).unwrap();
        }
        let handle = tree.find(&1).unwrap();
        assert_eq!(tree.predecessor(handle), None);
        assert_eq!(tree.count(&1), 10);
        check_invariants(&tree);
    }

    #[test]
    fn test_insert_allocation_failure() {
        let mut tree = Tree::with_limit(2, 3);
        for key in &[2, 1, 3] {
            tree.insert(*key, ()).unwrap();
        }
        assert_eq!(
            tree.insert(4, ()).unwrap_err(),
            Error::AllocationFailed { limit: Some(3) },
        );
        assert_eq!(tree.len(), 3);
        assert_eq!(keys(&tree), vec![1, 2, 3]);
        check_invariants(&tree);

        tree.remove(&1);
        assert!(tree.insert(4, ()).is_ok());
    }

    #[test]
    fn test_try_clone() {
        let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
        let mut tree = Tree::new(8);
        for _ in 0..200 {
            tree.insert(rng.gen_range(0, 50), rng.gen::<u32>()).unwrap();
        }

        let mut clone = tree.try_clone().unwrap();
        check_invariants(&clone);
        assert_eq!(keys(&clone), keys(&tree));
        let root = tree.root().unwrap();
        let clone_root = clone.root().unwrap();
        assert_eq!(tree.node(root).color, clone.node(clone_root).color);
        assert_eq!(tree.entry(root), clone.entry(clone_root));

        let original = keys(&tree);
        clone.insert(100, 0).unwrap();
        clone.remove(&original[0]);
        assert_eq!(keys(&tree), original);
        assert_eq!(tree.len(), original.len());
    }

    #[test]
    fn test_merge() {
        let mut tree = tree_of(&[1, 3, 5]);
        let mut other = tree_of(&[2, 3, 4]);
        tree.merge(&mut other).unwrap();
        assert_eq!(keys(&tree), vec![1, 2, 3, 3, 4, 5]);
        assert!(other.is_empty());
        check_invariants(&tree);
        check_invariants(&other);
    }

    #[test]
    fn test_merge_allocation_failure() {
        let mut tree = Tree::with_limit(4, 4);
        for key in &[1, 2, 3] {
            tree.insert(*key, ()).unwrap();
        }
        let mut other = tree_of(&[4, 5, 6]);
        assert!(tree.merge(&mut other).is_err());
        assert_eq!(keys(&tree), vec![1, 2, 3, 4]);
        assert_eq!(keys(&other), vec![5, 6]);
        check_invariants(&tree);
        check_invariants(&other);
    }

    #[test]
    fn test_merge_unique() {
        let mut tree = Tree::new(4);
        for key in &[1, 3, 5] {
            tree.insert(*key, 0).unwrap();
        }
        let mut other = Tree::new(4);
        for key in &[2, 3, 4, 5] {
            other.insert(*key, 1).unwrap();
        }
        tree.merge_unique(&mut other).unwrap();
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
        assert_eq!(tree.entry(tree.find(&3).unwrap()).value, 0);
        assert_eq!(tree.entry(tree.find(&4).unwrap()).value, 1);
        assert!(other.is_empty());
        assert_eq!(other.len(), 0);
        check_invariants(&tree);
        check_invariants(&other);
    }

    #[test]
    fn test_merge_unique_allocation_failure() {
        let mut tree = Tree::with_limit(4, 3);
        for key in &[1, 3] {
            tree.insert(*key, ()).unwrap();
        }
        let mut other = tree_of(&[1, 2, 4, 5]);
        assert_eq!(
            tree.merge_unique(&mut other).unwrap_err(),
            Error::AllocationFailed { limit: Some(3) },
        );
        assert_eq!(keys(&tree), vec![1, 2, 3]);
        assert_eq!(keys(&other), vec![4, 5]);
        check_invariants(&tree);
        check_invariants(&other);
    }

    #[test]
    fn test_pop_first_last() {
        let mut tree = tree_of(&[4, 2, 6]);
        assert_eq!(tree.pop_first().map(|entry| entry.key), Some(2));
        assert_eq!(tree.pop_last().map(|entry| entry.key), Some(6));
        assert_eq!(tree.pop_last().map(|entry| entry.key), Some(4));
        assert!(tree.pop_first().is_none());
    }

    #[test]
    fn test_swap_clear() {
        let mut tree = tree_of(&[1, 2]);
        let mut other = tree_of(&[3]);
        tree.swap(&mut other);
        assert_eq!(keys(&tree), vec![3]);
        assert_eq!(keys(&other), vec![1, 2]);

        other.clear();
        assert!(other.is_empty());
        assert_eq!(other.len(), 0);
        other.insert(7, ()).unwrap();
        assert_eq!(keys(&other), vec![7]);
    }

    #[test]
    fn test_into_iter() {
        let tree = tree_of(&[5, 1, 3]);
        assert_eq!(
            tree.into_iter().map(|(key, _)| key).collect::<Vec<u32>>(),
            vec![1, 3, 5],
        );
    }
}

//! A self-balancing Binary Search Tree (specifically, an AVL tree) with ordered cursors.
//!
//! # Examples
//!
//! ```
//! use avl_tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&1).is_end());
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.at(&1), Ok(&2));
//!
//! // Inserting an existing key keeps the stored value.
//! let cursor = tree.insert(1, 3);
//! assert_eq!(cursor.value(), Some(&2));
//! assert_eq!(tree.len(), 1);
//!
//! // Indexed access inserts a default value for a missing key.
//! *tree.get_or_insert_default(7) += 1;
//! assert_eq!(tree[&7], 1);
//!
//! let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, [1, 7]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::Index;

use compare::{Compare, Natural};

use crate::arena::Arena;
use crate::cursor::{Cursor, CursorMut};
use crate::error::KeyNotFound;
use crate::handle::Handle;
use crate::iter::{IntoIter, Iter};
use crate::node::{self, Node};

/// An ordered map with unique keys, kept height-balanced after every insertion.
///
/// Keys are ordered by the comparator `C`, which defaults to the keys' [`Ord`] implementation.
/// Any `Fn(&K, &K) -> Ordering` can be used instead through [`Tree::with_cmp`].
///
/// The behavior of this tree is unspecified if a key's ordering relative to any other key
/// changes while the key is in the tree.
pub struct Tree<K, V, C = Natural<K>> {
    // Owns every node. Links between nodes are handles into this arena, so the tree can be moved
    // around without breaking the children's parent links.
    nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
    len: usize,
    cmp: C,
}

/// Where a key that is not in the tree would be linked.
#[derive(Clone, Copy)]
enum Slot {
    Root,
    Left(Handle),
    Right(Handle),
}

impl<K, V> Tree<K, V>
where
    K: Ord,
{
    /// Generate a new, empty `Tree` ordered by the keys' [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_cmp(compare::natural())
    }
}

impl<K, V> Default for Tree<K, V>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> Tree<K, V, C> {
    /// Generate a new, empty `Tree` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::with_cmp(|a: &i32, b: &i32| b.cmp(a));
    /// tree.insert(1, ());
    /// tree.insert(2, ());
    ///
    /// assert_eq!(tree.first_key_value(), Some((&2, &())));
    /// ```
    pub fn with_cmp(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            cmp,
        }
    }

    /// The comparator ordering this tree.
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// The number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of edges on the longest path from the root to a leaf, `None` for an empty
    /// tree. A tree of `n` entries never exceeds roughly `1.44 * log2(n)`.
    pub fn height(&self) -> Option<usize> {
        self.root.map(|root| self.nodes.get(root).height as usize)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len, "clear");

        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Exchanges the contents (comparators included) of two trees in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// A cursor at the entry with the smallest key, or at the end position when empty.
    pub fn begin(&self) -> Cursor<'_, K, V> {
        let first = self.root.map(|root| node::leftmost(&self.nodes, root));
        Cursor::new(&self.nodes, self.root, first)
    }

    /// The end position, one past the largest key.
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.nodes, self.root, None)
    }

    /// Same as [`Tree::begin`].
    pub fn cbegin(&self) -> Cursor<'_, K, V> {
        self.begin()
    }

    /// Same as [`Tree::end`].
    pub fn cend(&self) -> Cursor<'_, K, V> {
        self.end()
    }

    /// A cursor at the smallest key that can change the values it visits.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V> {
        let first = self.root.map(|root| node::leftmost(&self.nodes, root));
        CursorMut::new(&mut self.nodes, self.root, first)
    }

    fn last(&self) -> Cursor<'_, K, V> {
        let last = self.root.map(|root| node::rightmost(&self.nodes, root));
        Cursor::new(&self.nodes, self.root, last)
    }

    /// The entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.begin().key_value()
    }

    /// The entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.last().key_value()
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.begin(), self.last(), self.len)
    }
}

impl<K, V, C> Tree<K, V, C>
where
    C: Compare<K>,
{
    /// Inserts `value` under `key` and returns a cursor at the entry. If the tree already has
    /// an entry for `key`, nothing changes: the cursor points at the existing entry and `value`
    /// is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// let mut cursor = tree.insert(1, 2);
    /// *cursor.value_mut().unwrap() += 1;
    /// assert_eq!(tree.at(&1), Ok(&3));
    ///
    /// tree.insert(1, 42);
    /// assert_eq!(tree.at(&1), Ok(&3));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> CursorMut<'_, K, V> {
        let handle = self.entry_handle(key, || value);
        CursorMut::new(&mut self.nodes, self.root, Some(handle))
    }

    /// Same as [`Tree::insert`] with the key and value given as a pair.
    pub fn insert_pair(&mut self, (key, value): (K, V)) -> CursorMut<'_, K, V> {
        self.insert(key, value)
    }

    /// Returns the value stored under `key`, first inserting `V::default()` if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let mut counts: Tree<&str, u32> = Tree::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    ///
    /// assert_eq!(counts[&"a"], 2);
    /// assert_eq!(counts[&"b"], 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let handle = self.entry_handle(key, V::default);
        &mut self.nodes.get_mut(handle).value
    }

    /// A cursor at the entry for `key`, or at the end position if there is none.
    pub fn find(&self, key: &K) -> Cursor<'_, K, V> {
        Cursor::new(&self.nodes, self.root, self.locate(key).ok())
    }

    /// Same as [`Tree::find`], but the cursor can change the values it visits.
    pub fn find_mut(&mut self, key: &K) -> CursorMut<'_, K, V> {
        let found = self.locate(key).ok();
        CursorMut::new(&mut self.nodes, self.root, found)
    }

    /// The number of entries for `key`: `0` or `1`.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains_key(key))
    }

    /// Whether the tree has an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.locate(key).is_ok()
    }

    /// The range of entries equal to `key`: a cursor at the entry and a cursor at its
    /// successor, or twice the end position if there is no entry for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::Tree;
    ///
    /// let tree: Tree<_, _> = [(1, 'a'), (3, 'c')].into_iter().collect();
    ///
    /// let (lower, upper) = tree.equal_range(&1);
    /// assert_eq!(lower.key(), Some(&1));
    /// assert_eq!(upper.key(), Some(&3));
    ///
    /// assert_eq!(tree.equal_range(&2), (tree.end(), tree.end()));
    /// ```
    pub fn equal_range(&self, key: &K) -> (Cursor<'_, K, V>, Cursor<'_, K, V>) {
        let lower = self.find(key);
        if lower.is_end() {
            return (lower, lower);
        }
        let mut upper = lower;
        upper.move_next();
        (lower, upper)
    }

    /// The value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).value()
    }

    /// Mutable access to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find_mut(key).into_value_mut()
    }

    /// The value for `key`, failing with [`KeyNotFound`] if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::{KeyNotFound, Tree};
    ///
    /// let tree: Tree<i32, i32> = Tree::new();
    /// assert_eq!(tree.at(&1), Err(KeyNotFound));
    /// ```
    pub fn at(&self, key: &K) -> Result<&V, KeyNotFound> {
        self.get(key).ok_or(KeyNotFound)
    }

    /// Mutable access to the value for `key`, failing with [`KeyNotFound`] if there is none.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, KeyNotFound> {
        self.get_mut(key).ok_or(KeyNotFound)
    }

    /// Descends from the root. `Ok` holds the node with `key`, `Err` the empty slot where it
    /// belongs.
    fn locate(&self, key: &K) -> Result<Handle, Slot> {
        let Some(mut current) = self.root else {
            return Err(Slot::Root);
        };
        loop {
            let node = self.nodes.get(current);
            let next = match self.cmp.compare(key, &node.key) {
                Ordering::Less => node.left.ok_or(Slot::Left(current)),
                Ordering::Equal => return Ok(current),
                Ordering::Greater => node.right.ok_or(Slot::Right(current)),
            };
            current = next?;
        }
    }

    /// The node for `key`, linking a new one holding `make_value()` if there is none.
    fn entry_handle(&mut self, key: K, make_value: impl FnOnce() -> V) -> Handle {
        match self.locate(&key) {
            Ok(existing) => existing,
            Err(slot) => self.link_leaf(slot, key, make_value()),
        }
    }

    /// Links a new leaf into `slot`, then restores heights and balance up to the root.
    fn link_leaf(&mut self, slot: Slot, key: K, value: V) -> Handle {
        let parent = match slot {
            Slot::Root => None,
            Slot::Left(parent) | Slot::Right(parent) => Some(parent),
        };
        let handle = self.nodes.alloc(Node::new_leaf(key, value, parent));
        match slot {
            Slot::Root => self.root = Some(handle),
            Slot::Left(parent) => self.nodes.get_mut(parent).left = Some(handle),
            Slot::Right(parent) => self.nodes.get_mut(parent).right = Some(handle),
        }
        self.len += 1;
        // Nodes are only freed all at once, so every slot ever handed out is live.
        debug_assert_eq!(self.nodes.len(), self.len);

        let mut current = parent;
        while let Some(ancestor) = current {
            node::fix_height(&mut self.nodes, ancestor);
            let subtree_root = self.balance(ancestor);
            current = self.nodes.get(subtree_root).parent;
        }

        handle
    }
}

impl<K, V, C> Tree<K, V, C> {
    /// Restores the AVL invariant at `handle`, whose subtrees are balanced and whose height is
    /// up to date. Returns the root of the subtree, which changes if a rotation happened.
    ///
    /// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
    fn balance(&mut self, handle: Handle) -> Handle {
        let subtree_root = match node::balance_factor(&self.nodes, handle) {
            -2 => {
                let left = self.nodes.get(handle).left.expect("Left heavy => left child");
                if node::balance_factor(&self.nodes, left) > 0 {
                    self.rotate_left(left);
                }
                self.rotate_right(handle)
            }
            2 => {
                let right = self.nodes.get(handle).right.expect("Right heavy => right child");
                if node::balance_factor(&self.nodes, right) < 0 {
                    self.rotate_right(right);
                }
                self.rotate_left(handle)
            }
            _ => handle,
        };

        if cfg!(debug_assertions) {
            let root = self.nodes.get(subtree_root);
            let left_height = node::height(&self.nodes, root.left);
            let right_height = node::height(&self.nodes, root.right);
            assert_eq!(root.height, left_height.max(right_height) + 1);
            assert!((right_height - left_height).abs() <= 1);
        }

        subtree_root
    }

    /// Rotate `old_root` to the right. This moves the left child up vertically and `old_root`
    /// down vertically. Used to rebalance the tree when the left child is too tall. As such, it
    /// must only be called when there _is_ a left child.
    ///
    /// Nodes are relinked, never swapped, so every handle keeps its key. Returns the new root
    /// of the subtree.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///    Option<parent>            Option<parent>
    ///      /                         /
    ///   old_root                  new_root
    ///    /     \                  /     \
    /// new_root  z     rotate ->  x    old_root
    ///  / \                               /  \
    /// x   y                             y    z
    /// ```
    fn rotate_right(&mut self, old_root: Handle) -> Handle {
        let new_root = self
            .nodes
            .get(old_root)
            .left
            .expect("Rotate right => left child");
        let moved = self.nodes.get(new_root).right;

        self.nodes.get_mut(old_root).left = moved;
        if let Some(moved) = moved {
            self.nodes.get_mut(moved).parent = Some(old_root);
        }
        self.replace_child(old_root, new_root);
        self.nodes.get_mut(new_root).right = Some(old_root);
        self.nodes.get_mut(old_root).parent = Some(new_root);

        node::fix_height(&mut self.nodes, old_root);
        node::fix_height(&mut self.nodes, new_root);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            old_root = old_root.to_index(),
            new_root = new_root.to_index(),
            height = self.nodes.get(new_root).height,
            "rotate_right"
        );

        new_root
    }

    /// Mirror image of [`Tree::rotate_right`].
    ///
    /// ```text
    ///  Option<parent>              Option<parent>
    ///      /                           /
    ///   old_root                    new_root
    ///   /     \                     /     \
    ///  x    new_root   rotate ->  old_root  z
    ///         / \                  /  \
    ///        y   z                x    y
    /// ```
    fn rotate_left(&mut self, old_root: Handle) -> Handle {
        let new_root = self
            .nodes
            .get(old_root)
            .right
            .expect("Rotate left => right child");
        let moved = self.nodes.get(new_root).left;

        self.nodes.get_mut(old_root).right = moved;
        if let Some(moved) = moved {
            self.nodes.get_mut(moved).parent = Some(old_root);
        }
        self.replace_child(old_root, new_root);
        self.nodes.get_mut(new_root).left = Some(old_root);
        self.nodes.get_mut(old_root).parent = Some(new_root);

        node::fix_height(&mut self.nodes, old_root);
        node::fix_height(&mut self.nodes, new_root);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            old_root = old_root.to_index(),
            new_root = new_root.to_index(),
            height = self.nodes.get(new_root).height,
            "rotate_left"
        );

        new_root
    }

    /// Hangs `new` where `old` used to hang: from `old`'s parent, or as the tree's root.
    fn replace_child(&mut self, old: Handle, new: Handle) {
        let parent = self.nodes.get(old).parent;
        self.nodes.get_mut(new).parent = parent;

        let Some(parent) = parent else {
            self.root = Some(new);
            return;
        };
        let parent = self.nodes.get_mut(parent);
        if parent.left == Some(old) {
            parent.left = Some(new);
        } else {
            debug_assert_eq!(parent.right, Some(old));
            parent.right = Some(new);
        }
    }
}

/// Copies entry by entry in ascending key order, so the copy is rebalanced from scratch
/// rather than mirroring the source's shape.
impl<K, V, C> Clone for Tree<K, V, C>
where
    K: Clone,
    V: Clone,
    C: Compare<K> + Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Tree::with_cmp(self.cmp.clone());
        tree.extend(self.iter().map(|(k, v)| (k.clone(), v.clone())));
        tree
    }

    /// Builds the full copy first and only then swaps it in, so `self` is untouched if a
    /// `clone` panics.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap(&mut copy);
    }
}

impl<K, V, C> fmt::Debug for Tree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C> PartialEq for Tree<K, V, C>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K, V, C> Eq for Tree<K, V, C>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V, C> Index<&K> for Tree<K, V, C>
where
    C: Compare<K>,
{
    type Output = V;

    /// ## Panics
    ///
    /// When there is no entry for `key`. Use [`Tree::at`] to get a `Result` instead.
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, C> Extend<(K, V)> for Tree<K, V, C>
where
    C: Compare<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for Tree<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        let mut order = Vec::with_capacity(self.len);
        {
            let mut cursor = self.begin();
            while let Some(handle) = cursor.handle() {
                order.push(handle);
                cursor.move_next();
            }
        }
        IntoIter::new(self.nodes, order)
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;
    use std::fmt::Debug;

    use super::tests::assert_valid;
    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeMap`, checking the tree's structure
    /// after each one. Inserting an existing key keeps the old value, so the map uses `entry`.
    fn do_ops<K, V>(ops: &[Op<K, V>], tree: &mut Tree<K, V>, map: &mut BTreeMap<K, V>)
    where
        K: Ord + Clone + Debug,
        V: Default + Clone + PartialEq + Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let cursor = tree.insert(k.clone(), v.clone());
                    let expected = map.entry(k.clone()).or_insert_with(|| v.clone());
                    assert_eq!(cursor.key_value(), Some((k, &*expected)));
                }
                Op::GetOrInsertDefault(k) => {
                    let expected = map.entry(k.clone()).or_default();
                    assert_eq!(tree.get_or_insert_default(k.clone()), expected);
                }
                Op::Clear => {
                    tree.clear();
                    map.clear();
                }
                Op::Iter => assert!(tree.iter().eq(map.iter())),
            }
            assert_valid(tree);
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
            let mut tree = Tree::new();
            let mut map = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut map);
            tree.len() == map.len()
                && map.keys().all(|key| tree.get(key) == map.get(key))
                && tree.iter().rev().eq(map.iter().rev())
        }
    }

    quickcheck::quickcheck! {
        fn contains(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x, *x);
            }

            xs.iter().all(|x| tree.get(x) == Some(x) && tree.count(x) == 1)
        }
    }

    quickcheck::quickcheck! {
        fn height_is_logarithmic(xs: Vec<u16>) -> bool {
            let tree: Tree<_, _> = xs.iter().map(|&x| (x, ())).collect();
            match tree.height() {
                None => xs.is_empty(),
                // AVL bound: h < 1.4405 * log2(n + 2) - 0.3277
                Some(height) => {
                    let bound = 1.4405 * ((tree.len() + 2) as f64).log2() - 0.3277;
                    (height as f64) < bound
                }
            }
        }
    }
}

//! Cursors over the entries of a [`Tree`](crate::Tree) in key order.
//!
//! A cursor points either at an entry or at the "end" position, which sits between the largest
//! and the smallest key: moving forward from the last entry reaches end, and moving forward
//! again wraps around to the first entry (and the mirror image for moving backwards).
//!
//! Rotations only relink nodes, so the entry a cursor points at never changes identity. Cursors
//! borrow the tree, which means no cursor can outlive the tree or survive a call that
//! restructures it.
//!
//! # Examples
//!
//! ```
//! use avl_tree::Tree;
//!
//! let mut tree = Tree::new();
//! tree.insert(2, "b");
//! tree.insert(1, "a");
//!
//! let mut cursor = tree.begin();
//! assert_eq!(cursor.key_value(), Some((&1, &"a")));
//!
//! cursor.move_next();
//! assert_eq!(cursor.key_value(), Some((&2, &"b")));
//!
//! cursor.move_next();
//! assert_eq!(cursor, tree.end());
//! assert_eq!(cursor.key_value(), None);
//! ```

use std::fmt;
use std::ptr;

use crate::arena::Arena;
use crate::handle::Handle;
use crate::node::{self, Node};

/// Where a forward step from `current` lands. `None` is the end position.
fn step_next<K, V>(
    nodes: &Arena<Node<K, V>>,
    root: Option<Handle>,
    current: Option<Handle>,
) -> Option<Handle> {
    match current {
        Some(h) => node::successor(nodes, h),
        None => root.map(|r| node::leftmost(nodes, r)),
    }
}

fn step_prev<K, V>(
    nodes: &Arena<Node<K, V>>,
    root: Option<Handle>,
    current: Option<Handle>,
) -> Option<Handle> {
    match current {
        Some(h) => node::predecessor(nodes, h),
        None => root.map(|r| node::rightmost(nodes, r)),
    }
}

/// A read-only cursor. Returned by [`Tree::find`](crate::Tree::find),
/// [`Tree::begin`](crate::Tree::begin) and friends.
pub struct Cursor<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    root: Option<Handle>,
    current: Option<Handle>,
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K, V> Copy for Cursor<'_, K, V> {}

/// Two cursors are equal when they point at the same entry of the same tree, or are both at
/// the end of the same tree.
impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.nodes, other.nodes) && self.current == other.current
    }
}
impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K, V> fmt::Debug for Cursor<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value()).finish()
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn new(
        nodes: &'a Arena<Node<K, V>>,
        root: Option<Handle>,
        current: Option<Handle>,
    ) -> Self {
        Self {
            nodes,
            root,
            current,
        }
    }

    pub(crate) fn handle(&self) -> Option<Handle> {
        self.current
    }

    /// Whether this cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The key at the cursor, `None` at the end position.
    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(k, _)| k)
    }

    /// The value at the cursor, `None` at the end position.
    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, v)| v)
    }

    /// The entry at the cursor, `None` at the end position.
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        let nodes = self.nodes;
        self.current.map(|h| {
            let node = nodes.get(h);
            (&node.key, &node.value)
        })
    }

    /// Moves to the entry with the next larger key. From the last entry this reaches the end
    /// position; from the end position it wraps around to the first entry.
    pub fn move_next(&mut self) {
        self.current = step_next(self.nodes, self.root, self.current);
    }

    /// Moves to the entry with the next smaller key. From the first entry this reaches the end
    /// position; from the end position it wraps around to the last entry.
    pub fn move_prev(&mut self) {
        self.current = step_prev(self.nodes, self.root, self.current);
    }
}

/// A cursor that can modify the values (never the keys) it passes over. Returned by
/// [`Tree::insert`](crate::Tree::insert), [`Tree::find_mut`](crate::Tree::find_mut) and
/// [`Tree::begin_mut`](crate::Tree::begin_mut).
pub struct CursorMut<'a, K, V> {
    nodes: &'a mut Arena<Node<K, V>>,
    root: Option<Handle>,
    current: Option<Handle>,
}

impl<K, V> fmt::Debug for CursorMut<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.key_value()).finish()
    }
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(crate) fn new(
        nodes: &'a mut Arena<Node<K, V>>,
        root: Option<Handle>,
        current: Option<Handle>,
    ) -> Self {
        Self {
            nodes,
            root,
            current,
        }
    }

    /// Whether this cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The key at the cursor, `None` at the end position.
    pub fn key(&self) -> Option<&K> {
        self.key_value().map(|(k, _)| k)
    }

    /// The value at the cursor, `None` at the end position.
    pub fn value(&self) -> Option<&V> {
        self.key_value().map(|(_, v)| v)
    }

    /// The entry at the cursor, `None` at the end position.
    pub fn key_value(&self) -> Option<(&K, &V)> {
        self.current.map(|h| {
            let node = self.nodes.get(h);
            (&node.key, &node.value)
        })
    }

    /// Mutable access to the value at the cursor, `None` at the end position.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.key_value_mut().map(|(_, v)| v)
    }

    /// The entry at the cursor with a mutable value, `None` at the end position.
    pub fn key_value_mut(&mut self) -> Option<(&K, &mut V)> {
        let nodes = &mut *self.nodes;
        self.current.map(move |h| {
            let node = nodes.get_mut(h);
            (&node.key, &mut node.value)
        })
    }

    /// Consumes the cursor, returning the value it points at for the rest of the borrow.
    pub fn into_value_mut(self) -> Option<&'a mut V> {
        let nodes = self.nodes;
        self.current.map(move |h| &mut nodes.get_mut(h).value)
    }

    /// See [`Cursor::move_next`].
    pub fn move_next(&mut self) {
        self.current = step_next(&*self.nodes, self.root, self.current);
    }

    /// See [`Cursor::move_prev`].
    pub fn move_prev(&mut self) {
        self.current = step_prev(&*self.nodes, self.root, self.current);
    }

    /// A read-only view of this cursor's position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(&*self.nodes, self.root, self.current)
    }
}

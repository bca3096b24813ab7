//! Iterators over the entries of a [`Tree`](crate::Tree) in ascending key order.

use std::fmt;
use std::iter::FusedIterator;
use std::vec;

use crate::arena::Arena;
use crate::cursor::Cursor;
use crate::handle::Handle;
use crate::node::Node;

/// A borrowing iterator over `(&K, &V)`, created by [`Tree::iter`](crate::Tree::iter).
///
/// Walks a cursor in from each end. The count of entries not yet yielded keeps the two from
/// crossing.
pub struct Iter<'a, K, V> {
    front: Cursor<'a, K, V>,
    back: Cursor<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(front: Cursor<'a, K, V>, back: Cursor<'a, K, V>, len: usize) -> Self {
        Self {
            front,
            back,
            remaining: len,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.front.key_value()?;
        self.front.move_next();
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.back.key_value()?;
        self.back.move_prev();
        self.remaining -= 1;
        Some(entry)
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An owning iterator over `(K, V)`, created by calling `into_iter` on a
/// [`Tree`](crate::Tree).
pub struct IntoIter<K, V> {
    nodes: Arena<Node<K, V>>,
    order: vec::IntoIter<Handle>,
}

impl<K, V> IntoIter<K, V> {
    /// `order` must list every live handle of `nodes` in ascending key order.
    pub(crate) fn new(nodes: Arena<Node<K, V>>, order: Vec<Handle>) -> Self {
        Self {
            nodes,
            order: order.into_iter(),
        }
    }

    fn take(&mut self, handle: Handle) -> (K, V) {
        let node = self.nodes.take(handle);
        (node.key, node.value)
    }
}

impl<K, V> fmt::Debug for IntoIter<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let remaining = self.order.as_slice().iter().map(|&h| {
            let node = self.nodes.get(h);
            (&node.key, &node.value)
        });
        f.debug_list().entries(remaining).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.order.next()?;
        Some(self.take(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let handle = self.order.next_back()?;
        Some(self.take(handle))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

use crate::arena::Arena;
use crate::handle::Handle;

/// Height of an empty subtree. A leaf has height `0`.
pub(crate) const EMPTY_HEIGHT: i32 = -1;

/// One entry of the tree. `left` and `right` are owned by the tree through its arena; `parent`
/// is only used to navigate upwards and is `None` for the root.
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) parent: Option<Handle>,
    pub(crate) height: i32,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new_leaf(key: K, value: V, parent: Option<Handle>) -> Self {
        Node {
            key,
            value,
            left: None,
            right: None,
            parent,
            height: 0,
        }
    }
}

/// Height of the subtree at `link`, [`EMPTY_HEIGHT`] when there is none.
#[inline]
pub(crate) fn height<K, V>(nodes: &Arena<Node<K, V>>, link: Option<Handle>) -> i32 {
    link.map_or(EMPTY_HEIGHT, |h| nodes.get(h).height)
}

/// The difference in height between the right and left subtrees of `handle`. See [the
/// Wikipedia page][wiki] for more details.
///
/// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
#[inline]
pub(crate) fn balance_factor<K, V>(nodes: &Arena<Node<K, V>>, handle: Handle) -> i32 {
    let node = nodes.get(handle);
    height(nodes, node.right) - height(nodes, node.left)
}

/// Sets the height of `handle` to one more than its tallest child.
pub(crate) fn fix_height<K, V>(nodes: &mut Arena<Node<K, V>>, handle: Handle) {
    let node = nodes.get(handle);
    let new_height = height(nodes, node.left).max(height(nodes, node.right)) + 1;
    nodes.get_mut(handle).height = new_height;
}

pub(crate) fn leftmost<K, V>(nodes: &Arena<Node<K, V>>, mut handle: Handle) -> Handle {
    while let Some(left) = nodes.get(handle).left {
        handle = left;
    }
    handle
}

pub(crate) fn rightmost<K, V>(nodes: &Arena<Node<K, V>>, mut handle: Handle) -> Handle {
    while let Some(right) = nodes.get(handle).right {
        handle = right;
    }
    handle
}

/// The in-order successor of `handle`: the leftmost node of its right subtree, or else the
/// first ancestor reached from a left child. `None` past the largest key.
pub(crate) fn successor<K, V>(nodes: &Arena<Node<K, V>>, handle: Handle) -> Option<Handle> {
    if let Some(right) = nodes.get(handle).right {
        return Some(leftmost(nodes, right));
    }

    let mut child = handle;
    let mut parent = nodes.get(handle).parent;
    while let Some(p) = parent {
        if nodes.get(p).left == Some(child) {
            return Some(p);
        }
        child = p;
        parent = nodes.get(p).parent;
    }
    None
}

/// Mirror image of [`successor`].
pub(crate) fn predecessor<K, V>(nodes: &Arena<Node<K, V>>, handle: Handle) -> Option<Handle> {
    if let Some(left) = nodes.get(handle).left {
        return Some(rightmost(nodes, left));
    }

    let mut child = handle;
    let mut parent = nodes.get(handle).parent;
    while let Some(p) = parent {
        if nodes.get(p).right == Some(child) {
            return Some(p);
        }
        child = p;
        parent = nodes.get(p).parent;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds the tree below by hand and returns the arena and the handles in key order.
    ///
    /// ```text
    ///       4
    ///     /   \
    ///    2     6
    ///   / \   /
    ///  1   3 5
    /// ```
    fn sample() -> (Arena<Node<i32, ()>>, Vec<Handle>) {
        let mut nodes = Arena::new();
        let four = nodes.alloc(Node::new_leaf(4, (), None));
        let two = nodes.alloc(Node::new_leaf(2, (), Some(four)));
        let six = nodes.alloc(Node::new_leaf(6, (), Some(four)));
        let one = nodes.alloc(Node::new_leaf(1, (), Some(two)));
        let three = nodes.alloc(Node::new_leaf(3, (), Some(two)));
        let five = nodes.alloc(Node::new_leaf(5, (), Some(six)));

        nodes.get_mut(four).left = Some(two);
        nodes.get_mut(four).right = Some(six);
        nodes.get_mut(two).left = Some(one);
        nodes.get_mut(two).right = Some(three);
        nodes.get_mut(six).left = Some(five);

        for h in [two, six, four] {
            fix_height(&mut nodes, h);
        }

        (nodes, vec![one, two, three, four, five, six])
    }

    #[test]
    fn heights_and_balance() {
        let (nodes, order) = sample();
        let (one, two, four, six) = (order[0], order[1], order[3], order[5]);

        assert_eq!(height(&nodes, None), EMPTY_HEIGHT);
        assert_eq!(height(&nodes, Some(one)), 0);
        assert_eq!(height(&nodes, Some(two)), 1);
        assert_eq!(height(&nodes, Some(four)), 2);

        assert_eq!(balance_factor(&nodes, four), 0);
        assert_eq!(balance_factor(&nodes, six), -1);
        assert_eq!(balance_factor(&nodes, one), 0);
    }

    #[test]
    fn successor_walks_in_order() {
        let (nodes, order) = sample();

        for pair in order.windows(2) {
            assert_eq!(successor(&nodes, pair[0]), Some(pair[1]));
        }
        assert_eq!(successor(&nodes, order[order.len() - 1]), None);
    }

    #[test]
    fn predecessor_walks_in_reverse() {
        let (nodes, order) = sample();

        for pair in order.windows(2) {
            assert_eq!(predecessor(&nodes, pair[1]), Some(pair[0]));
        }
        assert_eq!(predecessor(&nodes, order[0]), None);
    }

    #[test]
    fn extremes() {
        let (nodes, order) = sample();
        assert_eq!(leftmost(&nodes, order[3]), order[0]);
        assert_eq!(rightmost(&nodes, order[3]), order[5]);
    }
}

//! Errors reported by [`Tree`](crate::Tree).

use std::fmt;

/// Returned by [`Tree::at`](crate::Tree::at) and [`Tree::at_mut`](crate::Tree::at_mut) when the
/// requested key is not in the tree.
///
/// Every other lookup reports absence with a sentinel instead (`None`, a zero count, or a cursor
/// at [`Tree::end`](crate::Tree::end)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyNotFound;

impl fmt::Display for KeyNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key not found")
    }
}

impl std::error::Error for KeyNotFound {}

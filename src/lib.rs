//! This crate provides an ordered map backed by an AVL tree, with cursors that walk the entries
//! in key order.
//!
//! ## AVL tree
//!
//! A Binary Search Tree stores its entries in `Node`s. The most important invariants of a BST
//! are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree have a key less than its own key.
//! 2. For every `Node`, all the `Node`s in its right subtree have a key greater than its own key.
//!
//! Searching takes `O(height)`, where `height` is the longest path from the root `Node` to a
//! leaf `Node`. An AVL tree additionally keeps the heights of every `Node`'s two subtrees within
//! one of each other. Whenever an insertion breaks that rule, a rotation restores it, so the
//! height stays `O(lg N)` even when keys arrive in sorted order.
//!
//! ```
//! use avl_tree::Tree;
//!
//! let mut tree = Tree::new();
//! for key in 1..=5 {
//!     tree.insert(key, key * 10);
//! }
//!
//! // A plain BST would have degenerated into a chain of height 4.
//! assert_eq!(tree.height(), Some(2));
//!
//! let mut cursor = tree.find(&3);
//! cursor.move_next();
//! assert_eq!(cursor.key_value(), Some((&4, &40)));
//! ```
//!
//! ## Features
//!
//! - `tracing`: emits `tracing` events at `TRACE` level for every rotation and `clear`.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
mod handle;
mod node;

pub mod cursor;
pub mod error;
pub mod iter;
pub mod tree;

pub use cursor::{Cursor, CursorMut};
pub use error::KeyNotFound;
pub use tree::Tree;

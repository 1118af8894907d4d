//! Container cores for an educational data-structure visualizer.
//!
//! Two independent structures plus the numeric command adapters that drive
//! them:
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`red_black`] | [`RbTree`] — ordered map with red-black rebalancing |
//! | [`alter_heap`] | [`AlterHeap`] — identity-deduplicating max-heap |
//! | [`console`] | [`TreeConsole`] / [`HeapConsole`] command adapters |
//!
//! Instead of raw pointers, every node link is an `Option<u32>` index into
//! a [`Vec`]-backed arena owned by its container; freed slots are recycled
//! through a free list, and `clear` resets the arena.
//!
//! Both containers are parameterized over a single strict `less` predicate
//! ([`Less`]); `greater` and `equal` are derived from two `less` calls and
//! `==` is never consulted.

pub mod alter_heap;
pub mod console;
pub mod red_black;
pub mod types;

pub use alter_heap::{AlterHeap, HeapEntry, HeapInvariantError, UniqueId};
pub use console::{HeapConsole, HeapItem, TreeConsole};
pub use red_black::{RbNode, RbTree, TraversalInfo, TreeInvariantError};
pub use types::{default_less, Less};

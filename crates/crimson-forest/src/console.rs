//! Headless interpreters for the visualizer's numeric command streams.
//!
//! The rendering layer feeds plain integers; these adapters translate them
//! into typed calls against the cores.  They hold no drawing state and do
//! no I/O.

use crate::alter_heap::{AlterHeap, UniqueId};
use crate::red_black::RbTree;
use crate::types::Less;

/// Membership toggle over an [`RbTree`]: a number inserts itself, and a
/// number that is already present is erased instead.
pub struct TreeConsole {
    tree: RbTree<i32, i32>,
}

impl TreeConsole {
    pub fn new() -> Self {
        Self {
            tree: RbTree::new(),
        }
    }

    /// Returns whether `number` is present after the call.
    pub fn feed(&mut self, number: i32) -> bool {
        if self.tree.insert(number, number) {
            true
        } else {
            let erased = self.tree.erase(&number);
            debug_assert!(erased, "failed insert implies the key exists");
            false
        }
    }

    pub fn tree(&self) -> &RbTree<i32, i32> {
        &self.tree
    }
}

impl Default for TreeConsole {
    fn default() -> Self {
        Self::new()
    }
}

/// Value stored by [`HeapConsole`]: a priority ordered by `<` and an
/// extrinsic id used for overwrite-on-push.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeapItem {
    pub priority: i32,
    pub id: i32,
}

impl UniqueId for HeapItem {
    type Id = i32;

    fn unique_id(&self) -> i32 {
        self.id
    }
}

fn priority_less(a: &HeapItem, b: &HeapItem) -> bool {
    a.priority < b.priority
}

/// Selection and reprioritization over an [`AlterHeap`].
///
/// A negative number selects the entry with that id (or deselects when it
/// is absent).  A positive number reprioritizes the selection when one
/// exists, otherwise inserts a fresh entry under the next id in
/// −1, −2, ….
pub struct HeapConsole {
    heap: AlterHeap<HeapItem, Less<HeapItem>>,
    selected: Option<i32>,
    next_id: i32,
}

impl HeapConsole {
    pub fn new() -> Self {
        Self {
            heap: AlterHeap::with_comparator(priority_less),
            selected: None,
            next_id: -1,
        }
    }

    pub fn feed(&mut self, number: i32) {
        if number < 0 {
            self.selected = None;
            if self.heap.find(&number).is_some() {
                self.selected = Some(number);
            }
        } else if let Some(id) = self.selected.take() {
            self.heap.push(HeapItem {
                priority: number,
                id,
            });
        } else {
            self.heap.push(HeapItem {
                priority: number,
                id: self.next_id,
            });
            self.next_id -= 1;
        }
    }

    /// Removes and returns the current maximum, when any.
    pub fn pop_top(&mut self) -> Option<HeapItem> {
        if self.heap.is_empty() {
            return None;
        }
        let top = *self.heap.top();
        self.heap.pop();
        Some(top)
    }

    pub fn heap(&self) -> &AlterHeap<HeapItem, Less<HeapItem>> {
        &self.heap
    }

    pub fn selected(&self) -> Option<i32> {
        self.selected
    }
}

impl Default for HeapConsole {
    fn default() -> Self {
        Self::new()
    }
}

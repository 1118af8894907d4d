//! Arena-backed red-black tree map.

use crate::types::{default_less, Less};

use super::print::print;
use super::types::{RbNode, TraversalInfo};
use super::util;
use super::util::TreeInvariantError;

/// Ordered associative map with red-black rebalancing.
///
/// Nodes live in a `Vec` arena; links are `Option<u32>` indices and freed
/// slots are recycled through a free list.  The comparator is a single
/// strict `less` predicate — equality is derived from two calls, `==` is
/// never consulted.
pub struct RbTree<K, V, C = Less<K>>
where
    C: Fn(&K, &K) -> bool,
{
    arena: Vec<RbNode<K, V>>,
    free: Vec<u32>,
    root: Option<u32>,
    len: usize,
    less: C,
}

impl<K, V> RbTree<K, V>
where
    K: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_less::<K>)
    }
}

impl<K, V> Default for RbTree<K, V>
where
    K: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Fn(&K, &K) -> bool,
{
    pub fn with_comparator(less: C) -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            less,
        }
    }

    /// Inserts `(key, value)`.  Returns `true` when newly inserted; a
    /// duplicate key leaves the stored value untouched and returns `false`.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.insert_impl(key, value, false)
    }

    /// Like [`insert`](Self::insert), but a duplicate key has its value
    /// overwritten (still returning `false`).
    pub fn insert_or_assign(&mut self, key: K, value: V) -> bool {
        self.insert_impl(key, value, true)
    }

    fn insert_impl(&mut self, key: K, value: V, assign: bool) -> bool {
        let Some(mut curr) = self.root else {
            let idx = self.alloc(RbNode::new(key, value));
            self.len += 1;
            self.root = util::insert_fixup(&mut self.arena, None, idx);
            return true;
        };

        loop {
            let node = &self.arena[curr as usize];
            if (self.less)(&key, &node.k) {
                match node.l {
                    Some(next) => curr = next,
                    None => {
                        self.attach(key, value, curr, true);
                        return true;
                    }
                }
            } else if (self.less)(&node.k, &key) {
                match node.r {
                    Some(next) => curr = next,
                    None => {
                        self.attach(key, value, curr, false);
                        return true;
                    }
                }
            } else {
                // equal under the comparator
                if assign {
                    self.arena[curr as usize].v = value;
                }
                return false;
            }
        }
    }

    fn attach(&mut self, key: K, value: V, parent: u32, left: bool) {
        let mut node = RbNode::new(key, value);
        node.p = Some(parent);
        let idx = self.alloc(node);
        if left {
            self.arena[parent as usize].l = Some(idx);
        } else {
            self.arena[parent as usize].r = Some(idx);
        }
        self.len += 1;
        self.root = util::insert_fixup(&mut self.arena, self.root, idx);
    }

    fn alloc(&mut self, node: RbNode<K, V>) -> u32 {
        match self.free.pop() {
            Some(idx) => {
                self.arena[idx as usize] = node;
                idx
            }
            None => {
                self.arena.push(node);
                (self.arena.len() - 1) as u32
            }
        }
    }

    /// Removes `key`.  Returns `true` iff a node was removed.
    pub fn erase(&mut self, key: &K) -> bool {
        let Some(z) = self.find_index(key) else {
            return false;
        };
        let (root, removed) = util::remove(&mut self.arena, self.root, z);
        self.root = root;
        self.free.push(removed);
        self.len -= 1;
        true
    }

    fn find_index(&self, key: &K) -> Option<u32> {
        let mut curr = self.root;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            curr = if (self.less)(key, &node.k) {
                node.l
            } else if (self.less)(&node.k, key) {
                node.r
            } else {
                return Some(i);
            };
        }
        None
    }

    pub fn find(&self, key: &K) -> Option<&V> {
        self.find_index(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find_index(key)?;
        Some(&mut self.arena[idx as usize].v)
    }

    pub fn has(&self, key: &K) -> bool {
        self.find_index(key).is_some()
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Destroys every node and resets the arena.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Root-left-right traversal.  The visitor receives each key, value
    /// and the node's [`TraversalInfo`].
    pub fn preorder<F>(&self, mut op: F)
    where
        F: FnMut(&K, &V, TraversalInfo),
    {
        util::preorder(&self.arena, self.root, 0, &mut op);
    }

    /// Left-root-right traversal: keys arrive in strictly increasing order.
    pub fn inorder<F>(&self, mut op: F)
    where
        F: FnMut(&K, &V, TraversalInfo),
    {
        util::inorder(&self.arena, self.root, 0, &mut op);
    }

    /// Left-right-root traversal.
    pub fn postorder<F>(&self, mut op: F)
    where
        F: FnMut(&K, &V, TraversalInfo),
    {
        util::postorder(&self.arena, self.root, 0, &mut op);
    }

    /// The common number of black nodes on every root-to-NIL path, or −1
    /// when the paths disagree.
    pub fn black_depth(&self) -> i32 {
        util::black_depth(&self.arena, self.root, 0)
    }

    /// Cheap diagnostic: black root, no double red, consistent black
    /// height.
    pub fn validate(&self) -> bool {
        util::validate(&self.arena, self.root)
    }

    /// Full structural audit, including parent links, key ordering and the
    /// tracked size.
    pub fn check_invariants(&self) -> Result<(), TreeInvariantError> {
        let counted = util::check(&self.arena, self.root, &self.less)?;
        if counted != self.len {
            return Err(TreeInvariantError::SizeMismatch {
                tracked: self.len,
                counted,
            });
        }
        Ok(())
    }

    pub fn arena(&self) -> &[RbNode<K, V>] {
        &self.arena
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }
}

impl<K, V, C> RbTree<K, V, C>
where
    K: std::fmt::Debug,
    V: std::fmt::Debug,
    C: Fn(&K, &K) -> bool,
{
    /// Debug rendering of the tree structure.
    pub fn dump(&self) -> String {
        print(&self.arena, self.root, "")
    }
}

//! Arena-level red-black algorithms: rotations, fix-ups, traversals and
//! invariant diagnostics.
//!
//! Every function works on `Option<u32>` indices into the caller-owned
//! arena.  `None` is the shared black NIL leaf, so a color read through an
//! absent link answers "black" and never touches storage.

use std::mem;

use thiserror::Error;

use super::types::{RbNode, TraversalInfo};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeInvariantError {
    #[error("root node {0} is red")]
    RedRoot(u32),
    #[error("root node {0} has a parent link")]
    RootParentLink(u32),
    #[error("red node {0} has a red child")]
    DoubleRed(u32),
    #[error("black height mismatch under node {0}")]
    BlackHeightMismatch(u32),
    #[error("broken parent link on a child of node {0}")]
    BrokenParentLink(u32),
    #[error("keys out of order at node {0}")]
    OrderViolation(u32),
    #[error("tracked size {tracked} does not match node count {counted}")]
    SizeMismatch { tracked: usize, counted: usize },
}

#[inline]
fn p<K, V>(arena: &[RbNode<K, V>], i: u32) -> Option<u32> {
    arena[i as usize].p
}

#[inline]
fn l<K, V>(arena: &[RbNode<K, V>], i: u32) -> Option<u32> {
    arena[i as usize].l
}

#[inline]
fn r<K, V>(arena: &[RbNode<K, V>], i: u32) -> Option<u32> {
    arena[i as usize].r
}

#[inline]
fn set_p<K, V>(arena: &mut Vec<RbNode<K, V>>, i: u32, v: Option<u32>) {
    arena[i as usize].p = v;
}

#[inline]
fn set_l<K, V>(arena: &mut Vec<RbNode<K, V>>, i: u32, v: Option<u32>) {
    arena[i as usize].l = v;
}

#[inline]
fn set_r<K, V>(arena: &mut Vec<RbNode<K, V>>, i: u32, v: Option<u32>) {
    arena[i as usize].r = v;
}

/// NIL reads as black.
#[inline]
pub(super) fn is_red<K, V>(arena: &[RbNode<K, V>], i: Option<u32>) -> bool {
    i.map(|i| arena[i as usize].red).unwrap_or(false)
}

#[inline]
fn set_red<K, V>(arena: &mut Vec<RbNode<K, V>>, i: u32, v: bool) {
    arena[i as usize].red = v;
}

/// Left-rotate at `n`: lifts `n.r` into `n`'s position, makes `n` the
/// lifted node's left child and moves the lifted node's former left
/// subtree to `n.r`.  Returns the (possibly new) root.
pub(super) fn rotate_left<K, V>(
    arena: &mut Vec<RbNode<K, V>>,
    root: Option<u32>,
    n: u32,
) -> Option<u32> {
    let pivot = r(arena, n).expect("left rotation requires a right child");
    let inner = l(arena, pivot);

    set_r(arena, n, inner);
    if let Some(inner) = inner {
        set_p(arena, inner, Some(n));
    }

    let parent = p(arena, n);
    set_p(arena, pivot, parent);
    set_l(arena, pivot, Some(n));
    set_p(arena, n, Some(pivot));

    match parent {
        None => Some(pivot),
        Some(parent) => {
            if l(arena, parent) == Some(n) {
                set_l(arena, parent, Some(pivot));
            } else {
                set_r(arena, parent, Some(pivot));
            }
            root
        }
    }
}

/// Mirror of [`rotate_left`].
pub(super) fn rotate_right<K, V>(
    arena: &mut Vec<RbNode<K, V>>,
    root: Option<u32>,
    n: u32,
) -> Option<u32> {
    let pivot = l(arena, n).expect("right rotation requires a left child");
    let inner = r(arena, pivot);

    set_l(arena, n, inner);
    if let Some(inner) = inner {
        set_p(arena, inner, Some(n));
    }

    let parent = p(arena, n);
    set_p(arena, pivot, parent);
    set_r(arena, pivot, Some(n));
    set_p(arena, n, Some(pivot));

    match parent {
        None => Some(pivot),
        Some(parent) => {
            if l(arena, parent) == Some(n) {
                set_l(arena, parent, Some(pivot));
            } else {
                set_r(arena, parent, Some(pivot));
            }
            root
        }
    }
}

/// Restores the red-black invariants after attaching the red leaf `x`.
/// Returns the new root.
pub(super) fn insert_fixup<K, V>(
    arena: &mut Vec<RbNode<K, V>>,
    mut root: Option<u32>,
    mut x: u32,
) -> Option<u32> {
    loop {
        let Some(parent) = p(arena, x) else {
            set_red(arena, x, false);
            return Some(x);
        };
        if !arena[parent as usize].red {
            return root;
        }

        // Red parent: the grandparent exists and is black.
        let grand = p(arena, parent).expect("red parent has a parent");
        let parent_is_left = l(arena, grand) == Some(parent);
        let uncle = if parent_is_left {
            r(arena, grand)
        } else {
            l(arena, grand)
        };

        if is_red(arena, uncle) {
            set_red(arena, parent, false);
            set_red(arena, uncle.expect("red uncle exists"), false);
            set_red(arena, grand, true);
            x = grand;
            continue;
        }

        // Black uncle.  An inner (zig-zag) child first rotates into the
        // outer position, re-entering the loop as its former parent.
        let x_is_left = l(arena, parent) == Some(x);
        if x_is_left != parent_is_left {
            root = if parent_is_left {
                rotate_left(arena, root, parent)
            } else {
                rotate_right(arena, root, parent)
            };
            x = parent;
            continue;
        }

        // Outer child: one rotation at the grandparent finishes.
        root = if parent_is_left {
            rotate_right(arena, root, grand)
        } else {
            rotate_left(arena, root, grand)
        };
        set_red(arena, parent, false);
        set_red(arena, grand, true);
        return root;
    }
}

/// Swaps only the key/value payload of two distinct arena slots, leaving
/// links and colors in place.
fn swap_kv<K, V>(arena: &mut [RbNode<K, V>], a: u32, b: u32) {
    debug_assert_ne!(a, b);
    let (a, b) = (a as usize, b as usize);
    let (lo, hi) = arena.split_at_mut(a.max(b));
    let (x, y) = if a < b {
        (&mut lo[a], &mut hi[0])
    } else {
        (&mut hi[0], &mut lo[b])
    };
    mem::swap(&mut x.k, &mut y.k);
    mem::swap(&mut x.v, &mut y.v);
}

/// Removes the node at `z`.  Returns the new root and the index of the
/// physically vacated arena slot (for the caller's free list).
///
/// A node with two children trades key/value with its in-order
/// predecessor (the right-most node of the left subtree) and the
/// predecessor's slot is the one spliced out.
pub(super) fn remove<K, V>(
    arena: &mut Vec<RbNode<K, V>>,
    mut root: Option<u32>,
    z: u32,
) -> (Option<u32>, u32) {
    let target = match (l(arena, z), r(arena, z)) {
        (Some(lc), Some(_)) => {
            let mut pred = lc;
            while let Some(next) = r(arena, pred) {
                pred = next;
            }
            swap_kv(arena, z, pred);
            pred
        }
        _ => z,
    };

    // `target` has at most one child now; splice it out.
    let child = l(arena, target).or(r(arena, target));
    let parent = p(arena, target);

    match parent {
        None => root = child,
        Some(parent) => {
            if l(arena, parent) == Some(target) {
                set_l(arena, parent, child);
            } else {
                set_r(arena, parent, child);
            }
        }
    }
    if let Some(child) = child {
        set_p(arena, child, parent);
    }

    if !arena[target as usize].red {
        root = erase_fixup(arena, root, child, parent);
    }

    (root, target)
}

/// Repairs the missing black on the path through `x` (possibly NIL, hence
/// the explicit `parent`).  Returns the new root.
fn erase_fixup<K, V>(
    arena: &mut Vec<RbNode<K, V>>,
    mut root: Option<u32>,
    mut x: Option<u32>,
    mut parent: Option<u32>,
) -> Option<u32> {
    loop {
        let Some(par) = parent else {
            if let Some(x) = x {
                set_red(arena, x, false);
            }
            return root;
        };

        if is_red(arena, x) {
            set_red(arena, x.expect("red node exists"), false);
            return root;
        }

        // `x`'s subtree is one black short, so a sibling subtree with
        // positive black height must exist.
        let x_is_left = l(arena, par) == x;
        let s = if x_is_left { r(arena, par) } else { l(arena, par) }
            .expect("black-deficient node has a sibling");

        if arena[s as usize].red {
            // Red sibling: rotate it over the parent, exposing a black one.
            set_red(arena, s, false);
            set_red(arena, par, true);
            root = if x_is_left {
                rotate_left(arena, root, par)
            } else {
                rotate_right(arena, root, par)
            };
            continue;
        }

        let (near, far) = if x_is_left {
            (l(arena, s), r(arena, s))
        } else {
            (r(arena, s), l(arena, s))
        };

        if !is_red(arena, near) && !is_red(arena, far) {
            // All-black sibling: push the deficit up.
            set_red(arena, s, true);
            x = Some(par);
            parent = p(arena, par);
            continue;
        }

        if !is_red(arena, far) {
            // Near child red, far black: rotate the sibling so the red
            // lands on the far side.
            set_red(arena, s, true);
            set_red(arena, near.expect("near child is red"), false);
            root = if x_is_left {
                rotate_right(arena, root, s)
            } else {
                rotate_left(arena, root, s)
            };
            continue;
        }

        // Far child red: terminal rotation at the parent.
        let parent_red = arena[par as usize].red;
        set_red(arena, s, parent_red);
        set_red(arena, par, false);
        set_red(arena, far.expect("far child is red"), false);
        root = if x_is_left {
            rotate_left(arena, root, par)
        } else {
            rotate_right(arena, root, par)
        };
        return root;
    }
}

pub(super) fn preorder<K, V, F>(
    arena: &[RbNode<K, V>],
    node: Option<u32>,
    complete_index: u64,
    op: &mut F,
) where
    F: FnMut(&K, &V, TraversalInfo),
{
    let Some(i) = node else {
        return;
    };
    let n = &arena[i as usize];
    op(
        &n.k,
        &n.v,
        TraversalInfo {
            complete_index,
            red: n.red,
        },
    );
    preorder(arena, n.l, complete_index * 2 + 1, op);
    preorder(arena, n.r, complete_index * 2 + 2, op);
}

pub(super) fn inorder<K, V, F>(
    arena: &[RbNode<K, V>],
    node: Option<u32>,
    complete_index: u64,
    op: &mut F,
) where
    F: FnMut(&K, &V, TraversalInfo),
{
    let Some(i) = node else {
        return;
    };
    let n = &arena[i as usize];
    inorder(arena, n.l, complete_index * 2 + 1, op);
    op(
        &n.k,
        &n.v,
        TraversalInfo {
            complete_index,
            red: n.red,
        },
    );
    inorder(arena, n.r, complete_index * 2 + 2, op);
}

pub(super) fn postorder<K, V, F>(
    arena: &[RbNode<K, V>],
    node: Option<u32>,
    complete_index: u64,
    op: &mut F,
) where
    F: FnMut(&K, &V, TraversalInfo),
{
    let Some(i) = node else {
        return;
    };
    let n = &arena[i as usize];
    postorder(arena, n.l, complete_index * 2 + 1, op);
    postorder(arena, n.r, complete_index * 2 + 2, op);
    op(
        &n.k,
        &n.v,
        TraversalInfo {
            complete_index,
            red: n.red,
        },
    );
}

/// Common black height of every root-to-NIL path, or −1 when the paths
/// disagree.  The empty tree has black depth 0.
pub(super) fn black_depth<K, V>(arena: &[RbNode<K, V>], node: Option<u32>, acc: i32) -> i32 {
    let Some(i) = node else {
        return acc;
    };
    let n = &arena[i as usize];
    let acc = acc + !n.red as i32;

    let left = black_depth(arena, n.l, acc);
    if left < 0 {
        return -1;
    }
    let right = black_depth(arena, n.r, acc);
    if right < 0 {
        return -1;
    }
    if left != right {
        return -1;
    }
    left
}

fn no_double_red<K, V>(arena: &[RbNode<K, V>], node: Option<u32>) -> bool {
    let Some(i) = node else {
        return true;
    };
    let n = &arena[i as usize];
    if n.red && (is_red(arena, n.l) || is_red(arena, n.r)) {
        return false;
    }
    no_double_red(arena, n.l) && no_double_red(arena, n.r)
}

/// Cheap boolean diagnostic: black root, no double red, consistent black
/// height.
pub(super) fn validate<K, V>(arena: &[RbNode<K, V>], root: Option<u32>) -> bool {
    !is_red(arena, root) && no_double_red(arena, root) && black_depth(arena, root, 0) >= 0
}

/// Full structural audit.  Returns the node count on success so the caller
/// can reconcile its tracked size.
pub(super) fn check<K, V, C>(
    arena: &[RbNode<K, V>],
    root: Option<u32>,
    less: &C,
) -> Result<usize, TreeInvariantError>
where
    C: Fn(&K, &K) -> bool,
{
    let Some(root_idx) = root else {
        return Ok(0);
    };
    if arena[root_idx as usize].p.is_some() {
        return Err(TreeInvariantError::RootParentLink(root_idx));
    }
    if arena[root_idx as usize].red {
        return Err(TreeInvariantError::RedRoot(root_idx));
    }

    fn walk<K, V>(arena: &[RbNode<K, V>], i: u32) -> Result<(usize, usize), TreeInvariantError> {
        let n = &arena[i as usize];
        for child in [n.l, n.r].into_iter().flatten() {
            if arena[child as usize].p != Some(i) {
                return Err(TreeInvariantError::BrokenParentLink(i));
            }
            if n.red && arena[child as usize].red {
                return Err(TreeInvariantError::DoubleRed(i));
            }
        }
        let (lh, lc) = n.l.map(|li| walk(arena, li)).transpose()?.unwrap_or((0, 0));
        let (rh, rc) = n.r.map(|ri| walk(arena, ri)).transpose()?.unwrap_or((0, 0));
        if lh != rh {
            return Err(TreeInvariantError::BlackHeightMismatch(i));
        }
        Ok((lh + !n.red as usize, lc + rc + 1))
    }

    fn ordered<K, V, C>(
        arena: &[RbNode<K, V>],
        i: u32,
        last: &mut Option<u32>,
        less: &C,
    ) -> Result<(), TreeInvariantError>
    where
        C: Fn(&K, &K) -> bool,
    {
        let n = &arena[i as usize];
        if let Some(li) = n.l {
            ordered(arena, li, last, less)?;
        }
        if let Some(prev) = *last {
            if !less(&arena[prev as usize].k, &n.k) {
                return Err(TreeInvariantError::OrderViolation(i));
            }
        }
        *last = Some(i);
        if let Some(ri) = n.r {
            ordered(arena, ri, last, less)?;
        }
        Ok(())
    }

    let (_, counted) = walk(arena, root_idx)?;
    let mut last = None;
    ordered(arena, root_idx, &mut last, less)?;
    Ok(counted)
}

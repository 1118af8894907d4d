//! Sift algorithms and diagnostics over the arena + heap-array pair.

use thiserror::Error;

use super::types::HeapEntry;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeapInvariantError {
    #[error("heap slot {position} stores heap_index {stored}")]
    IndexDesync { position: usize, stored: usize },
    #[error("heap property violated at position {position}")]
    OrderViolation { position: usize },
    #[error("identity map has {map_len} entries but heap array has {heap_len}")]
    LengthMismatch { map_len: usize, heap_len: usize },
    #[error("identity map entry does not round-trip through the heap array")]
    IdentityDesync,
}

#[inline]
pub(super) fn parent_index(i: usize) -> usize {
    (i + 1) / 2 - 1
}

#[inline]
pub(super) fn left_child_index(i: usize) -> usize {
    2 * i + 1
}

#[inline]
pub(super) fn right_child_index(i: usize) -> usize {
    2 * i + 2
}

/// Exchanges heap positions `i` and `j` together with both entries'
/// `heap_index` back-references.  `i == j` degenerates to a no-op.
pub(super) fn entry_swap<T>(arena: &mut [HeapEntry<T>], heap: &mut [u32], i: usize, j: usize) {
    heap.swap(i, j);
    arena[heap[i] as usize].heap_index = i;
    arena[heap[j] as usize].heap_index = j;
}

/// Moves the entry at `i` up while it compares greater than its parent.
/// Returns whether any motion took place.
pub(super) fn bubble_up<T, C>(
    arena: &mut [HeapEntry<T>],
    heap: &mut [u32],
    mut i: usize,
    less: &C,
) -> bool
where
    C: Fn(&T, &T) -> bool,
{
    let mut moved = false;
    while i > 0 {
        let parent = parent_index(i);
        let parent_value = &arena[heap[parent] as usize].value;
        let current = &arena[heap[i] as usize].value;
        if !less(parent_value, current) {
            break;
        }
        entry_swap(arena, heap, i, parent);
        moved = true;
        i = parent;
    }
    moved
}

/// Moves the entry at `i` down while a child compares greater.  With two
/// children the right one is chosen only when strictly greater than the
/// left, so order-equivalent children keep the left.  Returns whether any
/// motion took place.
pub(super) fn bubble_down<T, C>(
    arena: &mut [HeapEntry<T>],
    heap: &mut [u32],
    mut i: usize,
    less: &C,
) -> bool
where
    C: Fn(&T, &T) -> bool,
{
    let mut moved = false;
    loop {
        let left = left_child_index(i);
        if left >= heap.len() {
            break;
        }
        let right = right_child_index(i);
        let chosen = if right < heap.len() {
            let left_value = &arena[heap[left] as usize].value;
            let right_value = &arena[heap[right] as usize].value;
            if less(left_value, right_value) {
                right
            } else {
                left
            }
        } else {
            left
        };
        let chosen_value = &arena[heap[chosen] as usize].value;
        let current = &arena[heap[i] as usize].value;
        if !less(current, chosen_value) {
            break;
        }
        entry_swap(arena, heap, i, chosen);
        moved = true;
        i = chosen;
    }
    moved
}

/// Audits the heap-array half of the structure: every slot's back-reference
/// and the max-heap property.
pub(super) fn check<T, C>(
    arena: &[HeapEntry<T>],
    heap: &[u32],
    less: &C,
) -> Result<(), HeapInvariantError>
where
    C: Fn(&T, &T) -> bool,
{
    for (i, &slot) in heap.iter().enumerate() {
        let entry = &arena[slot as usize];
        if entry.heap_index != i {
            return Err(HeapInvariantError::IndexDesync {
                position: i,
                stored: entry.heap_index,
            });
        }
        if i > 0 {
            let parent = &arena[heap[parent_index(i)] as usize];
            if less(&parent.value, &entry.value) {
                return Err(HeapInvariantError::OrderViolation { position: i });
            }
        }
    }
    Ok(())
}

//! Entry and identity types for the heap.

use std::hash::Hash;

/// Extrinsic identity carried by every stored value.
///
/// A push whose identity is already present overwrites that entry's value
/// in place instead of inserting a duplicate.
pub trait UniqueId {
    type Id: Hash + Eq;

    fn unique_id(&self) -> Self::Id;
}

/// Arena slot holding one stored value and its current position in the
/// heap array.  The slot itself is stable for the entry's whole lifetime;
/// only `heap_index` moves.
#[derive(Clone, Debug)]
pub struct HeapEntry<T> {
    pub value: T,
    pub heap_index: usize,
}

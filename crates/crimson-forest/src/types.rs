//! Comparator contract shared by both containers.

/// Strict "less than" predicate.  Both containers derive `greater` and
/// `equal` from two calls of this single primitive; keys comparing equal
/// under it are treated as the same key.
pub type Less<T> = fn(&T, &T) -> bool;

/// Default comparator: plain `a < b`.
pub fn default_less<T: PartialOrd>(a: &T, b: &T) -> bool {
    a < b
}

//! Order-sensitive hash folding for node sequences.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Fold `next` into `acc`: rotate left by 5, add the original, xor the next hash.
///
/// Unlike a plain xor, swapping two inputs changes the result.
#[inline]
pub fn combine(acc: u64, next: u64) -> u64 {
    acc.rotate_left(5).wrapping_add(acc) ^ next
}

/// Hash a single value with the standard hasher.
pub(crate) fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Fold the hashes of `items` in order, starting from zero.
pub fn fold<'a, T, I>(items: I) -> u64
where
    T: Hash + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .fold(0, |acc, item| combine(acc, hash_one(item)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_is_order_sensitive() {
        let a = 0x1234_u64;
        let b = 0xabcd_u64;
        assert_ne!(combine(combine(0, a), b), combine(combine(0, b), a));
    }

    #[test]
    fn test_combine_from_zero() {
        assert_eq!(combine(0, 42), 42);
    }

    #[test]
    fn test_fold_empty_is_zero() {
        let empty: [u8; 0] = [];
        assert_eq!(fold(&empty), 0);
    }

    #[test]
    fn test_fold_distinguishes_reordering() {
        assert_ne!(fold(&["first", "second"]), fold(&["second", "first"]));
    }

    #[test]
    fn test_fold_is_deterministic() {
        assert_eq!(fold(&["a", "b", "c"]), fold(&["a", "b", "c"]));
    }
}

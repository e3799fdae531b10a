//! Utility functions for deriving short, stable ids from hashable values
use std::hash::{DefaultHasher, Hash, Hasher};

/// Hash a value with the standard library's default hasher
///
/// # Note:
/// The result is stable within a single build, it should not be persisted across
/// toolchain versions.
pub(crate) fn calculate_hash<T: Hash + ?Sized>(t: &T) -> u64 {
    let mut s = DefaultHasher::new();
    t.hash(&mut s);
    s.finish()
}

/// Hash a value, and format the hash as lowercase hexadecimal
pub(crate) fn hash_as_hex_string<T: Hash + ?Sized>(t: &T) -> String {
    format!("{:x}", calculate_hash(t))
}

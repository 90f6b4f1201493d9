// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Seeded MurmurHash3 family used to derive `k` indexes per key.
use std::io::Cursor;
use std::ops::Range;

/// Compute the 32-bit MurmurHash3 of `key` with the given seed.
pub fn murmur3(key: &[u8], seed: u32) -> u32 {
    // Reading from an in-memory cursor cannot fail.
    ::murmur3::murmur3_32(&mut Cursor::new(key), seed)
        .unwrap_or_else(|e| unreachable!("murmur3 over a byte slice failed: {}", e))
}

/// A family of `k` hash functions mapping keys onto `[0, size)`.
///
/// Function `i` is MurmurHash3 seeded with `i`, so the same key always
/// yields the same sequence of indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashFamily {
    nhashes: u32,
    size: u64,
}

impl HashFamily {
    /// Create a family of `nhashes` functions over an index space of `size`.
    ///
    /// Both values are validated by the callers; this only panics in debug
    /// builds if either is zero.
    pub fn new(nhashes: u32, size: u64) -> Self {
        debug_assert!(nhashes > 0 && size > 0);

        Self { nhashes, size }
    }

    /// Number of functions in the family.
    pub fn len(&self) -> usize {
        self.nhashes as usize
    }

    /// A family always has at least one function.
    pub fn is_empty(&self) -> bool {
        self.nhashes == 0
    }

    /// Size of the index space.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Hash `key` with function `i` and reduce it to an index.
    pub fn index(&self, key: &[u8], i: u32) -> usize {
        (u64::from(murmur3(key, i)) % self.size) as usize
    }

    /// Return the indexes of `key`, one per function.
    pub fn indexes<'a>(&self, key: &'a [u8]) -> Indexes<'a> {
        Indexes {
            family: *self,
            key,
            seeds: 0..self.nhashes,
        }
    }
}

/// Iterator over the indexes of a key, see [`HashFamily::indexes`].
#[derive(Clone, Debug)]
pub struct Indexes<'a> {
    family: HashFamily,
    key: &'a [u8],
    seeds: Range<u32>,
}

impl<'a> Iterator for Indexes<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.seeds.next().map(|i| self.family.index(self.key, i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.seeds.size_hint()
    }
}

impl<'a> ExactSizeIterator for Indexes<'a> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn murmur3_reference_values() {
        assert_eq!(murmur3(b"", 0), 0);
        assert_eq!(murmur3(b"", 1), 0x514e_28b7);
        assert_eq!(murmur3(b"hello", 0), 0x248b_fa47);
    }

    #[test]
    fn indexes_are_deterministic() {
        let family = HashFamily::new(7, 1000);
        let a: Vec<usize> = family.indexes(b"foo").collect();
        let b: Vec<usize> = family.indexes(b"foo").collect();

        assert_eq!(a.len(), 7);
        assert_eq!(a, b);
    }

    #[test]
    fn indexes_are_in_range() {
        let family = HashFamily::new(5, 17);

        for i in 0..1000u32 {
            let key = i.to_le_bytes();
            assert_eq!(family.indexes(&key).len(), 5);
            assert!(family.indexes(&key).all(|idx| idx < 17));
        }
    }

    #[test]
    fn seeds_give_different_functions() {
        let family = HashFamily::new(2, u64::from(u32::MAX) + 1);
        let idx: Vec<usize> = family.indexes(b"bar").collect();

        assert_eq!(idx[0], murmur3(b"bar", 0) as usize);
        assert_eq!(idx[1], murmur3(b"bar", 1) as usize);
        assert_ne!(idx[0], idx[1]);
    }
}

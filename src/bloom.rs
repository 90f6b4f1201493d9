// Copyright (c) 2018 Aleksandr Bezobchuk
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! A Bloom filter over byte keys using `k` seeded MurmurHash3 functions.

use std::f64;

use crate::bitvec::BitVec;
use crate::error::{Error, Result};
use crate::hash::HashFamily;

/// `ln` squared.
const LN_SQR: f64 = f64::consts::LN_2 * f64::consts::LN_2;

/// A Bloom filter of `filter_size` bits and `hash_num` hash functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomFilter {
    bits: BitVec,
    hashes: HashFamily,
}

impl BloomFilter {
    /// Return a new single-hash Bloom filter of `filter_size` bits.
    pub fn new(filter_size: usize) -> Result<Self> {
        Self::with_hashes(1, filter_size)
    }

    /// Return a new Bloom filter of `filter_size` bits using `hash_num` hash functions.
    pub fn with_hashes(hash_num: u32, filter_size: usize) -> Result<Self> {
        if hash_num == 0 {
            return Err(Error::ZeroHashes);
        }
        if filter_size == 0 {
            return Err(Error::ZeroFilterSize);
        }
        let bits = BitVec::new(filter_size);

        tracing::debug!(
            filter_size,
            hash_num,
            words = bits.as_bytes().len(),
            "created bloom filter"
        );

        Ok(Self {
            bits,
            hashes: HashFamily::new(hash_num, filter_size as u64),
        })
    }

    /// Set a key in the Bloom filter. This operation is idempotent with regards
    /// to each unique key.
    pub fn put<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) {
        for index in self.hashes.indexes(key.as_ref()) {
            self.bits.set(index);
        }
    }

    /// Return whether or not a given key is likely in the Bloom filter. False
    /// positives are possible, but a false negative will never occur.
    pub fn get<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        self.hashes
            .indexes(key.as_ref())
            .all(|index| self.bits.is_set(index))
    }

    /// Rough count of the keys in the filter: the number of set bits divided
    /// by the number of hash functions. Undercounts as collisions accumulate.
    pub fn size(&self) -> f64 {
        self.bits.count_ones() as f64 / self.hashes.len() as f64
    }

    /// Return the number of bits in this filter.
    pub fn bits(&self) -> usize {
        self.bits.len()
    }

    /// Number of hashes used (`k` parameter).
    pub fn hashes(&self) -> usize {
        self.hashes.len()
    }

    /// Compute the union of two Bloom filters.
    pub fn union(&self, other: &Self) -> Result<Self> {
        if !self.is_comparable(other) {
            return Err(Error::Incompatible(
                "bloom filters differ in size or hash count",
            ));
        }
        tracing::trace!(bits = self.bits(), "union of bloom filters");

        Ok(Self {
            bits: self.bits.union(&other.bits),
            hashes: self.hashes,
        })
    }

    /// Check whether two filters can be unioned.
    pub fn is_comparable(&self, other: &Self) -> bool {
        self.hashes == other.hashes && self.bits.len() == other.bits.len()
    }

    /// Return the underlying bytes storage.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }
}

/// Return the optimal bit vector size for a Bloom filter given an approximate
/// size and a desired false positive rate.
pub fn optimal_bits(capacity: usize, fp_rate: f64) -> usize {
    (-((fp_rate.ln() * (capacity as f64)) / LN_SQR)).ceil() as usize
}

/// Return the optimal item capacity of a filter given a bit vector size and false positive rate.
pub fn optimal_capacity(nbits: usize, fp_rate: f64) -> usize {
    ((-(nbits as f64) * LN_SQR) / fp_rate.ln()).round() as usize
}

/// Return the optimal number of hash functions for a Bloom filter given a
/// bit vector size and an approximate set size.
///
/// Also called `k`. Never less than one, so the result is always a valid
/// argument to [`BloomFilter::with_hashes`].
pub fn optimal_hashes(nbits: usize, capacity: usize) -> u32 {
    let k = (((nbits / capacity.max(1)) as f64) * f64::consts::LN_2).ceil() as u32;

    k.max(1)
}

impl AsRef<[u8]> for BloomFilter {
    fn as_ref(&self) -> &[u8] {
        self.bits.as_bytes()
    }
}

// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! HyperLogLog cardinality estimator over 32-bit MurmurHash3 values.
//!
//! The top `b` bits of a key's hash select one of `m = 2^b` registers. The
//! remaining `R = 32 - b` bits give the key's rank: the 1-indexed position of
//! their lowest set bit, or `R` if none is set. Each register keeps the
//! largest rank written to it, and the estimate is the bias-corrected
//! harmonic mean of `2^register` described by Flajolet et al.

use crate::error::{Error, Result};
use crate::hash::murmur3;

/// Width of the hash values, in bits.
const HASH_BITS: u32 = u32::BITS;

/// Size of the hash space, `2^32`.
const HASH_SPACE: f64 = (1u64 << HASH_BITS) as f64;

/// Largest register index width leaving at least one rank bit.
pub const MAX_INDEX_BITS: u32 = HASH_BITS - 1;

/// A HyperLogLog cardinality estimator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HyperLogLog {
    registers: Vec<u8>,
    index_bits: u32,
    rank_bits: u32,
}

impl HyperLogLog {
    /// Return a new estimator with `2^b` registers.
    pub fn new(b: u32) -> Result<Self> {
        if b == 0 || b > MAX_INDEX_BITS {
            return Err(Error::RegisterBits {
                bits: b,
                max: MAX_INDEX_BITS,
            });
        }
        let m = 1usize << b;

        tracing::debug!(b, registers = m, rank_bits = HASH_BITS - b, "created hyperloglog");

        Ok(Self {
            registers: vec![0; m],
            index_bits: b,
            rank_bits: HASH_BITS - b,
        })
    }

    /// Record an occurrence of `key`.
    pub fn observe<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) {
        let (index, rank) = self.index_and_rank(murmur3(key.as_ref(), 0));
        let register = &mut self.registers[index];

        if rank > *register {
            *register = rank;
        }
    }

    /// Same as [`HyperLogLog::observe`].
    pub fn put<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) {
        self.observe(key)
    }

    /// Estimate the number of distinct keys observed.
    pub fn estimate(&self) -> f64 {
        let m = self.registers.len() as f64;
        let sum: f64 = self
            .registers
            .iter()
            .map(|&r| 1.0 / (1u64 << r) as f64)
            .sum();
        let raw = alpha(self.registers.len()) * m * m / sum;

        if raw <= 2.5 * m {
            let zeros = self.registers.iter().filter(|&&r| r == 0).count();
            if zeros != 0 {
                // Linear counting.
                return m * (m / zeros as f64).ln();
            }
        } else if raw > HASH_SPACE / 30.0 {
            return -HASH_SPACE * (1.0 - raw / HASH_SPACE).ln();
        }
        raw
    }

    /// Register values, indexed by the top `b` bits of the hash.
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Number of bits selecting a register (`b` parameter).
    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Replace every register with the maximum of itself and the matching
    /// register of `other`.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        if self.index_bits != other.index_bits {
            return Err(Error::Incompatible("hyperloglogs differ in register count"));
        }
        tracing::trace!(registers = self.registers.len(), "merging hyperloglogs");

        for (a, &b) in self.registers.iter_mut().zip(other.registers.iter()) {
            *a = (*a).max(b);
        }
        Ok(())
    }

    fn index_and_rank(&self, hash: u32) -> (usize, u8) {
        let index = (hash >> self.rank_bits) as usize;
        let window = hash & ((1 << self.rank_bits) - 1);
        let rank = if window == 0 {
            self.rank_bits
        } else {
            window.trailing_zeros() + 1
        };
        (index, rank as u8)
    }
}

/// Bias correction constant for `m` registers.
pub fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / m as f64),
    }
}

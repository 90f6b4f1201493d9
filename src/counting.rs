// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! A counting Bloom filter with fixed-width saturating counters.
//!
//! Each slot of the filter is a counter of `bit_length(counter_num)` bits,
//! packed into 64-bit words. Inserting a key increments its `hash_num`
//! counters; a key is reported present once every one of its counters has
//! reached `count_thres`. Counters saturate and there is no removal, so the
//! membership test is monotone.

use crate::counters::CounterVec;
use crate::error::{Error, Result};
use crate::hash::{HashFamily, Indexes};

/// Default membership threshold.
pub const DEFAULT_THRESHOLD: u64 = 1;

/// A counting Bloom filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountingBloomFilter {
    counters: CounterVec,
    hashes: HashFamily,
    threshold: u64,
}

impl CountingBloomFilter {
    /// Return a new counting filter whose counters can hold at least
    /// `counter_num`, with a membership threshold of one.
    pub fn new(hash_num: u32, filter_size: usize, counter_num: u64) -> Result<Self> {
        Self::with_threshold(hash_num, filter_size, counter_num, DEFAULT_THRESHOLD)
    }

    /// Return a new counting filter reporting keys seen at least `count_thres` times.
    pub fn with_threshold(
        hash_num: u32,
        filter_size: usize,
        counter_num: u64,
        count_thres: u64,
    ) -> Result<Self> {
        if hash_num == 0 {
            return Err(Error::ZeroHashes);
        }
        if filter_size == 0 {
            return Err(Error::ZeroFilterSize);
        }
        if counter_num == 0 {
            return Err(Error::ZeroCounter);
        }
        let width = u64::BITS - counter_num.leading_zeros();
        let counters = CounterVec::new(filter_size, width);

        if count_thres == 0 || count_thres > counters.max_value() {
            return Err(Error::ThresholdOutOfRange {
                threshold: count_thres,
                max: counters.max_value(),
            });
        }
        tracing::debug!(
            filter_size,
            hash_num,
            counter_width = width,
            counters_per_word = counters.per_word(),
            words = counters.words(),
            count_thres,
            "created counting bloom filter"
        );

        Ok(Self {
            counters,
            hashes: HashFamily::new(hash_num, filter_size as u64),
            threshold: count_thres,
        })
    }

    /// Count one occurrence of `key`.
    pub fn put<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) {
        for index in self.hashes.indexes(key.as_ref()) {
            self.counters.increment(index);
        }
    }

    /// Return whether every counter of `key` has reached the threshold.
    pub fn get<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        self.counters(key).all(|count| count >= self.threshold)
    }

    /// Approximate number of `put` calls: the sum of all counters divided by
    /// the number of hash functions. Undercounts once counters saturate.
    pub fn size(&self) -> f64 {
        self.counters.sum() as f64 / self.hashes.len() as f64
    }

    /// Indexes of the counters belonging to `key`.
    pub fn indexes<'a, K: AsRef<[u8]> + ?Sized>(&self, key: &'a K) -> Indexes<'a> {
        self.hashes.indexes(key.as_ref())
    }

    /// Read the counter at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not smaller than the filter size.
    pub fn counter(&self, index: usize) -> u64 {
        self.counters.get(index)
    }

    /// Values of the counters belonging to `key`, one per hash function.
    pub fn counters<'a, K: AsRef<[u8]> + ?Sized>(
        &'a self,
        key: &'a K,
    ) -> impl Iterator<Item = u64> + 'a {
        self.indexes(key).map(move |index| self.counters.get(index))
    }

    /// Smallest counter of `key`, an upper bound on how often it was put
    /// as long as no counter saturated.
    pub fn min_count<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> u64 {
        self.counters(key).min().unwrap_or(0)
    }

    /// Replace every counter with the maximum of itself and the matching
    /// counter of `other`.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        if self.hashes != other.hashes || self.counters.width() != other.counters.width() {
            return Err(Error::Incompatible(
                "counting filters differ in size, hash count or counter width",
            ));
        }
        tracing::trace!(filter_size = self.bits(), "merging counting bloom filters");
        self.counters.merge(&other.counters);

        Ok(())
    }

    /// Number of counters in this filter.
    pub fn bits(&self) -> usize {
        self.counters.len()
    }

    /// Number of hashes used (`k` parameter).
    pub fn hashes(&self) -> usize {
        self.hashes.len()
    }

    /// Membership threshold.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Value at which counters saturate.
    pub fn max_count(&self) -> u64 {
        self.counters.max_value()
    }

    /// Width of each counter, in bits.
    pub fn counter_width(&self) -> u32 {
        self.counters.width()
    }
}

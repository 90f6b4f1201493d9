//! Fixed-memory probabilistic sketches over byte keys.
//!
//! # Bloom Filters
//!
//! A Bloom filter is a space-efficient probabilistic data structure that is
//! used to test whether an element is a member of a set. It allows for queries
//! to return: "possibly in set" or "definitely not in set". Elements can be
//! added to the set, but not removed; the more elements that are added to the
//! set, the larger the probability of false positives. [`BloomFilter`] maps
//! each key onto `k` bits using MurmurHash3 seeded with `0..k`.
//!
//! # Counting Bloom Filters
//!
//! [`CountingBloomFilter`] replaces every bit with a small saturating counter,
//! packed into 64-bit words. A key is reported present once all of its `k`
//! counters reach a threshold, which turns the filter into an approximate
//! "seen at least `n` times" test. The raw counters of a key are available
//! for callers combining several filters, for example to approximate the
//! size of a join.
//!
//! # HyperLogLog
//!
//! [`HyperLogLog`] estimates the number of distinct keys in a stream using
//! `2^b` one-byte registers, with a standard error of about `1.04 / sqrt(2^b)`.
//!
//! # Example
//!
//! ```
//! use sketchy::{BloomFilter, CountingBloomFilter, HyperLogLog};
//!
//! let mut filter = BloomFilter::with_hashes(3, 1024).unwrap();
//! filter.put("foo");
//! filter.put("bar");
//!
//! assert!(filter.get("foo"));
//! assert!(filter.get("bar"));
//!
//! let mut counts = CountingBloomFilter::with_threshold(3, 1024, 15, 2).unwrap();
//! counts.put("foo");
//! assert!(!counts.get("foo"));
//! counts.put("foo");
//! assert!(counts.get("foo"));
//!
//! let mut hll = HyperLogLog::new(10).unwrap();
//! for key in ["a", "b", "c", "a"] {
//!     hll.observe(key);
//! }
//! assert!((hll.estimate() - 3.0).abs() < 0.5);
//! ```
#![warn(missing_docs)]
#![allow(clippy::bool_assert_comparison)]

pub mod bitvec;
pub mod bloom;
pub mod counters;
pub mod counting;
pub mod error;
pub mod hash;
pub mod hyperloglog;

pub use bloom::BloomFilter;
pub use counting::CountingBloomFilter;
pub use error::{Error, Result};
pub use hash::HashFamily;
pub use hyperloglog::HyperLogLog;

// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Construction and merge errors.
use thiserror::Error;

/// Result type returned by sketch constructors and merges.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned when a sketch is configured with unusable parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The index space of a filter must hold at least one slot.
    #[error("filter size must be positive")]
    ZeroFilterSize,
    /// At least one hash function is required.
    #[error("number of hash functions must be positive")]
    ZeroHashes,
    /// A counter must be at least one bit wide.
    #[error("maximum counter value must be positive")]
    ZeroCounter,
    /// The membership threshold can never be reached by a counter.
    #[error("count threshold {threshold} must be in 1..={max}")]
    ThresholdOutOfRange {
        /// Requested threshold.
        threshold: u64,
        /// Largest value a counter can hold.
        max: u64,
    },
    /// The register index width leaves no bits for the rank.
    #[error("register index width {bits} must be in 1..={max}")]
    RegisterBits {
        /// Requested index width.
        bits: u32,
        /// Largest usable index width.
        max: u32,
    },
    /// Two sketches with different configurations cannot be combined.
    #[error("incompatible sketches: {0}")]
    Incompatible(&'static str),
}

// Copyright (c) 2020 Helge Wrede, Alexander Schultheiß, Lukas Simon
// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Bit vector used as flag storage by [`crate::BloomFilter`].
use std::fmt::Debug;

/// Width of a storage word, in bits.
const WORD_BITS: usize = u8::BITS as usize;

/// A packed bit vector over `u8` words.
///
/// Bit `i` lives in word `i / 8` at offset `i % 8`.
#[derive(Clone, PartialEq, Eq)]
pub struct BitVec {
    words: Vec<u8>,
    nbits: usize,
}

impl BitVec {
    /// Create a zeroed bit vector holding `nbits` bits.
    pub fn new(nbits: usize) -> Self {
        Self {
            nbits,
            words: vec![0; nbits.div_ceil(WORD_BITS)],
        }
    }

    /// Get the length in bits of the vector.
    pub fn len(&self) -> usize {
        self.nbits
    }

    /// Check whether this vector is empty, ie. has a length of zero.
    pub fn is_empty(&self) -> bool {
        self.nbits == 0
    }

    /// Set a single bit to `1`.
    pub fn set(&mut self, index: usize) {
        let (word, mask) = self.locate(index);

        self.words[word] |= mask;
    }

    /// Check whether a bit is set.
    pub fn is_set(&self, index: usize) -> bool {
        let (word, mask) = self.locate(index);

        self.words[word] & mask == mask
    }

    /// Count the number of `1` bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Count the number of `0` bits.
    pub fn count_zeros(&self) -> usize {
        self.len() - self.count_ones()
    }

    /// Return the union of two bit vectors.
    /// This is a bitwise `OR` of two vectors.
    pub fn union(&self, other: &Self) -> Self {
        if self.nbits != other.nbits {
            panic!(
                "unable to union bitvecs with different lengths: {} and {}",
                self.nbits, other.nbits
            );
        }
        Self {
            words: self
                .words
                .iter()
                .zip(other.words.iter())
                .map(|(a, b)| a | b)
                .collect(),
            nbits: self.nbits,
        }
    }

    /// Return the underlying storage words.
    pub fn as_bytes(&self) -> &[u8] {
        &self.words
    }

    fn locate(&self, index: usize) -> (usize, u8) {
        if index >= self.len() {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len(),
                index,
            )
        }
        (index / WORD_BITS, 1 << (index % WORD_BITS))
    }
}

impl Debug for BitVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: String = (0..self.nbits)
            .map(|i| if self.is_set(i) { '1' } else { '0' })
            .collect();
        write!(f, "BitVec({})", bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, 1; "single bit")]
    #[test_case(8, 1; "one full word")]
    #[test_case(9, 2; "spills into second word")]
    #[test_case(1000, 125; "filter sized")]
    fn bitvec_with_length(nbits: usize, nwords: usize) {
        let bitvec = BitVec::new(nbits);

        assert_eq!(nbits, bitvec.len());
        assert_eq!(nwords, bitvec.as_bytes().len());
        assert_eq!(nbits, bitvec.count_zeros());
    }

    #[test]
    fn set_last_bit_only() {
        let mut bitvec = BitVec::new(9);
        bitvec.set(8);
        for i in 0..8 {
            assert_eq!(false, bitvec.is_set(i));
        }
        assert_eq!(true, bitvec.is_set(8));
        assert_eq!(&[0x00, 0x01], bitvec.as_bytes());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn must_set_with_correct_index() {
        BitVec::new(5).set(5);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn must_get_with_correct_index() {
        BitVec::new(12).is_set(12);
    }

    #[test]
    fn set_is_idempotent() {
        let mut bitvec = BitVec::new(24);

        bitvec.set(7);
        bitvec.set(7);
        bitvec.set(23);

        assert_eq!(2, bitvec.count_ones());
        assert_eq!(22, bitvec.count_zeros());
        assert_eq!(&[0x80, 0x00, 0x80], bitvec.as_bytes());
    }

    #[test]
    fn bitvec_union_test() {
        let mut bitvec_a = BitVec::new(6);
        bitvec_a.set(0);
        bitvec_a.set(3);

        let mut bitvec_b = BitVec::new(6);
        bitvec_b.set(2);
        bitvec_b.set(3);
        bitvec_b.set(5);

        let bitvec = bitvec_a.union(&bitvec_b);
        assert_eq!(4, bitvec.count_ones());
        assert_eq!(2, bitvec.count_zeros());
        assert_eq!(true, bitvec.is_set(0));
        assert_eq!(true, bitvec.is_set(2));
        assert_eq!(true, bitvec.is_set(3));
        assert_eq!(true, bitvec.is_set(5));
    }

    #[test]
    #[should_panic(expected = "different lengths")]
    fn union_requires_equal_lengths() {
        BitVec::new(6).union(&BitVec::new(7));
    }

    #[test]
    fn debug_shows_bits() {
        let mut bitvec = BitVec::new(4);
        bitvec.set(1);

        assert_eq!("BitVec(0100)", format!("{:?}", bitvec));
    }
}

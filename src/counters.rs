// Copyright (c) 2022 Alexis Sellier
//
// Licensed under the MIT license.

//! Saturating counters packed into `u64` words.
use std::fmt::Debug;

/// Width of a storage word, in bits.
const WORD_BITS: u32 = u64::BITS;

/// A fixed-length vector of `width`-bit saturating counters.
///
/// Counter `i` lives in word `i / per_word`, starting at bit
/// `(i % per_word) * width`. Counters never straddle two words.
#[derive(Clone, PartialEq, Eq)]
pub struct CounterVec {
    words: Vec<u64>,
    len: usize,
    width: u32,
    per_word: usize,
    mask: u64,
}

impl CounterVec {
    /// Create `len` zeroed counters, each `width` bits wide.
    ///
    /// # Panics
    ///
    /// If `width` is not in `1..=64`.
    pub fn new(len: usize, width: u32) -> Self {
        if width == 0 || width > WORD_BITS {
            panic!("counter width must be in 1..={}, got {}", WORD_BITS, width);
        }
        let per_word = (WORD_BITS / width) as usize;

        Self {
            words: vec![0; len.div_ceil(per_word)],
            len,
            width,
            per_word,
            mask: u64::MAX >> (WORD_BITS - width),
        }
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether this vector holds no counters.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Width of each counter, in bits.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of counters stored in each word.
    pub fn per_word(&self) -> usize {
        self.per_word
    }

    /// Number of storage words.
    pub fn words(&self) -> usize {
        self.words.len()
    }

    /// Value at which counters saturate, `2^width - 1`.
    pub fn max_value(&self) -> u64 {
        self.mask
    }

    /// Read counter `index`.
    pub fn get(&self, index: usize) -> u64 {
        let (word, shift) = self.locate(index);

        (self.words[word] >> shift) & self.mask
    }

    /// Add one to counter `index`, unless it is saturated.
    ///
    /// Returns `false` if the counter was already saturated.
    pub fn increment(&mut self, index: usize) -> bool {
        let (word, shift) = self.locate(index);
        let field = self.mask << shift;
        let current = self.words[word] & field;

        if current == field {
            return false;
        }
        // The field is not all ones, so adding one unit cannot carry out of it.
        self.words[word] = (self.words[word] & !field) | (current + (1 << shift));

        true
    }

    /// Sum of all counters.
    pub fn sum(&self) -> u64 {
        self.words
            .iter()
            .map(|&w| {
                (0..self.per_word)
                    .map(|slot| (w >> (slot as u32 * self.width)) & self.mask)
                    .sum::<u64>()
            })
            .sum()
    }

    /// Replace every counter with the maximum of itself and the matching
    /// counter of `other`.
    pub fn merge(&mut self, other: &Self) {
        if self.len != other.len || self.width != other.width {
            panic!(
                "unable to merge counters with different layouts: {}x{} and {}x{}",
                self.len, self.width, other.len, other.width
            );
        }
        for (a, &b) in self.words.iter_mut().zip(other.words.iter()) {
            let mut merged = 0;
            for slot in 0..self.per_word {
                let shift = slot as u32 * self.width;
                let x = (*a >> shift) & self.mask;
                let y = (b >> shift) & self.mask;
                merged |= x.max(y) << shift;
            }
            *a = merged;
        }
    }

    fn locate(&self, index: usize) -> (usize, u32) {
        if index >= self.len {
            panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len, index,
            )
        }
        (
            index / self.per_word,
            (index % self.per_word) as u32 * self.width,
        )
    }
}

impl Debug for CounterVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries((0..self.len).map(|i| self.get(i)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, 64, 2; "one bit counters")]
    #[test_case(3, 21, 5; "three bit counters")]
    #[test_case(16, 4, 25; "sixteen bit counters")]
    #[test_case(33, 1, 100; "wider than half a word")]
    #[test_case(64, 1, 100; "full word counters")]
    fn layout(width: u32, per_word: usize, words: usize) {
        let counters = CounterVec::new(100, width);

        assert_eq!(per_word, counters.per_word());
        assert_eq!(words, counters.words());
        assert_eq!(u64::MAX >> (64 - width), counters.max_value());
    }

    #[test]
    fn partial_last_word() {
        let mut counters = CounterVec::new(17, 4);

        assert_eq!(16, counters.per_word());
        assert_eq!(2, counters.words());

        for _ in 0..20 {
            counters.increment(16);
        }
        assert_eq!(15, counters.get(16));
        assert_eq!(0, counters.get(15));
        assert_eq!(15, counters.sum());
    }

    #[test]
    #[should_panic(expected = "counter width")]
    fn zero_width_is_rejected() {
        CounterVec::new(10, 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn must_increment_with_correct_index() {
        CounterVec::new(10, 4).increment(10);
    }

    #[test]
    fn saturates_without_wrapping() {
        let mut counters = CounterVec::new(4, 2);

        for _ in 0..3 {
            assert!(counters.increment(1));
        }
        for _ in 0..10 {
            assert!(!counters.increment(1));
        }
        assert_eq!(3, counters.get(1));
        assert_eq!(0, counters.get(0));
        assert_eq!(0, counters.get(2));
    }

    #[test]
    fn full_word_counter_saturates() {
        let mut counters = CounterVec::new(2, 64);
        counters.words[1] = u64::MAX - 1;

        assert!(counters.increment(1));
        assert!(!counters.increment(1));
        assert_eq!(u64::MAX, counters.get(1));
        assert_eq!(0, counters.get(0));
    }

    #[test]
    fn neighbours_are_untouched() {
        let width = 3;
        let mut counters = CounterVec::new(64, width);
        let per_word = counters.per_word();

        for i in 0..per_word {
            for j in 0..per_word {
                if i == j {
                    continue;
                }
                let mut c = counters.clone();
                for _ in 0..j {
                    c.increment(j);
                }
                let before = c.get(j);
                for _ in 0..20 {
                    c.increment(i);
                    assert_eq!(before, c.get(j), "counter {} changed counter {}", i, j);
                }
                assert_eq!(c.max_value(), c.get(i));
            }
        }
        counters.increment(per_word);
        assert_eq!(1, counters.get(per_word));
        assert_eq!(0, counters.get(per_word - 1));
    }

    #[test]
    fn sum_counts_every_counter() {
        let mut counters = CounterVec::new(50, 5);

        for i in 0..50 {
            for _ in 0..(i % 7) {
                counters.increment(i);
            }
        }
        let expected: u64 = (0..50).map(|i| (i % 7) as u64).sum();
        assert_eq!(expected, counters.sum());
    }

    #[test]
    fn merge_takes_maximum() {
        let mut a = CounterVec::new(30, 4);
        let mut b = CounterVec::new(30, 4);

        for _ in 0..5 {
            a.increment(3);
        }
        for _ in 0..9 {
            b.increment(3);
        }
        b.increment(29);
        a.increment(12);

        a.merge(&b);
        assert_eq!(9, a.get(3));
        assert_eq!(1, a.get(12));
        assert_eq!(1, a.get(29));
        assert_eq!(11, a.sum());
    }
}

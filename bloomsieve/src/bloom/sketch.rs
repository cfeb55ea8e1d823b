// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::error::Error;
use crate::hash::generate_salts;
use crate::hash::probe_index;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (added items always return `true`)
/// - Tunable false positive rate
/// - Constant space usage
///
/// Sized once at construction from an expected item count and a target
/// false-positive probability; see the [module docs](crate::bloom) for the
/// formulas.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter {
    /// Target false-positive probability supplied at construction
    fpp: f64,
    /// Total number of bits in the filter (m)
    num_bits: u64,
    /// Number of hash functions to use (k)
    num_hashes: u16,
    /// One random salt per hash slot, fixed for the filter's lifetime
    salts: Vec<String>,
    /// Count of bits set to 1 (for statistics)
    num_bits_set: u64,
    /// Bit array packed into u64 words, length = ceil(num_bits / 64)
    bit_array: Vec<u64>,
}

impl BloomFilter {
    /// Creates a filter sized for `expected_items` with the target
    /// false-positive probability `fpp`.
    ///
    /// The fallible version of this method is [`BloomFilter::try_new`].
    ///
    /// # Panics
    ///
    /// Panics if `expected_items` is 0 or `fpp` is not strictly between
    /// 0.0 and 1.0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsieve::bloom::BloomFilter;
    /// let filter = BloomFilter::new(20, 0.05);
    /// assert_eq!(filter.num_bits(), 124);
    /// assert_eq!(filter.num_hashes(), 4);
    /// ```
    pub fn new(expected_items: u64, fpp: f64) -> Self {
        match Self::try_new(expected_items, fpp) {
            Ok(filter) => filter,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a filter sized for `expected_items` with the target
    /// false-positive probability `fpp`.
    ///
    /// The panicking version of this method is [`BloomFilter::new`].
    ///
    /// # Errors
    ///
    /// If `expected_items` is 0 or `fpp` is not strictly between 0.0 and
    /// 1.0, returns [`ErrorKind::InvalidArgument`](crate::error::ErrorKind).
    /// No partial filter is produced.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsieve::bloom::BloomFilter;
    /// let filter = BloomFilter::try_new(20, 0.05).unwrap();
    /// assert_eq!(filter.num_hashes(), 4);
    ///
    /// assert!(BloomFilter::try_new(20, 1.0).is_err());
    /// ```
    pub fn try_new(expected_items: u64, fpp: f64) -> Result<Self, Error> {
        if expected_items < 1 {
            return Err(Error::invalid_argument(format!(
                "expected_items must be at least 1, got {expected_items}"
            )));
        }
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(Error::invalid_argument(format!(
                "fpp must be strictly between 0.0 and 1.0, got {fpp}"
            )));
        }

        let num_bits = Self::suggest_num_bits(expected_items, fpp);
        let num_hashes = Self::suggest_num_hashes(num_bits, expected_items);
        let salts = generate_salts(num_hashes);
        let num_words = num_bits.div_ceil(64) as usize;

        tracing::debug!(num_bits, num_hashes, fpp, "sized bloom filter");

        Ok(BloomFilter {
            fpp,
            num_bits,
            num_hashes,
            salts,
            num_bits_set: 0,
            bit_array: vec![0u64; num_words],
        })
    }

    /// Suggests the number of bits for an expected item count and a target
    /// false-positive probability.
    ///
    /// Formula: `m = -n * ln(p) / (ln(2)^2)`, truncated toward zero and
    /// never less than 1.
    ///
    /// # Panics
    ///
    /// Panics if `expected_items` is 0 or `fpp` is not strictly between
    /// 0.0 and 1.0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsieve::bloom::BloomFilter;
    /// assert_eq!(BloomFilter::suggest_num_bits(20, 0.05), 124);
    /// assert_eq!(BloomFilter::suggest_num_bits(1000, 0.01), 9585);
    /// ```
    pub fn suggest_num_bits(expected_items: u64, fpp: f64) -> u64 {
        assert!(expected_items >= 1, "expected_items must be at least 1");
        assert!(
            fpp > 0.0 && fpp < 1.0,
            "fpp must be strictly between 0.0 and 1.0"
        );

        let n = expected_items as f64;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;
        let bits = (-n * fpp.ln() / ln2_squared) as u64;

        bits.max(1)
    }

    /// Suggests the number of hash functions for a bit count and an
    /// expected item count.
    ///
    /// Formula: `k = (m / n) * ln(2)`, truncated toward zero and never
    /// less than 1.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` or `expected_items` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsieve::bloom::BloomFilter;
    /// assert_eq!(BloomFilter::suggest_num_hashes(124, 20), 4);
    /// assert_eq!(BloomFilter::suggest_num_hashes(9585, 1000), 6);
    /// ```
    pub fn suggest_num_hashes(num_bits: u64, expected_items: u64) -> u16 {
        assert!(num_bits >= 1, "num_bits must be at least 1");
        assert!(expected_items >= 1, "expected_items must be at least 1");

        let k = (num_bits as f64 / expected_items as f64) * std::f64::consts::LN_2;

        (k as u64).clamp(1, u64::from(u16::MAX)) as u16
    }

    /// Registers an item in the filter.
    ///
    /// After adding, `check(item)` will always return `true`. Adding the
    /// same item again is a no-op on the bit array.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsieve::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01);
    /// filter.add("apple");
    /// assert!(filter.check("apple"));
    /// ```
    pub fn add(&mut self, item: &str) {
        for i in 0..self.salts.len() {
            let index = probe_index(&self.salts[i], item, self.num_bits);
            self.set_bit(index);
        }
    }

    /// Tests whether an item is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Item was **possibly** added (or false positive)
    /// - `false`: Item was **definitely not** added
    ///
    /// Short-circuits on the first unset bit.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsieve::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01);
    /// filter.add("apple");
    ///
    /// assert!(filter.check("apple")); // true - was added
    /// assert!(!filter.check("grape")); // false - never added (probably)
    /// ```
    pub fn check(&self, item: &str) -> bool {
        if self.is_empty() {
            return false;
        }

        self.salts
            .iter()
            .all(|salt| self.get_bit(probe_index(salt, item, self.num_bits)))
    }

    /// Tests and registers an item in a single operation.
    ///
    /// Returns whether the item was possibly already in the set before the
    /// insert. Each probe index is derived once and used for both the test
    /// and the set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsieve::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01);
    ///
    /// assert!(!filter.check_and_add("apple")); // first insert
    /// assert!(filter.check_and_add("apple")); // now it's in the set
    /// ```
    pub fn check_and_add(&mut self, item: &str) -> bool {
        let mut was_present = true;
        for i in 0..self.salts.len() {
            let index = probe_index(&self.salts[i], item, self.num_bits);
            was_present &= self.get_bit(index);
            self.set_bit(index);
        }
        was_present
    }

    /// Returns the total number of bits in the filter (m).
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    /// Returns the number of hash functions used (k).
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Returns the target false-positive probability supplied at
    /// construction.
    pub fn target_fpp(&self) -> f64 {
        self.fpp
    }

    /// Returns whether the filter is empty (no items added).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    ///
    /// Useful for monitoring filter saturation.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// Values near 0.5 indicate the filter is approaching saturation.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.num_bits as f64
    }

    /// Estimates the current false positive probability.
    ///
    /// Uses the approximation `load_factor^k`, which assumes uniform bit
    /// distribution.
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powf(f64::from(self.num_hashes))
    }

    /// Gets the value of a single bit.
    fn get_bit(&self, bit_index: u64) -> bool {
        let word_index = (bit_index >> 6) as usize;
        let mask = 1u64 << (bit_index & 63);
        (self.bit_array[word_index] & mask) != 0
    }

    /// Sets a single bit and updates the count if it wasn't already set.
    fn set_bit(&mut self, bit_index: u64) {
        let word_index = (bit_index >> 6) as usize;
        let mask = 1u64 << (bit_index & 63);

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BloomFilter;
    use crate::error::ErrorKind;

    #[test]
    fn test_sizing_from_accuracy() {
        let filter = BloomFilter::new(20, 0.05);
        assert_eq!(filter.num_bits(), 124);
        assert_eq!(filter.num_hashes(), 4);
        assert_eq!(filter.target_fpp(), 0.05);
        assert!(filter.is_empty());
        assert_eq!(filter.bit_array.len(), 2);
    }

    #[test]
    fn test_suggest_num_bits_truncates() {
        assert_eq!(BloomFilter::suggest_num_bits(20, 0.05), 124);
        assert_eq!(BloomFilter::suggest_num_bits(1000, 0.01), 9585);
        assert_eq!(BloomFilter::suggest_num_bits(1000, 0.05), 6235);
        assert_eq!(BloomFilter::suggest_num_bits(10, 0.001), 143);
    }

    #[test]
    fn test_suggest_num_bits_floors_to_one() {
        // Raw formula gives ~0.02 here.
        assert_eq!(BloomFilter::suggest_num_bits(1, 0.99), 1);
    }

    #[test]
    fn test_suggest_num_hashes_truncates() {
        assert_eq!(BloomFilter::suggest_num_hashes(124, 20), 4);
        assert_eq!(BloomFilter::suggest_num_hashes(9585, 1000), 6);
        assert_eq!(BloomFilter::suggest_num_hashes(143, 10), 9);
    }

    #[test]
    fn test_suggest_num_hashes_floors_to_one() {
        // (1/1000) * ln(2) rounds to zero hashes.
        assert_eq!(BloomFilter::suggest_num_hashes(1, 1000), 1);
        // (144/100) * ln(2) is just under 1.
        assert_eq!(BloomFilter::suggest_num_hashes(144, 100), 1);
    }

    #[test]
    fn test_try_new_rejects_zero_items() {
        let err = BloomFilter::try_new(0, 0.05).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_try_new_rejects_fpp_bounds() {
        for fpp in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = BloomFilter::try_new(20, fpp).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    #[should_panic(expected = "expected_items must be at least 1")]
    fn test_new_panics_on_zero_items() {
        BloomFilter::new(0, 0.05);
    }

    #[test]
    #[should_panic(expected = "fpp must be strictly between")]
    fn test_new_panics_on_bad_fpp() {
        BloomFilter::new(20, 1.0);
    }

    #[test]
    fn test_salts_per_slot() {
        let filter = BloomFilter::new(1000, 0.01);
        assert_eq!(filter.salts.len(), usize::from(filter.num_hashes()));
        for (i, salt) in filter.salts.iter().enumerate() {
            assert!(!filter.salts[..i].contains(salt));
        }
    }

    #[test]
    fn test_add_and_check() {
        let mut filter = BloomFilter::new(100, 0.01);

        assert!(!filter.check("apple"));
        filter.add("apple");
        assert!(filter.check("apple"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_empty_item_is_hashable() {
        let mut filter = BloomFilter::new(100, 0.01);
        filter.add("");
        assert!(filter.check(""));
    }

    #[test]
    fn test_check_never_mutates() {
        let mut filter = BloomFilter::new(100, 0.01);
        filter.add("apple");
        let snapshot = filter.clone();

        filter.check("apple");
        filter.check("grape");
        assert_eq!(filter, snapshot);
    }

    #[test]
    fn test_check_and_add() {
        let mut filter = BloomFilter::new(100, 0.01);

        assert!(!filter.check_and_add("apple"));
        assert!(filter.check_and_add("apple"));
        assert!(filter.check("apple"));
    }

    #[test]
    fn test_duplicate_add_is_idempotent() {
        let mut filter = BloomFilter::new(100, 0.01);
        filter.add("apple");
        let bits_after_first = filter.bits_used();

        filter.add("apple");
        assert_eq!(filter.bits_used(), bits_after_first);
        assert!(filter.check("apple"));
    }

    #[test]
    fn test_bits_used_is_monotonic() {
        let mut filter = BloomFilter::new(50, 0.05);
        let mut previous = filter.bits_used();

        for i in 0..50 {
            filter.add(&format!("item-{i}"));
            let current = filter.bits_used();
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_statistics() {
        let mut filter = BloomFilter::new(100, 0.01);
        assert_eq!(filter.bits_used(), 0);
        assert_eq!(filter.load_factor(), 0.0);
        assert_eq!(filter.estimated_fpp(), 0.0);

        filter.add("apple");
        assert!(filter.bits_used() > 0);
        assert!(filter.bits_used() <= u64::from(filter.num_hashes()));
        assert!(filter.load_factor() > 0.0);
        assert!(filter.estimated_fpp() > 0.0);
    }
}

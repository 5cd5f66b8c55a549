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

use std::fmt;
use std::sync::Arc;

use crate::bitarray::BitArray;
use crate::bloom::BloomFilterBuilder;
use crate::bloom::index::compute_offsets;
use crate::error::Error;
use crate::hash::Hash32;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides membership queries with:
/// - No false negatives (inserted keys always return `true`)
/// - Tunable false positive rate
/// - Fixed capacity chosen at construction
///
/// The filter itself is immutable; all mutable state lives in its [`BitArray`]. Both
/// [`insert`](Self::insert) and [`contains`](Self::contains) take `&self`, so one filter can be
/// shared between threads. Clones share the same bit array.
///
/// Use [`BloomFilterBuilder`] to construct instances.
#[derive(Clone)]
pub struct BloomFilter {
    /// Total number of bits in the filter (m)
    num_bits: u32,
    /// Number of hash rounds (k)
    num_hashes: u32,
    hasher: Arc<dyn Hash32>,
    bit_array: Arc<dyn BitArray>,
}

impl BloomFilter {
    pub(super) fn from_parts(
        num_bits: u32,
        num_hashes: u32,
        hasher: Arc<dyn Hash32>,
        bit_array: Arc<dyn BitArray>,
    ) -> Self {
        BloomFilter {
            num_bits,
            num_hashes,
            hasher,
            bit_array,
        }
    }

    /// Returns a builder with the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitbloom::bloom::BloomFilter;
    ///
    /// let filter = BloomFilter::builder().num_bits(10_000).num_hashes(7).build().unwrap();
    /// assert_eq!(filter.capacity(), 10_000);
    /// ```
    pub fn builder() -> BloomFilterBuilder {
        BloomFilterBuilder::default()
    }

    // ========================================================================
    // Update Operations
    // ========================================================================

    /// Inserts a key into the filter.
    ///
    /// After a successful insertion, `contains(key)` returns `true`.
    ///
    /// # Errors
    ///
    /// Returns the bit array's error unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(1 << 16, 7).build().unwrap();
    ///
    /// filter.insert("apple").unwrap();
    /// filter.insert(b"raw bytes").unwrap();
    /// filter.insert(vec![1u8, 2, 3]).unwrap();
    ///
    /// assert!(filter.contains("apple").unwrap());
    /// ```
    pub fn insert(&self, key: impl AsRef<[u8]>) -> Result<(), Error> {
        let offsets = self.offsets(key.as_ref());
        self.bit_array.set_bits(&offsets)
    }

    // ========================================================================
    // Query Operations
    // ========================================================================

    /// Tests whether a key is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Key was **possibly** inserted (or false positive)
    /// - `false`: Key was **definitely not** inserted
    ///
    /// # Errors
    ///
    /// Returns the bit array's error unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_size(1 << 16, 7).build().unwrap();
    /// filter.insert("apple").unwrap();
    ///
    /// assert!(filter.contains("apple").unwrap()); // true - was inserted
    /// assert!(!filter.contains("grape").unwrap()); // false - never inserted (probably)
    /// ```
    pub fn contains(&self, key: impl AsRef<[u8]>) -> Result<bool, Error> {
        let offsets = self.offsets(key.as_ref());
        let found = self.bit_array.get_bits(&offsets)?;
        Ok(found.len() == offsets.len())
    }

    /// Returns the bit offsets this filter uses for `key`, one per hash round.
    ///
    /// Every offset is below [`capacity`](Self::capacity).
    pub fn offsets(&self, key: &[u8]) -> Vec<u32> {
        compute_offsets(self.hasher.as_ref(), key, self.num_hashes, self.num_bits)
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns the total number of bits in the filter (capacity).
    pub fn capacity(&self) -> u32 {
        self.num_bits
    }

    /// Returns the number of hash rounds.
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Returns the bit array backing this filter.
    pub fn bit_array(&self) -> &Arc<dyn BitArray> {
        &self.bit_array
    }

    /// Estimates the false positive probability after `num_items` distinct insertions.
    ///
    /// See [`BloomFilterBuilder::false_positive_rate`].
    pub fn estimated_fpp(&self, num_items: u64) -> f64 {
        BloomFilterBuilder::false_positive_rate(self.num_bits, self.num_hashes, num_items)
    }
}

impl fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("num_bits", &self.num_bits)
            .field("num_hashes", &self.num_hashes)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

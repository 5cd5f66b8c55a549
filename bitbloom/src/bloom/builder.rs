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

use std::sync::Arc;

use crate::bitarray::BitArray;
use crate::bitarray::MemoryBitArray;
use crate::bloom::BloomFilter;
use crate::error::Error;
use crate::hash::Hash32;
use crate::hash::Murmur3Hash32;

/// Default capacity: 2^32 - 1 bits, about 512MB once packed.
pub const DEFAULT_NUM_BITS: u32 = u32::MAX;

/// Default number of hash rounds.
///
/// With a capacity of 20 bits per expected item this gives a false positive rate near 6.71e-05.
pub const DEFAULT_NUM_HASHES: u32 = 14;

/// Upper bound on hash rounds; each round is told apart by a single discriminator byte.
pub const MAX_NUM_HASHES: u32 = 256;

/// Builder for creating [`BloomFilter`] instances.
///
/// Every setting has a default, so `BloomFilterBuilder::default().build()` yields a filter of
/// [`DEFAULT_NUM_BITS`] bits and [`DEFAULT_NUM_HASHES`] rounds hashed with [`Murmur3Hash32`]
/// over a fresh [`MemoryBitArray`]. A builder is a plain value: configuring one never affects
/// another.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use bitbloom::bitarray::MemoryBitArray;
/// use bitbloom::bloom::BloomFilterBuilder;
/// use bitbloom::hash::Murmur3Hash32;
///
/// let bits = Arc::new(MemoryBitArray::new(4096));
/// let filter = BloomFilterBuilder::with_size(4096, 5)
///     .hasher(Murmur3Hash32::with_seed(42))
///     .bit_array(bits.clone())
///     .build()
///     .unwrap();
///
/// filter.insert("apple").unwrap();
/// assert!((1..=5).contains(&bits.bits_set()));
/// ```
#[derive(Clone)]
pub struct BloomFilterBuilder {
    num_bits: u32,
    num_hashes: u32,
    hasher: Option<Arc<dyn Hash32>>,
    bit_array: Option<Arc<dyn BitArray>>,
}

impl Default for BloomFilterBuilder {
    fn default() -> Self {
        BloomFilterBuilder {
            num_bits: DEFAULT_NUM_BITS,
            num_hashes: DEFAULT_NUM_HASHES,
            hasher: None,
            bit_array: None,
        }
    }
}

impl BloomFilterBuilder {
    /// Creates a builder with manual size specification.
    ///
    /// # Arguments
    ///
    /// - `num_bits`: Total number of bits in the filter (m)
    /// - `num_hashes`: Number of hash rounds (k)
    ///
    /// Parameters are validated by [`build()`](Self::build).
    pub fn with_size(num_bits: u32, num_hashes: u32) -> Self {
        BloomFilterBuilder::default()
            .num_bits(num_bits)
            .num_hashes(num_hashes)
    }

    /// Creates a builder sized for a target accuracy.
    ///
    /// Calculates the number of bits and hash rounds that reach the false positive probability
    /// `fpp` once `max_items` distinct keys have been inserted.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid) if
    /// `max_items` is 0 or `fpp` is not in (0.0, 1.0).
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::bloom::BloomFilterBuilder;
    /// // Sized for 10,000 items with 1% FPP
    /// let filter = BloomFilterBuilder::with_accuracy(10_000, 0.01)
    ///     .unwrap()
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.num_hashes(), 7);
    /// ```
    pub fn with_accuracy(max_items: u64, fpp: f64) -> Result<Self, Error> {
        if max_items == 0 {
            return Err(Error::config_invalid("max_items must be greater than 0"));
        }
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(
                Error::config_invalid("fpp must be between 0.0 and 1.0 (exclusive)")
                    .with_context("fpp", fpp),
            );
        }

        let num_bits = Self::suggest_num_bits(max_items, fpp);
        let num_hashes = Self::suggest_num_hashes(max_items, num_bits);
        Ok(Self::with_size(num_bits, num_hashes))
    }

    /// Sets the number of bits in the filter (default: [`DEFAULT_NUM_BITS`]).
    pub fn num_bits(mut self, num_bits: u32) -> Self {
        self.num_bits = num_bits;
        self
    }

    /// Sets the number of hash rounds (default: [`DEFAULT_NUM_HASHES`]).
    pub fn num_hashes(mut self, num_hashes: u32) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    /// Sets the hash capability (default: [`Murmur3Hash32`] with seed 0).
    ///
    /// Filters that share a bit array must also share the hash capability, otherwise they
    /// disagree on where a key lives.
    pub fn hasher(mut self, hasher: impl Hash32 + 'static) -> Self {
        self.hasher = Some(Arc::new(hasher));
        self
    }

    /// Sets the bit array backend (default: a new [`MemoryBitArray`] of `num_bits` bits).
    ///
    /// A bit array may back several filters. Its capacity must equal the filter's `num_bits`;
    /// this is not checked.
    pub fn bit_array(mut self, bit_array: Arc<dyn BitArray>) -> Self {
        self.bit_array = Some(bit_array);
        self
    }

    /// Builds the Bloom filter.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid) if
    /// `num_bits` is 0 or `num_hashes` is not in `1..=256`.
    pub fn build(self) -> Result<BloomFilter, Error> {
        Self::validate_params(self.num_bits, self.num_hashes)?;

        let custom_bit_array = self.bit_array.is_some();
        let hasher: Arc<dyn Hash32> = match self.hasher {
            Some(hasher) => hasher,
            None => Arc::new(Murmur3Hash32::default()),
        };
        let bit_array: Arc<dyn BitArray> = match self.bit_array {
            Some(bit_array) => bit_array,
            None => Arc::new(MemoryBitArray::new(self.num_bits)),
        };

        tracing::debug!(
            num_bits = self.num_bits,
            num_hashes = self.num_hashes,
            custom_bit_array,
            "building bloom filter"
        );
        Ok(BloomFilter::from_parts(
            self.num_bits,
            self.num_hashes,
            hasher,
            bit_array,
        ))
    }

    // ========================================================================
    // Static Suggestion Methods
    // ========================================================================

    /// Suggests the number of bits given max items and target FPP.
    ///
    /// Formula: `m = -n * ln(p) / (ln(2)^2)`, clamped to `1..=u32::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::bloom::BloomFilterBuilder;
    /// let bits = BloomFilterBuilder::suggest_num_bits(1000, 0.01);
    /// assert!(bits > 9000 && bits < 10000); // ~9586 bits
    /// ```
    pub fn suggest_num_bits(max_items: u64, fpp: f64) -> u32 {
        let n = max_items as f64;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;

        let bits = (-n * fpp.ln() / ln2_squared).ceil();
        bits.clamp(1.0, f64::from(u32::MAX)) as u32
    }

    /// Suggests the number of hash rounds given max items and bit count.
    ///
    /// Formula: `k = (m/n) * ln(2)`, clamped to `1..=100`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::bloom::BloomFilterBuilder;
    /// let hashes = BloomFilterBuilder::suggest_num_hashes(1000, 10000);
    /// assert_eq!(hashes, 7); // Optimal k ≈ 6.93
    /// ```
    pub fn suggest_num_hashes(max_items: u64, num_bits: u32) -> u32 {
        let m = f64::from(num_bits);
        let n = max_items as f64;

        let k = (m / n * std::f64::consts::LN_2).round();
        k.clamp(1.0, 100.0) as u32
    }

    /// Theoretical false positive probability of a filter after `num_items` insertions.
    ///
    /// Formula: `(1 - e^(-k*n/m))^k`
    ///
    /// # Examples
    ///
    /// ```
    /// # use bitbloom::bloom::BloomFilterBuilder;
    /// // 20 bits per item with the default 14 rounds.
    /// let fpp = BloomFilterBuilder::false_positive_rate(20_000, 14, 1000);
    /// assert!((fpp - 6.71e-5).abs() < 1e-6);
    /// ```
    pub fn false_positive_rate(num_bits: u32, num_hashes: u32, num_items: u64) -> f64 {
        let m = f64::from(num_bits);
        let k = f64::from(num_hashes);
        let n = num_items as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Validates builder parameters.
    fn validate_params(num_bits: u32, num_hashes: u32) -> Result<(), Error> {
        if num_bits == 0 {
            return Err(Error::config_invalid("num_bits must be at least 1"));
        }
        if num_hashes == 0 {
            return Err(Error::config_invalid("num_hashes must be at least 1"));
        }
        if num_hashes > MAX_NUM_HASHES {
            return Err(
                Error::config_invalid(format!("num_hashes must not exceed {MAX_NUM_HASHES}"))
                    .with_context("num_hashes", num_hashes),
            );
        }
        Ok(())
    }
}

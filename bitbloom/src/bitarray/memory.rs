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

use parking_lot::RwLock;

use crate::bitarray::BitArray;
use crate::bitarray::check_offsets;
use crate::error::Error;

/// Width of one storage word in bits.
pub(crate) const BITS_PER_WORD: u32 = u32::BITS;

/// Returns how many words hold `num_bits` bits, i.e. `ceil(num_bits / 32)`.
pub(crate) fn num_words_for(num_bits: u32) -> usize {
    num_bits.div_ceil(BITS_PER_WORD) as usize
}

/// In-process bit array packed into `u32` words.
///
/// Bit `i` lives in word `i / 32` at position `i % 32`. A reader/writer lock guards the words:
/// [`get_bits`](BitArray::get_bits) batches run concurrently with each other, a
/// [`set_bits`](BitArray::set_bits) batch excludes everything else. Either way each batch is
/// observed whole or not at all.
///
/// # Examples
///
/// ```
/// use bitbloom::bitarray::BitArray;
/// use bitbloom::bitarray::MemoryBitArray;
///
/// let bits = MemoryBitArray::new(64);
/// assert_eq!(bits.num_words(), 2);
///
/// bits.set_bits(&[0, 63]).unwrap();
/// assert_eq!(bits.bits_set(), 2);
/// assert!(bits.get_bits(&[64]).is_err());
/// ```
pub struct MemoryBitArray {
    /// Number of addressable bits (m)
    size: u32,
    /// Length = ceil(size / 32)
    words: RwLock<Vec<u32>>,
}

impl MemoryBitArray {
    /// Allocates a zeroed bit array of `size` bits.
    pub fn new(size: u32) -> Self {
        let num_words = num_words_for(size);
        tracing::debug!(size, num_words, "allocating in-memory bit array");
        MemoryBitArray {
            size,
            words: RwLock::new(vec![0u32; num_words]),
        }
    }

    /// Returns the number of addressable bits.
    pub fn capacity(&self) -> u32 {
        self.size
    }

    /// Returns the number of storage words.
    pub fn num_words(&self) -> usize {
        self.words.read().len()
    }

    /// Returns the number of bits set to 1.
    pub fn bits_set(&self) -> u64 {
        self.words
            .read()
            .iter()
            .map(|word| u64::from(word.count_ones()))
            .sum()
    }

    /// Returns the fraction of bits set to 1.
    ///
    /// Values near 0.5 mean the filter on top is approaching saturation.
    pub fn load_factor(&self) -> f64 {
        if self.size == 0 {
            return 0.0;
        }
        self.bits_set() as f64 / f64::from(self.size)
    }
}

impl BitArray for MemoryBitArray {
    fn set_bits(&self, offsets: &[u32]) -> Result<(), Error> {
        check_offsets(offsets, self.size)?;

        let mut words = self.words.write();
        for &offset in offsets {
            let (index, mask) = locate(offset);
            words[index] |= mask;
        }
        Ok(())
    }

    fn get_bits(&self, offsets: &[u32]) -> Result<Vec<u32>, Error> {
        check_offsets(offsets, self.size)?;

        let words = self.words.read();
        Ok(offsets
            .iter()
            .copied()
            .filter(|&offset| {
                let (index, mask) = locate(offset);
                words[index] & mask != 0
            })
            .collect())
    }
}

impl fmt::Debug for MemoryBitArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBitArray")
            .field("size", &self.size)
            .field("num_words", &num_words_for(self.size))
            .finish()
    }
}

/// Maps a bit offset to its word index and single-bit mask.
fn locate(offset: u32) -> (usize, u32) {
    let index = (offset / BITS_PER_WORD) as usize;
    let mask = 1u32 << (offset % BITS_PER_WORD);
    (index, mask)
}

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

//! Derivation of a key's bit offsets.

use crate::hash::Hash32;

/// Computes the `num_hashes` bit offsets of `key` in a filter of `num_bits` bits.
///
/// Round `i` hashes the key followed by the single discriminator byte `i as u8` and reduces the
/// hash modulo `num_bits`. The hashed input is a fresh buffer owned by this call; the caller's
/// key is never written to.
///
/// Offsets of one key may collide with each other. That only costs a little accuracy.
pub(crate) fn compute_offsets(
    hasher: &dyn Hash32,
    key: &[u8],
    num_hashes: u32,
    num_bits: u32,
) -> Vec<u32> {
    debug_assert!(num_bits > 0, "num_bits must be positive");

    let mut input = Vec::with_capacity(key.len() + 1);
    input.extend_from_slice(key);
    input.push(0);
    let last = key.len();

    (0..num_hashes)
        .map(|round| {
            input[last] = round as u8;
            hasher.hash32(&input) % num_bits
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Murmur3Hash32;

    /// Sum of the key bytes times `round + 1`, where the round is the trailing byte.
    fn byte_sum_hash(input: &[u8]) -> u32 {
        let (round, key) = input.split_last().unwrap();
        let sum: u32 = key.iter().map(|&b| u32::from(b)).sum();
        sum * (u32::from(*round) + 1)
    }

    #[test]
    fn test_rounds_see_discriminator() {
        let offsets = compute_offsets(&byte_sum_hash, b"A", 4, 1000);
        assert_eq!(offsets, vec![65, 130, 195, 260]);
    }

    #[test]
    fn test_offsets_below_capacity() {
        let hasher = Murmur3Hash32::default();
        for num_bits in [1, 2, 31, 32, 33, 1000, u32::MAX] {
            let offsets = compute_offsets(&hasher, b"some key", 14, num_bits);
            assert_eq!(offsets.len(), 14);
            assert!(offsets.iter().all(|&o| o < num_bits));
        }
    }

    #[test]
    fn test_deterministic() {
        let hasher = Murmur3Hash32::default();
        let a = compute_offsets(&hasher, b"key1", 14, u32::MAX);
        let b = compute_offsets(&hasher, b"key1", 14, u32::MAX);
        assert_eq!(a, b);
        assert_ne!(a, compute_offsets(&hasher, b"key2", 14, u32::MAX));
    }

    #[test]
    fn test_key_with_spare_capacity_untouched() {
        let mut key = Vec::with_capacity(64);
        key.extend_from_slice(b"abc");
        let hasher = Murmur3Hash32::default();
        compute_offsets(&hasher, &key, 8, 1 << 20);
        assert_eq!(key, b"abc");
        assert_eq!(key.capacity(), 64);
    }

    #[test]
    fn test_hash_sees_key_and_round_only() {
        let seen = std::sync::Mutex::new(Vec::new());
        let recorder = |input: &[u8]| {
            seen.lock().unwrap().push(input.to_vec());
            0u32
        };
        compute_offsets(&recorder, b"xy", 3, 10);
        assert_eq!(
            seen.into_inner().unwrap(),
            vec![b"xy\x00".to_vec(), b"xy\x01".to_vec(), b"xy\x02".to_vec()]
        );
    }

    #[test]
    fn test_zero_rounds() {
        let hasher = Murmur3Hash32::default();
        assert!(compute_offsets(&hasher, b"key", 0, 10).is_empty());
    }
}

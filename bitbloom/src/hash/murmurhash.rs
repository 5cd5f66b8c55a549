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

use crate::hash::DEFAULT_HASH_SEED;
use crate::hash::Hash32;

/// MurmurHash3 x86_32, the default hash capability of a Bloom filter.
///
/// Stateless: every call hashes its input from scratch with the configured seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Murmur3Hash32 {
    seed: u32,
}

impl Murmur3Hash32 {
    /// Creates a hash capability with the given seed.
    pub fn with_seed(seed: u32) -> Self {
        Murmur3Hash32 { seed }
    }

    /// Returns the seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for Murmur3Hash32 {
    fn default() -> Self {
        Murmur3Hash32::with_seed(DEFAULT_HASH_SEED)
    }
}

impl Hash32 for Murmur3Hash32 {
    fn hash32(&self, bytes: &[u8]) -> u32 {
        mur3::murmurhash3_x86_32(bytes, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(Murmur3Hash32::with_seed(0).hash32(b""), 0);
        assert_eq!(Murmur3Hash32::with_seed(1).hash32(b""), 0x514e28b7);
        assert_eq!(Murmur3Hash32::with_seed(0xffffffff).hash32(b""), 0x81f16f39);

        let key = "The quick brown fox jumps over the lazy dog";
        assert_eq!(Murmur3Hash32::default().hash32(key.as_bytes()), 0x2e4ff723);
    }

    #[test]
    fn test_seed_changes_hash() {
        let key = b"bloom";
        assert_ne!(
            Murmur3Hash32::with_seed(1).hash32(key),
            Murmur3Hash32::with_seed(2).hash32(key)
        );
        assert_eq!(Murmur3Hash32::with_seed(7).seed(), 7);
    }
}

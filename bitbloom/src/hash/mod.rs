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

//! Hash capabilities used to derive bit positions from keys.
//!
//! A [`Hash32`] maps a byte sequence to a 32-bit value. Implementations take `&self` and must
//! give the same answer for the same input no matter how many threads call them at once, so a
//! single instance can be shared by every caller of a filter.
//!
//! Three kinds of implementations are provided:
//!
//! - [`Murmur3Hash32`], the default, a stateless MurmurHash3 x86_32.
//! - Any `Fn(&[u8]) -> u32 + Send + Sync` closure.
//! - [`BuildHash32`], which adapts a streaming [`std::hash::Hasher`] by building a fresh hasher
//!   for every call.
//!
//! # Examples
//!
//! ```
//! use bitbloom::hash::BuildHash32;
//! use bitbloom::hash::Hash32;
//! use bitbloom::hash::Murmur3Hash32;
//!
//! let murmur = Murmur3Hash32::default();
//! assert_eq!(murmur.hash32(b"key"), murmur.hash32(b"key"));
//!
//! let byte_sum = |bytes: &[u8]| bytes.iter().map(|&b| b as u32).sum::<u32>();
//! assert_eq!(byte_sum.hash32(b"AB"), 131);
//!
//! let sip = BuildHash32::new(std::hash::BuildHasherDefault::<std::hash::DefaultHasher>::default());
//! assert_eq!(sip.hash32(b"key"), sip.hash32(b"key"));
//! ```

mod murmurhash;

use std::fmt;
use std::hash::BuildHasher;
use std::hash::Hasher;

pub use self::murmurhash::Murmur3Hash32;

/// The seed used by the default hash capability.
pub(crate) const DEFAULT_HASH_SEED: u32 = 0;

/// A pure function from a byte sequence to a 32-bit hash value.
pub trait Hash32: Send + Sync {
    /// Hashes `bytes` into a 32-bit value.
    fn hash32(&self, bytes: &[u8]) -> u32;
}

impl<F> Hash32 for F
where
    F: Fn(&[u8]) -> u32 + Send + Sync,
{
    fn hash32(&self, bytes: &[u8]) -> u32 {
        self(bytes)
    }
}

/// Adapts a [`BuildHasher`] into a [`Hash32`].
///
/// Each call builds an independent [`Hasher`], feeds it the whole input and keeps the low 32 bits
/// of [`Hasher::finish`]. No hasher state outlives a call, so concurrent callers never observe
/// each other's writes.
#[derive(Clone, Default)]
pub struct BuildHash32<B> {
    build_hasher: B,
}

impl<B: BuildHasher> BuildHash32<B> {
    /// Wraps `build_hasher`.
    pub fn new(build_hasher: B) -> Self {
        Self { build_hasher }
    }
}

impl<B> Hash32 for BuildHash32<B>
where
    B: BuildHasher + Send + Sync,
{
    fn hash32(&self, bytes: &[u8]) -> u32 {
        let mut hasher = self.build_hasher.build_hasher();
        hasher.write(bytes);
        hasher.finish() as u32
    }
}

impl<B> fmt::Debug for BuildHash32<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildHash32")
            .field("build_hasher", &std::any::type_name::<B>())
            .finish()
    }
}

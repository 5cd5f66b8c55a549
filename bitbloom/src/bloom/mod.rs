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

//! Bloom filter over a pluggable hash capability and bit array.
//!
//! A Bloom filter records insertions of keys and later answers "possibly present" or
//! "definitely absent". Each key maps to `k` bit offsets in a bit array of `m` bits: round `i`
//! hashes the key followed by the byte `i` and reduces the hash modulo `m`. Insertion sets those
//! bits; a query reports the key present only if all `k` are set.
//!
//! # Properties
//!
//! - **No false negatives**: If a key was inserted, `contains()` will always return `true`
//! - **Possible false positives**: `contains()` may return `true` for keys never inserted
//! - **Fixed size**: The filter never resizes and keys cannot be removed
//! - **Shared access**: `insert()` and `contains()` take `&self` and may run from many threads
//!
//! # Usage
//!
//! ```rust
//! use bitbloom::bloom::BloomFilterBuilder;
//!
//! // 20 bits per expected key, 14 rounds: false positive rate near 6.71e-05
//! let filter = BloomFilterBuilder::with_size(20_000, 14).build().unwrap();
//!
//! filter.insert("apple").unwrap();
//! filter.insert("banana").unwrap();
//!
//! assert!(filter.contains("apple").unwrap()); // true - definitely inserted
//! assert!(!filter.contains("grape").unwrap()); // false - never inserted (probably)
//!
//! println!("Est. FPP: {:.6}", filter.estimated_fpp(1000));
//! ```
//!
//! # Configuration
//!
//! [`BloomFilterBuilder`] starts from the defaults ([`DEFAULT_NUM_BITS`] bits,
//! [`DEFAULT_NUM_HASHES`] rounds, MurmurHash3, in-memory bits) and can be sized by hand with
//! [`with_size()`](BloomFilterBuilder::with_size) or for a target accuracy with
//! [`with_accuracy()`](BloomFilterBuilder::with_accuracy). The hash capability and the bit array
//! backend are both replaceable.

mod builder;
mod index;
mod sketch;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::DEFAULT_NUM_BITS;
pub use self::builder::DEFAULT_NUM_HASHES;
pub use self::builder::MAX_NUM_HASHES;
pub use self::sketch::BloomFilter;

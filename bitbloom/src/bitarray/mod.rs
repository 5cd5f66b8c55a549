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

//! Fixed-capacity bit storage behind a Bloom filter.
//!
//! A [`BitArray`] holds exactly `m` addressable bits, indices `0..m`. Both operations work on a
//! batch of offsets (the `k` offsets of one key) and are atomic with respect to other batches on
//! the same array. Bits only ever go from 0 to 1.
//!
//! An offset is valid when `offset < m`. A batch holding any offset `>= m` fails with
//! [`ErrorKind::OutOfRange`](crate::error::ErrorKind::OutOfRange) and leaves the array untouched.
//!
//! [`MemoryBitArray`] is the in-process implementation. Durable or remote backends implement
//! the trait themselves and report their own failures with
//! [`ErrorKind::Unexpected`](crate::error::ErrorKind::Unexpected).
//!
//! # Usage
//!
//! ```rust
//! use bitbloom::bitarray::BitArray;
//! use bitbloom::bitarray::MemoryBitArray;
//!
//! let bits = MemoryBitArray::new(100);
//! bits.set_bits(&[10, 99]).unwrap();
//!
//! assert_eq!(bits.get_bits(&[10, 20, 99]).unwrap(), vec![10, 99]);
//! assert!(bits.set_bits(&[100]).is_err());
//! ```

mod memory;

use std::sync::Arc;

pub use self::memory::MemoryBitArray;
use crate::error::Error;

/// Batched bit storage addressed by `u32` offsets.
pub trait BitArray: Send + Sync {
    /// Sets every bit in `offsets` to 1.
    ///
    /// Setting a bit that is already set is a no-op.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::OutOfRange`](crate::error::ErrorKind::OutOfRange) if any offset is
    /// not below the capacity; in that case no bit of the batch is set.
    fn set_bits(&self, offsets: &[u32]) -> Result<(), Error>;

    /// Returns the offsets from `offsets` whose bit is currently 1, in input order.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::OutOfRange`](crate::error::ErrorKind::OutOfRange) if any offset is
    /// not below the capacity.
    fn get_bits(&self, offsets: &[u32]) -> Result<Vec<u32>, Error>;
}

impl<T: BitArray + ?Sized> BitArray for Arc<T> {
    fn set_bits(&self, offsets: &[u32]) -> Result<(), Error> {
        (**self).set_bits(offsets)
    }

    fn get_bits(&self, offsets: &[u32]) -> Result<Vec<u32>, Error> {
        (**self).get_bits(offsets)
    }
}

impl<T: BitArray + ?Sized> BitArray for &T {
    fn set_bits(&self, offsets: &[u32]) -> Result<(), Error> {
        (**self).set_bits(offsets)
    }

    fn get_bits(&self, offsets: &[u32]) -> Result<Vec<u32>, Error> {
        (**self).get_bits(offsets)
    }
}

/// Checks that every offset of a batch is below `capacity`.
///
/// Backends call this before touching storage so a rejected batch has no effect.
///
/// # Errors
///
/// Returns [`ErrorKind::OutOfRange`](crate::error::ErrorKind::OutOfRange) naming the first
/// offending offset.
pub fn check_offsets(offsets: &[u32], capacity: u32) -> Result<(), Error> {
    match offsets.iter().find(|&&offset| offset >= capacity) {
        Some(&offset) => {
            tracing::trace!(offset, capacity, "rejecting bit batch");
            Err(Error::out_of_range(offset, capacity))
        }
        None => Ok(()),
    }
}

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

use std::hash::BuildHasherDefault;
use std::hash::DefaultHasher;
use std::sync::Arc;
use std::sync::Barrier;

use bitbloom::bitarray::BitArray;
use bitbloom::bitarray::MemoryBitArray;
use bitbloom::bloom::BloomFilter;
use bitbloom::bloom::BloomFilterBuilder;
use bitbloom::hash::BuildHash32;
use googletest::assert_that;
use googletest::prelude::eq;
use googletest::prelude::le;

const NUM_THREADS: usize = 16;
const KEYS_PER_THREAD: usize = 500;

fn key(thread: usize, i: usize) -> String {
    format!("thread-{thread}-key-{i}")
}

fn run_inserts_then_queries(filter: &BloomFilter) {
    let barrier = Barrier::new(NUM_THREADS);
    std::thread::scope(|s| {
        for t in 0..NUM_THREADS {
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                for i in 0..KEYS_PER_THREAD {
                    filter.insert(key(t, i)).unwrap();
                }
            });
        }
    });

    std::thread::scope(|s| {
        for t in 0..NUM_THREADS {
            s.spawn(move || {
                for i in 0..KEYS_PER_THREAD {
                    assert!(filter.contains(key(t, i)).unwrap());
                }
            });
        }
    });
}

#[test]
fn test_concurrent_insert_then_query() {
    let bits = Arc::new(MemoryBitArray::new(1 << 20));
    let filter = BloomFilterBuilder::with_size(1 << 20, 7)
        .bit_array(bits.clone())
        .build()
        .unwrap();

    run_inserts_then_queries(&filter);

    // Single-threaded sweep: every key present, and the bits set are exactly the union of
    // the keys' offsets.
    let mut expected: Vec<u32> = Vec::new();
    for t in 0..NUM_THREADS {
        for i in 0..KEYS_PER_THREAD {
            let k = key(t, i);
            assert!(filter.contains(&k).unwrap());
            expected.extend(filter.offsets(k.as_bytes()));
        }
    }
    expected.sort_unstable();
    expected.dedup();
    assert_that!(bits.bits_set(), eq(expected.len() as u64));
    assert_that!(
        bits.bits_set(),
        le((NUM_THREADS * KEYS_PER_THREAD * 7) as u64)
    );
}

#[test]
fn test_concurrent_with_per_call_hasher() {
    let filter = BloomFilterBuilder::with_size(1 << 20, 7)
        .hasher(BuildHash32::new(
            BuildHasherDefault::<DefaultHasher>::default(),
        ))
        .build()
        .unwrap();

    let reference: Vec<Vec<u32>> = (0..NUM_THREADS)
        .map(|t| filter.offsets(key(t, 0).as_bytes()))
        .collect();

    std::thread::scope(|s| {
        for (t, expected) in reference.iter().enumerate() {
            let filter = &filter;
            s.spawn(move || {
                for _ in 0..200 {
                    assert_eq!(&filter.offsets(key(t, 0).as_bytes()), expected);
                }
            });
        }
    });

    run_inserts_then_queries(&filter);
}

#[test]
fn test_filters_sharing_bit_array() {
    let bits = Arc::new(MemoryBitArray::new(1 << 16));
    let writer = BloomFilterBuilder::with_size(1 << 16, 5)
        .bit_array(bits.clone())
        .build()
        .unwrap();
    let reader = BloomFilterBuilder::with_size(1 << 16, 5)
        .bit_array(bits.clone())
        .build()
        .unwrap();

    std::thread::scope(|s| {
        s.spawn(|| {
            for i in 0..1000 {
                writer.insert(format!("shared-{i}")).unwrap();
            }
        });
        s.spawn(|| {
            // Readers never observe a torn batch: a key is either fully present or may be absent.
            for i in 0..1000 {
                let _ = reader.contains(format!("shared-{i}")).unwrap();
            }
        });
    });

    for i in 0..1000 {
        assert!(reader.contains(format!("shared-{i}")).unwrap());
    }
    let all: Vec<u32> = (0..1 << 16).collect();
    assert_that!(
        bits.get_bits(&all).unwrap().len() as u64,
        eq(bits.bits_set())
    );
}

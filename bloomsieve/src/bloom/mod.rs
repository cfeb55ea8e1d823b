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

//! Bloom filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! an element is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If an item was added, `check()` will always return `true`
//! - **Possible false positives**: `check()` may return `true` for items never added
//! - **Fixed size**: The filter does not resize; it is sized once at construction
//! - **Monotonic**: Bits are only ever set, never cleared (no deletion support)
//!
//! # Usage
//!
//! ```rust
//! use bloomsieve::bloom::BloomFilter;
//!
//! // Create a filter sized for 1000 items with 1% false positive rate
//! let mut filter = BloomFilter::new(1000, 0.01);
//!
//! // Register items
//! filter.add("apple");
//! filter.add("banana");
//!
//! // Query membership
//! assert!(filter.check("apple")); // true - definitely added
//! assert!(!filter.check("grape")); // false - never added (probably)
//!
//! // Get statistics
//! println!("Bits: {}", filter.num_bits());
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//! ```
//!
//! # Sizing
//!
//! The constructor derives the bit-array length and hash-function count from
//! the expected item count `n` and the target false-positive probability `p`:
//!
//! ```text
//! m = floor(-n * ln(p) / ln(2)^2)
//! k = floor((m / n) * ln(2))
//! ```
//!
//! both floored to at least 1. The same formulas are exposed as
//! [`BloomFilter::suggest_num_bits`] and [`BloomFilter::suggest_num_hashes`]
//! for callers that want to size a filter by hand.
//!
//! # Implementation Details
//!
//! - Each of the k hash slots carries its own random salt string, drawn once
//!   at construction
//! - A probe index is SHA-256 over salt bytes followed by item bytes, read as
//!   a 256-bit integer and reduced modulo the bit count
//! - Salting one strong digest stands in for k independently designed hash
//!   functions; adversarial-input resistance would need a keyed hash instead
//! - Bits packed efficiently in `u64` words
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"

mod sketch;

pub use self::sketch::BloomFilter;

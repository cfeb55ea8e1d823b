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

//! Digest plumbing shared by the filter: salted probe-index derivation and
//! per-slot salt generation.

use rand::Rng;
use sha2::Digest;
use sha2::Sha256;

/// Number of random bytes in a salt token before hex encoding.
const SALT_TOKEN_BYTES: usize = 16;

/// Derives the bit index probed for `item` under `salt`.
///
/// The digest is SHA-256 over the salt bytes followed by the item's UTF-8
/// bytes. The full 256-bit digest, read as a big-endian non-negative
/// integer, is reduced modulo `num_bits`.
pub(crate) fn probe_index(salt: &str, item: &str, num_bits: u64) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(item.as_bytes());
    let digest = hasher.finalize();
    mod_u64_be(digest.as_slice(), num_bits)
}

/// Generates `count` distinct random hex salt tokens.
///
/// Tokens only need to be distinct within one filter instance; duplicates
/// are re-drawn.
pub(crate) fn generate_salts(count: u16) -> Vec<String> {
    let mut rng = rand::rng();
    let mut salts: Vec<String> = Vec::with_capacity(count as usize);
    while salts.len() < count as usize {
        let mut token = [0u8; SALT_TOKEN_BYTES];
        rng.fill(&mut token[..]);
        let salt = hex::encode(token);
        if !salts.contains(&salt) {
            salts.push(salt);
        }
    }
    salts
}

/// Reduces a big-endian byte string modulo `modulus`, 64 bits at a time.
///
/// Equivalent to reading the whole byte string as one arbitrary-precision
/// integer and taking the remainder.
fn mod_u64_be(bytes: &[u8], modulus: u64) -> u64 {
    let mut rem: u64 = 0;
    for chunk in bytes.chunks(8) {
        let word = read_u64_be(chunk);
        let wide = (u128::from(rem) << (8 * chunk.len())) | u128::from(word);
        rem = (wide % u128::from(modulus)) as u64;
    }
    rem
}

/// Reads an u64 from a byte slice in big-endian order, right-aligned.
///
/// # Panics
///
/// Panics if `bytes.len()` is greater than 8.
fn read_u64_be(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[8 - bytes.len()..].copy_from_slice(bytes);
    u64::from_be_bytes(buf)
}

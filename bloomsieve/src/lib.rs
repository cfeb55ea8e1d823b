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

//! # Bloomsieve
//!
//! A salted multi-probe Bloom filter: a compact probabilistic structure that
//! answers "has this item possibly been inserted?" with no false negatives
//! and a tunable false-positive rate, using far less memory than an exact
//! set.
//!
//! The filter sizes itself from an expected item count and a target
//! false-positive probability, derives one random salt per hash slot at
//! construction, and probes its bit array through salted SHA-256 digests.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bloom;
pub mod error;

mod hash;

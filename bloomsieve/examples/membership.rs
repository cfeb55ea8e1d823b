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

use bloomsieve::bloom::BloomFilter;

fn main() {
    // Sized for 20 items with a 5% false-positive target
    let mut filter = BloomFilter::new(20, 0.05);

    println!("Length of bit array: {}", filter.num_bits());
    println!("False positive probability: {}", filter.target_fpp());
    println!("Number of hash functions: {}", filter.num_hashes());

    let emails = [
        "abound@email.com",
        "abounds@email.com",
        "abundance@email.com",
        "abundant@email.com",
        "accessible@email.com",
        "bloom@email.com",
        "blossom@email.com",
        "bolster@email.com",
        "bonny@email.com",
        "bonus@email.com",
        "bonuses@email.com",
        "coherent@email.com",
        "cohesive@email.com",
        "colorful@email.com",
        "comely@email.com",
        "comfort@email.com",
        "gems@email.com",
        "generosity@email.com",
        "generous@email.com",
        "generously@email.com",
        "genial@email.com",
    ];

    println!("\nAdding {} addresses...", emails.len());
    for email in emails {
        filter.add(email);
    }

    println!(
        "Bits used: {} of {} ({:.1}% load, est. FPP {:.4})",
        filter.bits_used(),
        filter.num_bits(),
        filter.load_factor() * 100.0,
        filter.estimated_fpp(),
    );

    let test_emails = [
        "banana@email.com",
        "minion@email.com",
        "abound@email.com",
        "comfort@email.com",
    ];

    println!();
    for email in test_emails {
        if filter.check(email) {
            if emails.contains(&email) {
                println!("{email} is probably present!");
            } else {
                println!("{email} is a false positive!");
            }
        } else {
            println!("{email} is definitely not present!");
        }
    }
}

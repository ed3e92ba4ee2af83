// Dweve Mork - Mork Database Ingestion Toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![no_main]

//! Fuzz target for the Mork parser.
//!
//! Feeds arbitrary bytes after a valid header, in both strict and lenient
//! mode, and resolves every stored value. The parser must return errors,
//! never panic.
//!
//! # Running the Fuzzer
//!
//! ```bash
//! cargo install cargo-fuzz
//!
//! # From the mork-core directory
//! cargo fuzz run fuzz_parse
//! cargo fuzz run fuzz_parse -- -max_len=100000 -max_total_time=300
//! ```

use libfuzzer_sys::fuzz_target;
use mork_core::{parse, parse_with_options, ParseOptions};

const HEADER: &[u8] = b"// <!-- <mdb:mork:z v=\"1.4\"/> -->\n";

fuzz_target!(|data: &[u8]| {
    // Raw input, mostly rejected by the header check
    let _ = parse(data);

    let mut input = HEADER.to_vec();
    input.extend_from_slice(data);

    if let Ok(doc) = parse(&input) {
        for table in doc.tables.values() {
            for row in table.rows.values() {
                for (column, value) in &row.cells {
                    let _ = doc.lookup(column);
                    let _ = doc.lookup(value);
                }
            }
        }
    }

    let strict = ParseOptions::builder().strict(true).build();
    let _ = parse_with_options(&input, strict);
});

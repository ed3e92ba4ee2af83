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

//! Shared test fixtures and utilities for Mork ingestion and export.
//!
//! This crate provides canonical Mork files, a text builder, error fixtures
//! and counting helpers so the parser, the exporters and the CLI test
//! against the same inputs.
//!
//! # Quick Start
//!
//! ```rust
//! use mork_test::fixtures;
//!
//! // Pre-built files
//! let text = fixtures::address_book();
//! let doc = mork_core::parse(text.as_bytes()).unwrap();
//! assert_eq!(doc.row_count(), 3);
//!
//! // Custom files
//! use mork_test::fixtures::builders::{MorkBuilder, RowBuilder, TableBuilder};
//!
//! let text = MorkBuilder::new()
//!     .atoms([("90", "Alice")])
//!     .table(TableBuilder::new("1:^80").row(RowBuilder::new("1").reference("81", "90")))
//!     .build();
//! let doc = mork_core::parse(text.as_bytes()).unwrap();
//! assert_eq!(mork_test::count_references(&doc), 1);
//!
//! // Error handling
//! use mork_test::fixtures::errors;
//!
//! for (name, input, kind) in errors::invalid_mork_samples() {
//!     // Parse in strict mode and expect `kind`
//! }
//! ```

/// Type alias for a list of fixture functions (name, generator).
pub type FixtureList = Vec<(&'static str, fn() -> String)>;

/// Header line of every supported Mork file, newline included.
pub const HEADER: &str = "// <!-- <mdb:mork:z v=\"1.4\"/> -->\n";

/// Prefix `body` with the Mork header.
pub fn with_header(body: &str) -> String {
    format!("{}{}", HEADER, body)
}

/// Returns all fixtures as (name, document) pairs, parsed leniently.
pub fn fixtures_as_documents() -> Vec<(&'static str, mork_core::MorkResult<mork_core::Document>)> {
    fixtures::all()
        .into_iter()
        .map(|(name, fixture_fn)| (name, mork_core::parse(fixture_fn().as_bytes())))
        .collect()
}

/// Write all fixtures to a directory as .mork files.
#[cfg(feature = "generate")]
pub fn write_fixtures_to_dir(dir: &std::path::Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    for (name, fixture_fn) in fixtures::all() {
        let path = dir.join(format!("{}.mork", name));
        std::fs::write(path, fixture_fn())?;
    }
    Ok(())
}

/// Canonical Mork files covering the grammar.
pub mod fixtures;

/// Fixture counting utilities.
pub mod counts;

pub use counts::{count_cells, count_references, count_rows};

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

//! Mork JSON Conversion
//!
//! Exports an ingested Mork document as nested JSON objects: table, row,
//! then field name to value, with every reference resolved through the
//! dictionary and every id rendered in decimal.
//!
//! # Examples
//!
//! ```rust
//! use mork_json::{to_json, ToJsonConfig};
//!
//! let doc = mork_core::parse(
//!     b"// <!-- <mdb:mork:z v=\"1.4\"/> -->\n{1 [1(name=Alice)]}\n",
//! )
//! .unwrap();
//! let json = to_json(&doc, &ToJsonConfig::default()).unwrap();
//! assert_eq!(json, r#"{"1":{"1":{"name":"Alice"}}}"#);
//! ```

mod error;
mod to_json;

pub use error::{JsonError, Result};
pub use to_json::{to_json, to_json_value, to_json_writer, ToJsonConfig};

use mork_core::Document;

/// Convert Mork document to a compact JSON string
pub fn mork_to_json(doc: &Document) -> Result<String> {
    to_json(doc, &ToJsonConfig::default())
}

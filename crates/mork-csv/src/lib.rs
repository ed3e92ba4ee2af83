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

//! CSV projection of ingested Mork documents.
//!
//! Writes one record per visible row: the table id and row id in decimal,
//! optionally their scope names, then every field resolved through the
//! dictionary.
//!
//! # Examples
//!
//! ```
//! use mork_core::traverse::ViewOptions;
//! use mork_csv::{to_csv_with_config, ToCsvConfig};
//!
//! let doc = mork_core::parse(
//!     b"// <!-- <mdb:mork:z v=\"1.4\"/> -->
//! < <(a=c)> (80=ns:addrbk:db:row:scope:card:all)(81=FirstName)>
//! <(90=Alice)>
//! {1:^80 [1(^81^90)]}
//! ",
//! )
//! .unwrap();
//!
//! let config = ToCsvConfig {
//!     delimiter: b',',
//!     view: ViewOptions::default().with_include_scope(true),
//!     ..Default::default()
//! };
//! let csv_string = to_csv_with_config(&doc, config).unwrap();
//! assert!(csv_string.contains("\"1\",\"ns:addrbk:db:row:scope:card:all\",\"1\""));
//! assert!(csv_string.contains("\"Alice\""));
//! ```

mod error;
mod to_csv;

// Re-export public API
pub use error::{CsvError, Result};
pub use to_csv::{
    to_csv, to_csv_with_config, to_csv_writer, to_csv_writer_with_config, ToCsvConfig,
    ROW_ID_HEADER, ROW_SCOPE_HEADER, TABLE_ID_HEADER, TABLE_SCOPE_HEADER,
};

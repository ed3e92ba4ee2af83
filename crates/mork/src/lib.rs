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

//! # Mork - reader for Mozilla Mork database files
//!
//! Mork is the flat-file database format behind Thunderbird and legacy
//! Firefox address books, mail folder summaries and history files. This
//! crate ingests a Mork file into a [`Document`] of tables, rows and cells,
//! and projects it to CSV or JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use mork::parse;
//!
//! let input = b"// <!-- <mdb:mork:z v=\"1.4\"/> -->
//! < <(a=c)> (80=ns:addrbk:db:row:scope:card:all)(81=FirstName)>
//! {1:^80 [1(^81=Alice)]}
//! ";
//!
//! let doc = parse(input).expect("Failed to parse");
//! let row = doc.table("1:^80").and_then(|t| t.row("1:^80")).unwrap();
//! assert_eq!(doc.lookup(row.get("^81:c").unwrap()), "Alice");
//! ```
//!
//! ## Modules
//!
//! - [`traverse`]: filtered views over a document
//! - [`ident`]: qualified id helpers
//! - [`codec`]: value escape decoding
//! - `json`: JSON projection (feature = "json", on by default)
//! - `csv`: CSV projection (feature = "csv")

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use mork_core::{codec, ident, traverse};

pub use mork_core::{
    parse_reader, parse_with_options, Dictionary, Document, MorkError, MorkErrorKind,
    MorkResult, ParseOptions, ParseOptionsBuilder, Row, Table, Verbosity,
};

mod error_ext;
pub use error_ext::MorkResultExt;

/// JSON projection (requires `json` feature)
#[cfg(feature = "json")]
pub mod json {
    pub use mork_json::{
        mork_to_json, to_json, to_json_value, to_json_writer, JsonError, ToJsonConfig,
    };
}

/// CSV projection (requires `csv` feature)
#[cfg(feature = "csv")]
pub mod csv {
    pub use mork_csv::{
        to_csv, to_csv_with_config, to_csv_writer, to_csv_writer_with_config, CsvError,
        ToCsvConfig,
    };
}

/// Parse a Mork file held in memory, leniently.
///
/// For strict parsing use [`parse_strict`].
///
/// # Examples
///
/// ```rust
/// use mork::parse;
///
/// let doc = parse(b"// <!-- <mdb:mork:z v=\"1.4\"/> -->\n").unwrap();
/// assert_eq!(doc.version, "1.4");
/// ```
#[inline]
pub fn parse(input: &[u8]) -> MorkResult<Document> {
    mork_core::parse(input)
}

/// Parse a Mork file held in memory, failing on the first irregularity.
#[inline]
pub fn parse_strict(input: &[u8]) -> MorkResult<Document> {
    parse_with_options(input, ParseOptions::builder().strict(true).build())
}

/// Open and parse the Mork file at `path`.
///
/// The file is streamed through a buffered reader.
///
/// # Errors
///
/// Opening failures are reported as [`MorkErrorKind::Io`] with the path as
/// context.
pub fn parse_file(path: impl AsRef<Path>, options: ParseOptions) -> MorkResult<Document> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_reader(BufReader::new(file), options)
        .with_context(|| format!("while parsing {}", path.display()))
}

/// Check that `input` ingests in strict mode.
#[inline]
pub fn validate(input: &[u8]) -> MorkResult<()> {
    parse_strict(input).map(|_| ())
}

/// Convert a document to compact JSON with the default view.
#[cfg(feature = "json")]
#[inline]
pub fn to_json(doc: &Document) -> Result<String, mork_json::JsonError> {
    mork_json::mork_to_json(doc)
}

/// Convert a document to semicolon-delimited CSV with the default view.
#[cfg(feature = "csv")]
#[inline]
pub fn to_csv(doc: &Document) -> Result<String, mork_csv::CsvError> {
    mork_csv::to_csv(doc)
}

/// Mork format version supported by this library.
pub const SUPPORTED_VERSION: &str = mork_core::SUPPORTED_VERSION;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use mork_test::fixtures;
    use std::io::Write;

    #[test]
    fn test_parse_minimal() {
        let doc = parse(fixtures::minimal().as_bytes()).unwrap();
        assert_eq!(doc.version, SUPPORTED_VERSION);
        assert_eq!(doc.row_count(), 1);
    }

    #[test]
    fn test_parse_strict_rejects_truncation() {
        let input = mork_test::with_header("{1:^80 [1(a=b)]");
        assert!(parse(input.as_bytes()).is_ok());
        let err = parse_strict(input.as_bytes()).unwrap_err();
        assert_eq!(err.kind, MorkErrorKind::UnterminatedConstruct);
    }

    #[test]
    fn test_validate() {
        assert!(validate(fixtures::comprehensive().as_bytes()).is_ok());
        assert!(validate(b"invalid").is_err());
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(fixtures::address_book().as_bytes()).unwrap();

        let doc = parse_file(file.path(), ParseOptions::default()).unwrap();
        assert_eq!(doc, parse(fixtures::address_book().as_bytes()).unwrap());
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("/nonexistent/abook.mab", ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind, MorkErrorKind::Io);
        assert_eq!(err.context.as_deref(), Some("opening /nonexistent/abook.mab"));
    }

    #[test]
    fn test_parse_file_error_context() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not mork\n").unwrap();

        let err = parse_file(file.path(), ParseOptions::default()).unwrap_err();
        assert_eq!(err.kind, MorkErrorKind::MalformedHeader);
        assert!(err.context.unwrap().starts_with("while parsing "));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_to_json() {
        let doc = parse(fixtures::minimal().as_bytes()).unwrap();
        let json = to_json(&doc).unwrap();
        assert!(json.contains("\"subject\":\"Hello\""));
    }

    #[cfg(feature = "csv")]
    #[test]
    fn test_to_csv() {
        let doc = parse(fixtures::minimal().as_bytes()).unwrap();
        let csv = to_csv(&doc).unwrap();
        assert!(csv.starts_with("\"Table id\";\"Row id\";\"subject\"\n"));
    }
}

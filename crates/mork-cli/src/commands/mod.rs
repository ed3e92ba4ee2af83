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

//! CLI command implementations

mod export;
mod summary;

pub use export::{csv, json};
pub use summary::{summary, write_summary};

use crate::error::CliError;
use mork_core::{parse_reader, Document, ParseOptions};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Open and ingest a Mork file.
///
/// The file is read through a buffered, seekable reader; it is never loaded
/// whole into memory.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened or ingestion fails.
pub fn load_document(path: &Path, options: ParseOptions) -> Result<Document, CliError> {
    debug!(path = %path.display(), strict = options.strict, "opening Mork file");
    let file = File::open(path).map_err(|e| CliError::io_error(path, e))?;

    let doc = parse_reader(BufReader::new(file), options).map_err(|e| CliError::parse(path, e))?;
    info!(
        path = %path.display(),
        tables = doc.tables.len(),
        rows = doc.row_count(),
        "ingested Mork file"
    );
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mork_core::MorkErrorKind;
    use std::io::Write;

    fn temp_file(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_load_document() {
        let file = temp_file(mork_test::fixtures::address_book().as_bytes());
        let doc = load_document(file.path(), ParseOptions::default()).unwrap();
        assert_eq!(doc.row_count(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_document(Path::new("/nonexistent/abook.mab"), ParseOptions::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/abook.mab"));
    }

    #[test]
    fn test_load_malformed_header() {
        let file = temp_file(b"// not a mork file\n");
        let err = load_document(file.path(), ParseOptions::default()).unwrap_err();
        match err {
            CliError::Parse { source, .. } => {
                assert_eq!(source.kind, MorkErrorKind::MalformedHeader)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

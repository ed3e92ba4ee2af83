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

//! Export commands - CSV and JSON projections written to stdout.

use super::load_document;
use crate::cli::{Delimiter, GlobalArgs};
use crate::error::CliError;
use mork_csv::{to_csv_writer_with_config, ToCsvConfig};
use mork_json::{to_json_writer, ToJsonConfig};
use std::io::{self, Write};
use std::path::Path;

/// Export the rows of `file` as CSV.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or parsed, or writing fails.
pub fn csv(file: &Path, delimiter: Delimiter, global: &GlobalArgs) -> Result<(), CliError> {
    let doc = load_document(file, global.parse_options()?)?;
    let config = ToCsvConfig {
        delimiter: delimiter.as_byte(),
        view: global.view_options(),
        ..ToCsvConfig::default()
    };

    let stdout = io::stdout();
    to_csv_writer_with_config(&doc, stdout.lock(), config)?;
    Ok(())
}

/// Export the rows of `file` as JSON.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or parsed, or writing fails.
pub fn json(file: &Path, pretty: bool, global: &GlobalArgs) -> Result<(), CliError> {
    let doc = load_document(file, global.parse_options()?)?;
    let config = ToJsonConfig {
        pretty,
        view: global.view_options(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    to_json_writer(&doc, &mut out, &config)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

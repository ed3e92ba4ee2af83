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

//! Summary command - tables, scopes and field names of a Mork file.

use super::load_document;
use crate::cli::GlobalArgs;
use crate::error::CliError;
use mork_core::traverse::{summarize, Summary};
use std::io::{self, Write};
use std::path::Path;

/// Print a summary of the tables in `file`.
///
/// Rows of every scope are counted; `--no-filter` has no effect here. The
/// table filter still applies.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read or parsed, or stdout fails.
pub fn summary(file: &Path, global: &GlobalArgs) -> Result<(), CliError> {
    let doc = load_document(file, global.parse_options()?)?;
    let summary = summarize(&doc, &global.view_options());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_summary(&summary, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Render a summary as text.
///
/// ```text
/// Table 1 in scope ns:addrbk:db:row:scope:card:all has 2 rows
///     2 rows in scope ns:addrbk:db:row:scope:card:all
/// Table 1 has 3 fields
///     DisplayName
///     FirstName
///     LastName
///
/// Found 1 scope:
///     ns:addrbk:db:row:scope:card:all
/// ```
pub fn write_summary<W: Write>(summary: &Summary, out: &mut W) -> io::Result<()> {
    for table in &summary.tables {
        writeln!(
            out,
            "Table {} in scope {} has {} {}",
            table.id,
            table.scope,
            table.row_count,
            plural(table.row_count, "row")
        )?;
        for (scope, count) in &table.rows_per_scope {
            writeln!(out, "\t{} {} in scope {}", count, plural(*count, "row"), scope)?;
        }
        writeln!(
            out,
            "Table {} has {} {}",
            table.id,
            table.fields.len(),
            plural(table.fields.len(), "field")
        )?;
        for field in &table.fields {
            writeln!(out, "\t{}", field)?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "Found {} {}:",
        summary.scopes.len(),
        plural(summary.scopes.len(), "scope")
    )?;
    for scope in &summary.scopes {
        writeln!(out, "\t{}", scope)?;
    }
    Ok(())
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}

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

//! Convert Mork documents to CSV format.

use crate::error::{CsvError, Result};
use mork_core::ident::decimal_id;
use mork_core::traverse::{columns, traverse, DocumentVisitor, ViewOptions, VisitorContext};
use mork_core::{Document, Row, Table};
use std::io::Write;

/// Configuration for CSV output.
#[derive(Debug, Clone)]
pub struct ToCsvConfig {
    /// Field delimiter (default: ';')
    pub delimiter: u8,
    /// Include header row (default: true)
    pub include_headers: bool,
    /// Quote style for fields (default: always)
    pub quote_style: csv::QuoteStyle,
    /// Tables and rows to export
    pub view: ViewOptions,
}

impl Default for ToCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            include_headers: true,
            quote_style: csv::QuoteStyle::Always,
            view: ViewOptions::default(),
        }
    }
}

/// Header of the table id column.
pub const TABLE_ID_HEADER: &str = "Table id";
/// Header of the table scope column.
pub const TABLE_SCOPE_HEADER: &str = "Table scope";
/// Header of the row id column.
pub const ROW_ID_HEADER: &str = "Row id";
/// Header of the row scope column.
pub const ROW_SCOPE_HEADER: &str = "Row scope";

/// Convert a Mork document to a CSV string.
///
/// One line per visible row; columns are every field used by the visible
/// rows, sorted case-insensitively by resolved name.
///
/// # Example
/// ```
/// use mork_csv::to_csv;
///
/// let doc = mork_core::parse(
///     b"// <!-- <mdb:mork:z v=\"1.4\"/> -->\n{1F:^80 [A(name=Alice)]}\n",
/// )
/// .unwrap();
/// let csv_string = to_csv(&doc).unwrap();
/// assert_eq!(csv_string, "\"Table id\";\"Row id\";\"name\"\n\"31\";\"10\";\"Alice\"\n");
/// ```
pub fn to_csv(doc: &Document) -> Result<String> {
    to_csv_with_config(doc, ToCsvConfig::default())
}

/// Convert a Mork document to a CSV string with custom configuration.
pub fn to_csv_with_config(doc: &Document, config: ToCsvConfig) -> Result<String> {
    let mut buffer = Vec::with_capacity(estimate_csv_size(doc));
    to_csv_writer_with_config(doc, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|_| CsvError::InvalidUtf8 {
        context: "CSV output".to_string(),
    })
}

/// Write a Mork document as CSV to a writer.
///
/// # Example
/// ```no_run
/// use mork_csv::to_csv_writer;
/// use std::fs::File;
///
/// let doc = mork_core::Document::new("1.4");
/// let file = File::create("output.csv").unwrap();
/// to_csv_writer(&doc, file).unwrap();
/// ```
pub fn to_csv_writer<W: Write>(doc: &Document, writer: W) -> Result<()> {
    to_csv_writer_with_config(doc, writer, ToCsvConfig::default())
}

/// Write a Mork document as CSV to a writer with custom configuration.
pub fn to_csv_writer_with_config<W: Write>(
    doc: &Document,
    writer: W,
    config: ToCsvConfig,
) -> Result<()> {
    let wtr = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .quote_style(config.quote_style)
        .from_writer(writer);

    let mut visitor = CsvVisitor {
        writer: wtr,
        columns: columns(doc, &config.view),
        config: &config,
    };
    traverse(doc, &config.view, &mut visitor)?;

    visitor.writer.flush()?;
    Ok(())
}

struct CsvVisitor<'c, W: Write> {
    writer: csv::Writer<W>,
    columns: Vec<(String, String)>,
    config: &'c ToCsvConfig,
}

impl<W: Write> CsvVisitor<'_, W> {
    fn write(&mut self, row: &str, record: Vec<String>) -> Result<()> {
        self.writer
            .write_record(record.iter().map(|field| flatten_line_breaks(field)))
            .map_err(|e| CsvError::Record {
                row: row.to_string(),
                message: e.to_string(),
            })
    }
}

impl<W: Write> DocumentVisitor for CsvVisitor<'_, W> {
    type Error = CsvError;

    fn begin_document(&mut self, _ctx: &VisitorContext) -> Result<()> {
        if !self.config.include_headers {
            return Ok(());
        }

        let scoped = self.config.view.include_scope;
        let mut header = vec![TABLE_ID_HEADER.to_string()];
        if scoped {
            header.push(TABLE_SCOPE_HEADER.to_string());
        }
        header.push(ROW_ID_HEADER.to_string());
        if scoped {
            header.push(ROW_SCOPE_HEADER.to_string());
        }
        header.extend(self.columns.iter().map(|(_, name)| name.clone()));

        self.write("header", header)
    }

    fn visit_row(&mut self, table: &Table, row: &Row, ctx: &VisitorContext) -> Result<()> {
        let scoped = self.config.view.include_scope;
        let mut record = Vec::with_capacity(self.columns.len() + 4);

        record.push(decimal_id(table.local_id()));
        if scoped {
            record.push(ctx.scope_name(table.scope()));
        }
        record.push(decimal_id(row.local_id()));
        if scoped {
            record.push(ctx.scope_name(row.scope()));
        }
        for (column, _) in &self.columns {
            record.push(row.get(column).map(|value| ctx.lookup(value)).unwrap_or_default());
        }

        self.write(&row.id, record)
    }
}

/// CSV consumers expect one record per line.
fn flatten_line_breaks(field: &str) -> String {
    field.replace(['\n', '\r'], " ")
}

/// Approximate: rows * columns * 20 bytes/cell.
fn estimate_csv_size(doc: &Document) -> usize {
    let cells: usize = doc
        .tables
        .values()
        .flat_map(|table| table.rows.values())
        .map(|row| row.len() + 2)
        .sum();
    cells * 20
}

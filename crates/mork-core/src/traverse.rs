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

//! Read-only traversal of an ingested document for output projections.
//!
//! # Architecture
//!
//! Projections implement [`DocumentVisitor`]; [`traverse`] walks tables and
//! rows in insertion order and applies the [`ViewOptions`] filters, so every
//! projection sees the same rows.
//!
//! # Example
//!
//! ```
//! use mork_core::parse;
//! use mork_core::traverse::{traverse, StatsCollector, ViewOptions};
//!
//! let input = b"// <!-- <mdb:mork:z v=\"1.4\"/> -->\n{1:^80 [1(a=b)] [2:^81(a=c)]}\n";
//! let doc = parse(input).unwrap();
//!
//! let mut stats = StatsCollector::default();
//! traverse(&doc, &ViewOptions::default(), &mut stats).unwrap();
//! assert_eq!(stats.table_count, 1);
//! assert_eq!(stats.row_count, 1); // 2:^81 is filtered by scope
//! ```

use crate::document::{Document, Row, Table};
use indexmap::{IndexMap, IndexSet};

/// Which tables and rows a projection sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Only the table with this local id (compared as written, e.g. `1F`).
    pub table: Option<String>,
    /// Skip rows whose scope differs from their table's scope.
    pub filter_scope: bool,
    /// Print scope names next to ids.
    pub include_scope: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            table: None,
            filter_scope: true,
            include_scope: false,
        }
    }
}

impl ViewOptions {
    /// Restrict the view to one table.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Enable or disable the row scope filter.
    pub fn with_filter_scope(mut self, filter_scope: bool) -> Self {
        self.filter_scope = filter_scope;
        self
    }

    /// Enable or disable scope names in the output.
    pub fn with_include_scope(mut self, include_scope: bool) -> Self {
        self.include_scope = include_scope;
        self
    }

    /// Whether `table` passes the table filter.
    pub fn shows_table(&self, table: &Table) -> bool {
        self.table
            .as_deref()
            .map_or(true, |wanted| wanted == table.local_id())
    }

    /// Whether `row` passes the scope filter.
    pub fn shows_row(&self, table: &Table, row: &Row) -> bool {
        !self.filter_scope || row.scope() == table.scope()
    }
}

/// Context provided to visitors during traversal.
#[derive(Debug, Clone, Copy)]
pub struct VisitorContext<'a> {
    /// The document being traversed.
    pub document: &'a Document,
    /// The view in effect.
    pub options: &'a ViewOptions,
}

impl<'a> VisitorContext<'a> {
    pub fn new(document: &'a Document, options: &'a ViewOptions) -> Self {
        Self { document, options }
    }

    /// Resolve a stored value through the dictionary.
    pub fn lookup(&self, value: &str) -> String {
        self.document.lookup(value)
    }

    /// Display name of a column id.
    pub fn column_name(&self, column: &str) -> String {
        self.document.column_name(column)
    }

    /// Display name of a scope.
    pub fn scope_name(&self, scope: &str) -> String {
        self.document.scope_name(scope)
    }
}

/// Trait for visiting the tables and rows of a document.
///
/// Only [`visit_row`](Self::visit_row) is required.
pub trait DocumentVisitor {
    /// Error type returned by visitor methods.
    type Error;

    /// Called at the start of document traversal.
    fn begin_document(&mut self, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called at the end of document traversal.
    fn end_document(&mut self, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called before the visible rows of a table.
    fn begin_table(&mut self, _table: &Table, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after the visible rows of a table.
    fn end_table(&mut self, _table: &Table, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called for each visible row.
    fn visit_row(
        &mut self,
        table: &Table,
        row: &Row,
        ctx: &VisitorContext,
    ) -> Result<(), Self::Error>;
}

/// Traverse a document, calling visitor methods for each visible element.
pub fn traverse<V: DocumentVisitor>(
    doc: &Document,
    options: &ViewOptions,
    visitor: &mut V,
) -> Result<(), V::Error> {
    let ctx = VisitorContext::new(doc, options);
    visitor.begin_document(&ctx)?;

    for table in doc.tables.values().filter(|t| options.shows_table(t)) {
        visitor.begin_table(table, &ctx)?;
        for row in table.rows.values().filter(|r| options.shows_row(table, r)) {
            visitor.visit_row(table, row, &ctx)?;
        }
        visitor.end_table(table, &ctx)?;
    }

    visitor.end_document(&ctx)?;
    Ok(())
}

/// Every column id used by the visible rows, with its resolved name,
/// sorted case-insensitively by name.
pub fn columns(doc: &Document, options: &ViewOptions) -> Vec<(String, String)> {
    let mut collector = ColumnCollector::default();
    traverse(doc, options, &mut collector).unwrap_or_else(|never| match never {});
    sorted_names(doc, collector.columns)
}

fn sorted_names(doc: &Document, ids: IndexSet<String>) -> Vec<(String, String)> {
    let mut named: Vec<(String, String)> = ids
        .into_iter()
        .map(|id| {
            let name = doc.column_name(&id);
            (id, name)
        })
        .collect();
    named.sort_by_cached_key(|(_, name)| name.to_lowercase());
    named
}

#[derive(Debug, Default)]
struct ColumnCollector {
    columns: IndexSet<String>,
}

impl DocumentVisitor for ColumnCollector {
    type Error = std::convert::Infallible;

    fn visit_row(
        &mut self,
        _table: &Table,
        row: &Row,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        self.columns.extend(row.cells.keys().cloned());
        Ok(())
    }
}

/// Statistics collector visitor for testing and analysis.
#[derive(Debug, Default)]
pub struct StatsCollector {
    /// Number of tables visited.
    pub table_count: usize,
    /// Number of rows visited.
    pub row_count: usize,
    /// Number of cells visited.
    pub cell_count: usize,
}

impl DocumentVisitor for StatsCollector {
    type Error = std::convert::Infallible;

    fn begin_table(&mut self, _table: &Table, _ctx: &VisitorContext) -> Result<(), Self::Error> {
        self.table_count += 1;
        Ok(())
    }

    fn visit_row(
        &mut self,
        _table: &Table,
        row: &Row,
        _ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        self.row_count += 1;
        self.cell_count += row.len();
        Ok(())
    }
}

// ==================== Summary ====================

/// Summary of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    /// Local table id as written.
    pub id: String,
    /// Display name of the table scope.
    pub scope: String,
    /// Number of rows, all scopes.
    pub row_count: usize,
    /// Row counts per scope display name, in order of first appearance.
    pub rows_per_scope: IndexMap<String, usize>,
    /// Resolved field names, sorted case-insensitively.
    pub fields: Vec<String>,
}

/// Summary of a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub tables: Vec<TableSummary>,
    /// Every scope display name seen on a table or row.
    pub scopes: IndexSet<String>,
}

/// Summarize the tables passing the table filter.
///
/// Rows of every scope are counted; the row scope filter does not apply.
pub fn summarize(doc: &Document, options: &ViewOptions) -> Summary {
    let options = options.clone().with_filter_scope(false);
    let mut collector = SummaryCollector::default();
    traverse(doc, &options, &mut collector).unwrap_or_else(|never| match never {});
    collector.summary
}

#[derive(Debug, Default)]
struct SummaryCollector {
    summary: Summary,
    current: Option<TableSummary>,
    columns: IndexSet<String>,
}

impl DocumentVisitor for SummaryCollector {
    type Error = std::convert::Infallible;

    fn begin_table(&mut self, table: &Table, ctx: &VisitorContext) -> Result<(), Self::Error> {
        let scope = ctx.scope_name(table.scope());
        self.summary.scopes.insert(scope.clone());
        self.current = Some(TableSummary {
            id: table.local_id().to_string(),
            scope,
            row_count: 0,
            rows_per_scope: IndexMap::new(),
            fields: Vec::new(),
        });
        self.columns.clear();
        Ok(())
    }

    fn visit_row(
        &mut self,
        _table: &Table,
        row: &Row,
        ctx: &VisitorContext,
    ) -> Result<(), Self::Error> {
        let scope = ctx.scope_name(row.scope());
        self.summary.scopes.insert(scope.clone());
        if let Some(current) = self.current.as_mut() {
            current.row_count += 1;
            *current.rows_per_scope.entry(scope).or_insert(0) += 1;
        }
        self.columns.extend(row.cells.keys().cloned());
        Ok(())
    }

    fn end_table(&mut self, _table: &Table, ctx: &VisitorContext) -> Result<(), Self::Error> {
        if let Some(mut current) = self.current.take() {
            let columns = std::mem::take(&mut self.columns);
            current.fields = sorted_names(ctx.document, columns)
                .into_iter()
                .map(|(_, name)| name)
                .collect();
            self.summary.tables.push(current);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    const HEADER: &str = "// <!-- <mdb:mork:z v=\"1.4\"/> -->\n";

    fn doc(body: &str) -> Document {
        parse(format!("{}{}", HEADER, body).as_bytes()).unwrap()
    }

    fn sample() -> Document {
        doc("< <(a=c)> (80=ns:msg)(81=Subject)(82=from)(83=ns:other)>\n\
             {1:^80 [1(^81=Hi)(^82=me)] [2:^83(^81=Skip)]}\n\
             {2:^83 [7(^81=Other)]}\n")
    }

    // ==================== ViewOptions tests ====================

    #[test]
    fn test_view_options_default() {
        let opts = ViewOptions::default();
        assert!(opts.table.is_none());
        assert!(opts.filter_scope);
        assert!(!opts.include_scope);
    }

    #[test]
    fn test_view_options_builders() {
        let opts = ViewOptions::default()
            .with_table("1F")
            .with_filter_scope(false)
            .with_include_scope(true);
        assert_eq!(opts.table.as_deref(), Some("1F"));
        assert!(!opts.filter_scope);
        assert!(opts.include_scope);
    }

    // ==================== traverse tests ====================

    #[test]
    fn test_traverse_empty_document() {
        let doc = doc("");
        let mut stats = StatsCollector::default();
        traverse(&doc, &ViewOptions::default(), &mut stats).unwrap();
        assert_eq!(stats.table_count, 0);
        assert_eq!(stats.row_count, 0);
    }

    #[test]
    fn test_traverse_scope_filter() {
        let doc = sample();
        let mut stats = StatsCollector::default();
        traverse(&doc, &ViewOptions::default(), &mut stats).unwrap();
        assert_eq!(stats.table_count, 2);
        assert_eq!(stats.row_count, 2);
        assert_eq!(stats.cell_count, 3);

        let mut stats = StatsCollector::default();
        let opts = ViewOptions::default().with_filter_scope(false);
        traverse(&doc, &opts, &mut stats).unwrap();
        assert_eq!(stats.row_count, 3);
    }

    #[test]
    fn test_traverse_table_filter_uses_local_id() {
        let doc = sample();
        let mut stats = StatsCollector::default();
        traverse(&doc, &ViewOptions::default().with_table("2"), &mut stats).unwrap();
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.row_count, 1);

        let mut stats = StatsCollector::default();
        traverse(&doc, &ViewOptions::default().with_table("2:^83"), &mut stats).unwrap();
        assert_eq!(stats.table_count, 0);
    }

    #[test]
    fn test_visitor_sees_rows_in_order() {
        struct Ids(Vec<String>);

        impl DocumentVisitor for Ids {
            type Error = std::convert::Infallible;

            fn visit_row(
                &mut self,
                _t: &Table,
                row: &Row,
                _ctx: &VisitorContext,
            ) -> Result<(), Self::Error> {
                self.0.push(row.id.clone());
                Ok(())
            }
        }

        let doc = doc("{1:^80 [3] [1] [2]}");
        let mut ids = Ids(Vec::new());
        traverse(&doc, &ViewOptions::default(), &mut ids).unwrap();
        assert_eq!(ids.0, vec!["3:^80", "1:^80", "2:^80"]);
    }

    // ==================== columns tests ====================

    #[test]
    fn test_columns_sorted_case_insensitive() {
        let doc = sample();
        let cols = columns(&doc, &ViewOptions::default());
        let names: Vec<_> = cols.iter().map(|(_, name)| name.as_str()).collect();
        assert_eq!(names, vec!["from", "Subject"]);
        assert_eq!(cols[1].0, "^81:c");
    }

    // ==================== summarize tests ====================

    #[test]
    fn test_summarize() {
        let doc = sample();
        let summary = summarize(&doc, &ViewOptions::default());
        assert_eq!(summary.tables.len(), 2);

        let first = &summary.tables[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.scope, "ns:msg");
        assert_eq!(first.row_count, 2);
        assert_eq!(first.rows_per_scope["ns:msg"], 1);
        assert_eq!(first.rows_per_scope["ns:other"], 1);
        assert_eq!(first.fields, vec!["from", "Subject"]);

        let scopes: Vec<_> = summary.scopes.iter().cloned().collect();
        assert_eq!(scopes, vec!["ns:msg", "ns:other"]);
    }

    #[test]
    fn test_summarize_table_filter() {
        let doc = sample();
        let summary = summarize(&doc, &ViewOptions::default().with_table("2"));
        assert_eq!(summary.tables.len(), 1);
        assert_eq!(summary.tables[0].fields, vec!["Subject"]);
    }
}

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

//! Document structure for ingested Mork data.

use crate::codec::DEFAULT_ESCAPE;
use crate::ident::{self, ATOM_SCOPE};
use indexmap::IndexMap;

/// Shared dictionary: qualified key to raw (still escaped) value.
pub type Dictionary = IndexMap<String, String>;

/// A row: qualified column id to unresolved cell value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Qualified row id.
    pub id: String,
    /// Cells in insertion order.
    pub cells: IndexMap<String, String>,
}

impl Row {
    /// Create an empty row.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: IndexMap::new(),
        }
    }

    /// Local part of the row id.
    pub fn local_id(&self) -> &str {
        ident::split_id(&self.id).0
    }

    /// Scope part of the row id.
    pub fn scope(&self) -> &str {
        ident::split_id(&self.id).1
    }

    /// Unresolved value of a cell.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Assign a cell; an existing column keeps its position.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A table: qualified row id to row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Qualified table id.
    pub id: String,
    /// Rows in insertion order.
    pub rows: IndexMap<String, Row>,
}

impl Table {
    /// Create an empty table.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            rows: IndexMap::new(),
        }
    }

    /// Local part of the table id.
    pub fn local_id(&self) -> &str {
        ident::split_id(&self.id).0
    }

    /// Scope part of the table id.
    pub fn scope(&self) -> &str {
        ident::split_id(&self.id).1
    }

    /// Get a row by qualified id.
    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.get(id)
    }

    /// Whether a row with this qualified id exists.
    pub fn contains_row(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    /// Get a row, creating it empty if absent.
    pub fn row_mut_or_create(&mut self, id: &str) -> &mut Row {
        self.rows
            .entry(id.to_string())
            .or_insert_with(|| Row::new(id))
    }

    /// Insert a row under its own id, replacing any row with that id.
    pub fn insert_row(&mut self, row: Row) {
        self.rows.insert(row.id.clone(), row);
    }

    /// Remove a row, keeping the order of the remaining rows.
    pub fn remove_row(&mut self, id: &str) -> Option<Row> {
        self.rows.shift_remove(id)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// An ingested Mork document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Format version from the header.
    pub version: String,
    /// Shared dictionary.
    pub dictionary: Dictionary,
    /// Tables in insertion order.
    pub tables: IndexMap<String, Table>,
    /// Dictionary scope in effect when ingestion finished.
    pub dict_scope: String,
    /// Escape character used to decode literals.
    pub escape: u8,
}

impl Default for Document {
    fn default() -> Self {
        Self::new("")
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            dictionary: Dictionary::new(),
            tables: IndexMap::new(),
            dict_scope: ATOM_SCOPE.to_string(),
            escape: DEFAULT_ESCAPE,
        }
    }

    /// Get a table by qualified id.
    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.get(id)
    }

    /// Get a mutable table by qualified id.
    pub fn table_mut(&mut self, id: &str) -> Option<&mut Table> {
        self.tables.get_mut(id)
    }

    /// Get a table, creating it if absent. Returns whether it was created.
    pub fn ensure_table(&mut self, id: &str) -> (&mut Table, bool) {
        let created = !self.tables.contains_key(id);
        let table = self
            .tables
            .entry(id.to_string())
            .or_insert_with(|| Table::new(id));
        (table, created)
    }

    /// First table, in insertion order, holding a row with this exact id.
    pub fn table_containing(&self, row_id: &str) -> Option<&str> {
        self.tables
            .values()
            .find(|table| table.contains_row(row_id))
            .map(|table| table.id.as_str())
    }

    /// Set a dictionary entry; later aliases overwrite earlier ones.
    pub fn set_alias(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.dictionary.insert(key.into(), value.into());
    }

    /// Total number of rows across all tables.
    pub fn row_count(&self) -> usize {
        self.tables.values().map(Table::len).sum()
    }

    /// Whether the document has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Row tests ====================

    #[test]
    fn test_row_ids() {
        let row = Row::new("1F:^80");
        assert_eq!(row.local_id(), "1F");
        assert_eq!(row.scope(), "^80");
        assert!(row.is_empty());
    }

    #[test]
    fn test_row_set_keeps_position() {
        let mut row = Row::new("1:c");
        row.set("a:c", "1");
        row.set("b:c", "2");
        row.set("a:c", "3");
        let cols: Vec<_> = row.cells.keys().cloned().collect();
        assert_eq!(cols, vec!["a:c", "b:c"]);
        assert_eq!(row.get("a:c"), Some("3"));
        assert_eq!(row.len(), 2);
    }

    // ==================== Table tests ====================

    #[test]
    fn test_table_remove_row_preserves_order() {
        let mut table = Table::new("1:^80");
        for id in ["1:^80", "2:^80", "3:^80"] {
            table.row_mut_or_create(id);
        }
        assert!(table.remove_row("2:^80").is_some());
        assert!(table.remove_row("2:^80").is_none());
        let ids: Vec<_> = table.rows.keys().cloned().collect();
        assert_eq!(ids, vec!["1:^80", "3:^80"]);
    }

    #[test]
    fn test_row_mut_or_create_is_idempotent() {
        let mut table = Table::new("1:c");
        table.row_mut_or_create("5:c").set("x:c", "y");
        table.row_mut_or_create("5:c");
        assert_eq!(table.len(), 1);
        assert_eq!(table.row("5:c").unwrap().get("x:c"), Some("y"));
    }

    // ==================== Document tests ====================

    #[test]
    fn test_document_defaults() {
        let doc = Document::new("1.4");
        assert_eq!(doc.version, "1.4");
        assert_eq!(doc.dict_scope, "a");
        assert_eq!(doc.escape, b'\\');
        assert!(doc.is_empty());
    }

    #[test]
    fn test_ensure_table() {
        let mut doc = Document::new("1.4");
        let (_, created) = doc.ensure_table("1:^80");
        assert!(created);
        let (_, created) = doc.ensure_table("1:^80");
        assert!(!created);
        assert_eq!(doc.tables.len(), 1);
    }

    #[test]
    fn test_table_containing_first_wins() {
        let mut doc = Document::new("1.4");
        doc.ensure_table("1:c").0.row_mut_or_create("7:c");
        doc.ensure_table("2:c").0.row_mut_or_create("7:c");
        assert_eq!(doc.table_containing("7:c"), Some("1:c"));
        assert_eq!(doc.table_containing("8:c"), None);
        assert_eq!(doc.row_count(), 2);
    }

    #[test]
    fn test_alias_last_write_wins() {
        let mut doc = Document::new("1.4");
        doc.set_alias("80:c", "Subject");
        doc.set_alias("80:c", "Sender");
        assert_eq!(doc.dictionary.len(), 1);
        assert_eq!(doc.dictionary["80:c"], "Sender");
    }
}

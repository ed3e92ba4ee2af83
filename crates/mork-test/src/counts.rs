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

//! Fixture counting utilities.
//!
//! Functions for counting rows, cells and references in ingested documents.

use mork_core::ident::is_reference;
use mork_core::Document;

/// Count rows across all tables.
pub fn count_rows(doc: &Document) -> usize {
    doc.tables.values().map(|table| table.len()).sum()
}

/// Count stored cells across all rows.
pub fn count_cells(doc: &Document) -> usize {
    doc.tables
        .values()
        .flat_map(|table| table.rows.values())
        .map(|row| row.len())
        .sum()
}

/// Count cells whose value is a dictionary reference.
pub fn count_references(doc: &Document) -> usize {
    doc.tables
        .values()
        .flat_map(|table| table.rows.values())
        .flat_map(|row| row.cells.values())
        .filter(|value| is_reference(value))
        .count()
}

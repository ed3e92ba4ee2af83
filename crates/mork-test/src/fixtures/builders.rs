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

//! Builder pattern for creating customizable Mork files.
//!
//! The builders emit Mork text, escaping literals the way Mork writers do,
//! so the result goes through the real tokenizer and parser.

use std::fmt::Write;

/// Escape a literal for use as a cell or alias value.
///
/// Delimiters are protected with a backslash; control bytes, non-ASCII
/// bytes and leading or trailing spaces become `$XX` hex escapes.
///
/// # Examples
///
/// ```
/// use mork_test::fixtures::builders::escape_value;
///
/// assert_eq!(escape_value("a)b"), r"a\)b");
/// assert_eq!(escape_value("café"), "caf$C3$A9");
/// assert_eq!(escape_value(" x "), "$20x$20");
/// ```
pub fn escape_value(value: &str) -> String {
    let bytes = value.as_bytes();
    let first = bytes.iter().position(|&b| b != b' ').unwrap_or(bytes.len());
    let last = bytes.iter().rposition(|&b| b != b' ').map_or(0, |p| p + 1);

    let mut out = String::with_capacity(value.len());
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b')' | b'\\' | b'$' => {
                out.push('\\');
                out.push(b as char);
            }
            b' ' if i >= first && i < last => out.push(' '),
            0x21..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "${:02X}", b);
            }
        }
    }
    out
}

/// Builder for a whole Mork file.
///
/// # Examples
///
/// ```
/// use mork_test::fixtures::builders::{MorkBuilder, RowBuilder, TableBuilder};
///
/// let text = MorkBuilder::new()
///     .columns([("80", "ns:addrbk:db:row:scope:card:all"), ("81", "FirstName")])
///     .atoms([("90", "Alice")])
///     .table(TableBuilder::new("1:^80").row(RowBuilder::new("1").reference("81", "90")))
///     .build();
///
/// let doc = mork_core::parse(text.as_bytes()).unwrap();
/// let row = doc.table("1:^80").unwrap().row("1:^80").unwrap();
/// assert_eq!(doc.lookup(row.get("^81:c").unwrap()), "Alice");
/// ```
#[derive(Debug, Clone)]
pub struct MorkBuilder {
    version: String,
    parts: Vec<String>,
}

impl Default for MorkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MorkBuilder {
    /// Creates a builder for a version 1.4 file.
    pub fn new() -> Self {
        Self {
            version: "1.4".to_string(),
            parts: Vec::new(),
        }
    }

    /// Sets the version written in the header.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Adds a `//` comment line.
    pub fn comment(mut self, text: &str) -> Self {
        self.parts.push(format!("// {}", text));
        self
    }

    /// Adds a dictionary in the column scope.
    pub fn columns<'a>(mut self, aliases: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.parts
            .push(format!("< <(a=c)> {}>", alias_cells(aliases)));
        self
    }

    /// Adds a dictionary in the default atom scope.
    pub fn atoms<'a>(mut self, aliases: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        self.parts.push(format!("<{}>", alias_cells(aliases)));
        self
    }

    /// Adds a table.
    pub fn table(mut self, table: TableBuilder) -> Self {
        self.parts.push(table.render());
        self
    }

    /// Adds a row outside any table.
    pub fn row(mut self, row: RowBuilder) -> Self {
        self.parts.push(row.render());
        self
    }

    /// Adds a transactional group.
    pub fn group(mut self, group: GroupBuilder) -> Self {
        self.parts.push(group.render());
        self
    }

    /// Adds text verbatim.
    pub fn raw(mut self, text: impl Into<String>) -> Self {
        self.parts.push(text.into());
        self
    }

    /// Builds the file text.
    pub fn build(self) -> String {
        let mut out = format!("// <!-- <mdb:mork:z v=\"{}\"/> -->\n", self.version);
        for part in self.parts {
            out.push_str(&part);
            out.push('\n');
        }
        out
    }

    /// Builds the file as bytes.
    pub fn build_bytes(self) -> Vec<u8> {
        self.build().into_bytes()
    }
}

fn alias_cells<'a>(aliases: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    aliases
        .into_iter()
        .map(|(key, value)| format!("({}={})", key, escape_value(value)))
        .collect()
}

/// Builder for a table.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    id: String,
    meta: Vec<(String, String)>,
    body: Vec<String>,
}

impl TableBuilder {
    /// Creates a table with the given id as written (`1:^80`, `A`).
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            meta: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Adds a metatable cell; `value` is written as is.
    pub fn meta(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.push((column.into(), value.into()));
        self
    }

    /// Adds a row.
    pub fn row(mut self, row: RowBuilder) -> Self {
        self.body.push(row.render());
        self
    }

    /// Attaches a row by bare id, moving it from another table.
    pub fn attach(mut self, id: impl Into<String>) -> Self {
        self.body.push(id.into());
        self
    }

    /// Detaches a row by bare `-id`.
    pub fn detach(mut self, id: &str) -> Self {
        self.body.push(format!("-{}", id));
        self
    }

    fn render(&self) -> String {
        let mut out = format!("{{{}", self.id);
        if !self.meta.is_empty() {
            out.push_str(" {");
            for (column, value) in &self.meta {
                let _ = write!(out, "({}={})", column, value);
            }
            out.push('}');
        }
        for item in &self.body {
            out.push_str("\n  ");
            out.push_str(item);
        }
        out.push('}');
        out
    }
}

/// Builder for a row.
#[derive(Debug, Clone)]
pub struct RowBuilder {
    id: String,
    cells: Vec<String>,
}

impl RowBuilder {
    /// Creates or updates the row with this id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: Vec::new(),
        }
    }

    /// Deletes the row with this id.
    pub fn deleted(id: &str) -> Self {
        Self::new(format!("-{}", id))
    }

    /// Adds a literal cell under a literal column name.
    pub fn cell(mut self, column: &str, value: &str) -> Self {
        self.cells
            .push(format!("({}={})", column, escape_value(value)));
        self
    }

    /// Adds a literal cell under a column alias (`^81`).
    pub fn field(mut self, column: &str, value: &str) -> Self {
        self.cells
            .push(format!("(^{}={})", column, escape_value(value)));
        self
    }

    /// Adds a cell whose column and value are both aliases (`^81^90`).
    pub fn reference(mut self, column: &str, atom: &str) -> Self {
        self.cells.push(format!("(^{}^{})", column, atom));
        self
    }

    fn render(&self) -> String {
        format!("[{}{}]", self.id, self.cells.concat())
    }
}

/// How a group ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupEnd {
    Commit,
    Abort,
    /// No end marker at all.
    Missing,
}

/// Builder for a transactional group.
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    id: String,
    end: GroupEnd,
    body: MorkBuilder,
}

impl GroupBuilder {
    /// Creates a committed group.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            end: GroupEnd::Commit,
            body: MorkBuilder::new(),
        }
    }

    /// Ends the group with an abort marker instead.
    pub fn aborted(mut self) -> Self {
        self.end = GroupEnd::Abort;
        self
    }

    /// Leaves the group without an end marker.
    pub fn unterminated(mut self) -> Self {
        self.end = GroupEnd::Missing;
        self
    }

    /// Sets the group body; its header is ignored.
    pub fn body(mut self, body: MorkBuilder) -> Self {
        self.body = body;
        self
    }

    fn render(&self) -> String {
        let mut out = format!("@$${{{}{{@\n", self.id);
        for part in &self.body.parts {
            out.push_str(part);
            out.push('\n');
        }
        match self.end {
            GroupEnd::Commit => {
                let _ = write!(out, "@$$}}{}}}@", self.id);
            }
            GroupEnd::Abort => {
                let _ = write!(out, "@$$}}~abort~{}}}@", self.id);
            }
            GroupEnd::Missing => {}
        }
        out
    }
}

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

//! Main parser for Mork files.
//!
//! A recursive-descent driver over [`Tokenizer`]: one routine per production
//! (comment, dict, metadict, alias, table, metatable, row, metarow, cell,
//! group), each handing the tokenizer its own candidate set.
//!
//! # Strict and lenient mode
//!
//! Header errors and stream failures always abort. Every other irregularity
//! (missing terminators, nested groups, orphaned rows) aborts in strict mode
//! and is reported through [`Diagnostics`] in lenient mode, after which the
//! parser recovers:
//!
//! - an unterminated construct is closed at end-of-stream
//! - a nested group implicitly aborts the enclosing one
//! - an orphaned row is consumed and dropped

use crate::codec::DEFAULT_ESCAPE;
use crate::diagnostics::{Diagnostics, Verbosity};
use crate::document::{Document, Row};
use crate::error::{MorkError, MorkResult};
use crate::errors::messages;
use crate::ident::{self, ATOM_SCOPE, COLUMN_SCOPE, DELETE_MARKER, REFERENCE_MARKER};
use crate::lex::{sets, Token, Tokenizer};
use std::fmt;
use std::io::{Cursor, Read, Seek};

/// The only Mork version this parser understands.
pub const SUPPORTED_VERSION: &str = "1.4";

const HEADER_COMMENT: &str = "//";
const HEADER_OPEN: &str = "<!-- <mdb:mork:z v=\"";
const HEADER_CLOSE: &str = "\"/> -->";

/// Metadict column that sets the dictionary scope.
const DICT_SCOPE_SETTING: &str = "a";

/// Parsing options for configuring Mork ingestion.
///
/// # Fields
///
/// - `escape`: Escape character for delimiters and line continuations
/// - `strict`: Abort on the first syntax irregularity
/// - `verbosity`: Level of progress reporting
///
/// # Examples
///
/// ```
/// use mork_core::{ParseOptions, Verbosity};
///
/// let opts = ParseOptions::builder()
///     .strict(true)
///     .verbosity(Verbosity::Info)
///     .build();
/// assert!(opts.strict);
/// assert_eq!(opts.escape, b'\\');
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Escape character.
    pub escape: u8,
    /// Strict syntax checking.
    pub strict: bool,
    /// Progress reporting level.
    pub verbosity: Verbosity,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            escape: DEFAULT_ESCAPE,
            strict: false,
            verbosity: Verbosity::Off,
        }
    }
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for ergonomic construction of ParseOptions.
#[derive(Debug, Clone)]
pub struct ParseOptionsBuilder {
    options: ParseOptions,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ParseOptions::default(),
        }
    }

    /// Set the escape character (default: backslash).
    pub fn escape(mut self, escape: u8) -> Self {
        self.options.escape = escape;
        self
    }

    /// Enable or disable strict mode (default: lenient).
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Set the reporting level (default: off).
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.options.verbosity = verbosity;
        self
    }

    /// Build the ParseOptions.
    pub fn build(self) -> ParseOptions {
        self.options
    }
}

impl Default for ParseOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a Mork file held in memory.
pub fn parse(input: &[u8]) -> MorkResult<Document> {
    parse_with_options(input, ParseOptions::default())
}

/// Parse a Mork file held in memory with custom options.
pub fn parse_with_options(input: &[u8], options: ParseOptions) -> MorkResult<Document> {
    parse_reader(Cursor::new(input), options)
}

/// Parse a Mork file from an open, seekable stream.
///
/// Groups are read twice (scan, then replay), so the stream must support
/// absolute seeks; nothing beyond the tokenizer's read buffer is held in
/// memory besides the document itself.
pub fn parse_reader<R: Read + Seek>(reader: R, options: ParseOptions) -> MorkResult<Document> {
    Parser::new(reader, &options).run()
}

/// Constructs that need a closing marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Construct {
    Dict,
    Metadict,
    Table,
    Metatable,
    Row,
    Metarow,
    Group,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dict => "DICT",
            Self::Metadict => "METADICT",
            Self::Table => "TABLE",
            Self::Metatable => "METATABLE",
            Self::Row => "ROW",
            Self::Metarow => "METAROW",
            Self::Group => "GROUP",
        };
        f.write_str(name)
    }
}

/// Ambient scope state carried through the productions.
#[derive(Debug, Clone)]
pub(crate) struct ScopeContext {
    /// Scope appended to unqualified dictionary keys.
    pub(crate) dict: String,
}

impl Default for ScopeContext {
    fn default() -> Self {
        Self {
            dict: ATOM_SCOPE.to_string(),
        }
    }
}

/// The table a row production runs in.
#[derive(Debug, Clone)]
pub(crate) struct TableContext {
    id: String,
    scope: String,
}

impl TableContext {
    fn new(id: String) -> Self {
        let scope = ident::split_id(&id).1.to_string();
        Self { id, scope }
    }
}

/// Where a row production applies its mutations.
#[derive(Debug)]
struct RowTarget {
    id: String,
    is_create: bool,
    owner: Option<String>,
}

pub(crate) struct Parser<R> {
    pub(crate) tok: Tokenizer<R>,
    pub(crate) doc: Document,
    pub(crate) diag: Diagnostics,
    pub(crate) scope: ScopeContext,
    strict: bool,
}

impl<R: Read + Seek> Parser<R> {
    pub(crate) fn new(reader: R, options: &ParseOptions) -> Self {
        let mut doc = Document::default();
        doc.escape = options.escape;
        Self {
            tok: Tokenizer::with_escape(reader, options.escape),
            doc,
            diag: Diagnostics::new(options.verbosity),
            scope: ScopeContext::default(),
            strict: options.strict,
        }
    }

    fn run(mut self) -> MorkResult<Document> {
        self.parse_header()?;

        while let Some(scanned) = self.tok.read_until(sets::TOP_LEVEL)? {
            match scanned.token {
                Token::Comment => self.parse_comment()?,
                Token::GroupStart => {
                    self.parse_group()?;
                }
                Token::DictOpen => self.parse_dict()?,
                Token::TableOpen => self.parse_table()?,
                Token::RowOpen => self.parse_row(None)?,
                _ => {}
            }
        }
        self.diag.verbose(format_args!("Found EOF"));

        self.doc.dict_scope = self.scope.dict;
        Ok(self.doc)
    }

    // ==================== Error gate ====================

    /// Fail in strict mode, report and carry on otherwise.
    pub(crate) fn irregular(&self, err: MorkError) -> MorkResult<()> {
        if self.strict || err.kind.is_always_fatal() {
            return Err(err);
        }
        self.diag.info(format_args!("{}", err));
        Ok(())
    }

    pub(crate) fn unterminated(&self, construct: Construct) -> MorkResult<()> {
        self.irregular(messages::missing_terminator(construct, self.tok.line()))
    }

    // ==================== Header and comments ====================

    fn parse_header(&mut self) -> MorkResult<()> {
        let line = self.tok.line();
        // a header-only file may lack the final newline
        let header = match self.tok.read_until(sets::LINE_END)? {
            Some(scanned) => scanned.text,
            None => self.tok.unterminated_text(),
        };

        let version =
            header_version(&header).ok_or_else(|| messages::incorrect_header(&header, line))?;
        if version != SUPPORTED_VERSION {
            return Err(messages::wrong_version(version, SUPPORTED_VERSION, line));
        }

        self.diag
            .info(format_args!("Detected Mork version {}", version));
        self.doc.version = version.to_string();
        Ok(())
    }

    pub(crate) fn parse_comment(&mut self) -> MorkResult<()> {
        let text = self
            .tok
            .read_until(sets::LINE_END)?
            .map(|scanned| scanned.text)
            .unwrap_or_default();
        self.diag.info(format_args!("Comment: {}", text));
        Ok(())
    }

    // ==================== Cells ====================

    /// Read `column=value` or `column^value` up to the closing `)`.
    ///
    /// Either side may carry the reference marker. Returns `None` at
    /// end-of-stream; the enclosing construct reports the truncation.
    pub(crate) fn parse_cell(&mut self) -> MorkResult<Option<(String, String)>> {
        let Some(first) = self.tok.read_until(sets::CELL_COLUMN)? else {
            return Ok(None);
        };

        let (column, separator) = if first.text.is_empty() && first.token == Token::Reference {
            let Some(second) = self.tok.read_until(sets::CELL_COLUMN)? else {
                return Ok(None);
            };
            (format!("{}{}", REFERENCE_MARKER, second.text), second.token)
        } else {
            (first.text, first.token)
        };

        let Some(value) = self.tok.read_until(sets::CELL_VALUE)? else {
            return Ok(None);
        };
        let value = if separator == Token::Reference {
            format!("{}{}", REFERENCE_MARKER, value.text)
        } else {
            value.text
        };

        Ok(Some((column, value)))
    }

    /// Apply a metadict setting; only the dictionary scope is understood.
    pub(crate) fn apply_dict_setting(&mut self, column: &str, value: String) {
        if column == DICT_SCOPE_SETTING {
            self.diag
                .verbose(format_args!("Dictionary scope set to {}", value));
            self.scope.dict = value;
        } else {
            self.diag.warn(format_args!(
                "Unhandled METADICT setting {} => {}",
                column, value
            ));
        }
    }

    // ==================== Dictionaries ====================

    pub(crate) fn parse_dict(&mut self) -> MorkResult<()> {
        self.diag.verbose(format_args!("Found DICT"));
        loop {
            match self.tok.read_until(sets::DICT)? {
                Some(scanned) => match scanned.token {
                    Token::DictOpen => self.parse_metadict()?,
                    Token::CellOpen => self.parse_alias()?,
                    Token::Comment => self.parse_comment()?,
                    Token::DictClose => break,
                    _ => {}
                },
                None => {
                    self.unterminated(Construct::Dict)?;
                    break;
                }
            }
        }
        self.scope.dict = ATOM_SCOPE.to_string();
        self.diag.verbose(format_args!("Closing DICT"));
        Ok(())
    }

    fn parse_metadict(&mut self) -> MorkResult<()> {
        loop {
            match self.tok.read_until(sets::METADICT)? {
                Some(scanned) if scanned.token == Token::CellOpen => {
                    if let Some((column, value)) = self.parse_cell()? {
                        self.apply_dict_setting(&column, value);
                    }
                }
                Some(_) => return Ok(()),
                None => return self.unterminated(Construct::Metadict),
            }
        }
    }

    fn parse_alias(&mut self) -> MorkResult<()> {
        let Some(key) = self.tok.read_until(sets::ALIAS_KEY)? else {
            return Ok(());
        };
        let Some(value) = self.tok.read_until(sets::CELL_VALUE)? else {
            return Ok(());
        };

        let key = ident::qualify(&key.text, &self.scope.dict);
        self.diag
            .verbose(format_args!("Alias {} set to {}", key, value.text));
        self.doc.set_alias(key, value.text);
        Ok(())
    }

    // ==================== Tables ====================

    pub(crate) fn parse_table(&mut self) -> MorkResult<()> {
        let Some(first) = self.tok.read_until(sets::HEX)? else {
            return self.unterminated(Construct::Table);
        };
        let Some(rest) = self.tok.read_until(sets::ID_END)? else {
            return self.unterminated(Construct::Table);
        };

        let raw = format!("{}{}", first.lexeme, rest.text);
        let id = ident::normalize(&raw, COLUMN_SCOPE).id;
        if self.doc.ensure_table(&id).1 {
            self.diag
                .verbose(format_args!("Creating new table with id {}", id));
        }
        let table = TableContext::new(id);

        let mut pending = significant(&rest.token);
        loop {
            let (token, lexeme) = match pending.take() {
                Some(token) => (token, String::new()),
                None => match self.tok.read_until(sets::TABLE)? {
                    Some(scanned) => (scanned.token, scanned.lexeme),
                    None => {
                        self.unterminated(Construct::Table)?;
                        break;
                    }
                },
            };

            match token {
                Token::DictOpen => self.parse_dict()?,
                Token::TableOpen => self.parse_metatable()?,
                Token::RowOpen => self.parse_row(Some(&table))?,
                Token::TableClose => break,
                Token::HexDigit | Token::Minus => {
                    pending = self.parse_row_reference(&table, &lexeme)?;
                }
                _ => {}
            }
        }

        self.diag
            .verbose(format_args!("Closing TABLE with id {}", table.id));
        Ok(())
    }

    fn parse_metatable(&mut self) -> MorkResult<()> {
        loop {
            match self.tok.read_until(sets::METATABLE)? {
                Some(scanned) if scanned.token == Token::CellOpen => {
                    if let Some((column, value)) = self.parse_cell()? {
                        self.diag
                            .verbose(format_args!("Metatable setting {} is {}", column, value));
                    }
                }
                Some(_) => return Ok(()),
                None => return self.unterminated(Construct::Metatable),
            }
        }
    }

    /// A bare row id inside a table body.
    ///
    /// `id` attaches the row to this table, moving it from whichever table
    /// held it; `-id` detaches it. Returns the terminator when it opens or
    /// closes a construct.
    fn parse_row_reference(
        &mut self,
        table: &TableContext,
        lexeme: &str,
    ) -> MorkResult<Option<Token>> {
        let Some(rest) = self.tok.read_until(sets::ID_END)? else {
            return Ok(None);
        };
        let pending = significant(&rest.token);

        let raw = format!("{}{}", lexeme, rest.text);
        if raw.strip_prefix(DELETE_MARKER).unwrap_or(&raw).is_empty() {
            return Ok(pending);
        }

        let target = ident::normalize(&raw, &table.scope);
        if target.is_create {
            self.adopt_row(&table.id, &target.id);
        } else if let Some(owner) = self.doc.table_mut(&table.id) {
            if owner.remove_row(&target.id).is_some() {
                self.diag
                    .verbose(format_args!("Detached row {} from {}", target.id, table.id));
            }
        }
        Ok(pending)
    }

    fn adopt_row(&mut self, table_id: &str, row_id: &str) {
        if self
            .doc
            .table(table_id)
            .is_some_and(|table| table.contains_row(row_id))
        {
            return;
        }

        let moved = self
            .doc
            .tables
            .values_mut()
            .find(|table| table.id != table_id && table.contains_row(row_id))
            .and_then(|table| table.remove_row(row_id));
        if moved.is_some() {
            self.diag
                .verbose(format_args!("Moving row {} to {}", row_id, table_id));
        }

        if let Some(table) = self.doc.table_mut(table_id) {
            table.insert_row(moved.unwrap_or_else(|| Row::new(row_id)));
        }
    }

    // ==================== Rows ====================

    pub(crate) fn parse_row(&mut self, table: Option<&TableContext>) -> MorkResult<()> {
        let Some(scanned) = self.tok.read_until(sets::ROW)? else {
            return self.unterminated(Construct::Row);
        };

        let target = self.locate_row(&scanned.text, table);
        match &target.owner {
            Some(owner) => self.apply_row_operation(owner, &target),
            None if target.id.is_empty() => {
                self.diag.verbose(format_args!("Ignoring ROW without id"));
            }
            None if !target.is_create => {
                self.diag.verbose(format_args!(
                    "Row {} not found, nothing to delete",
                    target.id
                ));
            }
            None => {
                self.diag.warn(format_args!(
                    "Row id {} does not belong to any table",
                    target.id
                ));
                self.irregular(messages::orphaned_row(&target.id, self.tok.line()))?;
            }
        }

        let mut token = scanned.token;
        loop {
            match token {
                Token::RowOpen => self.parse_metarow()?,
                Token::CellOpen => {
                    if let Some((column, value)) = self.parse_cell()? {
                        self.assign_cell(&target, column, value);
                    }
                }
                Token::RowClose => break,
                _ => {}
            }

            token = match self.tok.read_until(sets::ROW)? {
                Some(next) => next.token,
                None => {
                    self.unterminated(Construct::Row)?;
                    break;
                }
            };
        }

        self.diag.verbose(format_args!("Closing ROW {}", target.id));
        Ok(())
    }

    /// Resolve the row id and the table it lives in.
    ///
    /// Inside a table the id takes the table's scope. Outside, a qualified
    /// id is looked up verbatim and an unqualified one is tried against
    /// each table's scope; the first table holding it wins.
    fn locate_row(&self, raw: &str, table: Option<&TableContext>) -> RowTarget {
        let is_create = !raw.starts_with(DELETE_MARKER);
        let local = raw.strip_prefix(DELETE_MARKER).unwrap_or(raw);

        if local.is_empty() {
            return RowTarget {
                id: String::new(),
                is_create,
                owner: None,
            };
        }

        if let Some(table) = table {
            return RowTarget {
                id: ident::qualify(local, &table.scope),
                is_create,
                owner: Some(table.id.clone()),
            };
        }

        let found = if ident::is_qualified(local) {
            self.doc
                .table_containing(local)
                .map(|owner| (local.to_string(), owner.to_string()))
        } else {
            self.doc.tables.values().find_map(|candidate| {
                let id = ident::qualify(local, candidate.scope());
                candidate
                    .contains_row(&id)
                    .then(|| (id, candidate.id.clone()))
            })
        };

        match found {
            Some((id, owner)) => RowTarget {
                id,
                is_create,
                owner: Some(owner),
            },
            None => RowTarget {
                id: local.to_string(),
                is_create,
                owner: None,
            },
        }
    }

    fn apply_row_operation(&mut self, owner: &str, target: &RowTarget) {
        let Some(table) = self.doc.table_mut(owner) else {
            return;
        };

        if target.is_create {
            if !table.contains_row(&target.id) {
                table.row_mut_or_create(&target.id);
                self.diag
                    .verbose(format_args!("Creating row with id {}", target.id));
            }
        } else if table.remove_row(&target.id).is_some() {
            self.diag
                .verbose(format_args!("Deleting row {}", target.id));
        }
    }

    fn assign_cell(&mut self, target: &RowTarget, column: String, value: String) {
        if value.is_empty() {
            return;
        }

        let column = ident::normalize(&column, COLUMN_SCOPE).id;
        let value = if ident::is_reference(&value) {
            ident::qualify(&value, ATOM_SCOPE)
        } else {
            value
        };

        let Some(table) = target
            .owner
            .as_deref()
            .and_then(|owner| self.doc.table_mut(owner))
        else {
            return;
        };
        self.diag
            .verbose(format_args!("Setting {} to {}", column, value));
        table.row_mut_or_create(&target.id).set(column, value);
    }

    fn parse_metarow(&mut self) -> MorkResult<()> {
        loop {
            match self.tok.read_until(sets::METAROW)? {
                Some(scanned) if scanned.token == Token::CellOpen => {
                    if let Some((column, value)) = self.parse_cell()? {
                        self.diag
                            .verbose(format_args!("Metarow setting {} is {}", column, value));
                    }
                }
                Some(_) => return Ok(()),
                None => return self.unterminated(Construct::Metarow),
            }
        }
    }
}

/// Extract the version from a header line.
fn header_version(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(HEADER_COMMENT)?.trim_start();
    let rest = rest.strip_prefix(HEADER_OPEN)?;
    let end = rest.rfind(HEADER_CLOSE)?;
    Some(&rest[..end])
}

/// Id terminators that open or close a construct of the table body.
fn significant(token: &Token) -> Option<Token> {
    match token {
        Token::TableOpen | Token::RowOpen | Token::TableClose => Some(token.clone()),
        _ => None,
    }
}

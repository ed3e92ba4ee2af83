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

//! Core ingestion engine for Mork database files.
//!
//! Mork is the journal-style flat-file format of Mozilla's legacy address
//! books and mail summaries: a snapshot of dictionaries and tables followed
//! by an append-only log of transactional groups. This crate reads a whole
//! file into a [`Document`] of tables, rows and cells, resolvable through
//! the shared dictionary.
//!
//! # Lexical Analysis
//!
//! The [`lex`] module provides the escape-aware, rewindable tokenizer the
//! parser is built on. See its documentation for details.
//!
//! # Examples
//!
//! ```
//! use mork_core::parse;
//!
//! let input = b"// <!-- <mdb:mork:z v=\"1.4\"/> -->
//! < <(a=c)> (80=ns:msg:db:row:scope:msgs:all)(81=subject)>
//! {1:^80 {(k^82:c)(s=9)} [1(^81=Hello)]}
//! @$${2{@[1(^81=Hello again)]@$$}2}@
//! ";
//!
//! let doc = parse(input).unwrap();
//! let table = doc.table("1:^80").unwrap();
//! let row = table.row("1:^80").unwrap();
//! assert_eq!(doc.lookup("^81:c"), "subject");
//! assert_eq!(doc.lookup(row.get("^81:c").unwrap()), "Hello again");
//! ```

pub mod codec;
mod diagnostics;
mod document;
mod error;
pub mod errors;
mod group;
pub mod ident;
pub mod lex;
mod parser;
mod resolve;
pub mod traverse;

pub use diagnostics::{Diagnostics, Verbosity};
pub use document::{Dictionary, Document, Row, Table};
pub use error::{MorkError, MorkErrorKind, MorkResult};
pub use parser::{
    parse, parse_reader, parse_with_options, ParseOptions, ParseOptionsBuilder, SUPPORTED_VERSION,
};
pub use resolve::MISSING_ENTRY;
pub use traverse::{
    summarize, traverse, DocumentVisitor, StatsCollector, Summary, TableSummary, ViewOptions,
    VisitorContext,
};

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

//! Lexical analysis for Mork files.
//!
//! # Module Structure
//!
//! - [`tokens`] - Boundary tokens and the per-production candidate sets
//! - [`reader`] - Escape-aware, rewindable byte tokenizer
//!
//! # Examples
//!
//! ```
//! use mork_core::lex::{sets, Token, Tokenizer};
//! use std::io::Cursor;
//!
//! let mut tok = Tokenizer::new(Cursor::new("(80=Subject)"));
//! let open = tok.read_until(sets::DICT).unwrap().unwrap();
//! assert_eq!(open.token, Token::CellOpen);
//!
//! let key = tok.read_until(sets::ALIAS_KEY).unwrap().unwrap();
//! assert_eq!(key.text, "80");
//! ```

pub mod reader;
pub mod tokens;

pub use reader::{Mark, Scanned, Tokenizer};
pub use tokens::{sets, GroupMarker, Token};

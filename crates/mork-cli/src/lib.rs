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

//! Mork CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **summary**: tables with their scopes, row counts per scope and field
//!   names, then every scope found
//! - **csv**: one line per row; table id, row id and every field, all
//!   double-quoted (`--delimiter semicolon|comma|colon|tab`)
//! - **json**: object of tables, each an object of rows keyed by decimal
//!   row id (`--pretty`)
//!
//! Global options (`--strict`, `-v`/`-vv`, `--table`, `--no-filter`,
//! `--include-scope`, `--escape`) configure ingestion and which rows the
//! projections see.
//!
//! # Examples
//!
//! ```no_run
//! use mork_cli::cli::GlobalArgs;
//! use mork_cli::commands::summary;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), mork_cli::error::CliError> {
//! summary(Path::new("abook.mab"), &GlobalArgs::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All commands return `Result<(), CliError>`. Errors name the file and,
//! for ingestion failures, the line where the irregularity was found.

pub mod cli;
pub mod commands;
pub mod error;

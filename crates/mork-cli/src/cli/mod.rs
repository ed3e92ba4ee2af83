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

//! CLI command definitions and argument parsing.
//!
//! Global options configure ingestion and the row view and are accepted
//! before or after the subcommand:
//!
//! ```text
//! mork [-s] [-v|-vv] [-t ID] [-n] [-P] [--escape C] <summary|csv|json> FILE
//! ```

use crate::commands;
use crate::error::CliError;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use mork_core::traverse::ViewOptions;
use mork_core::{ParseOptions, Verbosity};
use std::path::PathBuf;

/// Mork - reader for Mozilla Mork database files
///
/// Ingests a Mork file (address books, mail summaries, history) and
/// prints a summary of its tables, or exports the rows as CSV or JSON.
#[derive(Parser, Debug)]
#[command(name = "mork")]
#[command(
    author,
    version,
    about = "Mork - reader for Mozilla Mork database files",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Run the selected command.
    pub fn run(self) -> Result<(), CliError> {
        self.command.execute(&self.global)
    }
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Stop at unexpected EOF, nested groups and orphaned rows
    #[arg(short, long, global = true)]
    pub strict: bool,

    /// Report progress on stderr (-v), or trace every production (-vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only export the table with this id (as written in the file)
    #[arg(short, long, value_name = "ID", global = true)]
    pub table: Option<String>,

    /// Export rows of every scope, not only the table's own
    #[arg(short = 'n', long, global = true)]
    pub no_filter: bool,

    /// Print scope names with table and row ids
    #[arg(short = 'P', long, global = true)]
    pub include_scope: bool,

    /// Escape character used in values
    #[arg(long, value_name = "CHAR", default_value_t = '\\', global = true)]
    pub escape: char,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self {
            strict: false,
            verbose: 0,
            table: None,
            no_filter: false,
            include_scope: false,
            escape: '\\',
        }
    }
}

impl GlobalArgs {
    /// Diagnostic level implied by `-v`.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_count(self.verbose)
    }

    /// Ingestion options.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the escape character is not a single-byte ASCII character.
    pub fn parse_options(&self) -> Result<ParseOptions, CliError> {
        let escape = u8::try_from(self.escape)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                CliError::invalid_input(format!(
                    "escape character '{}' is not ASCII",
                    self.escape
                ))
            })?;

        Ok(ParseOptions::builder()
            .strict(self.strict)
            .escape(escape)
            .verbosity(self.verbosity())
            .build())
    }

    /// Which tables and rows the projections see.
    pub fn view_options(&self) -> ViewOptions {
        let view = ViewOptions::default()
            .with_filter_scope(!self.no_filter)
            .with_include_scope(self.include_scope);
        match &self.table {
            Some(table) => view.with_table(table.clone()),
            None => view,
        }
    }
}

/// CSV field delimiter.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// `;`
    #[default]
    Semicolon,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// Horizontal tab
    Tab,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Semicolon => b';',
            Self::Comma => b',',
            Self::Colon => b':',
            Self::Tab => b'\t',
        }
    }
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print tables, row counts per scope, field names and scopes
    ///
    /// A useful starting point for deciding which table to export.
    Summary {
        /// Input Mork file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Export rows as CSV, one line per row, every field double-quoted
    Csv {
        /// Input Mork file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Field delimiter
        #[arg(short, long, value_enum, default_value_t = Delimiter::Semicolon)]
        delimiter: Delimiter,
    },

    /// Export rows as JSON keyed by table id and row id
    Json {
        /// Input Mork file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Pretty-print with indentation
        #[arg(short, long)]
        pretty: bool,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be opened, ingestion fails, or the
    /// output cannot be written.
    pub fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        match self {
            Commands::Summary { file } => commands::summary(&file, global),
            Commands::Csv { file, delimiter } => commands::csv(&file, delimiter, global),
            Commands::Json { file, pretty } => commands::json(&file, pretty, global),
        }
    }
}

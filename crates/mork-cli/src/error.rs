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

//! Structured error types for the Mork CLI.
//!
//! All commands return `Result<T, CliError>`; `main` prints the error and
//! exits with a failure status.

use mork_core::MorkError;
use mork_csv::CsvError;
use mork_json::JsonError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Mork CLI operations.
///
/// # Examples
///
/// ```rust,no_run
/// use mork_cli::error::CliError;
///
/// fn open(path: &str) -> Result<std::fs::File, CliError> {
///     std::fs::File::open(path).map_err(|e| CliError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// Opening or reading the input file failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The Mork file could not be ingested.
    #[error("Parse error in '{path}': {source}")]
    Parse {
        /// The file being parsed
        path: PathBuf,
        /// The ingestion error
        #[source]
        source: MorkError,
    },

    #[error("CSV conversion error: {0}")]
    CsvConversion(String),

    #[error("JSON conversion error: {0}")]
    JsonConversion(String),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a parse error for `path`.
    pub fn parse(path: impl Into<PathBuf>, source: MorkError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid input error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mork_cli::error::CliError;
    ///
    /// let err = CliError::invalid_input("escape must be a single ASCII character");
    /// assert!(err.to_string().starts_with("Invalid input"));
    /// ```
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

impl From<CsvError> for CliError {
    fn from(source: CsvError) -> Self {
        Self::CsvConversion(source.to_string())
    }
}

impl From<JsonError> for CliError {
    fn from(source: JsonError) -> Self {
        Self::JsonConversion(source.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        Self::Output(source.to_string())
    }
}

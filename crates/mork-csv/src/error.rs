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

//! Error types for CSV conversion operations.

use thiserror::Error;

/// CSV conversion error types.
///
/// # Examples
///
/// ```
/// use mork_csv::CsvError;
///
/// let err = CsvError::InvalidUtf8 {
///     context: "CSV output".to_string(),
/// };
/// assert_eq!(err.to_string(), "Invalid UTF-8 in CSV output");
/// ```
#[derive(Debug, Error)]
pub enum CsvError {
    /// I/O error during CSV writing.
    ///
    /// # Examples
    ///
    /// ```
    /// use mork_csv::CsvError;
    /// use std::io;
    ///
    /// let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
    /// let csv_err = CsvError::from(io_err);
    /// assert!(csv_err.to_string().starts_with("I/O error"));
    /// ```
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from underlying CSV library.
    #[error("CSV library error: {0}")]
    CsvLib(#[from] csv::Error),

    /// Writing a record failed.
    #[error("Failed to write CSV record for row '{row}': {message}")]
    Record {
        /// Qualified id of the row, or `header`.
        row: String,
        /// Detailed error message.
        message: String,
    },

    /// Output was not valid UTF-8.
    #[error("Invalid UTF-8 in {context}")]
    InvalidUtf8 {
        /// What was being produced.
        context: String,
    },
}

/// Result type for CSV operations.
pub type Result<T> = std::result::Result<T, CsvError>;

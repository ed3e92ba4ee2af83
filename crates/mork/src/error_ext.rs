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

//! Error context helpers.
//!
//! Extension methods for annotating errors with context as they propagate,
//! so a failure deep in ingestion can say which file or record it was
//! processing.
//!
//! ```rust
//! use mork::{parse, MorkResultExt};
//!
//! fn load(name: &str, content: &[u8]) -> Result<mork::Document, mork::MorkError> {
//!     parse(content).with_context(|| format!("while loading {}", name))
//! }
//!
//! let err = load("abook.mab", b"garbage").unwrap_err();
//! assert_eq!(err.context.as_deref(), Some("while loading abook.mab"));
//! ```

use crate::MorkError;
use std::fmt;

/// Extension trait for adding context to fallible results.
///
/// Context is stored in the error's `context` field; the message is left
/// untouched. Repeated context is prepended: `"outer; inner"`.
pub trait MorkResultExt<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T, MorkError>
    where
        C: fmt::Display;

    /// Add lazily computed context to an error.
    ///
    /// The closure only runs on the error path.
    fn with_context<C, F>(self, f: F) -> Result<T, MorkError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T> MorkResultExt<T> for Result<T, MorkError> {
    fn context<C>(self, context: C) -> Result<T, MorkError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| add_context_to_error(e, context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, MorkError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| add_context_to_error(e, f().to_string()))
    }
}

/// I/O failures become [`MorkErrorKind::Io`](crate::MorkErrorKind::Io) at line 0.
impl<T> MorkResultExt<T> for Result<T, std::io::Error> {
    fn context<C>(self, context: C) -> Result<T, MorkError>
    where
        C: fmt::Display,
    {
        self.map_err(|e| MorkError::io(e.to_string(), 0).with_context(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, MorkError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| MorkError::io(e.to_string(), 0).with_context(f().to_string()))
    }
}

fn add_context_to_error(mut error: MorkError, new_context: String) -> MorkError {
    if new_context.is_empty() {
        return error;
    }

    error.context = Some(match error.context {
        Some(existing) => format!("{}; {}", new_context, existing),
        None => new_context,
    });
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MorkErrorKind;
    use std::io;

    #[test]
    fn test_context_on_error() {
        let result: Result<(), MorkError> =
            Err(MorkError::unterminated("missing ROW terminator", 5));
        let err = result.context("in table 1").unwrap_err();
        assert_eq!(err.context.as_deref(), Some("in table 1"));
        assert_eq!(err.message, "missing ROW terminator");
        assert_eq!(err.line, 5);
    }

    #[test]
    fn test_context_on_ok() {
        let result: Result<i32, MorkError> = Ok(42);
        assert_eq!(result.context("unused").unwrap(), 42);
    }

    #[test]
    fn test_context_chaining() {
        let result: Result<(), MorkError> = Err(
            MorkError::nested_group("group start inside group", 10).with_context("in group 2A"),
        );
        let err = result.context("while parsing panacea.dat").unwrap_err();
        assert_eq!(
            err.context.as_deref(),
            Some("while parsing panacea.dat; in group 2A")
        );
        assert_eq!(err.kind, MorkErrorKind::NestedGroupDisallowed);
    }

    #[test]
    fn test_context_empty_string() {
        let result: Result<(), MorkError> = Err(MorkError::orphaned_row("row 5", 1));
        let err = result.context("").unwrap_err();
        assert!(err.context.is_none());
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut evaluated = false;
        let result: Result<i32, MorkError> = Ok(42);
        let value = result
            .with_context(|| {
                evaluated = true;
                "never"
            })
            .unwrap();
        assert_eq!(value, 42);
        assert!(!evaluated);
    }

    #[test]
    fn test_io_error_conversion() {
        let result: Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        let err = result.context("opening abook.mab").unwrap_err();
        assert_eq!(err.kind, MorkErrorKind::Io);
        assert_eq!(err.message, "no such file");
        assert_eq!(err.context.as_deref(), Some("opening abook.mab"));
    }
}

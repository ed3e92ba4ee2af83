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

//! Error types for Mork ingestion.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorkErrorKind {
    /// First line is not a Mork header.
    MalformedHeader,
    /// Header carries a version this engine does not understand.
    UnsupportedVersion,
    /// Dict, table, row, metarow, metatable or group without its closing marker.
    UnterminatedConstruct,
    /// Group start found while scanning another group.
    NestedGroupDisallowed,
    /// Row found outside any table, with no table known to contain it.
    OrphanedRow,
    /// Reading or seeking the underlying stream failed.
    Io,
}

impl MorkErrorKind {
    /// Whether this kind aborts ingestion even in lenient mode.
    pub fn is_always_fatal(self) -> bool {
        matches!(self, Self::MalformedHeader | Self::UnsupportedVersion | Self::Io)
    }
}

impl fmt::Display for MorkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHeader => write!(f, "MalformedHeader"),
            Self::UnsupportedVersion => write!(f, "UnsupportedVersion"),
            Self::UnterminatedConstruct => write!(f, "UnterminatedConstruct"),
            Self::NestedGroupDisallowed => write!(f, "NestedGroupDisallowed"),
            Self::OrphanedRow => write!(f, "OrphanedRow"),
            Self::Io => write!(f, "IOError"),
        }
    }
}

/// An error that occurred during Mork ingestion.
#[derive(Debug, Clone, Error)]
#[error("{kind} at line {line}: {message}")]
pub struct MorkError {
    /// The kind of error.
    pub kind: MorkErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based) of the tokenizer when the error was raised.
    pub line: usize,
    /// Additional context (e.g., "in group 2A").
    pub context: Option<String>,
}

impl MorkError {
    /// Create a new error.
    pub fn new(kind: MorkErrorKind, message: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            message: message.into(),
            line,
            context: None,
        }
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Convenience constructors for each error kind
    pub fn malformed_header(message: impl Into<String>, line: usize) -> Self {
        Self::new(MorkErrorKind::MalformedHeader, message, line)
    }

    pub fn unsupported_version(message: impl Into<String>, line: usize) -> Self {
        Self::new(MorkErrorKind::UnsupportedVersion, message, line)
    }

    pub fn unterminated(message: impl Into<String>, line: usize) -> Self {
        Self::new(MorkErrorKind::UnterminatedConstruct, message, line)
    }

    pub fn nested_group(message: impl Into<String>, line: usize) -> Self {
        Self::new(MorkErrorKind::NestedGroupDisallowed, message, line)
    }

    pub fn orphaned_row(message: impl Into<String>, line: usize) -> Self {
        Self::new(MorkErrorKind::OrphanedRow, message, line)
    }

    pub fn io(message: impl Into<String>, line: usize) -> Self {
        Self::new(MorkErrorKind::Io, message, line)
    }
}

/// Result type for Mork operations.
pub type MorkResult<T> = Result<T, MorkError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== MorkErrorKind Display tests ====================

    #[test]
    fn test_error_kind_display() {
        assert_eq!(MorkErrorKind::MalformedHeader.to_string(), "MalformedHeader");
        assert_eq!(MorkErrorKind::UnsupportedVersion.to_string(), "UnsupportedVersion");
        assert_eq!(
            MorkErrorKind::UnterminatedConstruct.to_string(),
            "UnterminatedConstruct"
        );
        assert_eq!(
            MorkErrorKind::NestedGroupDisallowed.to_string(),
            "NestedGroupDisallowed"
        );
        assert_eq!(MorkErrorKind::OrphanedRow.to_string(), "OrphanedRow");
        assert_eq!(MorkErrorKind::Io.to_string(), "IOError");
    }

    // ==================== Fatality tests ====================

    #[test]
    fn test_header_errors_always_fatal() {
        assert!(MorkErrorKind::MalformedHeader.is_always_fatal());
        assert!(MorkErrorKind::UnsupportedVersion.is_always_fatal());
        assert!(MorkErrorKind::Io.is_always_fatal());
    }

    #[test]
    fn test_structural_errors_gated_by_strict_mode() {
        assert!(!MorkErrorKind::UnterminatedConstruct.is_always_fatal());
        assert!(!MorkErrorKind::NestedGroupDisallowed.is_always_fatal());
        assert!(!MorkErrorKind::OrphanedRow.is_always_fatal());
    }

    // ==================== MorkError Display tests ====================

    #[test]
    fn test_error_display() {
        let err = MorkError::unterminated("missing TABLE terminator", 42);
        let msg = err.to_string();
        assert!(msg.contains("UnterminatedConstruct"));
        assert!(msg.contains("line 42"));
        assert!(msg.contains("missing TABLE terminator"));
    }

    #[test]
    fn test_error_with_context() {
        let err = MorkError::nested_group("nested group", 3).with_context("in group 1");
        assert_eq!(err.context, Some("in group 1".to_string()));
        assert_eq!(err.kind, MorkErrorKind::NestedGroupDisallowed);
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(
            MorkError::malformed_header("x", 1).kind,
            MorkErrorKind::MalformedHeader
        );
        assert_eq!(
            MorkError::unsupported_version("x", 1).kind,
            MorkErrorKind::UnsupportedVersion
        );
        assert_eq!(MorkError::orphaned_row("x", 7).line, 7);
        assert_eq!(MorkError::io("x", 0).kind, MorkErrorKind::Io);
    }
}

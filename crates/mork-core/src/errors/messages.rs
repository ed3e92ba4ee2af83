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

//! Centralized error message constructors for Mork ingestion.
//!
//! Every error raised by the parser is built here, so the wording stays
//! consistent between strict-mode failures and lenient-mode diagnostics.

use crate::error::MorkError;
use std::fmt;

// ==================== Header Errors ====================

/// First line does not match the Mork header pattern.
pub fn incorrect_header(header: &str, line: usize) -> MorkError {
    MorkError::malformed_header(format!("incorrect file header: {}", header), line)
}

/// Header names a version other than the supported one.
pub fn wrong_version(found: &str, supported: &str, line: usize) -> MorkError {
    MorkError::unsupported_version(
        format!(
            "wrong Mork version: {}, only {} is supported",
            found, supported
        ),
        line,
    )
}

// ==================== Structural Errors ====================

/// Construct reached end-of-stream before its closing marker.
pub fn missing_terminator(construct: impl fmt::Display, line: usize) -> MorkError {
    MorkError::unterminated(
        format!("missing {} terminator, found EOF instead", construct),
        line,
    )
}

/// Group start marker found while scanning a group.
pub fn nested_group(group_id: &str, line: usize) -> MorkError {
    MorkError::nested_group("nested groups are not allowed", line)
        .with_context(format!("in group {}", group_id))
}

/// Row outside any table and unknown to every table.
pub fn orphaned_row(row_id: &str, line: usize) -> MorkError {
    MorkError::orphaned_row(
        format!("row id {} does not belong to any table", row_id),
        line,
    )
}

// ==================== I/O Errors ====================

/// Reading or seeking the input stream failed.
pub fn stream_failure(err: &std::io::Error, line: usize) -> MorkError {
    MorkError::io(format!("failed to read input stream: {}", err), line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MorkErrorKind;

    #[test]
    fn test_incorrect_header() {
        let err = incorrect_header("<html>", 1);
        assert_eq!(err.kind, MorkErrorKind::MalformedHeader);
        assert!(err.message.contains("<html>"));
    }

    #[test]
    fn test_wrong_version() {
        let err = wrong_version("1.3", "1.4", 1);
        assert_eq!(err.kind, MorkErrorKind::UnsupportedVersion);
        assert!(err.message.contains("1.3"));
        assert!(err.message.contains("1.4"));
    }

    #[test]
    fn test_missing_terminator() {
        let err = missing_terminator("TABLE", 12);
        assert_eq!(err.kind, MorkErrorKind::UnterminatedConstruct);
        assert_eq!(err.line, 12);
        assert!(err.message.contains("TABLE"));
    }

    #[test]
    fn test_nested_group_context() {
        let err = nested_group("2A", 4);
        assert_eq!(err.kind, MorkErrorKind::NestedGroupDisallowed);
        assert_eq!(err.context.as_deref(), Some("in group 2A"));
    }

    #[test]
    fn test_orphaned_row() {
        let err = orphaned_row("5:^80", 9);
        assert_eq!(err.kind, MorkErrorKind::OrphanedRow);
        assert!(err.message.contains("5:^80"));
    }

    #[test]
    fn test_stream_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "boom");
        let err = stream_failure(&io, 3);
        assert_eq!(err.kind, MorkErrorKind::Io);
        assert!(err.message.contains("boom"));
    }
}

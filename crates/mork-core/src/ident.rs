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

//! Identifier normalization.
//!
//! Every id stored in a [`Document`](crate::Document) is qualified as
//! `local-id:scope`. Ids read from the file may omit the scope, in which
//! case the production's default scope is appended, and may carry a leading
//! `-` meaning "delete".

/// Default dictionary scope ("atom").
pub const ATOM_SCOPE: &str = "a";

/// Default table and column scope.
pub const COLUMN_SCOPE: &str = "c";

/// Separator between local id and scope.
pub const SCOPE_SEPARATOR: char = ':';

/// Leading marker of a delete operation.
pub const DELETE_MARKER: char = '-';

/// Leading marker of a dictionary reference.
pub const REFERENCE_MARKER: char = '^';

/// A canonical id plus the operation it requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The qualified id, deletion marker stripped.
    pub id: String,
    /// `false` when the raw id carried the deletion marker.
    pub is_create: bool,
}

/// Canonicalize `id`, appending `default_scope` when it has none.
///
/// # Examples
///
/// ```
/// use mork_core::ident::normalize;
///
/// let n = normalize("-1F", "80");
/// assert_eq!(n.id, "1F:80");
/// assert!(!n.is_create);
///
/// assert_eq!(normalize("2:^81", "80").id, "2:^81");
/// ```
pub fn normalize(id: &str, default_scope: &str) -> Normalized {
    let (id, is_create) = match id.strip_prefix(DELETE_MARKER) {
        Some(rest) => (rest, false),
        None => (id, true),
    };
    Normalized {
        id: qualify(id, default_scope),
        is_create,
    }
}

/// Append `:scope` unless `id` is already qualified.
pub fn qualify(id: &str, scope: &str) -> String {
    if is_qualified(id) {
        id.to_string()
    } else {
        format!("{}{}{}", id, SCOPE_SEPARATOR, scope)
    }
}

/// Whether `id` carries a scope suffix.
#[inline]
pub fn is_qualified(id: &str) -> bool {
    id.contains(SCOPE_SEPARATOR)
}

/// Split a qualified id at the first separator into `(local, scope)`.
///
/// The scope is empty for an unqualified id.
pub fn split_id(id: &str) -> (&str, &str) {
    id.split_once(SCOPE_SEPARATOR).unwrap_or((id, ""))
}

/// Whether `value` is a dictionary reference.
#[inline]
pub fn is_reference(value: &str) -> bool {
    value.starts_with(REFERENCE_MARKER)
}

/// Render a hex local id in decimal, leaving non-hex ids untouched.
pub fn decimal_id(local: &str) -> String {
    u128::from_str_radix(local, 16)
        .map(|n| n.to_string())
        .unwrap_or_else(|_| local.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== normalize tests ====================

    #[test]
    fn test_normalize_appends_default_scope() {
        let n = normalize("1", COLUMN_SCOPE);
        assert_eq!(n.id, "1:c");
        assert!(n.is_create);
    }

    #[test]
    fn test_normalize_keeps_existing_scope() {
        let n = normalize("1:^80", COLUMN_SCOPE);
        assert_eq!(n.id, "1:^80");
        assert!(n.is_create);
    }

    #[test]
    fn test_normalize_deletion_marker() {
        let n = normalize("-2A:^80", COLUMN_SCOPE);
        assert_eq!(n.id, "2A:^80");
        assert!(!n.is_create);
    }

    #[test]
    fn test_normalize_reference_value() {
        assert_eq!(normalize("^80", ATOM_SCOPE).id, "^80:a");
    }

    #[test]
    fn test_normalize_only_first_minus_stripped() {
        assert_eq!(normalize("--1", ATOM_SCOPE).id, "-1:a");
    }

    // ==================== split_id tests ====================

    #[test]
    fn test_split_id() {
        assert_eq!(split_id("1:^80"), ("1", "^80"));
        assert_eq!(split_id("1:c"), ("1", "c"));
        assert_eq!(split_id("1"), ("1", ""));
        assert_eq!(split_id("1:a:b"), ("1", "a:b"));
    }

    // ==================== helper tests ====================

    #[test]
    fn test_is_reference() {
        assert!(is_reference("^80"));
        assert!(!is_reference("Subject"));
    }

    #[test]
    fn test_decimal_id() {
        assert_eq!(decimal_id("1F"), "31");
        assert_eq!(decimal_id("ff"), "255");
        assert_eq!(decimal_id("zz"), "zz");
        assert_eq!(decimal_id(""), "");
    }
}

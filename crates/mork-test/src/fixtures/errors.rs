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

//! Error test fixtures for Mork.
//!
//! This module provides broken files for testing error handling in both
//! parsing modes.

use crate::HEADER;
use mork_core::MorkErrorKind;

/// Invalid Mork text samples for strict-mode error testing.
///
/// Each tuple contains (name, mork_text, expected_error_kind).
pub fn invalid_mork_samples() -> Vec<(&'static str, String, MorkErrorKind)> {
    let body = |text: &str| format!("{}{}", HEADER, text);
    vec![
        ("empty", String::new(), MorkErrorKind::MalformedHeader),
        ("not_mork", "hello world\n".to_string(), MorkErrorKind::MalformedHeader),
        (
            "truncated_header",
            "// <!-- <mdb:mork".to_string(),
            MorkErrorKind::MalformedHeader,
        ),
        (
            "wrong_version",
            "// <!-- <mdb:mork:z v=\"1.3\"/> -->\n".to_string(),
            MorkErrorKind::UnsupportedVersion,
        ),
        ("unterminated_dict", body("<(80=x)"), MorkErrorKind::UnterminatedConstruct),
        ("unterminated_metadict", body("< <(a=c)"), MorkErrorKind::UnterminatedConstruct),
        ("unterminated_table", body("{1:^80 [1(a=b)]"), MorkErrorKind::UnterminatedConstruct),
        ("unterminated_metatable", body("{1:^80 {(k=v)"), MorkErrorKind::UnterminatedConstruct),
        ("unterminated_row", body("{1:^80 [1(a=b)"), MorkErrorKind::UnterminatedConstruct),
        ("unterminated_metarow", body("{1:^80 [1 [(k=v)"), MorkErrorKind::UnterminatedConstruct),
        ("unterminated_group", body("@$${1{@\n<(80=x)>\n"), MorkErrorKind::UnterminatedConstruct),
        (
            "nested_group",
            body("@$${1{@\n@$${2{@\n@$$}2}@\n@$$}1}@\n"),
            MorkErrorKind::NestedGroupDisallowed,
        ),
        ("orphaned_row", body("[5(a=b)]"), MorkErrorKind::OrphanedRow),
    ]
}

/// Samples rejected in both modes.
pub fn fatal_samples() -> Vec<(&'static str, String, MorkErrorKind)> {
    invalid_mork_samples()
        .into_iter()
        .filter(|(_, _, kind)| kind.is_always_fatal())
        .collect()
}

/// Samples rejected in strict mode but ingested in lenient mode.
pub fn recoverable_samples() -> Vec<(&'static str, String, MorkErrorKind)> {
    invalid_mork_samples()
        .into_iter()
        .filter(|(_, _, kind)| !kind.is_always_fatal())
        .collect()
}

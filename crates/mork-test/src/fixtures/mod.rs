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

//! Canonical Mork files covering the grammar.
//!
//! - **documents**: complete files, from empty to comprehensive
//! - **errors**: broken files and their expected error kinds
//! - **builders**: builder pattern for custom files

pub mod builders;
mod documents;
pub mod errors;

pub use documents::*;

use crate::FixtureList;

/// Returns all fixture functions for iteration.
///
/// Useful for running the same test across all fixtures.
pub fn all() -> FixtureList {
    vec![
        ("empty", empty),
        ("minimal", minimal),
        ("address_book", address_book),
        ("mail_summary", mail_summary),
        ("with_deletions", with_deletions),
        ("with_moves", with_moves),
        ("comprehensive", comprehensive),
    ]
}

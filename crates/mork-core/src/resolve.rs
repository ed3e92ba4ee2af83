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

//! Dictionary resolution.
//!
//! Cell values and column ids are stored unresolved. A value starting with
//! `^` references the dictionary; anything else is an escaped literal.

use crate::codec;
use crate::document::Document;
use crate::ident::{self, ATOM_SCOPE, COLUMN_SCOPE, REFERENCE_MARKER};

/// Resolution of a reference with no dictionary entry.
pub const MISSING_ENTRY: &str = "??";

impl Document {
    /// Resolve a value to raw bytes.
    pub fn lookup_bytes(&self, value: &str) -> Vec<u8> {
        match value.strip_prefix(REFERENCE_MARKER) {
            Some(key) => {
                let key = ident::qualify(key, ATOM_SCOPE);
                match self.dictionary.get(&key) {
                    Some(raw) => codec::unescape(raw, self.escape),
                    None => MISSING_ENTRY.as_bytes().to_vec(),
                }
            }
            None => codec::unescape(value, self.escape),
        }
    }

    /// Resolve a value to text, replacing invalid UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use mork_core::parse;
    ///
    /// let doc = parse(b"// <!-- <mdb:mork:z v=\"1.4\"/> -->\n< <(a=c)> (80=Subject)>\n").unwrap();
    /// assert_eq!(doc.lookup("^80:c"), "Subject");
    /// assert_eq!(doc.lookup("^81:c"), "??");
    /// assert_eq!(doc.lookup("caf$C3$A9"), "café");
    /// ```
    pub fn lookup(&self, value: &str) -> String {
        String::from_utf8_lossy(&self.lookup_bytes(value)).into_owned()
    }

    /// Display name of a stored column id.
    ///
    /// Aliased columns (`^81:c`) resolve through the dictionary; literal
    /// columns (`subject:c`) drop their scope.
    pub fn column_name(&self, column: &str) -> String {
        if ident::is_reference(column) {
            self.lookup(column)
        } else {
            codec::unescape_to_string(ident::split_id(column).0, self.escape)
        }
    }

    /// Display name of a scope.
    ///
    /// Reference scopes (`^80`) resolve through the column dictionary;
    /// literal scopes are returned decoded.
    pub fn scope_name(&self, scope: &str) -> String {
        if ident::is_reference(scope) {
            self.lookup(&ident::qualify(scope, COLUMN_SCOPE))
        } else {
            codec::unescape_to_string(scope, self.escape)
        }
    }
}

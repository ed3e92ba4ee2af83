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

//! Property-based tests for escaping, groups and row deletion.

use mork_core::codec::{unescape, unescape_to_string, DEFAULT_ESCAPE};
use mork_core::parse;
use mork_test::fixtures::builders::{GroupBuilder, MorkBuilder, RowBuilder, TableBuilder};
use proptest::prelude::*;

/// One mutation of a group body.
#[derive(Debug, Clone)]
enum Op {
    Set { row: u8, column: u8, value: String },
    Delete { row: u8 },
    TopLevel { row: u8, column: u8, value: String },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6, 0u8..4, "[a-zA-Z0-9 ]{1,12}")
            .prop_map(|(row, column, value)| Op::Set { row, column, value }),
        (0u8..6).prop_map(|row| Op::Delete { row }),
        (0u8..6, 0u8..4, "[a-zA-Z0-9]{1,12}")
            .prop_map(|(row, column, value)| Op::TopLevel { row, column, value }),
    ]
}

fn apply(body: MorkBuilder, op: &Op) -> MorkBuilder {
    match op {
        Op::Set { row, column, value } => body.table(
            TableBuilder::new("1:^80")
                .row(RowBuilder::new(format!("{:X}", row)).cell(&format!("c{}", column), value)),
        ),
        Op::Delete { row } => body.table(
            TableBuilder::new("1:^80").row(RowBuilder::deleted(&format!("{:X}", row))),
        ),
        Op::TopLevel { row, column, value } => {
            body.row(RowBuilder::new(format!("{:X}", row)).cell(&format!("c{}", column), value))
        }
    }
}

fn base() -> MorkBuilder {
    MorkBuilder::new()
        .columns([("80", "ns:msg:db:row:scope:msgs:all")])
        .table(
            TableBuilder::new("1:^80")
                .row(RowBuilder::new("0").cell("c0", "zero"))
                .row(RowBuilder::new("1").cell("c1", "one")),
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: Text without escape or hex markers decodes to itself.
    #[test]
    fn prop_unescape_idempotent_without_markers(text in "[^\\\\$]{0,64}") {
        let once = unescape_to_string(&text, DEFAULT_ESCAPE);
        prop_assert_eq!(&once, &text);
        prop_assert_eq!(unescape(&once, DEFAULT_ESCAPE), unescape(&text, DEFAULT_ESCAPE));
    }

    /// Property: Any escaped cell value resolves back to the original text.
    #[test]
    fn prop_escaped_value_resolves_to_original(value in "\\PC{1,40}") {
        let text = MorkBuilder::new()
            .table(TableBuilder::new("1:^80").row(RowBuilder::new("1").cell("v", &value)))
            .build();
        let doc = parse(text.as_bytes()).unwrap();
        let row = doc.table("1:^80").unwrap().row("1:^80").unwrap();
        prop_assert_eq!(doc.lookup(row.get("v:c").unwrap()), value);
    }

    /// Property: A committed group equals its body with the markers stripped.
    #[test]
    fn prop_commit_equals_stripped_markers(ops in prop::collection::vec(op(), 0..12)) {
        let body = ops.iter().fold(MorkBuilder::new(), apply);
        let grouped = base().group(GroupBuilder::new("1").body(body)).build();
        let inline = ops.iter().fold(base(), apply).build();

        prop_assert_eq!(parse(grouped.as_bytes()).unwrap(), parse(inline.as_bytes()).unwrap());
    }

    /// Property: An aborted group leaves the document unchanged.
    #[test]
    fn prop_abort_leaves_document_unchanged(ops in prop::collection::vec(op(), 0..12)) {
        let body = ops.iter().fold(MorkBuilder::new(), apply);
        let aborted = base().group(GroupBuilder::new("2A").aborted().body(body)).build();

        prop_assert_eq!(
            parse(aborted.as_bytes()).unwrap(),
            parse(base().build().as_bytes()).unwrap()
        );
    }

    /// Property: Parsing is deterministic.
    #[test]
    fn prop_parse_deterministic(ops in prop::collection::vec(op(), 0..12)) {
        let text = ops.iter().fold(base(), apply).build();
        prop_assert_eq!(parse(text.as_bytes()).unwrap(), parse(text.as_bytes()).unwrap());
    }

    /// Property: Deleting a row removes exactly that row.
    #[test]
    fn prop_delete_removes_only_target(count in 1usize..16, pick in any::<prop::sample::Index>()) {
        let victim = pick.index(count);
        let mut table = TableBuilder::new("1:^80");
        for i in 0..count {
            table = table.row(RowBuilder::new(format!("{:X}", i)).cell("n", &i.to_string()));
        }
        let text = MorkBuilder::new()
            .table(table)
            .table(TableBuilder::new("1:^80").row(RowBuilder::deleted(&format!("{:X}", victim))))
            .build();

        let doc = parse(text.as_bytes()).unwrap();
        let table = doc.table("1:^80").unwrap();
        prop_assert_eq!(table.len(), count - 1);
        for i in (0..count).filter(|&i| i != victim) {
            let row = table.row(&format!("{:X}:^80", i)).unwrap();
            let expected = i.to_string();
            prop_assert_eq!(row.get("n:c"), Some(expected.as_str()));
        }
    }
}

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

//! Integration tests for mork-json.

use mork_core::parse;
use mork_core::traverse::ViewOptions;
use mork_json::{mork_to_json, to_json, to_json_value, ToJsonConfig};
use mork_test::fixtures;
use serde_json::Value;

#[test]
fn test_address_book_export() {
    let doc = parse(fixtures::address_book().as_bytes()).unwrap();
    let value = to_json_value(&doc, &ToJsonConfig::default());

    let cards = value["1"].as_object().unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(value["1"]["1"]["DisplayName"], "Alice Smith");
    assert_eq!(value["1"]["1"]["PrimaryEmail"], "alice@example.com");
    assert_eq!(value["1"]["2"]["Notes"], "likes (parentheses)");
    assert_eq!(value["1"]["3"]["FirstName"], "Zoë");
}

#[test]
fn test_scope_names_in_keys() {
    let doc = parse(fixtures::address_book().as_bytes()).unwrap();
    let config = ToJsonConfig {
        view: ViewOptions::default().with_include_scope(true),
        ..Default::default()
    };
    let value = to_json_value(&doc, &config);
    let key = "1:ns:addrbk:db:row:scope:card:all";
    assert_eq!(value[key][key]["FirstName"], "Alice");
}

#[test]
fn test_table_filter() {
    let doc = parse(fixtures::comprehensive().as_bytes()).unwrap();
    let config = ToJsonConfig {
        view: ViewOptions::default().with_table("2"),
        ..Default::default()
    };
    let value = to_json_value(&doc, &config);
    let tables: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(tables, vec!["2"]);
    assert_eq!(value["2"]["1"]["name"], "Inbox");
    assert_eq!(value["2"]["5"], serde_json::json!({}));
}

#[test]
fn test_output_parses_back() {
    for (name, fixture_fn) in fixtures::all() {
        let doc = parse(fixture_fn().as_bytes()).unwrap();
        for pretty in [false, true] {
            let json = to_json(&doc, &ToJsonConfig { pretty, ..Default::default() }).unwrap();
            let parsed: Value = serde_json::from_str(&json)
                .unwrap_or_else(|e| panic!("fixture {}: {}", name, e));
            assert!(parsed.is_object());
        }
    }
}

#[test]
fn test_mork_to_json_is_compact() {
    let doc = parse(fixtures::minimal().as_bytes()).unwrap();
    let json = mork_to_json(&doc).unwrap();
    assert!(!json.contains('\n'));
    assert_eq!(json, r#"{"1":{"1":{"subject":"Hello"}}}"#);
}

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

//! Mork to JSON conversion

use crate::error::Result;
use mork_core::ident::decimal_id;
use mork_core::traverse::{traverse, DocumentVisitor, ViewOptions, VisitorContext};
use mork_core::{Document, Row, Table};
use serde_json::{Map, Value as JsonValue};
use std::convert::Infallible;
use std::io::Write;

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct ToJsonConfig {
    /// Indent the output (default: compact)
    pub pretty: bool,
    /// Tables and rows to export
    pub view: ViewOptions,
}

/// Convert Document to JSON string
pub fn to_json(doc: &Document, config: &ToJsonConfig) -> Result<String> {
    let value = to_json_value(doc, config);
    let json = if config.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json)
}

/// Write Document as JSON to a writer
pub fn to_json_writer<W: Write>(
    doc: &Document,
    mut writer: W,
    config: &ToJsonConfig,
) -> Result<()> {
    let value = to_json_value(doc, config);
    if config.pretty {
        serde_json::to_writer_pretty(&mut writer, &value)?;
    } else {
        serde_json::to_writer(&mut writer, &value)?;
    }
    writer.flush()?;
    Ok(())
}

/// Convert Document to serde_json::Value
///
/// The result nests three objects deep: decimal table id, decimal row id,
/// then resolved column name to resolved value. With
/// [`ViewOptions::include_scope`] every id is suffixed with `:` and its
/// scope name. Tables sharing a key are merged.
///
/// # Examples
///
/// ```
/// use mork_json::{to_json_value, ToJsonConfig};
/// use serde_json::json;
///
/// let doc = mork_core::parse(
///     b"// <!-- <mdb:mork:z v=\"1.4\"/> -->\n<(90=Alice)>\n{A [1F(name^90)]}\n",
/// )
/// .unwrap();
/// let value = to_json_value(&doc, &ToJsonConfig::default());
/// assert_eq!(value, json!({ "10": { "31": { "name": "Alice" } } }));
/// ```
pub fn to_json_value(doc: &Document, config: &ToJsonConfig) -> JsonValue {
    let mut collector = JsonCollector::default();
    traverse(doc, &config.view, &mut collector).unwrap_or_else(|never| match never {});
    JsonValue::Object(collector.root)
}

#[derive(Debug, Default)]
struct JsonCollector {
    root: Map<String, JsonValue>,
    table_key: String,
}

impl DocumentVisitor for JsonCollector {
    type Error = Infallible;

    fn begin_table(
        &mut self,
        table: &Table,
        ctx: &VisitorContext,
    ) -> std::result::Result<(), Infallible> {
        self.table_key = scoped_key(table.local_id(), table.scope(), ctx);
        self.root
            .entry(self.table_key.clone())
            .or_insert_with(|| JsonValue::Object(Map::new()));
        Ok(())
    }

    fn visit_row(
        &mut self,
        _table: &Table,
        row: &Row,
        ctx: &VisitorContext,
    ) -> std::result::Result<(), Infallible> {
        let cells: Map<String, JsonValue> = row
            .cells
            .iter()
            .map(|(column, value)| (ctx.column_name(column), JsonValue::String(ctx.lookup(value))))
            .collect();
        if let Some(JsonValue::Object(rows)) = self.root.get_mut(&self.table_key) {
            rows.insert(scoped_key(row.local_id(), row.scope(), ctx), JsonValue::Object(cells));
        }
        Ok(())
    }
}

fn scoped_key(local: &str, scope: &str, ctx: &VisitorContext) -> String {
    let id = decimal_id(local);
    if ctx.options.include_scope {
        format!("{}:{}", id, ctx.scope_name(scope))
    } else {
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HEADER: &str = "// <!-- <mdb:mork:z v=\"1.4\"/> -->\n";

    fn doc(body: &str) -> Document {
        mork_core::parse(format!("{}{}", HEADER, body).as_bytes()).unwrap()
    }

    fn sample() -> Document {
        doc("< <(a=c)> (80=ns:msg)(81=Subject)(83=ns:other)>\n\
             <(90=Hello)>\n\
             {1:^80 [1(^81^90)(flag=$31)] [2:^83(^81=Skip)]}\n")
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_json_value(&doc(""), &ToJsonConfig::default()), json!({}));
    }

    #[test]
    fn test_default_view() {
        let value = to_json_value(&sample(), &ToJsonConfig::default());
        assert_eq!(value, json!({ "1": { "1": { "Subject": "Hello", "flag": "1" } } }));
    }

    #[test]
    fn test_include_scope_and_no_filter() {
        let config = ToJsonConfig {
            view: ViewOptions::default()
                .with_include_scope(true)
                .with_filter_scope(false),
            ..Default::default()
        };
        let value = to_json_value(&sample(), &config);
        assert_eq!(
            value,
            json!({
                "1:ns:msg": {
                    "1:ns:msg": { "Subject": "Hello", "flag": "1" },
                    "2:ns:other": { "Subject": "Skip" }
                }
            })
        );
    }

    #[test]
    fn test_empty_table_kept() {
        let value = to_json_value(&doc("{1:^80 }\n{2:^80 [1]}"), &ToJsonConfig::default());
        assert_eq!(value, json!({ "1": {}, "2": { "1": {} } }));
    }

    #[test]
    fn test_tables_sharing_key_merge() {
        let input = doc("{1:^80 [1(a=x)]}\n{1:^81 [2(b=y)]}");
        let value = to_json_value(&input, &ToJsonConfig::default());
        assert_eq!(value, json!({ "1": { "1": { "a": "x" }, "2": { "b": "y" } } }));
    }

    #[test]
    fn test_key_order_follows_document() {
        let json = to_json(&doc("{2 [B(z=1)(a=2)]}\n{1 [A]}"), &ToJsonConfig::default()).unwrap();
        assert_eq!(json, r#"{"2":{"11":{"z":"1","a":"2"}},"1":{"10":{}}}"#);
    }

    #[test]
    fn test_pretty_output() {
        let config = ToJsonConfig {
            pretty: true,
            ..Default::default()
        };
        let json = to_json(&doc("{1 [1(a=b)]}"), &config).unwrap();
        assert!(json.contains("\n  \"1\": {"));
    }

    #[test]
    fn test_writer_matches_string() {
        let doc = sample();
        let config = ToJsonConfig::default();
        let mut buffer = Vec::new();
        to_json_writer(&doc, &mut buffer, &config).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), to_json(&doc, &config).unwrap());
    }
}

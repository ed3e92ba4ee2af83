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

//! Fixtures for complete Mork files.
//!
//! Each fixture is the text of a file as a Mozilla product would write it.

use crate::HEADER;

/// Header only.
pub fn empty() -> String {
    HEADER.to_string()
}

/// One dictionary, one table, one row.
///
/// Tests: header, column dictionary, atom dictionary, references.
pub fn minimal() -> String {
    format!(
        "{}< <(a=c)> (80=ns:msg:db:row:scope:msgs:all)(81=subject)>\n\
         <(90=Hello)>\n\
         {{1:^80 [1(^81^90)]}}\n",
        HEADER
    )
}

/// A personal address book with three cards.
///
/// Tests: metadict comment, metatable, literal and referenced cells,
/// hex-escaped UTF-8, escaped delimiters.
pub fn address_book() -> String {
    format!(
        r#"{}< <(a=c)> // (f=iso-8859-1)
  (80=ns:addrbk:db:row:scope:card:all)(81=FirstName)(82=LastName)
  (83=DisplayName)(84=PrimaryEmail)(85=ns:addrbk:db:table:kind:pab)
  (86=Notes)>
<(90=Alice)(91=Smith)(92=alice@example.com)(93=Bob)(94=bob@example.com)
  (95=Zo$C3$AB)(96=zoe@example.com)>
{{1:^80 {{(k^85:c)(s=9)}}
  [1(^81^90)(^82^91)(^84^92)(^83=Alice Smith)]
  [2(^81^93)(^84^94)(^86=likes \(parentheses\))]
  [3(^81^95)(^84^96)]}}
"#,
        HEADER
    )
}

/// A mail folder summary followed by committed and aborted groups.
///
/// After ingestion message 1 carries the updated subject, message 2
/// survives the aborted delete and message 3 exists.
pub fn mail_summary() -> String {
    format!(
        r#"{}// folder summary
< <(a=c)> (80=ns:msg:db:row:scope:msgs:all)(81=subject)(82=sender)
  (83=date)(84=ns:msg:db:table:kind:msgs)(85=message-id)>
<(90=Hello)(91=alice@example.com)(92=Re: Hello)(93=bob@example.com)>
{{1:^80 {{(k^84:c)(s=9)}}
  [1(^81^90)(^82^91)(^83=5F3A1B00)(^85=1@example.com)]
  [2(^81^92)(^82^93)(^83=5F3A1C00)(^85=2@example.com)]}}
@$${{3{{@
<(94=Hello, updated)>
[1(^81^94)]
@$$}}3}}@
@$${{4{{@
[-2]
@$$}}~abort~4}}@
@$${{5{{@
{{1:^80 [3(^81=Third)(^82^91)]}}
@$$}}5}}@
"#,
        HEADER
    )
}

/// Rows removed by `[-id]` and detached by bare `-id`.
pub fn with_deletions() -> String {
    format!(
        "{}{{1:^80 [1(a=one)] [2(a=two)] [3(a=three)] [4(a=four)]}}\n\
         {{1:^80 [-2] -3}}\n\
         [-4]\n",
        HEADER
    )
}

/// Rows of one scope spread over two tables, then moved between them.
pub fn with_moves() -> String {
    format!(
        "{}< <(a=c)> (80=ns:msg:db:row:scope:msgs:all)(81=ns:msg:db:row:scope:threads:all)>\n\
         {{1:^80 [1(a=x)] [2:^81(t=thread)]}}\n\
         {{2:^81 2}}\n",
        HEADER
    )
}

/// Every grammar feature in one file.
///
/// Tests: comments, dictionaries inside tables, metarows, hex table ids,
/// line continuations, group-level dictionary scope, bare ids.
pub fn comprehensive() -> String {
    format!(
        r#"{}// comprehensive fixture
< <(a=c)> (80=ns:msg:db:row:scope:msgs:all)(81=subject)(82=body)
  (83=ns:msg:db:row:scope:folders:all)(84=name)>
<(90=Inbox)(91=Welcome)>
{{1F:^80 {{(k=v)}}
  <(92=inline atom)>
  [A [(rowmeta=1)] (^81^91)(^82=first \
line)]
  [B(^81^92)(subject=plain)]}}
{{2:^83 [1(^84^90)]}}
@$${{7{{@
(a=c)
<(85=flags)>
{{1F:^80 [A(^85=0x01)]}}
@$$}}7}}@
{{2:^83 5}}
"#,
        HEADER
    )
}

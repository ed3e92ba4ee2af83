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

//! Boundary tokens recognised by the tokenizer.
//!
//! Each production hands the tokenizer a small candidate set drawn from
//! [`Token`]; the tokenizer reports which one ended the scan. Group commit and
//! abort markers embed the group id, so they carry their full marker text,
//! built once per group by [`Token::commit`] and [`Token::abort`].

use std::fmt;

/// Text of a group commit or abort marker, group id included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupMarker(String);

impl GroupMarker {
    /// The marker as it appears in the file.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A boundary token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// `//` - comment to end of line.
    Comment,
    /// `@$${` - group start; the group id follows.
    GroupStart,
    /// `{@` - end of the group id.
    GroupIdEnd,
    /// `@$$}<id>}@` - group commit.
    Commit(GroupMarker),
    /// `@$$}~abort~<id>}@` - group abort.
    Abort(GroupMarker),
    /// `<`
    DictOpen,
    /// `>`
    DictClose,
    /// `{`
    TableOpen,
    /// `}`
    TableClose,
    /// `[`
    RowOpen,
    /// `]`
    RowClose,
    /// `(`
    CellOpen,
    /// `)`
    CellClose,
    /// `^` - reference marker.
    Reference,
    /// `=` - literal value marker.
    Assign,
    /// ` `
    Space,
    /// `\n`
    LineFeed,
    /// `\r`
    CarriageReturn,
    /// `-` - deletion marker.
    Minus,
    /// Any single hex digit, either case.
    HexDigit,
}

impl Token {
    /// Commit marker of the group `group_id`.
    pub fn commit(group_id: &str) -> Self {
        Self::Commit(GroupMarker(format!("@$$}}{}}}@", group_id)))
    }

    /// Abort marker of the group `group_id`.
    pub fn abort(group_id: &str) -> Self {
        Self::Abort(GroupMarker(format!("@$$}}~abort~{}}}@", group_id)))
    }

    /// Literal text of the token, `None` for the hex-digit class.
    pub fn literal(&self) -> Option<&str> {
        let text = match self {
            Self::Comment => "//",
            Self::GroupStart => "@$${",
            Self::GroupIdEnd => "{@",
            Self::Commit(marker) | Self::Abort(marker) => marker.as_str(),
            Self::DictOpen => "<",
            Self::DictClose => ">",
            Self::TableOpen => "{",
            Self::TableClose => "}",
            Self::RowOpen => "[",
            Self::RowClose => "]",
            Self::CellOpen => "(",
            Self::CellClose => ")",
            Self::Reference => "^",
            Self::Assign => "=",
            Self::Space => " ",
            Self::LineFeed => "\n",
            Self::CarriageReturn => "\r",
            Self::Minus => "-",
            Self::HexDigit => return None,
        };
        Some(text)
    }

    /// Length of the match if `buffer` ends with this token.
    pub fn match_tail(&self, buffer: &[u8]) -> Option<usize> {
        match self.literal() {
            Some(text) => buffer.ends_with(text.as_bytes()).then_some(text.len()),
            None => buffer
                .last()
                .filter(|b| b.is_ascii_hexdigit())
                .map(|_| 1),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.literal() {
            Some(text) => write!(f, "{:?}", text),
            None => write!(f, "HEX"),
        }
    }
}

/// Token sets handed to the tokenizer by each production.
pub mod sets {
    use super::Token;

    /// Top level of the file.
    pub const TOP_LEVEL: &[Token] = &[
        Token::Comment,
        Token::GroupStart,
        Token::DictOpen,
        Token::TableOpen,
        Token::RowOpen,
    ];

    /// Inside a dictionary.
    pub const DICT: &[Token] = &[
        Token::DictOpen,
        Token::CellOpen,
        Token::Comment,
        Token::DictClose,
    ];

    /// Inside a metadictionary.
    pub const METADICT: &[Token] = &[Token::CellOpen, Token::DictClose];

    /// Inside a metatable.
    pub const METATABLE: &[Token] = &[Token::CellOpen, Token::TableClose];

    /// Inside a metarow.
    pub const METAROW: &[Token] = &[Token::CellOpen, Token::RowClose];

    /// Inside a table body.
    pub const TABLE: &[Token] = &[
        Token::DictOpen,
        Token::TableOpen,
        Token::RowOpen,
        Token::TableClose,
        Token::HexDigit,
        Token::Minus,
    ];

    /// Inside a row body, also used to end the row id.
    pub const ROW: &[Token] = &[Token::RowOpen, Token::CellOpen, Token::RowClose];

    /// Terminators of a bare id.
    pub const ID_END: &[Token] = &[
        Token::Space,
        Token::LineFeed,
        Token::CarriageReturn,
        Token::TableOpen,
        Token::RowOpen,
        Token::CellOpen,
        Token::Assign,
        Token::TableClose,
        Token::RowClose,
        Token::CellClose,
    ];

    /// Start of a table id.
    pub const HEX: &[Token] = &[Token::HexDigit];

    /// Cell column terminators.
    pub const CELL_COLUMN: &[Token] = &[Token::Reference, Token::Assign];

    /// Cell value terminator.
    pub const CELL_VALUE: &[Token] = &[Token::CellClose];

    /// Dictionary alias key terminator.
    pub const ALIAS_KEY: &[Token] = &[Token::Assign];

    /// End of line.
    pub const LINE_END: &[Token] = &[Token::LineFeed, Token::CarriageReturn];

    /// End of a group id.
    pub const GROUP_ID: &[Token] = &[Token::GroupIdEnd];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_marker_literals() {
        assert_eq!(Token::GroupStart.literal().unwrap(), "@$${");
        assert_eq!(Token::commit("1").literal().unwrap(), "@$$}1}@");
        assert_eq!(Token::abort("2A").literal().unwrap(), "@$$}~abort~2A}@");
    }

    #[test]
    fn test_group_marker_match_tail() {
        let commit = Token::commit("1F");
        assert_eq!(commit.match_tail(b"[1]\n@$$}1F}@"), Some(8));
        assert_eq!(commit.match_tail(b"@$$}1}@"), None);
        assert_eq!(Token::abort("1F").match_tail(b"x@$$}~abort~1F}@"), Some(15));
        assert_ne!(Token::commit("1"), Token::abort("1"));
    }

    #[test]
    fn test_hex_class_has_no_literal() {
        assert!(Token::HexDigit.literal().is_none());
        assert_eq!(Token::HexDigit.to_string(), "HEX");
    }

    #[test]
    fn test_match_tail_literal() {
        assert_eq!(Token::Comment.match_tail(b"abc//"), Some(2));
        assert_eq!(Token::Comment.match_tail(b"abc/"), None);
        assert_eq!(Token::TableOpen.match_tail(b"@$${"), Some(1));
        assert_eq!(Token::GroupStart.match_tail(b"@$${"), Some(4));
    }

    #[test]
    fn test_match_tail_hex_class() {
        assert_eq!(Token::HexDigit.match_tail(b"  a"), Some(1));
        assert_eq!(Token::HexDigit.match_tail(b"  F"), Some(1));
        assert_eq!(Token::HexDigit.match_tail(b"  g"), None);
        assert_eq!(Token::HexDigit.match_tail(b""), None);
    }

    #[test]
    fn test_display_quotes_literal() {
        assert_eq!(Token::CellOpen.to_string(), "\"(\"");
    }
}

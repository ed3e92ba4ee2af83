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

//! Byte-wise tokenizer over a seekable stream.
//!
//! The tokenizer reads one byte at a time and, after each byte, checks whether
//! the accumulated buffer ends with one of the candidate tokens. A token whose
//! first byte is preceded by an unescaped escape character is not a boundary.
//!
//! # Features
//!
//! - **Escape aware**: `\)` never closes a cell, `\\)` does
//! - **Line tracking**: current line number for error messages
//! - **Rewind**: [`Mark`] / [`Tokenizer::rewind`] for the group scan-then-replay
//!   protocol, without buffering the whole file
//!
//! # Examples
//!
//! ```rust
//! use mork_core::lex::{Token, Tokenizer};
//! use std::io::Cursor;
//!
//! let mut tok = Tokenizer::new(Cursor::new("  Subject \\) x)rest"));
//! let scanned = tok.read_until(&[Token::CellClose]).unwrap().unwrap();
//! assert_eq!(scanned.text, "Subject \\) x");
//! assert_eq!(scanned.token, Token::CellClose);
//! ```

use crate::codec::DEFAULT_ESCAPE;
use crate::error::MorkResult;
use crate::errors::messages;
use crate::lex::tokens::Token;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};

/// Result of a successful [`Tokenizer::read_until`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanned {
    /// Text before the token, trimmed, with line continuations removed.
    pub text: String,
    /// The candidate that matched.
    pub token: Token,
    /// The matched bytes (the digit itself for [`Token::HexDigit`]).
    pub lexeme: String,
}

/// A saved stream position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    position: u64,
    line: usize,
}

impl Mark {
    /// Absolute byte offset of the mark.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// A mark `len` bytes before this one on the same line.
    pub fn step_back(self, len: usize) -> Mark {
        Mark {
            position: self.position.saturating_sub(len as u64),
            line: self.line,
        }
    }
}

/// Escape-aware tokenizer with line number tracking.
pub struct Tokenizer<R> {
    reader: BufReader<R>,
    escape: u8,
    line: usize,
    buffer: Vec<u8>,
}

impl<R: Read + Seek> Tokenizer<R> {
    /// Create a tokenizer using the default backslash escape.
    pub fn new(reader: R) -> Self {
        Self::with_escape(reader, DEFAULT_ESCAPE)
    }

    /// Create a tokenizer with a custom escape character.
    pub fn with_escape(reader: R, escape: u8) -> Self {
        Self {
            reader: BufReader::new(reader),
            escape,
            line: 1,
            buffer: Vec::new(),
        }
    }

    /// Current line number (1-based).
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Escape character in use.
    #[inline]
    pub fn escape(&self) -> u8 {
        self.escape
    }

    /// Remember the current position.
    pub fn mark(&mut self) -> MorkResult<Mark> {
        let position = self
            .reader
            .stream_position()
            .map_err(|e| messages::stream_failure(&e, self.line))?;
        Ok(Mark {
            position,
            line: self.line,
        })
    }

    /// Go back to a previously saved position.
    pub fn rewind(&mut self, mark: Mark) -> MorkResult<()> {
        self.reader
            .seek(SeekFrom::Start(mark.position))
            .map_err(|e| messages::stream_failure(&e, self.line))?;
        self.line = mark.line;
        Ok(())
    }

    /// Read until one of `candidates` ends the buffer.
    ///
    /// Returns `Ok(None)` at end-of-stream; callers decide whether that is
    /// an error. When several candidates match, the longest one wins, so
    /// `@$${` beats `{`.
    pub fn read_until(&mut self, candidates: &[Token]) -> MorkResult<Option<Scanned>> {
        self.buffer.clear();

        while let Some(byte) = self.next_byte()? {
            self.buffer.push(byte);

            if let Some((token, len)) = self.match_candidates(candidates) {
                let start = self.buffer.len() - len;
                let lexeme = String::from_utf8_lossy(&self.buffer[start..]).into_owned();
                let text = clean_text(&self.buffer[..start], self.escape);
                return Ok(Some(Scanned {
                    text,
                    token,
                    lexeme,
                }));
            }
        }

        Ok(None)
    }

    /// Cleaned text consumed by the last `read_until` that hit end-of-stream.
    pub fn unterminated_text(&self) -> String {
        clean_text(&self.buffer, self.escape)
    }

    fn match_candidates(&self, candidates: &[Token]) -> Option<(Token, usize)> {
        candidates
            .iter()
            .filter_map(|candidate| {
                let len = candidate.match_tail(&self.buffer)?;
                let start = self.buffer.len() - len;
                (!is_escaped(&self.buffer, start, self.escape)).then_some((candidate, len))
            })
            .max_by_key(|(_, len)| *len)
            .map(|(candidate, len)| (candidate.clone(), len))
    }

    fn next_byte(&mut self) -> MorkResult<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    if byte[0] == b'\n' {
                        self.line += 1;
                    }
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(messages::stream_failure(&e, self.line)),
            }
        }
    }
}

/// Whether the byte at `pos` is preceded by an odd run of escape characters.
fn is_escaped(buffer: &[u8], pos: usize, escape: u8) -> bool {
    buffer[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == escape)
        .count()
        % 2
        == 1
}

#[inline]
fn is_trim_byte(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\0' | 0x0B)
}

/// Trim surrounding whitespace and drop line breaks and line continuations.
fn clean_text(raw: &[u8], escape: u8) -> String {
    let start = raw.iter().position(|&b| !is_trim_byte(b)).unwrap_or(raw.len());
    let end = raw
        .iter()
        .rposition(|&b| !is_trim_byte(b))
        .map_or(start, |p| p + 1);
    let trimmed = &raw[start..end];

    if memchr::memchr3(escape, b'\n', b'\r', trimmed).is_none() {
        return String::from_utf8_lossy(trimmed).into_owned();
    }

    let mut out = Vec::with_capacity(trimmed.len());
    let mut i = 0;
    while i < trimmed.len() {
        let b = trimmed[i];
        if b == escape && i + 1 < trimmed.len() {
            let next = trimmed[i + 1];
            if next != b'\n' && next != b'\r' {
                out.push(b);
                out.push(next);
            }
            i += 2;
        } else {
            if b != b'\n' && b != b'\r' {
                out.push(b);
            }
            i += 1;
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::tokens::sets;
    use std::io::Cursor;

    fn tokenizer(input: &str) -> Tokenizer<Cursor<Vec<u8>>> {
        Tokenizer::new(Cursor::new(input.as_bytes().to_vec()))
    }

    // ==================== Matching tests ====================

    #[test]
    fn test_read_until_single_token() {
        let mut tok = tokenizer("80=Subject)");
        let s = tok.read_until(sets::ALIAS_KEY).unwrap().unwrap();
        assert_eq!(s.text, "80");
        assert_eq!(s.token, Token::Assign);
        let s = tok.read_until(sets::CELL_VALUE).unwrap().unwrap();
        assert_eq!(s.text, "Subject");
    }

    #[test]
    fn test_longest_candidate_wins() {
        let mut tok = tokenizer("  @$${1{@");
        let s = tok.read_until(sets::TOP_LEVEL).unwrap().unwrap();
        assert_eq!(s.token, Token::GroupStart);
        assert_eq!(s.text, "");
    }

    #[test]
    fn test_end_of_stream() {
        let mut tok = tokenizer("no delimiter here");
        assert_eq!(tok.read_until(sets::CELL_VALUE).unwrap(), None);
    }

    #[test]
    fn test_hex_class_peels_one_digit() {
        let mut tok = tokenizer(" \n zz1F:80 ");
        let s = tok.read_until(sets::HEX).unwrap().unwrap();
        assert_eq!(s.token, Token::HexDigit);
        assert_eq!(s.lexeme, "1");
        let s = tok.read_until(sets::ID_END).unwrap().unwrap();
        assert_eq!(s.text, "F:80");
        assert_eq!(s.token, Token::Space);
    }

    #[test]
    fn test_commit_marker_with_group_id() {
        let mut tok = tokenizer("[1(a=b)]@$$}2A}@");
        let candidates = [
            Token::commit("2A"),
            Token::abort("2A"),
            Token::GroupStart,
        ];
        let s = tok.read_until(&candidates).unwrap().unwrap();
        assert_eq!(s.token, Token::commit("2A"));
        assert_eq!(s.lexeme, "@$$}2A}@");
        assert_eq!(s.text, "[1(a=b)]");
    }

    // ==================== Escape tests ====================

    #[test]
    fn test_escaped_delimiter_not_boundary() {
        let mut tok = tokenizer(r"a\)b)");
        let s = tok.read_until(sets::CELL_VALUE).unwrap().unwrap();
        assert_eq!(s.text, r"a\)b");
    }

    #[test]
    fn test_escaped_escape_is_boundary() {
        let mut tok = tokenizer(r"a\\)b)");
        let s = tok.read_until(sets::CELL_VALUE).unwrap().unwrap();
        assert_eq!(s.text, r"a\\");
    }

    #[test]
    fn test_custom_escape() {
        let mut tok = Tokenizer::with_escape(Cursor::new(b"a#)b)".to_vec()), b'#');
        assert_eq!(tok.escape(), b'#');
        let s = tok.read_until(sets::CELL_VALUE).unwrap().unwrap();
        assert_eq!(s.text, "a#)b");
    }

    // ==================== Cleaning tests ====================

    #[test]
    fn test_text_trimmed() {
        let mut tok = tokenizer(" \t value \n)");
        let s = tok.read_until(sets::CELL_VALUE).unwrap().unwrap();
        assert_eq!(s.text, "value");
    }

    #[test]
    fn test_line_continuation_removed() {
        let mut tok = tokenizer("long\\\nvalue\r\n text)");
        let s = tok.read_until(sets::CELL_VALUE).unwrap().unwrap();
        assert_eq!(s.text, "longvalue text");
    }

    #[test]
    fn test_escaped_escape_before_newline_kept() {
        assert_eq!(clean_text(b"a\\\\\nb", b'\\'), "a\\\\b");
    }

    #[test]
    fn test_unterminated_text_at_end_of_stream() {
        let mut tok = tokenizer("  tail text ");
        assert!(tok.read_until(sets::LINE_END).unwrap().is_none());
        assert_eq!(tok.unterminated_text(), "tail text");
    }

    // ==================== Line tracking and rewind tests ====================

    #[test]
    fn test_line_tracking() {
        let mut tok = tokenizer("a\nb\nc)");
        assert_eq!(tok.line(), 1);
        tok.read_until(sets::CELL_VALUE).unwrap();
        assert_eq!(tok.line(), 3);
    }

    #[test]
    fn test_mark_and_rewind() {
        let mut tok = tokenizer("one)\ntwo)three)");
        tok.read_until(sets::CELL_VALUE).unwrap();
        let mark = tok.mark().unwrap();
        assert_eq!(mark.position(), 4);

        let first = tok.read_until(sets::CELL_VALUE).unwrap().unwrap();
        tok.read_until(sets::CELL_VALUE).unwrap();
        assert_eq!(tok.line(), 2);

        tok.rewind(mark).unwrap();
        assert_eq!(tok.line(), 1);
        let again = tok.read_until(sets::CELL_VALUE).unwrap().unwrap();
        assert_eq!(first, again);
        assert_eq!(again.text, "two");
    }

    #[test]
    fn test_step_back_rereads_marker() {
        let mut tok = tokenizer("x @$${2{@");
        tok.read_until(sets::TOP_LEVEL).unwrap();
        let back = tok.mark().unwrap().step_back(4);
        tok.rewind(back).unwrap();
        let s = tok.read_until(sets::TOP_LEVEL).unwrap().unwrap();
        assert_eq!(s.token, Token::GroupStart);
        assert_eq!(s.text, "");
    }
}

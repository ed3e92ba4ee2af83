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

//! Escape codec for Mork literals.
//!
//! Mork stores literals with two kinds of escapes:
//!
//! - `$XX` hex escapes, one per raw byte. Multi-byte UTF-8 characters appear
//!   as consecutive hex escapes (`$C3$A9` for `é`), so decoding is strictly
//!   byte-wise and never reassembles code points.
//! - `<escape><char>` pairs protecting delimiters (`\)`, `\\`, `\$`). The
//!   escape character defaults to a backslash.
//!
//! A `$` preceded by an unescaped escape character is a literal dollar sign.
//!
//! # Examples
//!
//! ```
//! use mork_core::codec::{unescape, DEFAULT_ESCAPE};
//!
//! assert_eq!(unescape("caf$C3$A9", DEFAULT_ESCAPE), "café".as_bytes());
//! assert_eq!(unescape(r"a\)b", DEFAULT_ESCAPE), b"a)b");
//! assert_eq!(unescape(r"\$41", DEFAULT_ESCAPE), b"$41");
//! ```

/// Default escape character.
pub const DEFAULT_ESCAPE: u8 = b'\\';

/// Marker introducing a two-digit hex escape.
pub const HEX_MARKER: u8 = b'$';

/// Decode escaped Mork text into raw bytes.
///
/// Runs in two passes. Hex escapes are expanded greedily left to right,
/// skipping any `$` preceded by an unescaped escape character; then every
/// remaining `<escape><char>` pair in the result is replaced by `<char>`,
/// including pairs whose escape byte came out of a hex escape. A trailing
/// lone escape character is kept as is.
pub fn unescape(text: &str, escape: u8) -> Vec<u8> {
    let bytes = text.as_bytes();
    if memchr::memchr2(escape, HEX_MARKER, bytes).is_none() {
        return bytes.to_vec();
    }

    let expanded = expand_hex(bytes, escape);
    if memchr::memchr(escape, &expanded).is_none() {
        return expanded;
    }
    strip_escapes(&expanded, escape)
}

fn expand_hex(bytes: &[u8], escape: u8) -> Vec<u8> {
    let mut output = Vec::with_capacity(bytes.len());
    // consecutive escape characters directly before `i`
    let mut run = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == escape {
            run += 1;
            output.push(b);
            i += 1;
            continue;
        }

        if b == HEX_MARKER
            && run % 2 == 0
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            output.push(hex_pair_to_byte(bytes[i + 1], bytes[i + 2]));
            i += 3;
        } else {
            output.push(b);
            i += 1;
        }
        run = 0;
    }

    output
}

fn strip_escapes(bytes: &[u8], escape: u8) -> Vec<u8> {
    let mut output = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == escape && i + 1 < bytes.len() {
            output.push(bytes[i + 1]);
            i += 2;
        } else {
            output.push(bytes[i]);
            i += 1;
        }
    }

    output
}

/// Decode escaped Mork text and interpret the bytes as UTF-8.
///
/// Invalid sequences are replaced with U+FFFD.
pub fn unescape_to_string(text: &str, escape: u8) -> String {
    String::from_utf8_lossy(&unescape(text, escape)).into_owned()
}

#[inline]
fn hex_pair_to_byte(high: u8, low: u8) -> u8 {
    (hex_value(high) << 4) | hex_value(low)
}

#[inline]
fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

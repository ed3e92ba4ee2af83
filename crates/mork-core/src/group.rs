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

//! Change-log groups.
//!
//! A group `@$${ID{@ ... @$$}ID}@` is all-or-nothing. Its body is first
//! scanned without parsing to find how it ends:
//!
//! ```text
//! Scanning --commit marker--> Committed      rewind, replay through the grammar
//!          --abort marker---> Aborted        nothing applied
//!          --group start----> ImplicitAbort  nothing applied (strict: error)
//!          --end of stream--> Truncated      nothing applied (strict: error)
//! ```
//!
//! Only a committed body ever reaches the document, so no rollback is needed.

use crate::error::MorkResult;
use crate::errors::messages;
use crate::lex::{sets, Token};
use crate::parser::{Construct, Parser};
use std::fmt;
use std::io::{Read, Seek};

/// How a group ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum GroupOutcome {
    /// Matching commit marker found; body applied.
    Committed,
    /// Matching abort marker found.
    Aborted,
    /// Another group started before this one ended.
    ImplicitAbort,
    /// Stream ended before the group did.
    Truncated,
}

impl GroupOutcome {
    /// Whether the group body was applied.
    pub(crate) fn is_applied(self) -> bool {
        self == Self::Committed
    }
}

impl fmt::Display for GroupOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Committed => write!(f, "committed"),
            Self::Aborted => write!(f, "aborted"),
            Self::ImplicitAbort => write!(f, "implicitly aborted"),
            Self::Truncated => write!(f, "truncated"),
        }
    }
}

impl<R: Read + Seek> Parser<R> {
    /// Parse a group; the start marker has been consumed.
    pub(crate) fn parse_group(&mut self) -> MorkResult<GroupOutcome> {
        let Some(header) = self.tok.read_until(sets::GROUP_ID)? else {
            self.unterminated(Construct::Group)?;
            return Ok(GroupOutcome::Truncated);
        };
        let group_id = header.text;
        self.diag.info(format_args!("Found group id {}", group_id));

        let start = self.tok.mark()?;
        let commit = Token::commit(&group_id);
        let abort = Token::abort(&group_id);
        let scan = [commit.clone(), abort.clone(), Token::GroupStart];

        let outcome = match self.tok.read_until(&scan)? {
            Some(found) if found.token == commit => GroupOutcome::Committed,
            Some(found) if found.token == abort => GroupOutcome::Aborted,
            Some(found) => {
                self.irregular(messages::nested_group(&group_id, self.tok.line()))?;
                let resume = self.tok.mark()?.step_back(found.lexeme.len());
                self.tok.rewind(resume)?;
                GroupOutcome::ImplicitAbort
            }
            None => {
                self.unterminated(Construct::Group)?;
                GroupOutcome::Truncated
            }
        };

        if outcome.is_applied() {
            self.diag
                .verbose(format_args!("Found GROUP and COMMIT - retracing"));
            self.tok.rewind(start)?;
            self.replay_group(&commit)?;
        }

        self.diag
            .info(format_args!("Group {} {}", group_id, outcome));
        Ok(outcome)
    }

    /// Run the group body through the grammar up to its commit marker.
    fn replay_group(&mut self, commit: &Token) -> MorkResult<()> {
        let candidates = [
            commit.clone(),
            Token::DictOpen,
            Token::TableOpen,
            Token::RowOpen,
            Token::CellOpen,
        ];

        loop {
            let Some(scanned) = self.tok.read_until(&candidates)? else {
                return self.unterminated(Construct::Group);
            };

            match scanned.token {
                Token::DictOpen => self.parse_dict()?,
                Token::TableOpen => self.parse_table()?,
                Token::RowOpen => self.parse_row(None)?,
                Token::CellOpen => self.parse_group_cell()?,
                ref token if token == commit => return Ok(()),
                _ => {}
            }
        }
    }

    /// A cell directly inside a group: `(a=<scope>)` sets the dictionary scope.
    fn parse_group_cell(&mut self) -> MorkResult<()> {
        if let Some((column, value)) = self.parse_cell()? {
            self.apply_dict_setting(&column, value);
        }
        Ok(())
    }
}

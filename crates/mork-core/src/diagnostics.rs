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

//! Leveled progress reporting through `tracing`.
//!
//! The parser reports what it finds at two levels. Nothing reported here
//! affects the ingested document.

use std::fmt;

/// How much the parser reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    /// Nothing.
    #[default]
    Off,
    /// Comments, group outcomes, irregularities and warnings.
    Info,
    /// Every production entered and closed.
    Verbose,
}

impl Verbosity {
    /// Map a repeated `-v` count to a level.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Self::Off,
            1 => Self::Info,
            _ => Self::Verbose,
        }
    }
}

/// Diagnostic sink bound to a verbosity level.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnostics {
    verbosity: Verbosity,
}

impl Diagnostics {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    #[inline]
    pub fn enabled(&self, level: Verbosity) -> bool {
        level != Verbosity::Off && self.verbosity >= level
    }

    /// Progress message shown from `-v`.
    pub fn info(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Verbosity::Info) {
            tracing::info!("{}", args);
        }
    }

    /// Trace message shown from `-vv`.
    pub fn verbose(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Verbosity::Verbose) {
            tracing::debug!("{}", args);
        }
    }

    /// Warning shown from `-v`.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Verbosity::Info) {
            tracing::warn!("{}", args);
        }
    }
}

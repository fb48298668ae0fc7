// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! The output panel: a bounded log of messages printed by commands.

use std::{collections::VecDeque, fmt::Display};

use tracing::info;

use crate::error::CommandError;

const MAX_LINES: usize = 500;

pub(crate) const DEFAULT_SOURCE: &str = "kuro";

#[derive(Debug, Default)]
pub(crate) struct Output {
    lines: VecDeque<String>,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `what`, attributed to `who`.
    pub(crate) fn print(&mut self, who: &str, what: impl Display) {
        let line = format!("[{}]: {}", who, what);
        info!(target: "kuroui::output", "{}", line);

        if self.lines.len() == MAX_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub(crate) fn report(&mut self, error: &CommandError) {
        self.print(DEFAULT_SOURCE, error);
    }

    pub(crate) fn lines(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub(crate) fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }
}

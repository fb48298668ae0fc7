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

//! Recoverable error conditions raised by the command and gesture layers.
//!
//! None of these are fatal: the dispatcher and the input handlers report them
//! to the output panel and carry on with the next event.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub(crate) enum CommandError {
    #[error("invalid command '{0}'")]
    UnknownCommand(String),

    #[error("invalid parameter '{parameter}' for '{command}'")]
    InvalidParameter { command: String, parameter: String },

    #[error("'{0}' requires parameters")]
    RequiresParameters(String),

    #[error("command '{0}' is already registered")]
    DuplicateCommand(String),

    #[error("playback error: {0}")]
    Playback(String),
}

impl CommandError {
    pub(crate) fn invalid_parameter(command: &str, parameter: &str) -> Self {
        Self::InvalidParameter {
            command: command.to_string(),
            parameter: parameter.to_string(),
        }
    }

    pub(crate) fn requires_parameters(command: &str) -> Self {
        Self::RequiresParameters(command.to_string())
    }
}

impl From<anyhow::Error> for CommandError {
    fn from(e: anyhow::Error) -> Self {
        Self::Playback(format!("{:#}", e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum GestureError {
    #[error("a gesture is already active")]
    AlreadyActive,

    #[error("no gesture is active")]
    NotActive,
}

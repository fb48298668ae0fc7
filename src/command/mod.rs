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

//! Named commands and the dispatcher that runs them.
//!
//! Every user-facing action is a textual command line such as `volume +5`
//! or `playlist play -1`. The command line, the keyboard shortcuts and the
//! mouse handlers all funnel through [`dispatch`], which splits the line into
//! a verb and its arguments, resolves the verb in the [`CommandRegistry`] and
//! invokes the registered [`Command`].
//!
//! Failures are [`CommandError`]s. They are reported to the output panel and
//! never propagate past the dispatcher.

pub(crate) mod args;
mod builtins;

pub(crate) use builtins::{load, open_location};

use std::{collections::HashMap, sync::mpsc::Sender};

use tracing::{debug, warn};

use crate::{
    error::CommandError,
    events::AppEvent,
    output::Output,
    player::Playback,
    playlist::{Playlist, RecentFiles},
    shortcuts::ShortcutTable,
    view::ViewState,
};

/// The collaborators a command may act on, borrowed from the application for
/// the duration of one dispatch.
pub(crate) struct CommandContext<'a> {
    pub(crate) registry: &'a CommandRegistry,
    pub(crate) player: &'a dyn Playback,
    pub(crate) playlist: &'a mut Playlist,
    pub(crate) recent: &'a mut RecentFiles,
    pub(crate) shortcuts: &'a mut ShortcutTable,
    pub(crate) view: &'a mut ViewState,
    pub(crate) output: &'a mut Output,
    pub(crate) event_tx: &'a Sender<AppEvent>,
}

/// A single verb's behaviour.
///
/// Arguments arrive as opaque whitespace-separated tokens; parsing them is up
/// to the command.
pub(crate) trait Command: Send + Sync {
    fn invoke(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError>;
}

impl<F> Command for F
where
    F: Fn(&mut CommandContext<'_>, &[String]) -> Result<(), CommandError> + Send + Sync,
{
    fn invoke(&self, ctx: &mut CommandContext<'_>, args: &[String]) -> Result<(), CommandError> {
        self(ctx, args)
    }
}

/// Help text for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Usage {
    pub(crate) params: &'static str,
    pub(crate) description: &'static str,
    pub(crate) advanced: Option<&'static str>,
}

impl Usage {
    pub(crate) const fn new(params: &'static str, description: &'static str) -> Self {
        Self {
            params,
            description,
            advanced: None,
        }
    }

    pub(crate) const fn with_advanced(self, advanced: &'static str) -> Self {
        Self {
            advanced: Some(advanced),
            ..self
        }
    }
}

struct CommandDefinition {
    handler: Box<dyn Command>,
    usage: Usage,
}

/// Maps verbs to commands.
///
/// Populated once at start, read on every dispatch afterwards.
#[derive(Default)]
pub(crate) struct CommandRegistry {
    commands: HashMap<String, CommandDefinition>,
}

impl CommandRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in command.
    pub(crate) fn with_builtins() -> Result<Self, CommandError> {
        let mut registry = Self::new();
        builtins::register(&mut registry)?;
        Ok(registry)
    }

    pub(crate) fn register(
        &mut self,
        name: &str,
        handler: impl Command + 'static,
        usage: Usage,
    ) -> Result<(), CommandError> {
        if self.commands.contains_key(name) {
            return Err(CommandError::DuplicateCommand(name.to_string()));
        }

        self.commands.insert(
            name.to_string(),
            CommandDefinition {
                handler: Box::new(handler),
                usage,
            },
        );

        Ok(())
    }

    pub(crate) fn resolve(&self, name: &str) -> Result<&dyn Command, CommandError> {
        self.commands
            .get(name)
            .map(|definition| definition.handler.as_ref())
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))
    }

    pub(crate) fn describe(&self, name: &str) -> Result<&Usage, CommandError> {
        self.commands
            .get(name)
            .map(|definition| &definition.usage)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))
    }

    /// Every command with its usage, ordered by name.
    pub(crate) fn describe_all(&self) -> Vec<(&str, &Usage)> {
        let mut all: Vec<(&str, &Usage)> = self
            .commands
            .iter()
            .map(|(name, definition)| (name.as_str(), &definition.usage))
            .collect();
        all.sort_by(|a, b| a.0.cmp(b.0));
        all
    }
}

/// A command line split into its verb and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedCommand {
    pub(crate) verb: String,
    pub(crate) args: Vec<String>,
}

impl ParsedCommand {
    /// Splits `line` on whitespace. Returns `None` for a blank line.
    pub(crate) fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace().map(str::to_string);
        let verb = tokens.next()?;
        Some(Self {
            verb,
            args: tokens.collect(),
        })
    }
}

/// Runs `line`, returning the typed error to the caller.
///
/// A blank line does nothing.
pub(crate) fn execute(ctx: &mut CommandContext<'_>, line: &str) -> Result<(), CommandError> {
    let Some(parsed) = ParsedCommand::parse(line) else {
        return Ok(());
    };

    let registry = ctx.registry;
    let command = registry.resolve(&parsed.verb)?;

    debug!(verb = %parsed.verb, args = ?parsed.args, "dispatching command");

    command.invoke(ctx, &parsed.args)
}

/// Runs `line`, reporting any failure to the output panel.
///
/// Returns `true` if the command ran without error.
pub(crate) fn dispatch(ctx: &mut CommandContext<'_>, line: &str) -> bool {
    match execute(ctx, line) {
        Ok(()) => true,
        Err(e) => {
            warn!(command = %line, error = %e, "command failed");
            ctx.output.report(&e);
            false
        }
    }
}

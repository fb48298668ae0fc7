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

//! Command-line input logic and state management.
//!
//! The command line is opened with `:` (or by a command asking for more
//! input, in which case it opens prefilled). While it is open every key is
//! delegated to the text input component; `Enter` submits the trimmed line
//! to the caller and `Esc` abandons it. Submitted lines are kept in a
//! history that `Up` and `Down` walk through. Pasted text is inserted at
//! the cursor while the line is open.

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, InputRequest, backend::crossterm::EventHandler};

const MAX_HISTORY: usize = 100;

/// The outcome of offering an event to the command line.
#[derive(Debug, PartialEq)]
pub(crate) enum CommanderAction {
    /// The command line is closed and did not want the event.
    Ignored,
    /// The event was consumed.
    Handled,
    /// A command line was entered.
    Submit(String),
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
    history: Vec<String>,
    history_index: Option<usize>,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
            history: Vec::new(),
            history_index: None,
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Open the command line with `text` already entered.
    pub(crate) fn open(&mut self, text: &str) {
        self.active = true;
        self.history_index = None;
        self.input = Input::new(text.to_string());
    }

    pub(crate) fn close(&mut self) {
        self.active = false;
        self.history_index = None;
        self.input.reset();
    }

    pub(crate) fn handle_event(&mut self, event: &Event) -> CommanderAction {
        let key_event = match event {
            Event::Key(key_event) => key_event,
            Event::Paste(text) if self.active => {
                self.paste(text);
                return CommanderAction::Handled;
            }
            _ => return CommanderAction::Ignored,
        };

        if !self.active {
            return match key_event.code {
                KeyCode::Char(':') => {
                    self.open("");
                    CommanderAction::Handled
                }
                _ => CommanderAction::Ignored,
            };
        }

        match key_event.code {
            KeyCode::Esc => {
                self.close();
                CommanderAction::Handled
            }

            KeyCode::Enter => {
                let line = self.input.value().trim().to_string();
                self.close();
                if line.is_empty() {
                    return CommanderAction::Handled;
                }
                self.remember(&line);
                CommanderAction::Submit(line)
            }

            KeyCode::Up => {
                self.recall_previous();
                CommanderAction::Handled
            }

            KeyCode::Down => {
                self.recall_next();
                CommanderAction::Handled
            }

            _ => {
                // Delegate all other key events to the managed input component.
                self.input.handle_event(event);
                CommanderAction::Handled
            }
        }
    }

    fn paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.input.handle(InputRequest::InsertChar(c));
        }
    }

    fn remember(&mut self, line: &str) {
        if self.history.last().map(String::as_str) != Some(line) {
            self.history.push(line.to_string());
        }
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }
    }

    fn recall_previous(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            Some(0) => 0,
            Some(index) => index - 1,
            None => self.history.len() - 1,
        };
        self.history_index = Some(index);
        self.input = Input::new(self.history[index].clone());
    }

    fn recall_next(&mut self) {
        match self.history_index {
            Some(index) if index + 1 < self.history.len() => {
                self.history_index = Some(index + 1);
                self.input = Input::new(self.history[index + 1].clone());
            }
            Some(_) => {
                self.history_index = None;
                self.input.reset();
            }
            None => {}
        }
    }
}

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

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::commander::{Commander, CommanderAction};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(commander: &mut Commander, text: &str) {
    for c in text.chars() {
        commander.handle_event(&key(KeyCode::Char(c)));
    }
}

#[test]
fn given_closed_commander_when_colon_pressed_then_it_opens() {
    let mut commander = Commander::new();

    assert_eq!(commander.handle_event(&key(KeyCode::Char('x'))), CommanderAction::Ignored);
    assert_eq!(commander.handle_event(&key(KeyCode::Char(':'))), CommanderAction::Handled);
    assert!(commander.active());
}

#[test]
fn given_typed_line_when_enter_pressed_then_trimmed_line_is_submitted() {
    let mut commander = Commander::new();
    commander.handle_event(&key(KeyCode::Char(':')));
    type_text(&mut commander, " volume 50 ");

    let action = commander.handle_event(&key(KeyCode::Enter));

    assert_eq!(action, CommanderAction::Submit("volume 50".to_string()));
    assert!(!commander.active());
    assert_eq!(commander.input.value(), "");
}

#[test]
fn given_prefilled_line_when_typing_then_text_is_appended() {
    let mut commander = Commander::new();
    commander.open("open ");
    type_text(&mut commander, "a.mkv");

    let action = commander.handle_event(&key(KeyCode::Enter));

    assert_eq!(action, CommanderAction::Submit("open a.mkv".to_string()));
}

#[test]
fn given_history_when_up_and_down_pressed_then_previous_lines_are_recalled() {
    let mut commander = Commander::new();
    for line in ["stop", "volume 10"] {
        commander.open("");
        type_text(&mut commander, line);
        commander.handle_event(&key(KeyCode::Enter));
    }

    commander.open("");
    commander.handle_event(&key(KeyCode::Up));
    assert_eq!(commander.input.value(), "volume 10");
    commander.handle_event(&key(KeyCode::Up));
    assert_eq!(commander.input.value(), "stop");
    commander.handle_event(&key(KeyCode::Up));
    assert_eq!(commander.input.value(), "stop");
    commander.handle_event(&key(KeyCode::Down));
    assert_eq!(commander.input.value(), "volume 10");
    commander.handle_event(&key(KeyCode::Down));
    assert_eq!(commander.input.value(), "");
}

#[test]
fn given_open_commander_when_escape_pressed_then_line_is_abandoned() {
    let mut commander = Commander::new();
    commander.open("jump ");

    assert_eq!(commander.handle_event(&key(KeyCode::Esc)), CommanderAction::Handled);
    assert!(!commander.active());
    assert_eq!(commander.input.value(), "");
}

#[test]
fn given_commander_when_text_pasted_then_only_an_open_line_takes_it() {
    let mut commander = Commander::new();
    let paste = Event::Paste("a.mkv\n".to_string());

    assert_eq!(commander.handle_event(&paste), CommanderAction::Ignored);

    commander.open("open ");
    assert_eq!(commander.handle_event(&paste), CommanderAction::Handled);
    assert_eq!(commander.input.value(), "open a.mkv");
}

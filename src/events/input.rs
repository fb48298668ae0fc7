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

//! Keyboard, mouse and paste input handling.
//!
//! Keys go to the command line first when it is open, otherwise they are
//! translated to a chord and looked up in the shortcut table. Left-button
//! drags drive the gesture recognizer. Text pasted (or a file dropped) onto
//! the terminal is opened unless the command line takes it.
//!
//! Routing only decides what should happen, see [`InputAction`]. Running the
//! resulting command is left to the application.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tracing::debug;

use crate::{
    App,
    commander::{Commander, CommanderAction},
    config::DisplayConfig,
    gesture::{Clock, GestureKind, GestureRecognizer, SystemClock, WindowControl},
    player::{MediaPlayer, Playback, PlayerState},
    render::LayoutAreas,
    shortcuts::{ShortcutTable, translate_key_event},
    view::ViewState,
    window::OverlayWindow,
};

const WHEEL_VOLUME_STEP: &str = "5";

/// The longest gap between the presses of a double click.
pub(crate) const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

/// What the application should do in response to an input event.
#[derive(Debug, PartialEq)]
pub(crate) enum InputAction {
    /// Run a command line.
    Run(String),
    /// Open a location exactly as given, spaces included.
    Open(String),
}

/// Remembers the last left press to recognise a double click.
#[derive(Debug, Default)]
pub(crate) struct ClickTracker {
    last: Option<(Instant, Position)>,
}

impl ClickTracker {
    /// Records a left press, returning `true` when it completes a double
    /// click on the same cell.
    pub(crate) fn press(&mut self, now: Instant, cell: Position) -> bool {
        let double = self.last.is_some_and(|(at, last_cell)| {
            last_cell == cell && now.saturating_duration_since(at) <= DOUBLE_CLICK_INTERVAL
        });
        self.last = if double { None } else { Some((now, cell)) };
        double
    }
}

/// The application state that input routing reads and updates.
pub(crate) struct InputRouter<'a, P, W, C = SystemClock> {
    pub(crate) view: &'a mut ViewState,
    pub(crate) commander: &'a mut Commander,
    pub(crate) shortcuts: &'a ShortcutTable,
    pub(crate) gestures: &'a mut GestureRecognizer<P, W, C>,
    pub(crate) clicks: &'a mut ClickTracker,
    pub(crate) player: &'a P,
    pub(crate) layout: LayoutAreas,
    pub(crate) display: DisplayConfig,
    pub(crate) gestures_enabled: bool,
}

impl<P: Playback, W: WindowControl, C: Clock> InputRouter<'_, P, W, C> {
    pub(crate) fn key(&mut self, key: KeyEvent) -> Option<InputAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        // Any key brings the interface back after the boss key.
        if self.view.hidden {
            self.view.hidden = false;
            return None;
        }

        match self.commander.handle_event(&Event::Key(key)) {
            CommanderAction::Handled => return None,
            CommanderAction::Submit(line) => return Some(InputAction::Run(line)),
            CommanderAction::Ignored => {}
        }

        let chord = translate_key_event(key.modifiers, key.code)?;

        let Some(binding) = self.shortcuts.lookup(&chord) else {
            debug!(%chord, "unbound key");
            return None;
        };

        debug!(%chord, command = %binding.command, "shortcut");
        Some(InputAction::Run(binding.command.clone()))
    }

    pub(crate) fn mouse(&mut self, mouse: MouseEvent, now: Instant) -> Option<InputAction> {
        if self.view.hidden {
            return None;
        }

        let cell = Position::new(mouse.column, mouse.row);
        let position = self.display.to_pixels(mouse.column, mouse.row);
        let in_player = self.layout.player.contains(cell);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let on_overlay = self.layout.overlay.is_some_and(|area| area.contains(cell));
                let double_click = self.clicks.press(now, cell);

                if double_click && in_player && !on_overlay {
                    return Some(InputAction::Run("fullscreen".to_string()));
                }

                let kind = if on_overlay {
                    Some(GestureKind::Move)
                } else if self.gestures_enabled && in_player {
                    Some(GestureKind::SeekOrVolume)
                } else {
                    None
                };

                if let Some(kind) = kind {
                    if let Err(e) = self.gestures.begin(kind, position) {
                        debug!(error = %e, "gesture not started");
                    }
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) if self.gestures.is_active() => {
                if let Err(e) = self.gestures.process(position) {
                    debug!(error = %e, "drag ignored");
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Err(e) = self.gestures.end() {
                    debug!(error = %e, "release ignored");
                }
                None
            }
            MouseEventKind::Down(MouseButton::Right) => {
                let playing = self.player.status().state != PlayerState::Stopped;
                (playing && in_player).then(|| InputAction::Run("play_pause".to_string()))
            }
            MouseEventKind::ScrollUp => {
                Some(InputAction::Run(format!("volume +{}", WHEEL_VOLUME_STEP)))
            }
            MouseEventKind::ScrollDown => {
                Some(InputAction::Run(format!("volume -{}", WHEEL_VOLUME_STEP)))
            }
            _ => None,
        }
    }

    pub(crate) fn paste(&mut self, text: &str) -> Option<InputAction> {
        if self.view.hidden {
            return None;
        }

        if self.commander.handle_event(&Event::Paste(text.to_string())) == CommanderAction::Handled {
            return None;
        }

        dropped_location(text).map(InputAction::Open)
    }
}

/// The location in text pasted or dropped onto the terminal.
///
/// Terminals deliver a dropped file as its path, either quoted or with
/// escaped spaces, and some as a `file://` URL. Only the first line counts.
pub(crate) fn dropped_location(text: &str) -> Option<String> {
    let line = text.lines().map(str::trim).find(|line| !line.is_empty())?;

    let quoted = ['\'', '"']
        .into_iter()
        .find_map(|quote| line.strip_prefix(quote)?.strip_suffix(quote));

    let location = match quoted {
        Some(inner) => inner.to_string(),
        None => line.replace("\\ ", " "),
    };
    let location = match location.strip_prefix("file://") {
        Some(path) => path.to_string(),
        None => location,
    };

    Some(location).filter(|location| !location.is_empty())
}

fn router(app: &mut App) -> InputRouter<'_, MediaPlayer, OverlayWindow> {
    InputRouter {
        view: &mut app.view,
        commander: &mut app.commander,
        shortcuts: &app.shortcuts,
        gestures: &mut app.gestures,
        clicks: &mut app.clicks,
        player: &app.player,
        layout: app.layout,
        display: app.config.display,
        gestures_enabled: app.config.gestures,
    }
}

fn apply(app: &mut App, action: Option<InputAction>) {
    match action {
        Some(InputAction::Run(line)) => {
            app.run_command(&line);
        }
        Some(InputAction::Open(location)) => app.open_location(&location),
        None => {}
    }
}

pub(super) fn process_key_event(app: &mut App, key: KeyEvent) {
    let action = router(app).key(key);
    apply(app, action);
}

pub(super) fn process_mouse_event(app: &mut App, mouse: MouseEvent) {
    let action = router(app).mouse(mouse, Instant::now());
    apply(app, action);
}

pub(super) fn process_paste_event(app: &mut App, text: &str) {
    let action = router(app).paste(text);
    apply(app, action);
}

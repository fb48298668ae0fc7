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

//! Application events and the main event loop.
//!
//! Events arrive over a single channel from the input thread, the tick
//! thread, the player worker and shell command threads, and are processed
//! strictly in arrival order. The interface is redrawn after every event.

pub(crate) mod input;

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::{debug, error, warn};

use crate::{App, output::DEFAULT_SOURCE, player::PlayerState, render::draw};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Paste(String),
    Resize,

    PlayerStateChanged(PlayerState),
    PlaybackUpdated,
    FileChanged(String),
    TrackFinished,

    Output { source: String, text: String },

    Tick,

    Error(String),
    FatalError(String),
}

pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::Key(key) => input::process_key_event(app, key),
            AppEvent::Mouse(mouse) => input::process_mouse_event(app, mouse),
            AppEvent::Paste(text) => input::process_paste_event(app, &text),

            AppEvent::FileChanged(path) => app.playlist.mark_current(&path),
            AppEvent::TrackFinished => app.play_next_after_finish(),

            AppEvent::Output { source, text } => app.output.print(&source, text),

            AppEvent::Error(message) => {
                warn!(%message, "reported error");
                app.output.print(DEFAULT_SOURCE, message);
            }
            AppEvent::FatalError(message) => {
                error!(%message, "fatal error");
                return Err(anyhow!(message));
            }

            AppEvent::PlayerStateChanged(state) => debug!(?state, "player state changed"),

            AppEvent::Resize | AppEvent::PlaybackUpdated | AppEvent::Tick => {}
        }

        if app.view.quit {
            break;
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

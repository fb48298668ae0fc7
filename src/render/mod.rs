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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every processed event to provide a reactive user interface. Drawing also
//! records where the mouse-sensitive panels ended up, see [`LayoutAreas`].

mod commander;
mod icons;
mod output;
mod overlay;
mod player;
mod playlist;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
};

use crate::{
    App,
    render::{
        commander::draw_commander, output::draw_output, overlay::draw_overlay,
        player::draw_player, playlist::draw_playlist,
    },
};

const OUTPUT_HEIGHT: u16 = 8;
const PLAYER_HEIGHT: u16 = 7;

/// Screen areas from the last frame, used to hit-test mouse presses.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LayoutAreas {
    /// The now-playing panel, the surface for seek and volume gestures.
    pub(crate) player: Rect,
    /// The media information box, when visible.
    pub(crate) overlay: Option<Rect>,
}

/// Renders the user interface to the terminal frame.
///
/// It handles:
///
/// * **Layout**: Partitioning the screen into the playlist, the optional
///   output panel, the now-playing panel and the command line.
/// * **Overlay**: The floating media information box, drawn last.
/// * **Boss key**: A blank screen while the interface is hidden.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if app.view.hidden {
        f.render_widget(Block::default().style(Style::default().bg(app.theme.background_colour)), area);
        app.layout = LayoutAreas::default();
        return;
    }

    let player_height = if app.view.playlist_full { 0 } else { PLAYER_HEIGHT };
    let output_height = if app.view.show_output { OUTPUT_HEIGHT } else { 0 };

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(output_height),
            Constraint::Length(player_height),
            Constraint::Length(1),
        ])
        .split(area);

    if app.view.show_playlist {
        draw_playlist(f, outer[0], app);
    } else {
        draw_banner(f, outer[0], app);
    }

    if app.view.show_output {
        draw_output(f, outer[1], app);
    }

    if !app.view.playlist_full {
        draw_player(f, outer[2], app);
    }

    draw_commander(f, outer[3], app);

    let overlay = app
        .view
        .show_media_info
        .then(|| draw_overlay(f, area, app));

    app.layout = LayoutAreas {
        player: outer[2],
        overlay,
    };
}

fn draw_banner(f: &mut Frame, area: Rect, app: &App) {
    let banner = Paragraph::new(format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(app.theme.dim_text_colour)
                .add_modifier(Modifier::BOLD),
        );

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)])
        .split(area);

    f.render_widget(banner, middle[1]);
}

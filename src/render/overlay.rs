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

//! The floating media information box.
//!
//! The box is positioned in pixels, the same coordinate space the gesture
//! recognizer moves it in, and converted to cells when drawn.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{
    App,
    gesture::GestureKind,
    player::{Playback, PlayerState},
    util::format::format_time,
};

const OVERLAY_WIDTH: u16 = 48;
const OVERLAY_HEIGHT: u16 = 9;

/// Draw the media information box, returning the area it occupies.
pub(crate) fn draw_overlay(f: &mut Frame, area: Rect, app: &App) -> Rect {
    let rect = overlay_area(area, app);
    let status = app.player.status();
    let theme = &app.theme;

    let label = |name: &'static str| Span::styled(format!("{:<9}", name), Style::default().fg(theme.dim_text_colour));

    let state = match status.state {
        PlayerState::Playing => "playing",
        PlayerState::Paused => "paused",
        PlayerState::Stopped => "stopped",
    };

    let lines = vec![
        Line::from(vec![label("Title"), Span::raw(status.title.clone().unwrap_or_default())]),
        Line::from(vec![label("File"), Span::raw(status.path.clone().unwrap_or_default())]),
        Line::from(vec![label("State"), Span::raw(state)]),
        Line::from(vec![
            label("Time"),
            Span::raw(format!("{} / {}", format_time(status.time), format_time(status.duration))),
        ]),
        Line::from(vec![label("Volume"), Span::raw(format!("{}%", status.volume.round()))]),
        Line::from(vec![label("Speed"), Span::raw(format!("{:.2}x", status.speed))]),
    ];

    let border_colour = if app.gestures.kind() == Some(GestureKind::Move) {
        theme.gesture_colour
    } else {
        theme.accent_colour
    };

    let block = Block::default()
        .title(Span::styled(" Media info ", Style::default().add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_colour))
        .style(Style::default().bg(theme.background_colour).fg(theme.text_colour))
        .padding(Padding::horizontal(1));

    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);

    rect
}

/// Convert the pixel position of the box to a cell area kept inside `area`.
fn overlay_area(area: Rect, app: &App) -> Rect {
    let display = &app.config.display;
    let position = app.overlay.position();

    let width = OVERLAY_WIDTH.min(area.width);
    let height = OVERLAY_HEIGHT.min(area.height);

    let cell_width = i32::from(display.cell_width.max(1));
    let cell_height = i32::from(display.cell_height.max(1));

    let max_x = i32::from(area.width - width);
    let max_y = i32::from(area.height - height);

    let x = (position.x / cell_width).clamp(0, max_x) as u16;
    let y = (position.y / cell_height).clamp(0, max_y) as u16;

    Rect::new(area.x + x, area.y + y, width, height)
}

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

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    gesture::GesturePhase,
    player::{MAX_VOLUME, Playback, PlayerState},
    playlist::RepeatMode,
    render::icons::{
        ICON_FF, ICON_GESTURE, ICON_MUTED, ICON_PAUSE, ICON_PLAY, ICON_REPEAT, ICON_REPEAT_ONE,
        ICON_STOP, ICON_VOLUME_LOW, ICON_VOLUME_MEDIUM,
    },
    util::format::{display_name, format_time},
};

/// Draw the now-playing panel.
///
/// This panel is also the surface for seek and volume drag gestures, so an
/// indicator is shown while one is in progress.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let status = app.player.status();

    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(chunks[0]);

    let icon = match status.state {
        PlayerState::Playing => ICON_PLAY,
        PlayerState::Paused => ICON_PAUSE,
        PlayerState::Stopped => ICON_STOP,
    };

    let title = status
        .title
        .as_deref()
        .or(status.path.as_deref().map(display_name))
        .unwrap_or("Nothing playing");

    let track_line = Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
        Span::styled(title, Style::default().add_modifier(Modifier::BOLD)).fg(app.theme.accent_colour),
    ]);
    f.render_widget(Paragraph::new(track_line), info_chunks[0]);

    if status.state != PlayerState::Stopped {
        let remaining = (status.duration - status.time).max(0.0);

        let time_line = Line::from(vec![
            Span::styled(format_time(status.time), Style::default().add_modifier(Modifier::BOLD)).fg(app.theme.accent_colour),
            Span::styled(" / ", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
            Span::styled(format_time(status.duration), Style::default().add_modifier(Modifier::BOLD)).fg(app.theme.accent_colour),
            Span::styled(" (-", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
            Span::styled(format_time(remaining), Style::default().add_modifier(Modifier::BOLD)).fg(app.theme.accent_colour),
            Span::styled(")", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
        ]);

        f.render_widget(Paragraph::new(time_line).alignment(Alignment::Right), info_chunks[1]);
    }

    let control_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(chunks[2]);

    let repeat = match app.playlist.repeat {
        RepeatMode::Off => "",
        RepeatMode::Playlist => ICON_REPEAT,
        RepeatMode::This => ICON_REPEAT_ONE,
    };

    let mut flags = vec![Span::raw(format!("{} ", repeat))];
    if (status.speed - 1.0).abs() > f64::EPSILON {
        flags.push(Span::raw(format!("{} {:.2}x ", ICON_FF, status.speed)).fg(app.theme.dim_text_colour));
    }
    if let Some(phase) = app.gestures.phase().filter(|_| app.overlay.cursor_overridden()) {
        let label = match phase {
            GesturePhase::Undecided => "drag",
            GesturePhase::Seeking => "seek",
            GesturePhase::AdjustingVolume => "volume",
        };
        flags.push(Span::raw(format!("{} {}", ICON_GESTURE, label)).fg(app.theme.gesture_colour));
    }
    f.render_widget(Paragraph::new(Line::from(flags)), control_chunks[0]);

    let vol_ratio = (status.volume / MAX_VOLUME).clamp(0.0, 1.0);

    let volume_icon = match status.volume {
        v if v <= 0.0 => ICON_MUTED,
        v if v < 50.0 => ICON_VOLUME_LOW,
        _ => ICON_VOLUME_MEDIUM,
    };

    let volume_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(5)])
        .split(control_chunks[1]);

    f.render_widget(Paragraph::new(volume_icon), volume_layout[0]);

    let volume_gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.accent_colour).bg(app.theme.gauge_track_colour))
        .ratio(vol_ratio)
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, volume_layout[1]);

    let volume_label = Paragraph::new(format!(" {}%", status.volume.round() as u16))
        .alignment(Alignment::Right)
        .fg(Color::White);
    f.render_widget(volume_label, volume_layout[2]);

    let position = status.position().unwrap_or(0.0).clamp(0.0, 1.0);

    let position_gauge = Gauge::default()
        .gauge_style(Style::default()
            .fg(app.theme.accent_colour)
            .bg(app.theme.gauge_track_colour)
        )
        .ratio(position)
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[4]);
}

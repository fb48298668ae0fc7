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
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

use crate::{App, playlist::RepeatMode, util::format::display_name};

pub(crate) fn draw_playlist(f: &mut Frame, area: Rect, app: &App) {
    let playlist = &app.playlist;
    let theme = &app.theme;

    let items: Vec<ListItem> = playlist
        .files()
        .iter()
        .enumerate()
        .map(|(index, file)| {
            let style = if Some(index) == playlist.current_index() {
                Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_colour)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>4} ", index + 1), Style::default().fg(theme.dim_text_colour)),
                Span::styled(display_name(file), style),
            ]))
        })
        .collect();

    let mut title = String::from(" Playlist ");
    match playlist.repeat {
        RepeatMode::Off => {}
        RepeatMode::Playlist => title.push_str("[repeat] "),
        RepeatMode::This => title.push_str("[repeat this] "),
    }
    if !playlist.show_all() {
        title.push_str("[same type] ");
    }
    if !playlist.search_text().is_empty() {
        title.push_str(&format!("/{} ", playlist.search_text()));
    }

    let list = List::new(items)
        .block(Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border_colour))
        )
        .highlight_style(Style::default().bg(theme.selection_bg))
        .highlight_symbol(">> ");

    let mut state = ListState::default().with_selected(playlist.selected_index());

    f.render_stateful_widget(list, area, &mut state);
}

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
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

/// Draw the most recent output lines, newest at the bottom.
pub(crate) fn draw_output(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Output ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border_colour));

    let visible = block.inner(area).height as usize;

    let mut lines: Vec<Line> = app
        .output
        .lines()
        .rev()
        .take(visible)
        .map(|line| Line::styled(line.to_string(), Style::default().fg(app.theme.text_colour)))
        .collect();
    lines.reverse();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

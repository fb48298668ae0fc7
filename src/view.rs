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

//! Presentation flags toggled by commands and read by the renderer.

#[derive(Debug)]
pub(crate) struct ViewState {
    pub(crate) show_playlist: bool,
    /// The playlist takes the whole main area.
    pub(crate) playlist_full: bool,
    pub(crate) show_output: bool,
    pub(crate) show_media_info: bool,
    /// Everything hidden by the boss key until the next key press.
    pub(crate) hidden: bool,
    pub(crate) quit: bool,
    /// Text to open the command line with, set by verbs that would
    /// otherwise show a dialog.
    pub(crate) prompt: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            show_playlist: true,
            playlist_full: false,
            show_output: false,
            show_media_info: false,
            hidden: false,
            quit: false,
            prompt: None,
        }
    }
}

impl ViewState {
    pub(crate) fn prompt(&mut self, text: &str) {
        self.prompt = Some(text.to_string());
    }
}

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

//! Built-in key bindings.
//!
//! These are loaded into the shortcut table before user overrides are
//! applied, and bindings that still match them are not written back to the
//! settings file.

use std::{collections::HashMap, sync::LazyLock};

use crate::shortcuts::Binding;

const DEFAULT_BINDINGS: &[(&str, &str, &str)] = &[
    ("Ctrl++", "mpv add sub-scale +0.02", "Increase sub size"),
    ("Ctrl+-", "mpv add sub-scale -0.02", "Decrease sub size"),
    ("Ctrl+W", "mpv osd-msg cycle sub-visibility", "Toggle subtitle visibility"),
    ("Ctrl+R", "mpv set time-pos 0", "Restart playback"),
    ("PgDown", "mpv add chapter +1", "Go to next chapter"),
    ("PgUp", "mpv add chapter -1", "Go to previous chapter"),
    ("Right", "mpv seek +5", "Seek forwards by 5 sec"),
    ("Left", "mpv seek -5", "Seek backwards by 5 sec"),
    ("Shift+Left", "mpv frame_back_step", "Frame step backwards"),
    ("Shift+Right", "mpv frame_step", "Frame step"),
    ("Ctrl+T", "screenshot subtitles", "Take screenshot with subtitles"),
    ("Ctrl+Shift+T", "screenshot", "Take screenshot without subtitles"),
    ("Ctrl+Down", "volume -5", "Decrease volume"),
    ("Ctrl+Up", "volume +5", "Increase volume"),
    ("Ctrl+Shift+Up", "speed +0.25", "Increase playback speed by 25%"),
    ("Ctrl+Shift+Down", "speed -0.25", "Decrease playback speed by 25%"),
    ("Ctrl+Shift+R", "speed 1.0", "Reset speed"),
    ("Alt+Return", "fullscreen", "Toggle fullscreen"),
    ("Tab", "media_info", "View media information"),
    ("Ctrl+J", "jump", "Jump to time"),
    ("Ctrl+O", "open", "Open a file"),
    ("Ctrl+Q", "quit", "Quit"),
    ("Ctrl+Right", "playlist play +1", "Play next file"),
    ("Ctrl+Left", "playlist play -1", "Play previous file"),
    ("Ctrl+S", "stop", "Stop playback"),
    ("Ctrl+F", "playlist toggle", "Toggle playlist visibility"),
    ("Ctrl+Z", "open_recent 0", "Open the last played file"),
    ("Ctrl+G", "output", "Access command-line"),
    ("F1", "help", "List commands"),
    ("Space", "play_pause", "Play/Pause"),
    ("Alt+1", "fitwindow", "Fit the window to the video"),
    ("Alt+2", "fitwindow 50", "Fit window to 50%"),
    ("Alt+3", "fitwindow 75", "Fit window to 75%"),
    ("Alt+4", "fitwindow 100", "Fit window to 100%"),
    ("Alt+5", "fitwindow 150", "Fit window to 150%"),
    ("Alt+6", "fitwindow 200", "Fit window to 200%"),
    ("Esc", "boss", "Boss key"),
    ("Down", "playlist select +1", "Select next file on playlist"),
    ("Up", "playlist select -1", "Select previous file on playlist"),
    ("Return", "playlist play", "Play selected file on playlist"),
    ("Del", "playlist remove", "Remove selected file from playlist"),
];

/// The default bindings keyed by chord, built on first use and never mutated.
pub(crate) static DEFAULT_SHORTCUTS: LazyLock<HashMap<String, Binding>> = LazyLock::new(|| {
    DEFAULT_BINDINGS
        .iter()
        .map(|(chord, command, description)| {
            (chord.to_string(), Binding::new(*command, *description))
        })
        .collect()
});

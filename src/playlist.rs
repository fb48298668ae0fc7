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

//! Playlist management.
//!
//! This module provides state for the playlist: the files of the directory
//! that the current file was opened from, which of them is playing, which is
//! selected in the playlist panel, and what happens when a file finishes.
//!
//! The panel shows a filtered view of the directory. A search string matches
//! file names without regard to case, and the view can be narrowed to files
//! sharing the extension of the current file. The current file is always
//! part of the view.

use std::path::{Path, PathBuf};

use rand::{rng, seq::SliceRandom};
use walkdir::WalkDir;

use crate::util::format::display_name;

const MEDIA_EXTENSIONS: &[&str] = &[
    "3gp", "aac", "avi", "flac", "flv", "m2ts", "m4a", "m4v", "mka", "mkv", "mov", "mp3", "mp4",
    "mpeg", "mpg", "ogg", "ogm", "ogv", "opus", "rm", "rmvb", "ts", "vob", "wav", "webm", "wma",
    "wmv",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum RepeatMode {
    #[default]
    Off,
    Playlist,
    This,
}

#[derive(Debug)]
pub(crate) struct Playlist {
    /// Directory the entries were listed from, `None` for a URL.
    directory: Option<PathBuf>,
    entries: Vec<String>,
    files: Vec<String>,
    current: Option<usize>,
    selected: Option<usize>,
    search: String,
    show_all: bool,
    pub(crate) repeat: RepeatMode,
}

impl Default for Playlist {
    fn default() -> Self {
        Self {
            directory: None,
            entries: vec![],
            files: vec![],
            current: None,
            selected: None,
            search: String::new(),
            show_all: true,
            repeat: RepeatMode::Off,
        }
    }
}

fn is_media_file(path: &Path) -> bool {
    extension(path).is_some_and(|ext| {
        MEDIA_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    })
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

impl Playlist {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replaces the playlist with the media files next to `location`.
    ///
    /// A directory contributes its media files, a local file contributes
    /// its siblings and becomes current, anything else (a URL, a missing
    /// path) becomes a single-entry playlist.
    pub(crate) fn populate(&mut self, location: &str) {
        let path = Path::new(location);

        let (dir, current) = if path.is_dir() {
            (Some(path), None)
        } else if path.is_file() {
            (path.parent(), Some(location))
        } else {
            (None, Some(location))
        };

        let mut entries: Vec<String> = match dir {
            Some(dir) => list_media_files(dir),
            None => vec![],
        };
        entries.sort();

        if let Some(current) = current {
            if !entries.iter().any(|file| file == current) {
                entries.push(current.to_string());
            }
        }

        self.directory = dir.map(Path::to_path_buf);
        self.entries = entries;
        self.rebuild(current.map(str::to_string), None);
    }

    /// Lists the directory again, keeping the current and selected files.
    ///
    /// Returns `false` when the playlist did not come from a directory.
    pub(crate) fn refresh(&mut self) -> bool {
        let Some(dir) = &self.directory else {
            return false;
        };

        let mut entries = list_media_files(dir);
        entries.sort();
        self.entries = entries;

        let (current, selected) = self.remembered();
        self.rebuild(current, selected);
        true
    }

    /// Shows only the files whose name contains `text`. An empty `text`
    /// shows everything again.
    pub(crate) fn search(&mut self, text: &str) {
        self.search = text.to_string();
        let (current, selected) = self.remembered();
        self.rebuild(current, selected);
    }

    /// Switches between every media file and only the files with the
    /// current file's extension. Returns whether every file is now shown.
    pub(crate) fn toggle_show_all(&mut self) -> bool {
        self.show_all = !self.show_all;
        let (current, selected) = self.remembered();
        self.rebuild(current, selected);
        self.show_all
    }

    pub(crate) fn show_all(&self) -> bool {
        self.show_all
    }

    pub(crate) fn search_text(&self) -> &str {
        &self.search
    }

    pub(crate) fn files(&self) -> &[String] {
        &self.files
    }

    pub(crate) fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub(crate) fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub(crate) fn current(&self) -> Option<&str> {
        self.current.and_then(|i| self.files.get(i)).map(String::as_str)
    }

    pub(crate) fn selected(&self) -> Option<&str> {
        self.selected.and_then(|i| self.files.get(i)).map(String::as_str)
    }

    /// Records that `path` is now playing, if it is on the playlist.
    pub(crate) fn mark_current(&mut self, path: &str) {
        if let Some(index) = self.files.iter().position(|file| file == path) {
            self.current = Some(index);
        } else if self.entries.iter().any(|file| file == path) {
            let selected = self.selected().map(str::to_string);
            self.rebuild(Some(path.to_string()), selected);
        }
    }

    /// Moves the selection by `step` rows, stopping at either end.
    ///
    /// Returns `None` for an empty playlist or a step too large to apply.
    pub(crate) fn select_step(&mut self, step: i64) -> Option<&str> {
        let from = self.selected.or(self.current).unwrap_or(0);
        let target = offset(from, step)?;
        let target = self.clamped(target)?;
        self.selected = Some(target);
        self.selected()
    }

    /// Selects the row at `index` (zero based). Returns `None` if out of range.
    pub(crate) fn select_index(&mut self, index: usize) -> Option<&str> {
        if index >= self.files.len() {
            return None;
        }
        self.selected = Some(index);
        self.selected()
    }

    /// Makes the file `step` rows from the current one current. Wraps around
    /// only when the whole playlist repeats.
    pub(crate) fn play_step(&mut self, step: i64) -> Option<&str> {
        if self.files.is_empty() {
            return None;
        }

        let from = self.current.or(self.selected).unwrap_or(0);
        let len = i64::try_from(self.files.len()).ok()?;
        let target = offset(from, step)?;

        let target = if self.repeat == RepeatMode::Playlist {
            target.rem_euclid(len)
        } else if (0..len).contains(&target) {
            target
        } else {
            return None;
        };

        self.play_index(usize::try_from(target).ok()?)
    }

    /// Makes the file at `index` current and selected.
    pub(crate) fn play_index(&mut self, index: usize) -> Option<&str> {
        if index >= self.files.len() {
            return None;
        }
        self.current = Some(index);
        self.selected = Some(index);
        self.current()
    }

    /// Makes the selected file current.
    pub(crate) fn play_selected(&mut self) -> Option<&str> {
        let index = self.selected?;
        self.play_index(index)
    }

    /// The file to play after the current one finished, by repeat mode.
    pub(crate) fn next_after_finish(&mut self) -> Option<&str> {
        match self.repeat {
            RepeatMode::This => self.current(),
            RepeatMode::Playlist | RepeatMode::Off => self.play_step(1),
        }
    }

    /// Removes the selected file. The current file can't be removed.
    pub(crate) fn remove_selected(&mut self) -> Option<String> {
        let index = self.selected?;
        if Some(index) == self.current {
            return None;
        }

        let removed = self.files.remove(index);
        self.entries.retain(|file| *file != removed);

        if let Some(current) = self.current {
            if current > index {
                self.current = Some(current - 1);
            }
        }

        self.selected = if self.files.is_empty() {
            None
        } else {
            Some(index.min(self.files.len() - 1))
        };

        Some(removed)
    }

    /// Shuffles the playlist and moves the current file to the top.
    pub(crate) fn shuffle(&mut self) {
        let (current, selected) = self.remembered();

        let mut rng = rng();
        self.files.shuffle(&mut rng);

        if let Some(index) = current
            .as_ref()
            .and_then(|current| self.files.iter().position(|file| file == current))
        {
            self.files.swap(0, index);
            self.current = Some(0);
        }

        self.selected = selected
            .and_then(|selected| self.files.iter().position(|file| *file == selected))
            .or(self.current);
    }

    fn clamped(&self, index: i64) -> Option<usize> {
        let last = self.files.len().checked_sub(1)?;
        let last = i64::try_from(last).ok()?;
        usize::try_from(index.clamp(0, last)).ok()
    }

    fn remembered(&self) -> (Option<String>, Option<String>) {
        (
            self.current().map(str::to_string),
            self.selected().map(str::to_string),
        )
    }

    /// Recomputes the visible files from the entries and the filters, then
    /// finds `current` and `selected` again.
    fn rebuild(&mut self, current: Option<String>, selected: Option<String>) {
        let needle = self.search.to_lowercase();
        let suffix = current.as_deref().and_then(|file| extension(Path::new(file)));

        let files: Vec<String> = self
            .entries
            .iter()
            .filter(|file| {
                if current.as_deref() == Some(file.as_str()) {
                    return true;
                }
                let name_matches = display_name(file).to_lowercase().contains(&needle);
                let suffix_matches = self.show_all
                    || suffix.is_none_or(|suffix| {
                        extension(Path::new(file)).is_some_and(|ext| ext.eq_ignore_ascii_case(suffix))
                    });
                name_matches && suffix_matches
            })
            .cloned()
            .collect();

        let position = |wanted: &str| files.iter().position(|file| file == wanted);
        self.current = current.as_deref().and_then(position);
        self.selected = selected
            .as_deref()
            .and_then(position)
            .or(self.current)
            .or(if files.is_empty() { None } else { Some(0) });
        self.files = files;
    }
}

/// `from + step` as a signed row, `None` when it does not fit.
fn offset(from: usize, step: i64) -> Option<i64> {
    i64::try_from(from).ok()?.checked_add(step)
}

/// Media files directly inside `dir`, named the way `dir` was. A bare file
/// name has an empty parent, which means the working directory.
fn list_media_files(dir: &Path) -> Vec<String> {
    let bare = dir.as_os_str().is_empty();
    let root = if bare { Path::new(".") } else { dir };

    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_media_file(entry.path()))
        .map(|entry| {
            let path = entry.path();
            let path = if bare { path.strip_prefix(root).unwrap_or(path) } else { path };
            path.to_string_lossy().into_owned()
        })
        .collect()
}

/// Most-recent-first list of opened files.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecentFiles {
    files: Vec<String>,
    max: usize,
}

impl RecentFiles {
    pub(crate) fn new(files: Vec<String>, max: usize) -> Self {
        let mut recent = Self { files: vec![], max };
        for file in files.into_iter().rev() {
            recent.push(&file);
        }
        recent
    }

    pub(crate) fn push(&mut self, file: &str) {
        self.files.retain(|f| f != file);
        self.files.insert(0, file.to_string());
        self.files.truncate(self.max);
    }

    pub(crate) fn get(&self, index: usize) -> Option<&str> {
        self.files.get(index).map(String::as_str)
    }

    pub(crate) fn files(&self) -> &[String] {
        &self.files
    }
}

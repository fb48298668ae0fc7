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

//! Shared fixtures for the unit tests.
//!
//! The doubles record what they were asked to do so that tests can assert on
//! the calls made against the playback engine and the window.

mod commander;
mod commands;

use std::{
    cell::{Cell, RefCell},
    fs,
    path::{Path, PathBuf},
    rc::Rc,
    sync::mpsc::{self, Receiver, Sender},
    time::{Duration, Instant},
};

use anyhow::{Result, bail};

use crate::{
    command::{self, CommandContext, CommandRegistry},
    error::CommandError,
    events::AppEvent,
    gesture::{Clock, Point, WindowControl},
    output::Output,
    player::{PlaybackStatus, Playback, PlayerState},
    playlist::{Playlist, RecentFiles},
    shortcuts::ShortcutTable,
    view::ViewState,
};

/// A call made against [`MockPlayer`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    LoadFile(String),
    TogglePause,
    Pause,
    Stop,
    Seek(f64),
    SetVolume(f64),
    SetSpeed(f64),
    Screenshot(bool),
    AddSubtitles(String),
    FitWindow(u32),
    ToggleFullscreen,
    Command(Vec<String>),
}

/// A playback engine that records calls and reports a settable status.
#[derive(Clone, Default)]
pub(crate) struct MockPlayer {
    status: Rc<RefCell<PlaybackStatus>>,
    calls: Rc<RefCell<Vec<Call>>>,
    failing: Rc<Cell<bool>>,
}

impl MockPlayer {
    pub(crate) fn playing(time: f64, duration: f64, volume: f64) -> Self {
        let player = Self::default();
        player.set_status(PlaybackStatus {
            state: PlayerState::Playing,
            title: Some("Test".to_string()),
            path: Some("/media/test.mkv".to_string()),
            time,
            duration,
            volume,
            speed: 1.0,
        });
        player
    }

    pub(crate) fn set_status(&self, status: PlaybackStatus) {
        *self.status.borrow_mut() = status;
    }

    pub(crate) fn set_state(&self, state: PlayerState) {
        self.status.borrow_mut().state = state;
    }

    /// Make every subsequent call fail.
    pub(crate) fn fail_calls(&self) {
        self.failing.set(true);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn last_call(&self) -> Option<Call> {
        self.calls.borrow().last().cloned()
    }

    fn record(&self, call: Call) -> Result<()> {
        if self.failing.get() {
            bail!("engine unavailable");
        }
        self.calls.borrow_mut().push(call);
        Ok(())
    }
}

impl Playback for MockPlayer {
    fn status(&self) -> PlaybackStatus {
        self.status.borrow().clone()
    }

    fn load_file(&self, path: &str) -> Result<()> {
        self.record(Call::LoadFile(path.to_string()))
    }

    fn toggle_pause(&self) -> Result<()> {
        self.record(Call::TogglePause)
    }

    fn pause(&self) -> Result<()> {
        self.record(Call::Pause)
    }

    fn stop(&self) -> Result<()> {
        self.record(Call::Stop)
    }

    fn seek(&self, seconds: f64) -> Result<()> {
        self.record(Call::Seek(seconds))
    }

    fn set_volume(&self, level: f64) -> Result<()> {
        self.record(Call::SetVolume(level))
    }

    fn set_speed(&self, ratio: f64) -> Result<()> {
        self.record(Call::SetSpeed(ratio))
    }

    fn screenshot(&self, subtitles: bool) -> Result<()> {
        self.record(Call::Screenshot(subtitles))
    }

    fn add_subtitles(&self, path: &str) -> Result<()> {
        self.record(Call::AddSubtitles(path.to_string()))
    }

    fn fit_window(&self, percent: u32) -> Result<()> {
        self.record(Call::FitWindow(percent))
    }

    fn toggle_fullscreen(&self) -> Result<()> {
        self.record(Call::ToggleFullscreen)
    }

    fn command(&self, args: &[String]) -> Result<()> {
        self.record(Call::Command(args.to_vec()))
    }
}

/// A clock that only moves when told to.
#[derive(Clone)]
pub(crate) struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub(crate) fn advance(&self, millis: u64) {
        self.now.set(self.now.get() + Duration::from_millis(millis));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// A window that records every move and cursor change.
#[derive(Clone, Default)]
pub(crate) struct RecordingWindow {
    position: Rc<Cell<Point>>,
    moves: Rc<RefCell<Vec<Point>>>,
    cursor: Rc<RefCell<Vec<bool>>>,
}

impl RecordingWindow {
    pub(crate) fn at(position: Point) -> Self {
        let window = Self::default();
        window.position.set(position);
        window
    }

    pub(crate) fn moves(&self) -> Vec<Point> {
        self.moves.borrow().clone()
    }

    pub(crate) fn cursor_changes(&self) -> Vec<bool> {
        self.cursor.borrow().clone()
    }
}

impl WindowControl for RecordingWindow {
    fn position(&self) -> Point {
        self.position.get()
    }

    fn move_to(&self, position: Point) {
        self.position.set(position);
        self.moves.borrow_mut().push(position);
    }

    fn override_cursor(&self, active: bool) {
        self.cursor.borrow_mut().push(active);
    }
}

/// The collaborators of a command dispatch, owned so that a
/// [`CommandContext`] can be borrowed from them.
pub(crate) struct Fixture {
    pub(crate) registry: CommandRegistry,
    pub(crate) player: MockPlayer,
    pub(crate) playlist: Playlist,
    pub(crate) recent: RecentFiles,
    pub(crate) shortcuts: ShortcutTable,
    pub(crate) view: ViewState,
    pub(crate) output: Output,
    pub(crate) event_tx: Sender<AppEvent>,
    pub(crate) event_rx: Receiver<AppEvent>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::with_player(MockPlayer::default())
    }

    pub(crate) fn with_player(player: MockPlayer) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            registry: CommandRegistry::with_builtins().expect("builtins register"),
            player,
            playlist: Playlist::new(),
            recent: RecentFiles::new(vec![], 5),
            shortcuts: ShortcutTable::with_defaults(),
            view: ViewState::default(),
            output: Output::new(),
            event_tx,
            event_rx,
        }
    }

    pub(crate) fn context(&mut self) -> CommandContext<'_> {
        CommandContext {
            registry: &self.registry,
            player: &self.player,
            playlist: &mut self.playlist,
            recent: &mut self.recent,
            shortcuts: &mut self.shortcuts,
            view: &mut self.view,
            output: &mut self.output,
            event_tx: &self.event_tx,
        }
    }

    /// Runs `line`, returning the error instead of reporting it.
    pub(crate) fn execute(&mut self, line: &str) -> Result<(), CommandError> {
        let mut ctx = self.context();
        command::execute(&mut ctx, line)
    }

    /// Runs `line` the way key presses and the command line do.
    pub(crate) fn dispatch(&mut self, line: &str) -> bool {
        let mut ctx = self.context();
        command::dispatch(&mut ctx, line)
    }

    pub(crate) fn output_lines(&self) -> Vec<String> {
        self.output.lines().map(str::to_string).collect()
    }
}

/// A scratch directory removed when dropped.
pub(crate) struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub(crate) fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("kuroui-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("create scratch dir");
        Self { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty file and returns its path as a string.
    pub(crate) fn touch(&self, name: &str) -> String {
        let path = self.path.join(name);
        fs::write(&path, b"").expect("create scratch file");
        path.to_string_lossy().into_owned()
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

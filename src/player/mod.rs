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

//! Playback control and state management.
//!
//! This module provides the [`Playback`] facade used by the command handlers
//! and the gesture recognizer, together with [`MediaPlayer`], the handle that
//! implements it. The handle manages a background worker thread that
//! interfaces with the underlying media library (MPV), ensuring that heavy
//! media operations do not block the main application thread.

mod commands;

use std::sync::{Arc, Mutex, mpsc};

use anyhow::Result;

use crate::{config::AppConfig, events::AppEvent, player::commands::PlayerCommand};

pub(crate) const MIN_VOLUME: f64 = 0.0;
pub(crate) const MAX_VOLUME: f64 = 100.0;

pub(crate) const MIN_SPEED: f64 = 0.01;
pub(crate) const MAX_SPEED: f64 = 100.0;

/// Represents the current playback status of the media engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    #[default]
    Stopped,
}

/// The most recently observed properties of the media engine.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlaybackStatus {
    pub(crate) state: PlayerState,
    pub(crate) title: Option<String>,
    pub(crate) path: Option<String>,
    pub(crate) time: f64,
    pub(crate) duration: f64,
    pub(crate) volume: f64,
    pub(crate) speed: f64,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self {
            state: PlayerState::Stopped,
            title: None,
            path: None,
            time: 0.0,
            duration: 0.0,
            volume: MAX_VOLUME,
            speed: 1.0,
        }
    }
}

impl PlaybackStatus {
    /// Playback progress in the range `0.0..=1.0`, if the duration is known.
    pub(crate) fn position(&self) -> Option<f64> {
        if self.duration > 0.0 {
            Some((self.time / self.duration).clamp(0.0, 1.0))
        } else {
            None
        }
    }
}

/// The call contract between the command layer and the media engine.
///
/// Every operation is fire-and-forget from the caller's perspective, the
/// result of a call becomes visible later through [`Playback::status`].
pub(crate) trait Playback {
    fn status(&self) -> PlaybackStatus;

    fn load_file(&self, path: &str) -> Result<()>;

    fn toggle_pause(&self) -> Result<()>;

    fn pause(&self) -> Result<()>;

    fn stop(&self) -> Result<()>;

    /// Seek to an absolute position, in seconds.
    fn seek(&self, seconds: f64) -> Result<()>;

    /// Set the volume, clamped to `MIN_VOLUME..=MAX_VOLUME`.
    fn set_volume(&self, level: f64) -> Result<()>;

    /// Set the playback speed, clamped to `MIN_SPEED..=MAX_SPEED`.
    fn set_speed(&self, ratio: f64) -> Result<()>;

    fn screenshot(&self, subtitles: bool) -> Result<()>;

    fn add_subtitles(&self, path: &str) -> Result<()>;

    /// Scale the video window, `percent` of the native video size.
    fn fit_window(&self, percent: u32) -> Result<()>;

    fn toggle_fullscreen(&self) -> Result<()>;

    /// Pass a raw command through to the engine.
    fn command(&self, args: &[String]) -> Result<()>;
}

/// A handle to the media playback engine.
///
/// This struct acts as a command proxy; it does not perform media processing
/// itself but instead sends instructions to a background worker thread. Clones
/// share the same worker.
#[derive(Clone)]
pub(crate) struct MediaPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<PlayerCommand>,

    /// Snapshot of engine properties, written by the worker.
    status: Arc<Mutex<PlaybackStatus>>,
}

impl MediaPlayer {
    /// Spawns the player worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the MPV options applied before the engine starts.
    /// * `event_tx` - A channel to send application-level events (like progress
    ///   updates or errors) back to the main event loop.
    pub(crate) fn new(config: &AppConfig, event_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
        let status = Arc::new(Mutex::new(PlaybackStatus::default()));

        commands::spawn_player_worker(
            commands::engine_options(config),
            command_rx,
            Arc::clone(&status),
            event_tx,
        );

        Ok(Self { command_tx, status })
    }

    fn send(&self, command: PlayerCommand) -> Result<()> {
        self.command_tx.send(command)?;
        Ok(())
    }
}

impl Playback for MediaPlayer {
    fn status(&self) -> PlaybackStatus {
        match self.status.lock() {
            Ok(status) => status.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn load_file(&self, path: &str) -> Result<()> {
        self.send(PlayerCommand::LoadFile(path.to_string()))
    }

    fn toggle_pause(&self) -> Result<()> {
        self.send(PlayerCommand::TogglePause)
    }

    fn pause(&self) -> Result<()> {
        self.send(PlayerCommand::Pause)
    }

    fn stop(&self) -> Result<()> {
        self.send(PlayerCommand::Stop)
    }

    fn seek(&self, seconds: f64) -> Result<()> {
        self.send(PlayerCommand::Seek(seconds.max(0.0)))
    }

    fn set_volume(&self, level: f64) -> Result<()> {
        self.send(PlayerCommand::SetVolume(level.clamp(MIN_VOLUME, MAX_VOLUME)))
    }

    fn set_speed(&self, ratio: f64) -> Result<()> {
        self.send(PlayerCommand::SetSpeed(ratio.clamp(MIN_SPEED, MAX_SPEED)))
    }

    fn screenshot(&self, subtitles: bool) -> Result<()> {
        self.send(PlayerCommand::Screenshot(subtitles))
    }

    fn add_subtitles(&self, path: &str) -> Result<()> {
        self.send(PlayerCommand::AddSubtitles(path.to_string()))
    }

    fn fit_window(&self, percent: u32) -> Result<()> {
        self.send(PlayerCommand::FitWindow(percent))
    }

    fn toggle_fullscreen(&self) -> Result<()> {
        self.send(PlayerCommand::ToggleFullscreen)
    }

    fn command(&self, args: &[String]) -> Result<()> {
        self.send(PlayerCommand::Raw(args.to_vec()))
    }
}

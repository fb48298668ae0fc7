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

//! MPV-backed playback engine and event processing.
//!
//! This module provides the core playback logic, leveraging `libmpv` for
//! decoding, rendering and playback control. It manages a background worker
//! thread that bridges the gap between the application's command-based
//! interface and the low-level MPV property observation system.
//!
//! # Architecture
//!
//! The engine operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`PlayerCommand`]s from the UI to control
//!    playback (load, pause, seek, volume, etc.).
//! 2. **Event Channel**: Broadcasts [`AppEvent`]s to notify the UI of state
//!    changes, such as track progress and end of file.
//!
//! Observed properties are also written into the shared [`PlaybackStatus`]
//! snapshot so that the UI thread can read them synchronously.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::{
        Arc, Mutex,
        mpsc::{self, Receiver, Sender},
    },
    thread,
};
use tracing::{debug, info, warn};

use crate::{
    config::AppConfig,
    events::AppEvent,
    player::{PlaybackStatus, PlayerState},
};

#[derive(Debug)]
pub(crate) enum PlayerCommand {
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
    Raw(Vec<String>),
}

/// Collects the MPV options to apply before the engine is built.
///
/// Screenshot settings are applied first so that an explicit entry in the
/// free-form `mpv` table wins.
pub(crate) fn engine_options(config: &AppConfig) -> Vec<(String, String)> {
    let mut options = vec![
        ("idle".to_string(), "yes".to_string()),
        ("force-window".to_string(), "no".to_string()),
        ("volume".to_string(), format!("{}", config.volume)),
    ];

    let screenshot = &config.screenshot;
    for (name, value) in [
        ("screenshot-format", &screenshot.format),
        ("screenshot-directory", &screenshot.directory),
        ("screenshot-template", &screenshot.template),
    ] {
        if !value.is_empty() {
            options.push((name.to_string(), value.clone()));
        }
    }

    options.extend(
        config
            .mpv
            .iter()
            .filter(|(name, value)| !name.is_empty() && !value.is_empty())
            .map(|(name, value)| (name.clone(), value.clone())),
    );

    options
}

/// Spawns the player worker thread to process playback commands.
///
/// If the internal worker returns an error, it is caught here and broadcast as
/// a fatal application event.
///
/// # Arguments
///
/// * `options` - MPV options set on the builder before the engine starts.
/// * `command_rx` - The receiving end of the player command channel.
/// * `status` - The shared snapshot updated from observed properties.
/// * `event_tx` - The channel used to broadcast playback updates and errors.
pub(crate) fn spawn_player_worker(
    options: Vec<(String, String)>,
    command_rx: Receiver<PlayerCommand>,
    status: Arc<Mutex<PlaybackStatus>>,
    event_tx: Sender<AppEvent>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = player_worker(&options, command_rx, status, event_tx) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// The primary execution loop for the playback backend.
///
/// This function initializes a local `libmpv` context and alternates between
/// draining incoming commands and polling for outgoing events.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize or if the event
/// channel is closed.
fn player_worker(
    options: &[(String, String)],
    command_rx: Receiver<PlayerCommand>,
    status: Arc<Mutex<PlaybackStatus>>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        for (name, value) in options {
            builder
                .set_option(name, value.as_str())
                .context(format!("Failed to set MPV option: {}", name))?;
        }
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<&str>("media-title", 0)
        .context("Failed to observe media-title")?;
    handler
        .observe_property::<&str>("path", 0)
        .context("Failed to observe path")?;
    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<f64>("volume", 0)
        .context("Failed to observe volume")?;
    handler
        .observe_property::<f64>("speed", 0)
        .context("Failed to observe speed")?;
    handler
        .observe_property::<bool>("idle-active", 0)
        .context("Failed to observe idle-active")?;

    info!("media engine started");

    let mut is_paused = false;
    let mut is_idle = true;

    loop {
        if !process_commands(&mut handler, &command_rx, &event_tx)? {
            info!("media engine stopped");
            return Ok(());
        }
        process_mpv_events(&mut handler, &mut is_paused, &mut is_idle, &status, &event_tx)?;
    }
}

/// Drains and executes all pending commands from the application channel.
///
/// A command that MPV rejects is reported as a recoverable error, the worker
/// keeps running. Returns `false` once every player handle has been dropped.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &Receiver<PlayerCommand>,
    event_tx: &Sender<AppEvent>,
) -> Result<bool> {
    loop {
        match command_rx.try_recv() {
            Ok(command) => {
                debug!(?command, "player command");
                if let Err(e) = execute_command(handler, &command) {
                    warn!(?command, error = %e, "player command failed");
                    event_tx
                        .send(AppEvent::Error(format!("{:#}", e)))
                        .context("Failed to send error event")?;
                }
            }
            Err(mpsc::TryRecvError::Empty) => return Ok(true),
            Err(mpsc::TryRecvError::Disconnected) => return Ok(false),
        }
    }
}

fn execute_command(handler: &mut mpv::MpvHandler, command: &PlayerCommand) -> Result<()> {
    match command {
        PlayerCommand::LoadFile(filename) => {
            handler
                .command(&["loadfile", filename, "replace"])
                .context(format!("Failed to load file: {}", filename))?;
            handler.set_property("pause", false)?;
        }
        PlayerCommand::TogglePause => {
            handler.command(&["cycle", "pause"])?;
        }
        PlayerCommand::Pause => {
            handler.set_property("pause", true)?;
        }
        PlayerCommand::Seek(seconds) => {
            handler
                .command(&["seek", &seconds.to_string(), "absolute"])
                .context("Failed to seek")?;
        }
        PlayerCommand::Stop => {
            handler.command(&["stop"])?;
        }
        PlayerCommand::SetVolume(level) => {
            handler.set_property("volume", *level)?;
        }
        PlayerCommand::SetSpeed(ratio) => {
            handler.set_property("speed", *ratio)?;
        }
        PlayerCommand::Screenshot(subtitles) => {
            let mode = if *subtitles { "subtitles" } else { "video" };
            handler
                .command(&["screenshot", mode])
                .context("Failed to take screenshot")?;
        }
        PlayerCommand::AddSubtitles(filename) => {
            handler
                .command(&["sub-add", filename])
                .context(format!("Failed to add subtitles: {}", filename))?;
        }
        PlayerCommand::FitWindow(percent) => {
            handler.set_property("window-scale", *percent as f64 / 100.0)?;
        }
        PlayerCommand::ToggleFullscreen => {
            handler.command(&["cycle", "fullscreen"])?;
        }
        PlayerCommand::Raw(args) => {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            handler
                .command(&args)
                .context(format!("MPV rejected command: {}", args.join(" ")))?;
        }
    }

    Ok(())
}

/// Polls for MPV events and synchronizes the application state.
///
/// This function waits for up to 50ms for an event from the MPV context.
/// If an event occurs, it updates the shared status snapshot and broadcasts
/// any necessary [`AppEvent`]s to the UI.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    is_paused: &mut bool,
    is_idle: &mut bool,
    status: &Mutex<PlaybackStatus>,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        let mut status = match status.lock() {
            Ok(status) => status,
            Err(poisoned) => poisoned.into_inner(),
        };

        let app_event = match mpv_event {
            mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                ("media-title", Format::Str(title)) => {
                    status.title = Some(title.to_string());
                    Some(AppEvent::PlaybackUpdated)
                }
                ("path", Format::Str(path)) => {
                    status.path = Some(path.to_string());
                    Some(AppEvent::FileChanged(path.to_string()))
                }
                ("duration", Format::Double(duration)) => {
                    status.duration = duration;
                    Some(AppEvent::PlaybackUpdated)
                }
                ("pause", Format::Flag(pause)) => {
                    *is_paused = pause;
                    None
                }
                ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                    status.time = seconds;
                    Some(AppEvent::PlaybackUpdated)
                }
                ("volume", Format::Double(volume)) => {
                    status.volume = volume;
                    Some(AppEvent::PlaybackUpdated)
                }
                ("speed", Format::Double(speed)) => {
                    status.speed = speed;
                    Some(AppEvent::PlaybackUpdated)
                }
                ("idle-active", Format::Flag(idle_active)) => {
                    *is_idle = idle_active;
                    None
                }
                _ => None,
            },
            mpv::Event::EndFile(Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF)) => {
                Some(AppEvent::TrackFinished)
            }
            _ => None,
        };

        let new_player_state = player_state(*is_paused, *is_idle);

        if new_player_state != status.state {
            status.state = new_player_state;
            if new_player_state == PlayerState::Stopped {
                status.time = 0.0;
            }
            event_tx
                .send(AppEvent::PlayerStateChanged(new_player_state))
                .context("Failed to send player state event")?;
        }

        drop(status);

        if let Some(event) = app_event {
            event_tx.send(event).context("Failed to send event")?;
        }
    }

    Ok(())
}

// Maps internal backend flags to a simplified [`PlayerState`].
fn player_state(is_paused: bool, is_idle: bool) -> PlayerState {
    if is_idle {
        PlayerState::Stopped
    } else if is_paused {
        PlayerState::Paused
    } else {
        PlayerState::Playing
    }
}

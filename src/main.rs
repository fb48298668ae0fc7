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

//! # Media Player TUI.
//!
//! A terminal front end for the MPV media engine, driven by typed commands,
//! rebindable keyboard shortcuts and mouse drag gestures.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background playback worker.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, UI rendering and
//!   command dispatch.
//! * The **Player Worker** owns the MPV handle and reports property changes.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! Every user action, whether typed at the command line, bound to a key or
//! produced by the mouse, ends up as a command line run through the command
//! registry. The application follows a strict setup-run-teardown pattern to
//! ensure the terminal state is preserved even in the event of a crash.
//! Communication between the UI and background workers is handled via
//! `std::sync::mpsc` channels.

mod command;
mod commander;
mod config;
mod error;
mod events;
mod gesture;
mod logging;
mod output;
mod player;
mod playlist;
mod render;
mod shortcuts;
mod theme;
mod util;
mod view;
mod window;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};
use tracing::{info, warn};

use crate::{
    command::{CommandContext, CommandRegistry},
    commander::Commander,
    config::AppConfig,
    events::{AppEvent, input::ClickTracker, process_events},
    gesture::{DisplayDensity, GestureRecognizer, Point},
    output::Output,
    player::{MediaPlayer, Playback},
    playlist::{Playlist, RecentFiles},
    render::LayoutAreas,
    shortcuts::ShortcutTable,
    theme::Theme,
    view::ViewState,
    window::OverlayWindow,
};

/// Initial pixel position of the media information box.
const OVERLAY_ORIGIN: Point = Point::new(16, 32);

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub view: ViewState,
    pub layout: LayoutAreas,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub registry: CommandRegistry,
    pub shortcuts: ShortcutTable,

    pub player: MediaPlayer,
    pub gestures: GestureRecognizer<MediaPlayer, OverlayWindow>,
    pub overlay: OverlayWindow,
    pub clicks: ClickTracker,

    pub playlist: Playlist,
    pub recent: RecentFiles,

    pub output: Output,
    pub commander: Commander,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let player = MediaPlayer::new(&config, event_tx.clone())?;
        let overlay = OverlayWindow::new(OVERLAY_ORIGIN);

        let density = DisplayDensity {
            dpi_x: config.display.dpi_x,
            dpi_y: config.display.dpi_y,
        };
        let gestures = GestureRecognizer::new(player.clone(), overlay.clone(), density);

        let registry = CommandRegistry::with_builtins().context("Failed to register commands")?;
        let shortcuts = ShortcutTable::from_overrides(&config.shortcuts);
        let recent = RecentFiles::new(config.recent.clone(), config.max_recent);

        Ok(Self {
            config,
            theme: Theme::default(),
            view: ViewState::default(),
            layout: LayoutAreas::default(),
            event_tx,
            event_rx,
            registry,
            shortcuts,
            player,
            gestures,
            overlay,
            clicks: ClickTracker::default(),
            playlist: Playlist::new(),
            recent,
            output: Output::new(),
            commander: Commander::new(),
        })
    }

    /// Run `f` with a command context borrowing this application's state.
    fn with_context<R>(&mut self, f: impl FnOnce(&mut CommandContext<'_>) -> R) -> R {
        let mut ctx = CommandContext {
            registry: &self.registry,
            player: &self.player,
            playlist: &mut self.playlist,
            recent: &mut self.recent,
            shortcuts: &mut self.shortcuts,
            view: &mut self.view,
            output: &mut self.output,
            event_tx: &self.event_tx,
        };
        f(&mut ctx)
    }

    /// Dispatch a command line, opening the command line afterwards if the
    /// command asked for more input.
    pub fn run_command(&mut self, line: &str) -> bool {
        let ok = self.with_context(|ctx| command::dispatch(ctx, line));

        if let Some(prompt) = self.view.prompt.take() {
            self.commander.open(&prompt);
        }

        ok
    }

    /// Open a location given on the command line at startup, or dropped
    /// onto the terminal.
    pub fn open_location(&mut self, location: &str) {
        self.with_context(|ctx| {
            if let Err(e) = command::open_location(ctx, location) {
                ctx.output.report(&e);
            }
        });
    }

    /// Move on through the playlist once the engine reaches the end of a file.
    pub fn play_next_after_finish(&mut self) {
        let Some(next) = self.playlist.next_after_finish().map(str::to_string) else {
            info!("end of playlist");
            return;
        };

        self.with_context(|ctx| {
            if let Err(e) = command::load(ctx, &next) {
                ctx.output.report(&e);
            }
        });
    }

    /// Persist the state that outlives a session.
    fn store_config(&mut self) {
        self.config.shortcuts = self.shortcuts.overrides();
        self.config.recent = self.recent.files().to_vec();
        self.config.volume = self.player.status().volume;

        if let Err(e) = config::save_config(&self.config) {
            warn!(error = %e, "failed to save configuration");
        }
    }
}

/// The entry point of the application.
///
/// Loads the configuration, starts logging, initializes the application
/// state, manages the terminal lifecycle, and returns an error if any part of
/// the execution fails.
fn main() -> Result<()> {
    let (config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let _log_guard = match logging::init(&config.log_filter) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {:#}", e);
            None
        }
    };

    if let Some(e) = config_error {
        warn!(error = %e, "failed to load configuration, using defaults");
    }

    let location = std::env::args().nth(1);

    let mut app = App::new(config).context("Failed to initalise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, location);
    restore_terminal(&mut terminal);

    app.store_config();

    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
/// * Enables mouse capture for gestures and bracketed paste for dropped
///   files.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        util::term::set_terminal_bg(&hex);
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a result,
/// as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the input and tick threads and enters the main event loop.
///
/// This function spawns two long-running background threads:
/// * An input thread to poll for keyboard, mouse, paste and resize events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// The player worker is already running, it is started with the
/// [`MediaPlayer`]. If a location was given it is opened before handing
/// control to [`process_events`].
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    location: Option<String>,
) -> Result<()> {
    // Spawn a thread to translate raw terminal events to application events.
    let tx_input = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event::Event::Key(key)) => AppEvent::Key(key),
                Ok(event::Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(event::Event::Paste(text)) => AppEvent::Paste(text),
                Ok(event::Event::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx_input.send(event).is_err() {
                break;
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if tx_tick.send(AppEvent::Tick).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(250));
        }
    });

    if let Some(location) = location {
        app.open_location(&location);
    }

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}

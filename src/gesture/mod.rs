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

//! Pointer drag gesture recognition.
//!
//! A drag either moves a window (the media info overlay in this UI) or, when
//! it starts over the now-playing panel, seeks and adjusts the volume. Which of the two
//! it does is decided by [`GestureKind`] at the start of the drag; for a
//! seek/volume drag the axis is decided once the pointer has moved far
//! enough along one axis more than the other.
//!
//! Effects are origin-anchored: every sample is recomputed from the position,
//! playback time and volume captured when the gesture began, never
//! accumulated from the previous sample.

use std::{
    ops::{Add, Sub},
    time::{Duration, Instant},
};

use tracing::{debug, warn};

use crate::{error::GestureError, player::Playback};

/// Minimum interval between two accepted samples.
pub(crate) const DEBOUNCE: Duration = Duration::from_millis(10);

/// Pixels by which one axis must dominate the other to commit to it.
pub(crate) const AXIS_THRESHOLD: i32 = 15;

const REFERENCE_WIDTH: f64 = 800.0;
const REFERENCE_HEIGHT: f64 = 450.0;

/// A position in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Point {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Point {
    pub(crate) const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GestureKind {
    Move,
    SeekOrVolume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GesturePhase {
    Undecided,
    Seeking,
    AdjustingVolume,
}

/// The element moved by a [`GestureKind::Move`] drag.
pub(crate) trait WindowControl {
    fn position(&self) -> Point;

    fn move_to(&self, position: Point);

    /// Shows or clears the transient cursor effect of a seek/volume drag.
    fn override_cursor(&self, active: bool);
}

/// Monotonic time source, injectable so that the debounce can be driven
/// deterministically.
pub(crate) trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Display pixel density, used to normalize gesture sensitivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DisplayDensity {
    pub(crate) dpi_x: f64,
    pub(crate) dpi_y: f64,
}

impl DisplayDensity {
    /// Seconds per horizontal pixel and volume per vertical pixel.
    pub(crate) fn ratios(&self) -> (f64, f64) {
        (self.dpi_x / REFERENCE_WIDTH, self.dpi_y / REFERENCE_HEIGHT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Anchor {
    Window(Point),
    Playback { time: f64, volume: f64 },
}

#[derive(Debug)]
struct GestureSession {
    kind: GestureKind,
    phase: GesturePhase,
    mouse_origin: Point,
    anchor: Anchor,
    last_sample: Instant,
    h_ratio: f64,
    v_ratio: f64,
}

/// Classifies pointer drags and turns them into window moves, seeks and
/// volume changes. At most one gesture is in flight at a time.
pub(crate) struct GestureRecognizer<P, W, C = SystemClock> {
    player: P,
    window: W,
    clock: C,
    density: DisplayDensity,
    session: Option<GestureSession>,
}

impl<P: Playback, W: WindowControl> GestureRecognizer<P, W> {
    pub(crate) fn new(player: P, window: W, density: DisplayDensity) -> Self {
        Self::with_clock(player, window, SystemClock, density)
    }
}

impl<P: Playback, W: WindowControl, C: Clock> GestureRecognizer<P, W, C> {
    pub(crate) fn with_clock(player: P, window: W, clock: C, density: DisplayDensity) -> Self {
        Self {
            player,
            window,
            clock,
            density,
            session: None,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub(crate) fn kind(&self) -> Option<GestureKind> {
        self.session.as_ref().map(|session| session.kind)
    }

    pub(crate) fn phase(&self) -> Option<GesturePhase> {
        self.session.as_ref().map(|session| session.phase)
    }

    /// Starts a gesture at `mouse_pos`.
    ///
    /// Fails without touching the current session if one is already active.
    pub(crate) fn begin(&mut self, kind: GestureKind, mouse_pos: Point) -> Result<(), GestureError> {
        if self.session.is_some() {
            return Err(GestureError::AlreadyActive);
        }

        let anchor = match kind {
            GestureKind::Move => Anchor::Window(self.window.position()),
            GestureKind::SeekOrVolume => {
                self.window.override_cursor(true);
                let status = self.player.status();
                Anchor::Playback {
                    time: status.time,
                    volume: status.volume,
                }
            }
        };

        let (h_ratio, v_ratio) = self.density.ratios();

        debug!(?kind, ?mouse_pos, ?anchor, "gesture started");

        self.session = Some(GestureSession {
            kind,
            phase: GesturePhase::Undecided,
            mouse_origin: mouse_pos,
            anchor,
            last_sample: self.clock.now(),
            h_ratio,
            v_ratio,
        });

        Ok(())
    }

    /// Feeds a pointer sample into the active gesture.
    ///
    /// Returns `Ok(false)` when the sample arrives within [`DEBOUNCE`] of the
    /// previous accepted one and is dropped.
    pub(crate) fn process(&mut self, mouse_pos: Point) -> Result<bool, GestureError> {
        let session = self.session.as_mut().ok_or(GestureError::NotActive)?;

        let now = self.clock.now();
        if now.duration_since(session.last_sample) <= DEBOUNCE {
            return Ok(false);
        }

        let delta = mouse_pos - session.mouse_origin;

        match session.anchor {
            Anchor::Window(origin) => self.window.move_to(origin + delta),
            Anchor::Playback { time, volume } => {
                if session.phase == GesturePhase::Undecided {
                    session.phase = decide_phase(delta);
                    if session.phase != GesturePhase::Undecided {
                        debug!(phase = ?session.phase, "gesture axis decided");
                    }
                }

                let result = match session.phase {
                    GesturePhase::Undecided => Ok(()),
                    GesturePhase::Seeking => {
                        let relative = delta.x as f64 * session.h_ratio;
                        self.player.seek(time + relative)
                    }
                    GesturePhase::AdjustingVolume => {
                        self.player.set_volume(volume - delta.y as f64 * session.v_ratio)
                    }
                };

                if let Err(e) = result {
                    warn!(error = %e, "gesture playback update failed");
                }
            }
        }

        session.last_sample = now;

        Ok(true)
    }

    /// Ends the active gesture and clears any transient cursor effect.
    pub(crate) fn end(&mut self) -> Result<(), GestureError> {
        let session = self.session.take().ok_or(GestureError::NotActive)?;

        if session.kind == GestureKind::SeekOrVolume {
            self.window.override_cursor(false);
        }

        debug!(kind = ?session.kind, phase = ?session.phase, "gesture ended");

        Ok(())
    }
}

fn decide_phase(delta: Point) -> GesturePhase {
    let (dx, dy) = (delta.x.abs(), delta.y.abs());
    if dx >= dy + AXIS_THRESHOLD {
        GesturePhase::Seeking
    } else if dy >= dx + AXIS_THRESHOLD {
        GesturePhase::AdjustingVolume
    } else {
        GesturePhase::Undecided
    }
}

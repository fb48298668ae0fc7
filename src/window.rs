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

//! The floating media information box as a movable window.
//!
//! The position is shared between the copy held by the gesture recognizer,
//! which moves it, and the copy the renderer reads.

use std::{cell::Cell, rc::Rc};

use crate::gesture::{Point, WindowControl};

#[derive(Debug, Clone, Default)]
pub(crate) struct OverlayWindow {
    position: Rc<Cell<Point>>,
    cursor_overridden: Rc<Cell<bool>>,
}

impl OverlayWindow {
    pub(crate) fn new(position: Point) -> Self {
        Self {
            position: Rc::new(Cell::new(position)),
            cursor_overridden: Rc::new(Cell::new(false)),
        }
    }

    pub(crate) fn cursor_overridden(&self) -> bool {
        self.cursor_overridden.get()
    }
}

impl WindowControl for OverlayWindow {
    fn position(&self) -> Point {
        self.position.get()
    }

    fn move_to(&self, position: Point) {
        self.position.set(position);
    }

    fn override_cursor(&self, active: bool) {
        self.cursor_overridden.set(active);
    }
}

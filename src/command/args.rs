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

//! Argument parsing shared by the built-in commands.
//!
//! Numeric arguments follow one convention: a leading `+` or `-` adjusts the
//! current value, anything else replaces it.

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Adjustment {
    Relative(f64),
    Absolute(f64),
}

impl Adjustment {
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
        if is_signed(text) {
            Some(Self::Relative(value))
        } else {
            Some(Self::Absolute(value))
        }
    }

    pub(crate) fn apply(self, current: f64) -> f64 {
        match self {
            Self::Relative(delta) => current + delta,
            Self::Absolute(value) => value,
        }
    }
}

/// A playlist position: a row offset, or a 1-based row number converted to a
/// zero-based index.
///
/// Offsets are limited to the `i32` range so that adding one to a row can
/// never overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Relative(i64),
    Index(usize),
}

impl Step {
    pub(crate) fn parse(text: &str) -> Option<Self> {
        if is_signed(text) {
            text.parse::<i32>().ok().map(|n| Self::Relative(i64::from(n)))
        } else {
            text.parse::<usize>()
                .ok()
                .and_then(|row| row.checked_sub(1))
                .map(Self::Index)
        }
    }
}

/// Parses `[[hh:]mm:]ss[.fff]`, with an optional sign for a relative jump.
pub(crate) fn parse_time(text: &str) -> Option<Adjustment> {
    let (sign, body) = match text.as_bytes().first() {
        Some(b'+') => (Some(1.0), &text[1..]),
        Some(b'-') => (Some(-1.0), &text[1..]),
        _ => (None, text),
    };

    let parts: Vec<&str> = body.split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut seconds = 0.0;
    for (i, part) in parts.iter().enumerate() {
        if part.is_empty() || part.starts_with(['+', '-']) {
            return None;
        }
        let value = part.parse::<f64>().ok().filter(|v| v.is_finite())?;
        // Only the leading component may exceed its unit.
        if i > 0 && value >= 60.0 {
            return None;
        }
        seconds = seconds * 60.0 + value;
    }

    Some(match sign {
        Some(sign) => Adjustment::Relative(sign * seconds),
        None => Adjustment::Absolute(seconds),
    })
}

pub(crate) fn is_signed(text: &str) -> bool {
    text.starts_with(['+', '-'])
}

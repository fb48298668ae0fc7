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

//! Persistent application settings.
//!
//! Settings are stored with `confy` as TOML in the platform configuration
//! directory. Every field has a default so that files written by older
//! versions keep loading.

use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::{gesture::Point, logging::DEFAULT_FILTER, shortcuts::Binding};

pub(crate) const CONFIG_NAME: &str = "kuroui";

const CONFIG_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub version: u32,
    pub volume: f64,
    pub gestures: bool,
    pub display: DisplayConfig,
    pub max_recent: usize,
    pub recent: Vec<String>,
    pub screenshot: ScreenshotConfig,
    pub mpv: BTreeMap<String, String>,
    pub shortcuts: BTreeMap<String, Binding>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            volume: 100.0,
            gestures: true,
            display: DisplayConfig::default(),
            max_recent: 5,
            recent: vec![],
            screenshot: ScreenshotConfig::default(),
            mpv: BTreeMap::new(),
            shortcuts: BTreeMap::new(),
            log_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

/// Physical display properties used to scale pointer gestures.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub dpi_x: f64,
    pub dpi_y: f64,
    /// Width of one terminal cell, in pixels.
    pub cell_width: u16,
    /// Height of one terminal cell, in pixels.
    pub cell_height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            dpi_x: 96.0,
            dpi_y: 96.0,
            cell_width: 8,
            cell_height: 16,
        }
    }
}

impl DisplayConfig {
    /// The pixel at the top-left corner of a terminal cell.
    pub fn to_pixels(&self, column: u16, row: u16) -> Point {
        Point::new(
            i32::from(column).saturating_mul(i32::from(self.cell_width)),
            i32::from(row).saturating_mul(i32::from(self.cell_height)),
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScreenshotConfig {
    pub format: String,
    pub directory: String,
    pub template: String,
}

pub fn load_config() -> Result<AppConfig, confy::ConfyError> {
    confy::load(CONFIG_NAME, None)
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

/// The directory holding the configuration file, also used for the log file.
pub fn config_dir() -> Option<PathBuf> {
    confy::get_configuration_file_path(CONFIG_NAME, None)
        .ok()
        .and_then(|path| path.parent().map(|dir| dir.to_path_buf()))
}

//! User settings, stored next to the tasks

use std::error::Error;
use std::path::Path;

use csscolorparser::Color;
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MIN_ROWS, DEFAULT_PADDING_ROWS};
use crate::grid::GridLayout;
use crate::store::write_atomic;
use crate::task::Priority;

/// The colours tasks are rendered with, depending on their priority
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub low: Color,
    pub medium: Color,
    pub high: Color,
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb_u8(r, g, b)
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            low: rgb(0, 192, 0),
            medium: rgb(255, 176, 0),
            high: rgb(255, 64, 64),
        }
    }
}

impl Palette {
    pub fn color_for(&self, priority: Priority) -> &Color {
        match priority {
            Priority::Low => &self.low,
            Priority::Medium => &self.medium,
            Priority::High => &self.high,
        }
    }
}


/// Settings of the planner. Fields missing from a settings file take their default value.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fewest rows the grid may have
    pub min_rows: usize,
    /// Empty rows always left below the busiest day
    pub padding_rows: usize,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_rows: DEFAULT_MIN_ROWS,
            padding_rows: DEFAULT_PADDING_ROWS,
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Read settings from a valid file.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let settings = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };
        Ok(settings)
    }

    /// Read settings from a file, falling back to the defaults if it is missing or invalid
    pub fn from_file_or_default(path: &Path) -> Self {
        if path.exists() == false {
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Invalid settings file: {}. Using default settings", err);
                Self::default()
            },
        }
    }

    /// Store these settings to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let content = serde_json::to_vec_pretty(self)?;
        write_atomic(path, &content)
    }

    pub fn grid_layout(&self) -> GridLayout {
        GridLayout {
            min_rows: self.min_rows,
            padding_rows: self.padding_rows,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_file() {
        let settings: Settings = serde_json::from_str(r#"{ "min_rows": 4 }"#).unwrap();
        assert_eq!(settings.min_rows, 4);
        assert_eq!(settings.padding_rows, DEFAULT_PADDING_ROWS);
        assert_eq!(settings.palette.low.to_hex_string(), Palette::default().low.to_hex_string());
    }

    #[test]
    fn test_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        // Missing file
        let settings = Settings::from_file_or_default(&path);
        assert_eq!(settings.min_rows, DEFAULT_MIN_ROWS);

        let mut settings = Settings::default();
        settings.min_rows = 3;
        settings.palette.high = rgb(10, 20, 30);
        settings.save_to_file(&path).unwrap();

        let retrieved = Settings::from_file(&path).unwrap();
        assert_eq!(retrieved.min_rows, 3);
        assert_eq!(retrieved.palette.high.to_hex_string(), rgb(10, 20, 30).to_hex_string());

        // Corrupt file
        std::fs::write(&path, b"{ not json").unwrap();
        let settings = Settings::from_file_or_default(&path);
        assert_eq!(settings.min_rows, DEFAULT_MIN_ROWS);
    }
}

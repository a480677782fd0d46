//! Support for library configuration options

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;

/// The application name. It is used to build the default data directory (see [`default_data_dir`]).
/// Feel free to override it when initing this library.
pub static APP_NAME: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new("WeekPlanner".to_string())));

/// Name of the file that holds the task collection, inside the data directory
pub const TASKS_FILE_NAME: &str = "tasks.json";
/// Name of the file that holds the user settings, inside the data directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Longest task text an input widget should accept.
/// This is advisory: the engine itself never truncates nor rejects long texts.
pub const MAX_TEXT_LEN: usize = 60;

/// Fewest rows a grid may have, even for an empty week
pub const DEFAULT_MIN_ROWS: usize = 10;
/// Empty rows always left below the busiest day of the displayed week
pub const DEFAULT_PADDING_ROWS: usize = 1;

/// Returns the current value of [`APP_NAME`]
pub fn app_name() -> String {
    match APP_NAME.lock() {
        Ok(name) => name.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// The platform-specific directory where tasks and settings are stored, if the platform has one
pub fn default_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", &app_name())
        .map(|dirs| dirs.data_dir().to_path_buf())
}

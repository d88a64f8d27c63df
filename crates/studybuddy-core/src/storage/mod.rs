mod config;
pub mod database;
pub mod history;

pub use config::{Config, DEFAULT_BREAK_INTERVAL_MIN};
pub use database::Database;
pub use history::SessionHistory;

use std::path::PathBuf;

use crate::error::CoreError;

/// Returns `~/.config/studybuddy[-dev]/` based on STUDYBUDDY_ENV.
///
/// Set STUDYBUDDY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDYBUDDY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("studybuddy-dev")
    } else {
        base_dir.join("studybuddy")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

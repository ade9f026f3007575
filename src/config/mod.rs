//! Configuration module for vod-relay
//!
//! Handles loading and validating settings from YAML files and environment variables.
//! Every field has a built-in default, so running without a settings file is the
//! normal case.

mod settings;

pub use settings::*;

use std::path::PathBuf;
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_ENV: &str = "VOD_RELAY_SETTINGS_PATH";

/// Load settings from the first settings file found, or use defaults
pub fn load() -> Result<Settings, SettingsError> {
    let mut paths = Vec::new();
    if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
        paths.push(PathBuf::from(path));
    }
    paths.push(PathBuf::from("settings.yml"));
    paths.push(PathBuf::from("config/settings.yml"));
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("vod-relay/settings.yml"));
    }

    let mut settings = match paths.iter().find(|p| p.exists()) {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };

    settings.merge_env();
    Ok(settings)
}

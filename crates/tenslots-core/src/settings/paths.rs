//! Default locations for the settings file

use std::path::PathBuf;

/// Get the default settings directory
///
/// Returns: `{config dir}/tenslots` (e.g. `~/.config/tenslots` on Linux)
pub fn default_settings_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tenslots")
}

/// Get the default settings file path
///
/// Returns: `{config dir}/tenslots/settings.yaml`
pub fn default_settings_path() -> PathBuf {
    default_settings_dir().join("settings.yaml")
}

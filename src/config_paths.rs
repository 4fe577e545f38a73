//! Where rowedit keeps its editing defaults and log files

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "rowedit";

/// `$XDG_CONFIG_HOME/rowedit`, falling back to `~/.config/rowedit`
/// (`%APPDATA%\rowedit` on Windows)
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// Default editing configuration read by [`EditingConfiguration::load`]
///
/// [`EditingConfiguration::load`]: crate::config::EditingConfiguration::load
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("editing.yaml"))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Create the logs directory for the rolling file appender
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    create_dir(&logs)?;
    Ok(logs)
}

fn create_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create logs directory {}: {}", path.display(), e))
}

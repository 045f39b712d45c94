// Configuration service
// Persists TimelineSettings as TOML in the user's config directory

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::TimelineSettings;

/// Default settings file location for this platform, if one can be resolved.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "party-timeline")
        .map(|dirs| dirs.config_dir().join("settings.toml"))
}

/// Load settings from `path`.
pub fn load(path: &Path) -> Result<TimelineSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings: TimelineSettings = toml::from_str(&text)
        .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid settings: {}", e))?;
    Ok(settings)
}

/// Save settings to `path`, creating parent directories as needed.
pub fn save(path: &Path, settings: &TimelineSettings) -> Result<()> {
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid settings: {}", e))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let text = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(path, text)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;
    Ok(())
}

/// Load settings, falling back to defaults when the file is missing or
/// unreadable. A broken file is logged and ignored rather than crashing
/// the app over a config problem.
pub fn load_or_default(path: &Path) -> TimelineSettings {
    if !path.exists() {
        return TimelineSettings::default();
    }
    match load(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Using default settings: {e:#}");
            TimelineSettings::default()
        }
    }
}

// Settings module
// Tunable knobs for the timeline widget and demo app

use serde::{Deserialize, Serialize};

/// Theme preference for the timeline palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the system theme.
    #[default]
    Auto,
    Light,
    Dark,
}

/// Timeline configuration.
///
/// Every knob the interaction and layout engines are parameterized by,
/// persisted as TOML in the user's config directory by the config service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Vertical density of the timeline.
    pub pixels_per_minute: f32,
    /// Grid granularity drag results are rounded to.
    pub snap_minutes: i64,
    /// Shortest duration a resize may produce.
    pub min_duration_minutes: i64,
    /// Pointer displacement (px) before a press becomes a drag.
    pub drag_threshold: f32,
    /// Touch hold time (seconds) before a press becomes a move drag.
    pub long_press_secs: f64,
    /// First hour of the visible day window.
    pub day_start_hour: u32,
    /// Hour the visible day window ends at (exclusive).
    pub day_end_hour: u32,
    pub theme: ThemeMode,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            pixels_per_minute: 2.0,
            snap_minutes: 5,
            min_duration_minutes: 15,
            drag_threshold: 10.0,
            long_press_secs: 0.3,
            day_start_hour: 8,
            day_end_hour: 22,
            theme: ThemeMode::Auto,
        }
    }
}

impl TimelineSettings {
    /// Validate the settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.pixels_per_minute <= 0.0 {
            return Err("pixels_per_minute must be positive".to_string());
        }
        if self.snap_minutes < 1 {
            return Err("snap_minutes must be at least 1".to_string());
        }
        if self.min_duration_minutes < 1 {
            return Err("min_duration_minutes must be at least 1".to_string());
        }
        if self.drag_threshold < 0.0 {
            return Err("drag_threshold cannot be negative".to_string());
        }
        if self.long_press_secs <= 0.0 {
            return Err("long_press_secs must be positive".to_string());
        }
        if self.day_end_hour > 24 || self.day_start_hour >= self.day_end_hour {
            return Err("day window hours must satisfy start < end <= 24".to_string());
        }
        Ok(())
    }
}

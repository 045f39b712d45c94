use egui::Color32;

use crate::models::settings::ThemeMode;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Colours for the timeline widget.
#[derive(Clone, Copy)]
pub struct TimelinePalette {
    pub background: Color32,
    pub gutter_bg: Color32,
    pub gutter_text: Color32,
    pub hour_line: Color32,
    pub slot_line: Color32,
    pub event_text: Color32,
    /// Block colour for events without an explicit or category colour.
    pub fallback_event: Color32,
    pub milestone_fill: Color32,
    pub milestone_text: Color32,
    pub preview_fill: Color32,
    pub preview_stroke: Color32,
    pub hover_overlay: Color32,
}

impl TimelinePalette {
    pub fn light() -> Self {
        Self {
            background: Color32::from_rgb(250, 250, 248),
            gutter_bg: Color32::from_rgb(240, 240, 236),
            gutter_text: Color32::from_rgb(110, 110, 110),
            hour_line: Color32::from_rgb(200, 200, 196),
            slot_line: with_alpha(Color32::from_rgb(200, 200, 196), 130),
            event_text: Color32::WHITE,
            fallback_event: Color32::from_rgb(100, 150, 200),
            milestone_fill: Color32::from_rgb(220, 140, 70),
            milestone_text: Color32::from_rgb(60, 45, 25),
            preview_fill: Color32::from_rgba_unmultiplied(120, 200, 120, 35),
            preview_stroke: Color32::from_rgb(120, 200, 120),
            hover_overlay: with_alpha(Color32::from_rgb(120, 160, 220), 40),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color32::from_rgb(28, 28, 32),
            gutter_bg: Color32::from_rgb(24, 24, 28),
            gutter_text: Color32::from_rgb(150, 150, 150),
            hour_line: Color32::from_rgb(70, 70, 76),
            slot_line: with_alpha(Color32::from_rgb(70, 70, 76), 150),
            event_text: Color32::WHITE,
            fallback_event: Color32::from_rgb(90, 130, 180),
            milestone_fill: Color32::from_rgb(200, 130, 60),
            milestone_text: Color32::from_rgb(250, 240, 225),
            preview_fill: Color32::from_rgba_unmultiplied(120, 200, 120, 40),
            preview_stroke: Color32::from_rgb(110, 190, 110),
            hover_overlay: with_alpha(Color32::from_rgb(120, 160, 220), 55),
        }
    }

    /// Resolve a theme preference, consulting the system for `Auto`.
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Auto => match dark_light::detect() {
                dark_light::Mode::Dark => Self::dark(),
                dark_light::Mode::Light | dark_light::Mode::Default => Self::light(),
            },
        }
    }
}

//! Visual rendering of event blocks and milestone markers.
//!
//! Pure painting helpers used by the timeline view. Past events are dimmed
//! for visual distinction; nothing here mutates state.

use chrono::{DateTime, Local};
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

use super::palette::TimelinePalette;
use crate::models::event::Event;

/// Parse a hex color string to Color32.
///
/// # Arguments
/// * `hex` - A hex color string, optionally prefixed with '#' (e.g., "#FF5500")
pub fn parse_color(hex: &str) -> Option<Color32> {
    if hex.is_empty() {
        return None;
    }

    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Block colour for an event: explicit colour, then category colour,
/// then the palette fallback.
pub fn event_color(event: &Event, palette: &TimelinePalette) -> Color32 {
    event
        .color
        .as_deref()
        .and_then(parse_color)
        .or_else(|| event.category.and_then(|c| parse_color(c.default_color())))
        .unwrap_or(palette.fallback_event)
}

fn dim_if_past(color: Color32, is_past: bool) -> Color32 {
    if is_past {
        Color32::from_rgba_unmultiplied(
            (color.r() as f32 * 0.4) as u8,
            (color.g() as f32 * 0.4) as u8,
            (color.b() as f32 * 0.4) as u8,
            140,
        )
    } else {
        color
    }
}

/// Render a duration event block.
///
/// Draws a coloured background with accent bar, title text, and time range.
pub fn render_event_block(
    ui: &egui::Ui,
    block_rect: Rect,
    event: &Event,
    palette: &TimelinePalette,
    now: DateTime<Local>,
) {
    let is_past = event.end.map_or(false, |end| end < now);
    let fill = dim_if_past(event_color(event, palette), is_past);

    ui.painter().rect_filled(block_rect, 2.0, fill);

    // Accent bar on the left edge
    let bar_rect = Rect::from_min_size(
        block_rect.min,
        Vec2::new(4.0, block_rect.height()),
    );
    ui.painter()
        .rect_filled(bar_rect, 2.0, fill.linear_multiply(0.7));

    let text_color = if is_past {
        Color32::from_rgba_unmultiplied(255, 255, 255, 180)
    } else {
        palette.event_text
    };

    // Time range above the title, small
    if let Some(end) = event.end {
        let time_str = format!(
            "{} - {}",
            event.start.format("%H:%M"),
            end.format("%H:%M")
        );
        ui.painter().text(
            Pos2::new(bar_rect.right() + 5.0, block_rect.top() + 3.0),
            egui::Align2::LEFT_TOP,
            time_str,
            egui::FontId::proportional(10.0),
            text_color,
        );
    }

    // Use egui's layout system to properly truncate the title
    let available_width = block_rect.width() - 14.0;
    let layout_job = egui::text::LayoutJob::simple(
        event.title.clone(),
        egui::FontId::proportional(13.0),
        text_color,
        available_width,
    );
    let galley = ui.fonts(|f| f.layout_job(layout_job));
    ui.painter().galley(
        Pos2::new(bar_rect.right() + 5.0, block_rect.top() + 15.0),
        galley,
        text_color,
    );
}

/// Render a milestone marker: a diamond on the instant plus the title.
pub fn render_milestone_marker(
    ui: &egui::Ui,
    marker_rect: Rect,
    event: &Event,
    palette: &TimelinePalette,
) {
    let center_y = marker_rect.center().y;
    let half = (marker_rect.height() / 2.0 - 4.0).max(5.0);
    let cx = marker_rect.left() + half + 2.0;

    let fill = event
        .color
        .as_deref()
        .and_then(parse_color)
        .unwrap_or(palette.milestone_fill);

    let points = vec![
        Pos2::new(cx, center_y - half),
        Pos2::new(cx + half, center_y),
        Pos2::new(cx, center_y + half),
        Pos2::new(cx - half, center_y),
    ];
    ui.painter().add(egui::Shape::convex_polygon(
        points,
        fill,
        Stroke::new(1.0, fill.linear_multiply(0.6)),
    ));

    // Guide line across the lane at the milestone's instant
    ui.painter().line_segment(
        [
            Pos2::new(cx + half + 4.0, center_y),
            Pos2::new(marker_rect.right(), center_y),
        ],
        Stroke::new(1.0, fill.linear_multiply(0.5)),
    );

    ui.painter().text(
        Pos2::new(cx + half + 8.0, center_y - 2.0),
        egui::Align2::LEFT_BOTTOM,
        &event.title,
        egui::FontId::proportional(12.0),
        palette.milestone_text,
    );
}

/// Draw the silhouette of the proposed time range during a drag.
pub fn draw_drag_preview(ui: &egui::Ui, preview_rect: Rect, palette: &TimelinePalette) {
    let highlight = preview_rect.shrink2(Vec2::new(1.0, 0.0));
    ui.painter().rect_filled(highlight, 2.0, palette.preview_fill);
    ui.painter()
        .rect_stroke(highlight, 2.0, Stroke::new(1.5, palette.preview_stroke));
}

/// Generate a rich tooltip string for an event.
pub fn format_event_tooltip(event: &Event) -> String {
    let mut lines = Vec::new();

    lines.push(format!("📌 {}", event.title));

    match event.end {
        Some(end) => {
            lines.push(format!(
                "🕐 {} - {}",
                event.start.format("%H:%M"),
                end.format("%H:%M")
            ));
        }
        None => {
            lines.push(format!("🕐 {}", event.start.format("%H:%M")));
        }
    }

    if let Some(description) = &event.description {
        if !description.is_empty() {
            lines.push(description.clone());
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_color_valid() {
        assert_eq!(parse_color("#FF5500"), Some(Color32::from_rgb(255, 85, 0)));
        assert_eq!(parse_color("FF5500"), Some(Color32::from_rgb(255, 85, 0)));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("#FFF"), None);
        assert_eq!(parse_color("#GGGGGG"), None);
    }

    #[test]
    fn test_event_color_prefers_explicit_over_category() {
        use crate::models::event::Category;

        let start = Local.with_ymd_and_hms(2025, 6, 14, 10, 0, 0).unwrap();
        let end = start + chrono::Duration::hours(1);
        let palette = TimelinePalette::light();

        let mut event = Event::new("e1", "Live band", start, Some(end)).unwrap();
        event.category = Some(Category::Food);
        assert_eq!(
            event_color(&event, &palette),
            parse_color(Category::Food.default_color()).unwrap()
        );

        event.color = Some("#112233".to_string());
        assert_eq!(event_color(&event, &palette), Color32::from_rgb(0x11, 0x22, 0x33));
    }

    #[test]
    fn test_tooltip_includes_time_range() {
        let start = Local.with_ymd_and_hms(2025, 6, 14, 10, 0, 0).unwrap();
        let end = start + chrono::Duration::hours(1);
        let event = Event::new("e1", "Live band", start, Some(end)).unwrap();

        let tooltip = format_event_tooltip(&event);
        assert!(tooltip.contains("Live band"));
        assert!(tooltip.contains("10:00 - 11:00"));
    }
}

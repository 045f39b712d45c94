// Resize handle geometry for event blocks
//
// Maps a pointer position inside an event block to the grab zone the
// gesture controller should start in, and draws the handle affordances.

use egui::{CursorIcon, Pos2, Rect, Vec2};

use crate::services::gesture::GrabZone;

/// Visual size of the handle circle.
pub const HANDLE_VISUAL_SIZE: f32 = 6.0;

/// Fixed edge-zone height for blocks tall enough to have a body.
const EDGE_ZONE_HEIGHT: f32 = 20.0;

/// Cursor icon for a grab zone.
pub fn cursor_icon(zone: GrabZone) -> CursorIcon {
    match zone {
        GrabZone::Body => CursorIcon::Grab,
        GrabZone::StartEdge | GrabZone::EndEdge => CursorIcon::ResizeVertical,
    }
}

/// Grab-zone rectangles for one event block.
pub struct HandleRects {
    pub start: Option<Rect>,
    pub end: Option<Rect>,
}

impl HandleRects {
    /// Edge zones for a duration event block.
    ///
    /// Small blocks are split into top and bottom halves; larger ones get a
    /// fixed zone at each edge. Zones span the full block width for easy
    /// grabbing.
    pub fn for_event_block(block_rect: Rect) -> Self {
        let zone_height = if block_rect.height() < 50.0 {
            block_rect.height() / 2.0
        } else {
            EDGE_ZONE_HEIGHT
        };

        Self {
            start: Some(Rect::from_min_size(
                Pos2::new(block_rect.left(), block_rect.top()),
                Vec2::new(block_rect.width(), zone_height),
            )),
            end: Some(Rect::from_min_size(
                Pos2::new(block_rect.left(), block_rect.bottom() - zone_height),
                Vec2::new(block_rect.width(), zone_height),
            )),
        }
    }

    /// Milestones carry no edge zones; every press is a body press.
    pub fn for_milestone() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Which edge zone, if any, contains `pos`.
    pub fn hit_test(&self, pos: Pos2) -> Option<GrabZone> {
        if self.start.map_or(false, |r| r.contains(pos)) {
            Some(GrabZone::StartEdge)
        } else if self.end.map_or(false, |r| r.contains(pos)) {
            Some(GrabZone::EndEdge)
        } else {
            None
        }
    }

    /// Grab zone for `pos`, falling back to the body.
    pub fn zone_at(&self, pos: Pos2) -> GrabZone {
        self.hit_test(pos).unwrap_or(GrabZone::Body)
    }
}

/// Draw handle circles at the block edges.
pub fn draw_handles(
    ui: &egui::Ui,
    block_rect: Rect,
    handles: &HandleRects,
    hovered: Option<GrabZone>,
    color: egui::Color32,
) {
    let draw_circle = |center: Pos2, is_hovered: bool| {
        let radius = if is_hovered {
            HANDLE_VISUAL_SIZE / 2.0 + 1.0
        } else {
            HANDLE_VISUAL_SIZE / 2.0
        };

        ui.painter().circle_filled(
            center,
            radius,
            if is_hovered {
                egui::Color32::WHITE
            } else {
                egui::Color32::from_rgba_unmultiplied(
                    color.r().saturating_add(60),
                    color.g().saturating_add(60),
                    color.b().saturating_add(60),
                    color.a(),
                )
            },
        );
        ui.painter()
            .circle_stroke(center, radius, egui::Stroke::new(1.0, color.linear_multiply(0.6)));
    };

    if handles.start.is_some() {
        draw_circle(
            Pos2::new(
                block_rect.center().x,
                block_rect.top() + HANDLE_VISUAL_SIZE / 2.0 + 2.0,
            ),
            hovered == Some(GrabZone::StartEdge),
        );
    }
    if handles.end.is_some() {
        draw_circle(
            Pos2::new(
                block_rect.center().x,
                block_rect.bottom() - HANDLE_VISUAL_SIZE / 2.0 - 2.0,
            ),
            hovered == Some(GrabZone::EndEdge),
        );
    }
}

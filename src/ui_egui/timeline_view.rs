// Timeline view widget
//
// Renders one day's party schedule on a vertical time axis and feeds raw
// pointer/touch activity into the drag controller. Input is read at the
// context level rather than per-block so a drag keeps tracking after the
// pointer leaves the block it started on, and the same teardown path runs
// on release, touch-cancel and multi-touch.

use chrono::{Duration, Timelike};
use egui::{CursorIcon, Pos2, Rect, Sense, Stroke, Vec2};

use super::event_rendering::{
    draw_drag_preview, event_color, format_event_tooltip, render_event_block,
    render_milestone_marker,
};
use super::handles::{self, HandleRects};
use super::palette::TimelinePalette;
use crate::models::event::Event;
use crate::services::gesture::{DragController, GestureUpdate, GrabZone, PointerSource, TimeProposal};
use crate::services::layout::{compute_layout, LayoutError, RenderSlot, MILESTONE_HEIGHT};
use crate::services::timescale::TimeScale;

/// Width of the hour label gutter.
pub const GUTTER_WIDTH: f32 = 50.0;
/// Horizontal gap between packed columns.
pub const COLUMN_GAP: f32 = 2.0;
/// Blocks are never drawn shorter than this, however brief the event.
const MIN_BLOCK_HEIGHT: f32 = 18.0;

/// What the timeline produced this frame.
///
/// `proposal` streams continuously while a drag is in flight; the caller
/// decides whether to apply it live or only once `drag_finished` is set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineResponse {
    /// An event was tapped (selected/opened).
    pub tapped: Option<String>,
    pub proposal: Option<TimeProposal>,
    pub drag_finished: bool,
    /// Forward to the platform's vibration API if there is one.
    pub haptic_pulse: bool,
}

fn absorb(out: &mut TimelineResponse, update: GestureUpdate) {
    if update.tap.is_some() {
        out.tapped = update.tap;
    }
    if update.time_change.is_some() {
        out.proposal = update.time_change;
    }
    out.drag_finished |= update.drag_finished;
    out.haptic_pulse |= update.haptic_pulse;
}

/// One day's schedule on a vertical axis with drag-to-reschedule.
///
/// The caller owns the [`DragController`] so gesture state survives across
/// frames, and owns the event list - the view proposes new times but never
/// writes them back itself.
pub struct TimelineView<'a> {
    events: &'a [Event],
    scale: &'a TimeScale,
    palette: &'a TimelinePalette,
    controller: &'a mut DragController,
}

impl<'a> TimelineView<'a> {
    pub fn new(
        events: &'a [Event],
        scale: &'a TimeScale,
        palette: &'a TimelinePalette,
        controller: &'a mut DragController,
    ) -> Self {
        Self {
            events,
            scale,
            palette,
            controller,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) -> Result<TimelineResponse, LayoutError> {
        let slots = compute_layout(self.events, self.scale)?;

        let width = ui.available_width();
        let desired_size = Vec2::new(width, self.scale.total_height());
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        let lane = Rect::from_min_max(
            Pos2::new(rect.left() + GUTTER_WIDTH, rect.top()),
            rect.max,
        );

        self.paint_grid(ui, rect, lane);

        // Block rects in z-order (duration events first, milestones on top)
        let mut draw_list: Vec<(Rect, &Event)> = Vec::with_capacity(self.events.len());
        for event in self.events {
            let Some(slot) = slots.get(&event.id) else {
                continue;
            };
            let block_rect = if event.is_milestone() {
                milestone_rect(lane, slot)
            } else {
                column_rect(lane, slot)
            };
            if !block_rect.intersects(rect) {
                // Outside the visible window; hidden rather than clipped
                continue;
            }
            draw_list.push((block_rect, event));
        }

        let now = chrono::Local::now();
        for (block_rect, event) in &draw_list {
            if event.is_milestone() {
                render_milestone_marker(ui, *block_rect, event, self.palette);
            } else {
                render_event_block(ui, *block_rect, event, self.palette, now);
            }
        }

        let out = self.handle_input(ui, rect, &response, &draw_list);

        Ok(out)
    }

    fn paint_grid(&self, ui: &egui::Ui, rect: Rect, lane: Rect) {
        ui.painter().rect_filled(rect, 0.0, self.palette.background);
        ui.painter().rect_filled(
            Rect::from_min_max(rect.min, Pos2::new(lane.left(), rect.bottom())),
            0.0,
            self.palette.gutter_bg,
        );

        let total_minutes = (self.scale.window_end() - self.scale.window_start()).num_minutes();
        let mut minute = 0i64;
        while minute <= total_minutes {
            let t = self.scale.window_start() + Duration::minutes(minute);
            let y = rect.top() + self.scale.time_to_y(t);
            let is_hour = t.minute() == 0;

            ui.painter().line_segment(
                [Pos2::new(lane.left(), y), Pos2::new(lane.right(), y)],
                Stroke::new(
                    1.0,
                    if is_hour {
                        self.palette.hour_line
                    } else {
                        self.palette.slot_line
                    },
                ),
            );

            if is_hour {
                ui.painter().text(
                    Pos2::new(lane.left() - 6.0, y),
                    egui::Align2::RIGHT_CENTER,
                    t.format("%H:%M").to_string(),
                    egui::FontId::proportional(12.0),
                    self.palette.gutter_text,
                );
            }
            minute += 15;
        }
    }

    fn handle_input(
        self,
        ui: &mut egui::Ui,
        rect: Rect,
        response: &egui::Response,
        draw_list: &[(Rect, &Event)],
    ) -> TimelineResponse {
        let mut out = TimelineResponse::default();

        let now = ui.input(|i| i.time);
        let pointer_pos = ui.input(|i| i.pointer.interact_pos().or(i.pointer.hover_pos()));
        let any_touches = ui.input(|i| i.any_touches());
        let multi_touch = ui.input(|i| i.multi_touch().is_some());
        let touch_cancelled = ui.input(|i| {
            i.events.iter().any(|e| {
                matches!(
                    e,
                    egui::Event::Touch {
                        phase: egui::TouchPhase::Cancel,
                        ..
                    }
                )
            })
        });

        if touch_cancelled {
            absorb(&mut out, self.controller.cancel());
        }
        if multi_touch {
            absorb(&mut out, self.controller.contacts_changed(2));
        }

        let hit = pointer_pos.and_then(|pos| hit_test(draw_list, pos));

        // Gesture start
        if ui.input(|i| i.pointer.primary_pressed()) {
            if let Some(pos) = pointer_pos {
                if rect.contains(pos) {
                    if let Some((block_rect, event)) = hit {
                        let zone = if event.is_milestone() {
                            GrabZone::Body
                        } else {
                            HandleRects::for_event_block(block_rect).zone_at(pos)
                        };
                        let source = if any_touches {
                            PointerSource::Touch
                        } else {
                            PointerSource::Mouse
                        };
                        let contacts = if multi_touch { 2 } else { 1 };
                        absorb(
                            &mut out,
                            self.controller.begin(event, zone, pos, source, contacts, now),
                        );
                    }
                }
            }
        }

        // While a session is alive, keep the long-press timer polled and
        // stream moves; repaint so the timer can fire without fresh input.
        if self.controller.is_tracking() {
            absorb(&mut out, self.controller.poll_long_press(now));
            if let Some(pos) = pointer_pos {
                absorb(&mut out, self.controller.pointer_move(pos, self.scale, now));
            }
            ui.ctx().request_repaint();
        }

        // Gesture end; the release may land outside our rect and still
        // belongs to us, input is read at the context level.
        if ui.input(|i| i.pointer.primary_released()) {
            absorb(&mut out, self.controller.end(pointer_pos, self.scale, now));
        }

        // Drag preview silhouette across the full lane
        if self.controller.is_dragging() {
            if let Some(proposal) = &out.proposal {
                let y0 = rect.top() + self.scale.time_to_y(proposal.start);
                let y1 = match proposal.end {
                    Some(end) => rect.top() + self.scale.time_to_y(end),
                    None => y0 + MILESTONE_HEIGHT,
                };
                let preview = Rect::from_min_max(
                    Pos2::new(rect.left() + GUTTER_WIDTH, y0.min(y1)),
                    Pos2::new(rect.right(), y0.max(y1)),
                );
                draw_drag_preview(ui, preview, self.palette);
            }
            ui.output_mut(|o| o.cursor_icon = CursorIcon::Grabbing);
        } else if let (Some(pos), Some((block_rect, event))) = (pointer_pos, hit) {
            // Hover affordances when idle
            ui.painter()
                .rect_filled(block_rect, 2.0, self.palette.hover_overlay);
            let zone = if event.is_milestone() {
                GrabZone::Body
            } else {
                let handle_rects = HandleRects::for_event_block(block_rect);
                let zone = handle_rects.zone_at(pos);
                draw_handles(ui, block_rect, &handle_rects, zone, event, self.palette);
                zone
            };
            ui.output_mut(|o| o.cursor_icon = handles::cursor_icon(zone));

            if response.hovered() {
                let tooltip = format_event_tooltip(event);
                response.clone().on_hover_ui_at_pointer(|ui| {
                    ui.label(tooltip);
                });
            }
        }

        out
    }
}

fn draw_handles(
    ui: &egui::Ui,
    block_rect: Rect,
    handle_rects: &HandleRects,
    hovered_zone: GrabZone,
    event: &Event,
    palette: &TimelinePalette,
) {
    let hovered = match hovered_zone {
        GrabZone::Body => None,
        zone => Some(zone),
    };
    handles::draw_handles(ui, block_rect, handle_rects, hovered, event_color(event, palette));
}

/// Topmost block under `pos`.
fn hit_test<'e>(draw_list: &[(Rect, &'e Event)], pos: Pos2) -> Option<(Rect, &'e Event)> {
    draw_list
        .iter()
        .rev()
        .find(|(block_rect, _)| block_rect.contains(pos))
        .copied()
}

/// Pixel rectangle for a duration event's column slot.
pub(crate) fn column_rect(lane: Rect, slot: &RenderSlot) -> Rect {
    let count = slot.column_count.max(1) as f32;
    let column_width = (lane.width() - COLUMN_GAP * (count - 1.0)) / count;
    let x = lane.left() + slot.column_index as f32 * (column_width + COLUMN_GAP);
    Rect::from_min_size(
        Pos2::new(x, lane.top() + slot.top_offset),
        Vec2::new(column_width, slot.height.max(MIN_BLOCK_HEIGHT)),
    )
}

/// Pixel rectangle for a milestone marker, centred on its instant and
/// spanning the full lane.
pub(crate) fn milestone_rect(lane: Rect, slot: &RenderSlot) -> Rect {
    Rect::from_min_size(
        Pos2::new(lane.left(), lane.top() + slot.top_offset - slot.height / 2.0),
        Vec2::new(lane.width(), slot.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane() -> Rect {
        Rect::from_min_size(Pos2::new(50.0, 0.0), Vec2::new(402.0, 1000.0))
    }

    #[test]
    fn test_column_rects_split_the_lane() {
        let left = column_rect(
            lane(),
            &RenderSlot {
                top_offset: 100.0,
                height: 60.0,
                column_index: 0,
                column_count: 2,
            },
        );
        let right = column_rect(
            lane(),
            &RenderSlot {
                top_offset: 120.0,
                height: 60.0,
                column_index: 1,
                column_count: 2,
            },
        );

        assert_eq!(left.width(), right.width());
        assert_eq!(left.width(), 200.0);
        assert!(left.right() < right.left());
        assert_eq!(right.right(), lane().right());
    }

    #[test]
    fn test_single_column_fills_the_lane() {
        let block = column_rect(
            lane(),
            &RenderSlot {
                top_offset: 0.0,
                height: 120.0,
                column_index: 0,
                column_count: 1,
            },
        );
        assert_eq!(block.width(), lane().width());
    }

    #[test]
    fn test_tiny_events_keep_a_readable_height() {
        let block = column_rect(
            lane(),
            &RenderSlot {
                top_offset: 0.0,
                height: 4.0,
                column_index: 0,
                column_count: 1,
            },
        );
        assert_eq!(block.height(), 18.0);
    }

    #[test]
    fn test_milestone_rect_is_centred_on_the_instant() {
        let marker = milestone_rect(
            lane(),
            &RenderSlot {
                top_offset: 500.0,
                height: MILESTONE_HEIGHT,
                column_index: 0,
                column_count: 1,
            },
        );
        assert_eq!(marker.center().y, 500.0);
        assert_eq!(marker.width(), lane().width());
    }
}

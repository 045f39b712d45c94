// Party planner demo application
// Hosts the timeline widget in an eframe window

use chrono::Local;

use super::palette::TimelinePalette;
use super::timeline_view::{TimelineResponse, TimelineView};
use crate::models::event::{Category, Event, Priority};
use crate::models::settings::TimelineSettings;
use crate::services::gesture::{DragController, GestureConfig, TimeProposal};
use crate::services::timescale::TimeScale;
use crate::utils::date::day_at_hour;

pub struct PartyPlannerApp {
    events: Vec<Event>,
    settings: TimelineSettings,
    palette: TimelinePalette,
    controller: DragController,
    /// Latest proposal of the in-flight drag, committed on drag end.
    live_proposal: Option<TimeProposal>,
    status: String,
}

impl PartyPlannerApp {
    pub fn new(settings: TimelineSettings) -> Self {
        let palette = TimelinePalette::from_mode(settings.theme);
        let controller = DragController::new(GestureConfig {
            drag_threshold: settings.drag_threshold,
            long_press_secs: settings.long_press_secs,
            min_duration_minutes: settings.min_duration_minutes,
            snap_minutes: settings.snap_minutes,
        });

        Self {
            events: sample_schedule(&settings),
            settings,
            palette,
            controller,
            live_proposal: None,
            status: "Ready".to_string(),
        }
    }

    fn day_scale(&self) -> Result<TimeScale, String> {
        let today = Local::now();
        TimeScale::new(
            day_at_hour(today, self.settings.day_start_hour),
            day_at_hour(today, self.settings.day_end_hour),
            self.settings.pixels_per_minute,
        )
    }

    fn handle_response(&mut self, response: TimelineResponse) {
        if let Some(id) = &response.tapped {
            if let Some(event) = self.events.iter().find(|e| &e.id == id) {
                self.status = format!("Selected '{}'", event.title);
                log::info!("tapped event '{}'", event.id);
            }
        }

        if response.haptic_pulse {
            // A real mobile shell would forward this to the vibration API
            log::debug!("haptic pulse");
        }

        if let Some(proposal) = response.proposal {
            self.status = match proposal.end {
                Some(end) => format!(
                    "{} -> {} - {}",
                    proposal.event_id,
                    proposal.start.format("%H:%M"),
                    end.format("%H:%M")
                ),
                None => format!("{} -> {}", proposal.event_id, proposal.start.format("%H:%M")),
            };
            self.live_proposal = Some(proposal);
        }

        if response.drag_finished {
            if let Some(proposal) = self.live_proposal.take() {
                if let Some(event) = self.events.iter_mut().find(|e| e.id == proposal.event_id) {
                    event.start = proposal.start;
                    event.end = proposal.end;
                    self.status = format!("Rescheduled '{}'", event.title);
                    log::info!("committed new times for '{}'", event.id);
                }
            }
        }
    }
}

impl eframe::App for PartyPlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let scale = match self.day_scale() {
                Ok(scale) => scale,
                Err(e) => {
                    ui.colored_label(egui::Color32::RED, e);
                    return;
                }
            };

            egui::ScrollArea::vertical().show(ui, |ui| {
                let view =
                    TimelineView::new(&self.events, &scale, &self.palette, &mut self.controller);
                match view.show(ui) {
                    Ok(response) => self.handle_response(response),
                    Err(e) => {
                        log::error!("timeline layout failed: {e}");
                        ui.colored_label(egui::Color32::RED, e.to_string());
                    }
                }
            });
        });
    }
}

fn sample_schedule(settings: &TimelineSettings) -> Vec<Event> {
    let today = Local::now();
    let at = |hour: u32, minute: i64| {
        day_at_hour(today, hour.min(settings.day_end_hour)) + chrono::Duration::minutes(minute)
    };

    let events = vec![
        Event::builder()
            .id("setup")
            .title("Venue setup")
            .start(at(9, 0))
            .end(at(11, 0))
            .category(Category::Setup)
            .build(),
        Event::builder()
            .id("balloons")
            .title("Balloons & decorations")
            .start(at(10, 0))
            .end(at(11, 30))
            .category(Category::Setup)
            .build(),
        Event::builder()
            .id("catering")
            .title("Catering drop-off")
            .start(at(11, 0))
            .end(at(12, 0))
            .category(Category::Food)
            .build(),
        Event::builder()
            .id("lunch")
            .title("Buffet lunch")
            .start(at(12, 30))
            .end(at(14, 0))
            .category(Category::Food)
            .build(),
        Event::builder()
            .id("cake")
            .title("Cake arrives")
            .start(at(14, 0))
            .category(Category::Food)
            .build(),
        Event::builder()
            .id("band")
            .title("Live band")
            .start(at(15, 0))
            .end(at(18, 0))
            .category(Category::Entertainment)
            .priority(Priority::High)
            .build(),
        Event::builder()
            .id("games")
            .title("Garden games")
            .start(at(15, 30))
            .end(at(17, 0))
            .category(Category::Activity)
            .build(),
        Event::builder()
            .id("cleanup")
            .title("Cleanup crew")
            .start(at(20, 0))
            .end(at(21, 30))
            .category(Category::Cleanup)
            .build(),
    ];

    events
        .into_iter()
        .filter_map(|result| match result {
            Ok(event) => Some(event),
            Err(e) => {
                log::warn!("skipping sample event: {e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_schedule_is_valid() {
        let events = sample_schedule(&TimelineSettings::default());
        assert!(!events.is_empty());
        for event in &events {
            assert!(event.validate().is_ok(), "event '{}' invalid", event.id);
        }
    }

    #[test]
    fn test_sample_schedule_has_a_milestone() {
        let events = sample_schedule(&TimelineSettings::default());
        assert!(events.iter().any(|e| e.is_milestone()));
    }
}

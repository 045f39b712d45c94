// Property-based tests for the timeline invariants
// Random schedules and drags must never violate the packing, mapping,
// or duration guarantees.

mod fixtures;

use chrono::Duration;
use egui::Pos2;
use proptest::prelude::*;

use fixtures::{day_scale, party_day, timed_event};
use party_timeline::models::event::Event;
use party_timeline::services::gesture::{
    DragController, GestureConfig, GrabZone, PointerSource,
};
use party_timeline::services::layout::compute_layout;
use party_timeline::services::timescale::TimeScale;

/// Build a schedule from (offset-minutes, duration-minutes) pairs inside
/// the 08:00-22:00 fixture window.
fn schedule_from(raw: &[(i64, i64)]) -> Vec<Event> {
    raw.iter()
        .enumerate()
        .map(|(i, (offset, duration))| {
            let start = party_day(8, 0) + Duration::minutes(*offset);
            timed_event(&format!("e{i}"), start, start + Duration::minutes(*duration))
        })
        .collect()
}

fn overlaps(a: &Event, b: &Event) -> bool {
    a.start < b.end.unwrap() && b.start < a.end.unwrap()
}

proptest! {
    /// Property: overlapping events in the same cluster never share a column,
    /// agree on the column count, and stay within it.
    #[test]
    fn prop_overlapping_events_never_share_a_column(
        raw in prop::collection::vec((0..700i64, 10..180i64), 1..40),
    ) {
        let events = schedule_from(&raw);
        let slots = compute_layout(&events, &day_scale()).unwrap();

        for a in &events {
            let slot_a = &slots[&a.id];
            prop_assert!(slot_a.column_index < slot_a.column_count);
            for b in &events {
                if a.id != b.id && overlaps(a, b) {
                    prop_assert_ne!(slot_a.column_index, slots[&b.id].column_index);
                    prop_assert_eq!(slot_a.column_count, slots[&b.id].column_count);
                }
            }
        }
    }

    /// Property: the column count of a cluster never exceeds the peak number
    /// of simultaneously running events, so no width is wasted.
    #[test]
    fn prop_column_count_never_exceeds_peak_overlap(
        raw in prop::collection::vec((0..700i64, 10..180i64), 1..30),
    ) {
        let events = schedule_from(&raw);
        let slots = compute_layout(&events, &day_scale()).unwrap();

        for event in &events {
            // Peak concurrency over the event's own span bounds its cluster's
            // width requirement from below at every event boundary instant.
            let depth_at_start = events
                .iter()
                .filter(|other| other.start <= event.start && event.start < other.end.unwrap())
                .count();
            prop_assert!(slots[&event.id].column_count >= depth_at_start.max(1));
        }

        let peak = events
            .iter()
            .map(|e| {
                events
                    .iter()
                    .filter(|other| other.start <= e.start && e.start < other.end.unwrap())
                    .count()
            })
            .max()
            .unwrap_or(1);
        for event in &events {
            prop_assert!(slots[&event.id].column_count <= peak);
        }
    }

    /// Property: layout does not depend on the order events arrive in.
    #[test]
    fn prop_layout_is_permutation_invariant(
        raw in prop::collection::vec((0..700i64, 10..180i64), 1..30),
    ) {
        let forward = schedule_from(&raw);
        let mut reversed = forward.clone();
        reversed.reverse();

        let slots_forward = compute_layout(&forward, &day_scale()).unwrap();
        let slots_reversed = compute_layout(&reversed, &day_scale()).unwrap();
        prop_assert_eq!(slots_forward, slots_reversed);
    }

    /// Property: pixel mapping round-trips exactly for whole minutes.
    #[test]
    fn prop_round_trip_mapping(minutes in 0..840i64) {
        let scale = day_scale();
        let t = scale.window_start() + Duration::minutes(minutes);
        prop_assert_eq!(scale.y_to_time(scale.time_to_y(t)), t);
    }

    /// Property: snapping lands on the grid and moves by at most half a
    /// grid unit.
    #[test]
    fn prop_snap_lands_on_grid(minutes in 0..840i64, seconds in 0..60i64, grid in 1..60i64) {
        let t = party_day(8, 0) + Duration::minutes(minutes) + Duration::seconds(seconds);
        let snapped = TimeScale::snap_to_grid(t, grid);

        prop_assert_eq!(snapped.timestamp() % (grid * 60), 0);
        prop_assert!((snapped - t).num_seconds().abs() <= grid * 30);
    }

    /// Property: no resize drag, however violent, produces a duration under
    /// the configured floor.
    #[test]
    fn prop_resize_never_undershoots_min_duration(
        dy in -5000.0..5000.0f32,
        from_end in proptest::bool::ANY,
    ) {
        let scale = day_scale();
        let event = timed_event("lunch", party_day(12, 0), party_day(13, 0));
        let mut controller = DragController::new(GestureConfig::default());
        let zone = if from_end { GrabZone::EndEdge } else { GrabZone::StartEdge };
        let anchor = Pos2::new(100.0, 500.0);

        controller.begin(&event, zone, anchor, PointerSource::Mouse, 1, 0.0);
        let update = controller.pointer_move(Pos2::new(100.0, anchor.y + dy), &scale, 0.1);

        if let Some(proposal) = update.time_change {
            let duration = proposal.end.unwrap() - proposal.start;
            prop_assert!(duration >= Duration::minutes(15));
        }
    }

    /// Property: a move drag preserves duration exactly, through snapping
    /// and window clamping alike.
    #[test]
    fn prop_move_preserves_duration(dy in -5000.0..5000.0f32) {
        let scale = day_scale();
        let event = timed_event("band", party_day(15, 0), party_day(16, 30));
        let mut controller = DragController::new(GestureConfig::default());
        let anchor = Pos2::new(100.0, 840.0);

        controller.begin(&event, GrabZone::Body, anchor, PointerSource::Mouse, 1, 0.0);
        let update = controller.pointer_move(Pos2::new(100.0, anchor.y + dy), &scale, 0.1);

        if let Some(proposal) = update.time_change {
            prop_assert_eq!(
                proposal.end.unwrap() - proposal.start,
                Duration::minutes(90)
            );
            prop_assert!(proposal.start >= scale.window_start());
            prop_assert!(proposal.end.unwrap() <= scale.window_end());
        }
    }
}

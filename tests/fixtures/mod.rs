// Test fixtures - reusable test data
// Provides a consistent party schedule across test files

#![allow(dead_code)]

use chrono::{DateTime, Local, TimeZone};

use party_timeline::models::event::{Category, Event};
use party_timeline::services::timescale::TimeScale;

/// A fixed party day so tests are independent of the wall clock.
pub fn party_day(hour: u32, minute: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2025, 6, 14, hour, minute, 0)
        .unwrap()
}

/// The day window every fixture scale uses: 08:00-22:00 at 2 px/min.
pub fn day_scale() -> TimeScale {
    TimeScale::new(party_day(8, 0), party_day(22, 0), 2.0).unwrap()
}

pub fn timed_event(id: &str, start: DateTime<Local>, end: DateTime<Local>) -> Event {
    Event::new(id, format!("Event {id}"), start, Some(end)).unwrap()
}

/// A realistic schedule: overlapping setup work, food hand-offs, an
/// afternoon cluster of entertainment, and one milestone.
pub fn sample_schedule() -> Vec<Event> {
    vec![
        Event::builder()
            .id("setup")
            .title("Venue setup")
            .start(party_day(9, 0))
            .end(party_day(11, 0))
            .category(Category::Setup)
            .build()
            .unwrap(),
        Event::builder()
            .id("balloons")
            .title("Balloons & decorations")
            .start(party_day(10, 0))
            .end(party_day(11, 30))
            .category(Category::Setup)
            .build()
            .unwrap(),
        Event::builder()
            .id("catering")
            .title("Catering drop-off")
            .start(party_day(11, 0))
            .end(party_day(12, 0))
            .category(Category::Food)
            .build()
            .unwrap(),
        Event::builder()
            .id("cake")
            .title("Cake arrives")
            .start(party_day(14, 0))
            .category(Category::Food)
            .build()
            .unwrap(),
        Event::builder()
            .id("band")
            .title("Live band")
            .start(party_day(15, 0))
            .end(party_day(18, 0))
            .category(Category::Entertainment)
            .build()
            .unwrap(),
        Event::builder()
            .id("games")
            .title("Garden games")
            .start(party_day(15, 30))
            .end(party_day(17, 0))
            .category(Category::Activity)
            .build()
            .unwrap(),
        Event::builder()
            .id("cleanup")
            .title("Cleanup crew")
            .start(party_day(20, 0))
            .end(party_day(21, 30))
            .category(Category::Cleanup)
            .build()
            .unwrap(),
    ]
}

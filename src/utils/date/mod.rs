// Date utility functions

use chrono::{DateTime, Duration, Local, TimeZone};

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    date1.date_naive() == date2.date_naive()
}

pub fn start_of_day(date: DateTime<Local>) -> DateTime<Local> {
    date.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|naive| date.timezone().from_local_datetime(&naive).single())
        .unwrap_or(date)
}

/// The given day at `hour:00` local time.
pub fn day_at_hour(date: DateTime<Local>, hour: u32) -> DateTime<Local> {
    start_of_day(date) + Duration::hours(i64::from(hour))
}

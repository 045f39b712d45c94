// Timeline coordinate mapper
// Converts between wall-clock time and vertical pixel offsets

use chrono::{DateTime, Duration, Local, TimeZone};

/// Maps instants inside a visible window to vertical pixel offsets and back.
///
/// The mapping is pure and symmetric: the layout engine and the drag state
/// machine use the same scale, so a pixel offset means the same instant in
/// both directions. Out-of-window times are NOT clamped here - callers
/// decide whether such events are hidden or clipped at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    window_start: DateTime<Local>,
    window_end: DateTime<Local>,
    pixels_per_minute: f32,
}

impl TimeScale {
    pub fn new(
        window_start: DateTime<Local>,
        window_end: DateTime<Local>,
        pixels_per_minute: f32,
    ) -> Result<Self, String> {
        if window_end <= window_start {
            return Err("Window end must be after window start".to_string());
        }
        if pixels_per_minute <= 0.0 {
            return Err("pixels_per_minute must be positive".to_string());
        }
        Ok(Self {
            window_start,
            window_end,
            pixels_per_minute,
        })
    }

    pub fn window_start(&self) -> DateTime<Local> {
        self.window_start
    }

    pub fn window_end(&self) -> DateTime<Local> {
        self.window_end
    }

    pub fn pixels_per_minute(&self) -> f32 {
        self.pixels_per_minute
    }

    /// Total pixel height of the visible window.
    pub fn total_height(&self) -> f32 {
        self.time_to_y(self.window_end)
    }

    /// Pixel offset of `t` from the top of the window. Negative above it.
    pub fn time_to_y(&self, t: DateTime<Local>) -> f32 {
        let minutes = (t - self.window_start).num_seconds() as f64 / 60.0;
        (minutes * f64::from(self.pixels_per_minute)) as f32
    }

    /// Instant at pixel offset `y` from the top of the window.
    ///
    /// Resolves to whole seconds; at usual densities one pixel spans well
    /// over a second, so nothing observable is lost.
    pub fn y_to_time(&self, y: f32) -> DateTime<Local> {
        let minutes = f64::from(y) / f64::from(self.pixels_per_minute);
        self.window_start + Duration::seconds((minutes * 60.0).round() as i64)
    }

    /// Signed minutes spanned by a vertical pixel delta.
    pub fn delta_minutes(&self, dy: f32) -> f64 {
        f64::from(dy) / f64::from(self.pixels_per_minute)
    }

    /// Round `t` to the nearest multiple of `grid_minutes`, anchored at the
    /// Unix epoch so snapping is independent of the visible window.
    pub fn snap_to_grid(t: DateTime<Local>, grid_minutes: i64) -> DateTime<Local> {
        debug_assert!(grid_minutes > 0);
        let grid_secs = grid_minutes * 60;
        let rounded = (t.timestamp() as f64 / grid_secs as f64).round() as i64 * grid_secs;
        Local
            .timestamp_opt(rounded, 0)
            .single()
            .unwrap_or(t)
    }

    /// Clamp `t` into the visible window.
    pub fn clamp_to_window(&self, t: DateTime<Local>) -> DateTime<Local> {
        t.clamp(self.window_start, self.window_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn scale() -> TimeScale {
        let start = Local.with_ymd_and_hms(2025, 6, 14, 8, 0, 0).unwrap();
        let end = Local.with_ymd_and_hms(2025, 6, 14, 22, 0, 0).unwrap();
        TimeScale::new(start, end, 2.0).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_window() {
        let start = Local.with_ymd_and_hms(2025, 6, 14, 8, 0, 0).unwrap();
        assert!(TimeScale::new(start, start, 2.0).is_err());
    }

    #[test]
    fn test_new_rejects_zero_density() {
        let start = Local.with_ymd_and_hms(2025, 6, 14, 8, 0, 0).unwrap();
        let end = start + Duration::hours(1);
        assert!(TimeScale::new(start, end, 0.0).is_err());
    }

    #[test]
    fn test_window_start_maps_to_zero() {
        let scale = scale();
        assert_eq!(scale.time_to_y(scale.window_start()), 0.0);
    }

    #[test]
    fn test_time_to_y_uses_density() {
        let scale = scale();
        let t = scale.window_start() + Duration::minutes(90);
        assert_eq!(scale.time_to_y(t), 180.0);
    }

    #[test]
    fn test_times_before_window_are_negative_not_clamped() {
        let scale = scale();
        let t = scale.window_start() - Duration::minutes(30);
        assert_eq!(scale.time_to_y(t), -60.0);
    }

    #[test]
    fn test_total_height() {
        // 14 hours at 2 px/min
        assert_eq!(scale().total_height(), 14.0 * 60.0 * 2.0);
    }

    #[test]
    fn test_round_trip_inside_window() {
        let scale = scale();
        for minutes in [0i64, 1, 17, 240, 839] {
            let t = scale.window_start() + Duration::minutes(minutes);
            assert_eq!(scale.y_to_time(scale.time_to_y(t)), t);
        }
    }

    #[test]
    fn test_delta_minutes_is_signed() {
        let scale = scale();
        assert_eq!(scale.delta_minutes(60.0), 30.0);
        assert_eq!(scale.delta_minutes(-60.0), -30.0);
    }

    #[test_case(2, 0; "two minutes rounds down")]
    #[test_case(3, 5; "three minutes rounds up")]
    #[test_case(7, 5; "seven rounds to five")]
    #[test_case(13, 15; "thirteen rounds to fifteen")]
    #[test_case(55, 55; "on grid stays put")]
    fn test_snap_to_five_minute_grid(minute: u32, expected: u32) {
        let t = Local.with_ymd_and_hms(2025, 6, 14, 9, minute, 0).unwrap();
        let snapped = TimeScale::snap_to_grid(t, 5);
        assert_eq!(
            snapped,
            Local.with_ymd_and_hms(2025, 6, 14, 9, expected, 0).unwrap()
        );
    }

    #[test]
    fn test_snap_is_idempotent_on_grid_times() {
        let t = Local.with_ymd_and_hms(2025, 6, 14, 9, 15, 0).unwrap();
        assert_eq!(TimeScale::snap_to_grid(t, 15), t);
    }

    #[test]
    fn test_clamp_to_window() {
        let scale = scale();
        let before = scale.window_start() - Duration::hours(1);
        let after = scale.window_end() + Duration::hours(1);
        assert_eq!(scale.clamp_to_window(before), scale.window_start());
        assert_eq!(scale.clamp_to_window(after), scale.window_end());

        let inside = scale.window_start() + Duration::hours(3);
        assert_eq!(scale.clamp_to_window(inside), inside);
    }
}

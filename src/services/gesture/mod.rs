// Gesture arbitration for timeline events
//
// Converts raw pointer/touch activity on one event into a tap, a move drag,
// or a resize drag. A press is "tracking" until either the pointer travels
// past the drag threshold (mouse path) or a long-press elapses (touch path);
// only then does it become a drag. Anything less ends as a tap, and a drag
// always swallows the click that follows it.

use chrono::{DateTime, Duration, Local};
use egui::Pos2;

use crate::models::event::Event;
use crate::services::timescale::TimeScale;

/// Which part of the event block was grabbed at gesture start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrabZone {
    /// The body: drags reschedule, taps select.
    Body,
    /// Top edge: drags adjust the start time. Never taps.
    StartEdge,
    /// Bottom edge: drags adjust the end time. Never taps.
    EndEdge,
}

impl GrabZone {
    fn drag_mode(self) -> DragMode {
        match self {
            GrabZone::Body => DragMode::Move,
            GrabZone::StartEdge => DragMode::ResizeStart,
            GrabZone::EndEdge => DragMode::ResizeEnd,
        }
    }
}

/// What an active drag does to the event's time range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    /// Shift start and end together, duration preserved exactly.
    Move,
    /// Shift only the start, floored at `end - min_duration`.
    ResizeStart,
    /// Shift only the end, floored at `start + min_duration`.
    ResizeEnd,
}

/// Where the gesture stream originates. Touch arms a long-press timer,
/// mouse does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Tunable gesture behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Euclidean pointer displacement (px) before a press becomes a drag.
    pub drag_threshold: f32,
    /// Touch hold time (seconds) before a press becomes a move drag.
    pub long_press_secs: f64,
    /// Shortest duration a resize may produce, in minutes.
    pub min_duration_minutes: i64,
    /// Grid granularity drag results are rounded to, in minutes.
    pub snap_minutes: i64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: 10.0,
            long_press_secs: 0.3,
            min_duration_minutes: 15,
            snap_minutes: 5,
        }
    }
}

/// Proposed new time range for an event, emitted while dragging.
///
/// The controller never mutates the event store; the caller decides whether
/// to apply proposals live or only on drag end.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeProposal {
    pub event_id: String,
    pub start: DateTime<Local>,
    /// `None` for milestones.
    pub end: Option<DateTime<Local>>,
}

/// Effects produced by feeding one input to the controller.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureUpdate {
    /// The gesture completed as a tap on this event.
    pub tap: Option<String>,
    pub time_change: Option<TimeProposal>,
    /// Trigger one short haptic pulse (long-press recognised).
    pub haptic_pulse: bool,
    /// A drag ended; global move/end listeners can detach.
    pub drag_finished: bool,
}

impl GestureUpdate {
    pub fn has_effects(&self) -> bool {
        self.tap.is_some() || self.time_change.is_some() || self.haptic_pulse || self.drag_finished
    }
}

/// Ephemeral state for one pointer/touch sequence on one event.
///
/// Created on gesture start, dropped on end/cancel. The original times are
/// snapshotted once and every delta is computed against them, so repeated
/// moves cannot accumulate rounding drift.
#[derive(Debug, Clone)]
struct GestureSession {
    event_id: String,
    zone: GrabZone,
    source: PointerSource,
    anchor: Pos2,
    original_start: DateTime<Local>,
    original_end: Option<DateTime<Local>>,
    crossed_threshold: bool,
    /// Armed long-press deadline (host clock seconds); consumed on fire.
    long_press_deadline: Option<f64>,
    /// Touch slid past the threshold before the long-press fired: the
    /// gesture is a scroll, and neither drags nor taps for its remainder.
    scroll_bailout: bool,
    /// `Some` once the gesture has been promoted to a drag.
    mode: Option<DragMode>,
}

/// State machine arbitrating taps, move drags and resize drags for the
/// events of one timeline.
///
/// The host feeds it gesture-start/move/end calls together with the current
/// clock (`now`, seconds - egui's input time), and polls
/// [`poll_long_press`](Self::poll_long_press) while a touch session is
/// tracking. Every call returns the effects to apply; the controller holds
/// no callbacks and persists nothing.
///
/// Tap suppression is a synchronously readable flag
/// ([`tap_blocked`](Self::tap_blocked)) updated the instant the threshold
/// is crossed, so a click handler running in the same input tick always
/// sees the truth. It stays set through the click that trails a drag and
/// clears only at the next gesture start.
pub struct DragController {
    config: GestureConfig,
    session: Option<GestureSession>,
    tap_blocked: bool,
}

impl DragController {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            session: None,
            tap_blocked: false,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// True once the current gesture has been promoted to a drag.
    pub fn is_dragging(&self) -> bool {
        self.session
            .as_ref()
            .map_or(false, |session| session.mode.is_some())
    }

    /// True while any gesture session is alive.
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    pub fn drag_mode(&self) -> Option<DragMode> {
        self.session.as_ref().and_then(|session| session.mode)
    }

    /// Id of the event owning the active session, if any.
    pub fn active_event_id(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.event_id.as_str())
    }

    /// Whether the click trailing the last gesture must be swallowed.
    pub fn tap_blocked(&self) -> bool {
        self.tap_blocked
    }

    /// Start a gesture on `event`.
    ///
    /// A stale session is always discarded first - a new press must never
    /// inherit state from a gesture whose end was lost. Multi-touch
    /// (`contacts > 1`) is rejected outright: no session is created and the
    /// contact sequence can produce neither a drag nor a tap.
    pub fn begin(
        &mut self,
        event: &Event,
        zone: GrabZone,
        pos: Pos2,
        source: PointerSource,
        contacts: usize,
        now: f64,
    ) -> GestureUpdate {
        let mut update = self.discard_session();
        self.tap_blocked = false;

        if contacts > 1 {
            log::debug!("multi-touch press on '{}' rejected", event.id);
            return update;
        }

        // Grabbing a resize handle is never a valid way to select the
        // event, so the trailing click is blocked from the start.
        self.tap_blocked = zone != GrabZone::Body;

        let long_press_deadline = match source {
            PointerSource::Touch => Some(now + self.config.long_press_secs),
            PointerSource::Mouse => None,
        };

        self.session = Some(GestureSession {
            event_id: event.id.clone(),
            zone,
            source,
            anchor: pos,
            original_start: event.start,
            original_end: event.end,
            crossed_threshold: false,
            long_press_deadline,
            scroll_bailout: false,
            mode: None,
        });

        update
    }

    /// Feed a pointer/touch move. Emits a time proposal on every call while
    /// dragging.
    pub fn pointer_move(&mut self, pos: Pos2, scale: &TimeScale, now: f64) -> GestureUpdate {
        let mut update = GestureUpdate::default();
        update.haptic_pulse = self.fire_long_press_if_due(now);

        let Some(session) = self.session.as_mut() else {
            return update;
        };
        if session.scroll_bailout {
            return update;
        }

        if session.mode.is_none() {
            let displacement = session.anchor.distance(pos);
            if displacement > self.config.drag_threshold {
                session.crossed_threshold = true;
                self.tap_blocked = true;

                if session.source == PointerSource::Touch && session.long_press_deadline.is_some()
                {
                    // Finger slid while tapping: a scroll, not a reschedule.
                    session.long_press_deadline = None;
                    session.scroll_bailout = true;
                    return update;
                }

                session.mode = Some(session.zone.drag_mode());
                log::debug!(
                    "'{}' entered {:?} drag after {displacement:.1}px",
                    session.event_id,
                    session.mode
                );
            }
        }

        if session.mode.is_some() {
            update.time_change = Self::proposal(session, &self.config, pos, scale);
        }
        update
    }

    /// Deliver the long-press timer. Safe to call every frame; the deadline
    /// is consumed on fire, so the haptic pulse is emitted exactly once.
    pub fn poll_long_press(&mut self, now: f64) -> GestureUpdate {
        GestureUpdate {
            haptic_pulse: self.fire_long_press_if_due(now),
            ..Default::default()
        }
    }

    /// Report a change in the number of touch contacts. A second finger
    /// landing mid-gesture drops the session.
    pub fn contacts_changed(&mut self, contacts: usize) -> GestureUpdate {
        if contacts > 1 && self.session.is_some() {
            log::debug!("second contact landed, dropping gesture session");
            return self.discard_session();
        }
        GestureUpdate::default()
    }

    /// Finish the gesture (pointer-up / touch-end).
    ///
    /// A drag reports `drag_finished` plus a final proposal; an untravelled
    /// body press reports a tap. `pos` may be `None` when the ending input
    /// carried no position (noisy hardware streams do this) - the gesture
    /// then ends without a final proposal.
    pub fn end(&mut self, pos: Option<Pos2>, scale: &TimeScale, now: f64) -> GestureUpdate {
        let mut update = GestureUpdate::default();
        update.haptic_pulse = self.fire_long_press_if_due(now);

        let Some(session) = self.session.take() else {
            return update;
        };

        if session.mode.is_some() {
            update.drag_finished = true;
            if let Some(pos) = pos {
                update.time_change = Self::proposal(&session, &self.config, pos, scale);
            }
        } else if !session.scroll_bailout
            && !session.crossed_threshold
            && session.zone == GrabZone::Body
        {
            update.tap = Some(session.event_id);
        }

        update
    }

    /// Abort the gesture (touch-cancel, widget teardown, focus loss).
    ///
    /// Clears the session and any armed long-press deadline; nothing may
    /// fire afterwards. Reports `drag_finished` if a drag was in flight so
    /// the host detaches its global listeners.
    pub fn cancel(&mut self) -> GestureUpdate {
        self.discard_session()
    }

    fn discard_session(&mut self) -> GestureUpdate {
        let mut update = GestureUpdate::default();
        if let Some(session) = self.session.take() {
            update.drag_finished = session.mode.is_some();
        }
        update
    }

    fn fire_long_press_if_due(&mut self, now: f64) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let due = session
            .long_press_deadline
            .map_or(false, |deadline| now >= deadline);
        if !due || session.scroll_bailout || session.mode.is_some() {
            return false;
        }

        // Held still long enough: a deliberate drag, regardless of
        // displacement and of the zone under the finger.
        session.long_press_deadline = None;
        session.mode = Some(DragMode::Move);
        self.tap_blocked = true;
        log::debug!("'{}' long-press promoted to move drag", session.event_id);
        true
    }

    /// Compute the proposed time range for the current pointer position.
    ///
    /// The delta is taken against the gesture-start snapshot, then the mode
    /// is applied, the result snapped to the grid, clipped to the window,
    /// and for resizes the minimum-duration floor is re-imposed so snap
    /// rounding can never undercut it.
    fn proposal(
        session: &GestureSession,
        config: &GestureConfig,
        pos: Pos2,
        scale: &TimeScale,
    ) -> Option<TimeProposal> {
        let mode = session.mode?;
        let delta_minutes = scale.delta_minutes(pos.y - session.anchor.y);
        let delta = Duration::seconds((delta_minutes * 60.0).round() as i64);
        let min_duration = Duration::minutes(config.min_duration_minutes);
        let window_start = scale.window_start();
        let window_end = scale.window_end();

        let (start, end) = match (mode, session.original_end) {
            (DragMode::Move, None) => {
                let start = TimeScale::snap_to_grid(session.original_start + delta, config.snap_minutes);
                (start.clamp(window_start, window_end), None)
            }
            (DragMode::Move, Some(original_end)) => {
                let duration = original_end - session.original_start;
                let mut start =
                    TimeScale::snap_to_grid(session.original_start + delta, config.snap_minutes);
                let latest = window_end - duration;
                start = if latest < window_start {
                    // Event longer than the window: pin to the top edge.
                    window_start
                } else {
                    start.clamp(window_start, latest)
                };
                (start, Some(start + duration))
            }
            (DragMode::ResizeStart, Some(original_end)) => {
                let floor = original_end - min_duration;
                let mut start = (session.original_start + delta).min(floor);
                start = TimeScale::snap_to_grid(start, config.snap_minutes);
                start = start.max(window_start).min(floor);
                (start, Some(original_end))
            }
            (DragMode::ResizeEnd, Some(original_end)) => {
                let ceiling = session.original_start + min_duration;
                let mut end = (original_end + delta).max(ceiling);
                end = TimeScale::snap_to_grid(end, config.snap_minutes);
                end = end.min(window_end).max(ceiling);
                (session.original_start, Some(end))
            }
            // Resizing a milestone is meaningless; degrade to nothing.
            (DragMode::ResizeStart | DragMode::ResizeEnd, None) => return None,
        };

        Some(TimeProposal {
            event_id: session.event_id.clone(),
            start,
            end,
        })
    }
}

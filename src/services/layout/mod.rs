// Overlap layout engine
// Packs temporally-overlapping events into side-by-side columns

use std::collections::HashMap;

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::models::event::Event;
use crate::services::timescale::TimeScale;

/// Fixed marker height for milestones, which have no duration to derive
/// a height from.
pub const MILESTONE_HEIGHT: f32 = 24.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// An event with `end <= start` reached the layout boundary. Rejected,
    /// never coerced - the caller must fix its data before calling.
    #[error("event '{id}' has end <= start")]
    InvalidRange { id: String },
}

/// Where one event lands on the timeline.
///
/// `column_index` / `column_count` position the event horizontally inside
/// its overlap cluster; events whose time ranges intersect never share a
/// column. Column numbering restarts for every cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSlot {
    /// Pixels from the top of the timeline window.
    pub top_offset: f32,
    pub height: f32,
    pub column_index: usize,
    pub column_count: usize,
}

/// Compute a render slot for every event.
///
/// Duration events are sorted by start (ties: longer first, then id, so an
/// unordered-equal input always produces the same packing) and assigned to
/// the first free column of their cluster. A cluster closes once every
/// column has drained, and `column_count` is stamped across its members as
/// the number of columns the cluster needed - which the greedy first-fit
/// scan keeps equal to the cluster's maximum concurrent overlap depth.
///
/// Milestones take no part in column packing; each gets a fixed-height
/// full-width marker at its instant.
pub fn compute_layout(
    events: &[Event],
    scale: &TimeScale,
) -> Result<HashMap<String, RenderSlot>, LayoutError> {
    let mut slots = HashMap::with_capacity(events.len());
    let mut timed: Vec<(&Event, DateTime<Local>)> = Vec::with_capacity(events.len());

    for event in events {
        match event.end {
            None => {
                slots.insert(
                    event.id.clone(),
                    RenderSlot {
                        top_offset: scale.time_to_y(event.start),
                        height: MILESTONE_HEIGHT,
                        column_index: 0,
                        column_count: 1,
                    },
                );
            }
            Some(end) if end <= event.start => {
                return Err(LayoutError::InvalidRange {
                    id: event.id.clone(),
                });
            }
            Some(end) => timed.push((event, end)),
        }
    }

    // Stable sort: start ascending, longer event first on ties so the one
    // most likely to dominate the cluster claims a column first, then id
    // for a total order independent of input permutation.
    timed.sort_by(|(a, a_end), (b, b_end)| {
        a.start
            .cmp(&b.start)
            .then_with(|| b_end.cmp(a_end))
            .then_with(|| a.id.cmp(&b.id))
    });

    // End time of the occupant of each column in the current cluster.
    let mut columns: Vec<DateTime<Local>> = Vec::new();
    let mut cluster: Vec<(&Event, DateTime<Local>, usize)> = Vec::new();

    for (event, end) in timed {
        // Every column drained before this event starts: the cluster is
        // complete, stamp it and start a fresh column set.
        if !columns.is_empty() && columns.iter().all(|&col_end| col_end <= event.start) {
            stamp_cluster(&mut cluster, columns.len(), scale, &mut slots);
            columns.clear();
        }

        let column_index = match columns.iter().position(|&col_end| col_end <= event.start) {
            Some(index) => {
                columns[index] = end;
                index
            }
            None => {
                columns.push(end);
                columns.len() - 1
            }
        };
        cluster.push((event, end, column_index));
    }

    if !cluster.is_empty() {
        stamp_cluster(&mut cluster, columns.len(), scale, &mut slots);
    }

    Ok(slots)
}

fn stamp_cluster(
    cluster: &mut Vec<(&Event, DateTime<Local>, usize)>,
    column_count: usize,
    scale: &TimeScale,
    slots: &mut HashMap<String, RenderSlot>,
) {
    for (event, end, column_index) in cluster.drain(..) {
        let top_offset = scale.time_to_y(event.start);
        slots.insert(
            event.id.clone(),
            RenderSlot {
                top_offset,
                height: scale.time_to_y(end) - top_offset,
                column_index,
                column_count,
            },
        );
    }
}

//! Activity classification: derive per-window active segments.
//!
//! An active segment is a run of user-generated events where the gap
//! between consecutive events never exceeds the activity threshold. The
//! segment ends when no further active event arrives within the threshold.

use chrono::Duration;

use crate::rrweb::IncrementalSource;
use crate::segment::Segment;
use crate::summary::{EventSummary, SummaryError};
use crate::types::WindowId;

/// Maximum gap in seconds between consecutive active events that still
/// counts as one continuous active segment.
pub const ACTIVITY_THRESHOLD_SECONDS: i64 = 10;

/// Whether an event marks direct user interaction.
fn is_active_event(event: &EventSummary) -> bool {
    event
        .incremental_source()
        .is_some_and(IncrementalSource::is_user_activity)
}

/// Derives the active segments for one window from its time-ordered
/// summaries.
///
/// Consecutive active events within `threshold_seconds` of each other
/// extend the open segment; a larger gap closes it and opens a new one.
/// A lone active event yields a zero-duration segment; no active events
/// yield an empty list. The result is marked `is_active` throughout and
/// ordered by start time.
pub fn active_segments(
    events: &[EventSummary],
    window_id: &WindowId,
    threshold_seconds: i64,
) -> Result<Vec<Segment>, SummaryError> {
    let threshold = Duration::seconds(threshold_seconds);
    let mut segments: Vec<Segment> = Vec::new();
    let mut open: Option<Segment> = None;

    for event in events.iter().filter(|event| is_active_event(event)) {
        let timestamp = event.occurred_at()?;
        open = Some(match open {
            // Within the threshold: extend the open segment.
            Some(segment) if timestamp - segment.end_time <= threshold => Segment {
                end_time: timestamp,
                ..segment
            },
            // Too far apart: close the open segment, start a new one.
            Some(segment) => {
                segments.push(segment);
                Segment::active(window_id.clone(), timestamp, timestamp)
            }
            None => Segment::active(window_id.clone(), timestamp, timestamp),
        });
    }

    if let Some(segment) = open {
        segments.push(segment);
    }

    Ok(segments)
}

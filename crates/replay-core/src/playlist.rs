//! Playlist construction: merge per-window active segments and fill gaps.
//!
//! A recording interleaves several windows' event streams. The playlist is
//! one globally ordered segment list spanning the whole recording: the
//! windows' active segments sorted by start time, with the time between
//! them covered by synthesized inactive segments. Inactive time is
//! attributed to the last-active window where its own bounds allow, so a
//! viewer sees as few window switches as possible.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::segment::{Segment, WindowTimeline};
use crate::types::WindowId;

/// Builds the full playback segment list from every window's active
/// segments and bounds.
///
/// Active segments are stably sorted by start time, which interleaves
/// concurrently active windows without resolving their overlap. Gaps
/// between them, and the stretches before the first and after the last,
/// are filled with inactive segments. Returns an empty list when
/// `timelines` is empty.
#[must_use]
pub fn build_playlist(
    mut active: Vec<Segment>,
    timelines: &BTreeMap<WindowId, WindowTimeline>,
) -> Vec<Segment> {
    let global_start = timelines.values().map(|timeline| timeline.start_time).min();
    let global_end = timelines.values().map(|timeline| timeline.end_time).max();
    let (Some(global_start), Some(global_end)) = (global_start, global_end) else {
        return Vec::new();
    };

    active.sort_by_key(|segment| segment.start_time);

    let mut playlist: Vec<Segment> = Vec::new();
    let mut current_timestamp = global_start;
    // First on ties, so equal start times fall back to window-id order.
    let mut current_window_id = timelines
        .values()
        .min_by_key(|timeline| timeline.start_time)
        .map(|timeline| timeline.window_id.clone());

    for (index, segment) in active.into_iter().enumerate() {
        // Overlapping active segments leave no gap to fill.
        if segment.start_time > current_timestamp {
            if let Some(preferred) = &current_window_id {
                playlist.extend(inactive_segments_for_range(
                    current_timestamp,
                    segment.start_time,
                    preferred,
                    timelines,
                    index == 0,
                    false,
                ));
            }
        }
        current_timestamp = current_timestamp.max(segment.end_time);
        current_window_id = Some(segment.window_id.clone());
        playlist.push(segment);
    }

    if current_timestamp < global_end {
        if let Some(preferred) = &current_window_id {
            playlist.extend(inactive_segments_for_range(
                current_timestamp,
                global_end,
                preferred,
                timelines,
                current_timestamp == global_start,
                true,
            ));
        }
    }

    playlist
}

/// Synthesizes inactive segments covering `[range_start, range_end)`.
///
/// Windows are tried in priority order: the preferred (last active) window
/// first, then the rest by their own start time. Each window is visited at
/// most once, emitting a segment clamped to the intersection of its own
/// bounds and the remaining range.
///
/// Emitted boundaries are then nudged by one millisecond wherever they
/// would coincide exactly with the range edges or with each other, so no
/// two segments in the final playlist share an instant. The true recording
/// start and end are left untouched (`is_first_segment`/`is_last_segment`).
fn inactive_segments_for_range(
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    preferred_window_id: &WindowId,
    timelines: &BTreeMap<WindowId, WindowTimeline>,
    is_first_segment: bool,
    is_last_segment: bool,
) -> Vec<Segment> {
    let mut priority: Vec<&WindowTimeline> = timelines.values().collect();
    priority.sort_by(|a, b| {
        (a.window_id != *preferred_window_id, a.start_time, &a.window_id).cmp(&(
            b.window_id != *preferred_window_id,
            b.start_time,
            &b.window_id,
        ))
    });

    let mut segments: Vec<Segment> = Vec::new();
    let mut current_time = range_start;
    for timeline in priority {
        if timeline.end_time > current_time && current_time < range_end {
            let start_time = timeline.start_time.max(current_time);
            let end_time = timeline.end_time.min(range_end);
            segments.push(Segment::inactive(
                timeline.window_id.clone(),
                start_time,
                end_time,
            ));
            current_time = end_time;
        }
    }

    // Nudge coincident boundaries apart so the player never sees two
    // segments sharing an instant.
    let nudge = Duration::milliseconds(1);
    let last_index = segments.len().saturating_sub(1);
    let mut previous_end: Option<DateTime<Utc>> = None;
    for (index, segment) in segments.iter_mut().enumerate() {
        let collides_with_range_start =
            index == 0 && segment.start_time == range_start && !is_first_segment;
        let collides_with_previous = previous_end == Some(segment.start_time);
        if collides_with_range_start || collides_with_previous {
            segment.start_time += nudge;
        }
        if index == last_index && segment.end_time == range_end && !is_last_segment {
            segment.end_time -= nudge;
        }
        previous_end = Some(segment.end_time);
    }

    segments
}

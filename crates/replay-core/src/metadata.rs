//! Recording metadata: drives classification and playlist assembly across
//! windows and derives summary statistics.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::activity::{ACTIVITY_THRESHOLD_SECONDS, active_segments};
use crate::playlist::build_playlist;
use crate::rrweb::IncrementalSource;
use crate::segment::{Segment, WindowTimeline};
use crate::summary::{EventSummary, SummaryError};
use crate::types::WindowId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// The recording has no windows at all.
    #[error("recording has no windows")]
    NoWindows,

    /// A window was supplied without any event summaries, so it has no
    /// first/last timestamp to bound its timeline.
    #[error("window {0} has no event summaries")]
    EmptyWindow(WindowId),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Derived metadata for one recording.
///
/// `segments` is the playback playlist: ordered, non-overlapping and
/// covering `[start_time, end_time]`. The caller owns the value and fills
/// in identity fields (e.g. a distinct-user ID) itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingMetadata {
    pub segments: Vec<Segment>,

    /// Each window's own first/last bounds, as a segment whose activity
    /// flag carries no meaning (windows are not active or inactive as a
    /// whole).
    pub start_and_end_times_by_window_id: BTreeMap<WindowId, Segment>,

    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Whole seconds between start and end, sub-second remainder truncated.
    pub duration_s: i64,

    pub click_count: u64,
    pub keypress_count: u64,

    /// Every `data.href` string seen, in encounter order.
    pub urls: Vec<String>,
}

/// Computes recording metadata from each window's ordered event summaries.
///
/// Classifies every window's activity, interleaves the resulting active
/// segments and fills the gaps between them, then derives the summary
/// statistics. Per-window classification has no cross-window dependency,
/// so it fans out across windows; results are collected back in window-id
/// order, keeping the output deterministic.
///
/// Every window must have at least one summary; an empty window has no
/// timeline bounds and is reported as [`MetadataError::EmptyWindow`].
pub fn recording_metadata(
    events_summary_by_window_id: &BTreeMap<WindowId, Vec<EventSummary>>,
) -> Result<RecordingMetadata, MetadataError> {
    if events_summary_by_window_id.is_empty() {
        return Err(MetadataError::NoWindows);
    }

    let classified: Vec<(Vec<Segment>, WindowTimeline)> = events_summary_by_window_id
        .par_iter()
        .map(|(window_id, events)| classify_window(window_id, events))
        .collect::<Result<_, MetadataError>>()?;

    let mut all_active_segments: Vec<Segment> = Vec::new();
    let mut timelines: BTreeMap<WindowId, WindowTimeline> = BTreeMap::new();
    for (segments, timeline) in classified {
        all_active_segments.extend(segments);
        timelines.insert(timeline.window_id.clone(), timeline);
    }

    let start_time = timelines
        .values()
        .map(|timeline| timeline.start_time)
        .min()
        .ok_or(MetadataError::NoWindows)?;
    let end_time = timelines
        .values()
        .map(|timeline| timeline.end_time)
        .max()
        .ok_or(MetadataError::NoWindows)?;

    let segments = build_playlist(all_active_segments, &timelines);

    let start_and_end_times_by_window_id = timelines
        .values()
        .map(|timeline| {
            (
                timeline.window_id.clone(),
                Segment::inactive(
                    timeline.window_id.clone(),
                    timeline.start_time,
                    timeline.end_time,
                ),
            )
        })
        .collect();

    let all_summaries = || events_summary_by_window_id.values().flatten();
    let click_count = count_with_source(all_summaries(), IncrementalSource::MouseInteraction);
    let keypress_count = count_with_source(all_summaries(), IncrementalSource::Input);
    let urls: Vec<String> = all_summaries()
        .filter_map(|summary| summary.data.get("href").and_then(Value::as_str))
        .map(str::to_owned)
        .collect();

    Ok(RecordingMetadata {
        segments,
        start_and_end_times_by_window_id,
        start_time,
        end_time,
        duration_s: (end_time - start_time).num_seconds(),
        click_count,
        keypress_count,
        urls,
    })
}

fn classify_window(
    window_id: &WindowId,
    events: &[EventSummary],
) -> Result<(Vec<Segment>, WindowTimeline), MetadataError> {
    let (Some(first), Some(last)) = (events.first(), events.last()) else {
        return Err(MetadataError::EmptyWindow(window_id.clone()));
    };
    let timeline = WindowTimeline {
        window_id: window_id.clone(),
        start_time: first.occurred_at()?,
        end_time: last.occurred_at()?,
    };
    let segments = active_segments(events, window_id, ACTIVITY_THRESHOLD_SECONDS)?;
    Ok((segments, timeline))
}

fn count_with_source<'a>(
    summaries: impl Iterator<Item = &'a EventSummary>,
    source: IncrementalSource,
) -> u64 {
    summaries
        .filter(|summary| summary.incremental_source() == Some(source))
        .count() as u64
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn window(id: &str) -> WindowId {
        WindowId::new(id).unwrap()
    }

    fn ts(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    fn event(timestamp_ms: i64, event_type: i64, data: Value) -> EventSummary {
        EventSummary {
            timestamp: timestamp_ms,
            event_type,
            data: data.as_object().cloned().unwrap_or_default(),
        }
    }

    fn mouse_move(timestamp_ms: i64) -> EventSummary {
        event(timestamp_ms, 3, json!({"source": 1}))
    }

    #[test]
    fn empty_recording_is_rejected() {
        let result = recording_metadata(&BTreeMap::new());
        assert_eq!(result.unwrap_err(), MetadataError::NoWindows);
    }

    #[test]
    fn window_without_summaries_is_rejected() {
        let mut events = BTreeMap::new();
        events.insert(window("a"), vec![mouse_move(0)]);
        events.insert(window("b"), Vec::new());
        let result = recording_metadata(&events);
        assert_eq!(result.unwrap_err(), MetadataError::EmptyWindow(window("b")));
    }

    #[test]
    fn single_window_recording_gap_fills_between_activity() {
        // Active events at 0s, 5s and 30s: two active segments with the
        // stretch between them attributed inactive to the same window.
        let mut events = BTreeMap::new();
        events.insert(
            window("a"),
            vec![mouse_move(0), mouse_move(5_000), mouse_move(30_000)],
        );
        let metadata = recording_metadata(&events).unwrap();

        assert_eq!(
            metadata.segments,
            vec![
                Segment::active(window("a"), ts(0), ts(5_000)),
                Segment::inactive(window("a"), ts(5_001), ts(29_999)),
                Segment::active(window("a"), ts(30_000), ts(30_000)),
            ]
        );
        assert_eq!(metadata.start_time, ts(0));
        assert_eq!(metadata.end_time, ts(30_000));
        assert_eq!(metadata.duration_s, 30);
    }

    #[test]
    fn two_window_recording_interleaves_and_fills() {
        let mut events = BTreeMap::new();
        events.insert(
            window("a"),
            vec![
                mouse_move(0),
                mouse_move(10_000),
                event(30_000, 3, json!({"source": 0})),
            ],
        );
        events.insert(
            window("b"),
            vec![
                event(0, 2, json!({})),
                mouse_move(20_000),
                mouse_move(25_000),
                event(30_000, 3, json!({"source": 0})),
            ],
        );
        let metadata = recording_metadata(&events).unwrap();

        assert_eq!(
            metadata.segments,
            vec![
                Segment::active(window("a"), ts(0), ts(10_000)),
                Segment::inactive(window("a"), ts(10_001), ts(19_999)),
                Segment::active(window("b"), ts(20_000), ts(25_000)),
                Segment::inactive(window("b"), ts(25_001), ts(30_000)),
            ]
        );
        assert_eq!(
            metadata.start_and_end_times_by_window_id[&window("a")],
            Segment::inactive(window("a"), ts(0), ts(30_000))
        );
    }

    #[test]
    fn playlist_tiles_the_recording_without_shared_instants() {
        let mut events = BTreeMap::new();
        events.insert(
            window("a"),
            vec![mouse_move(1_000), mouse_move(12_000), event(90_000, 4, json!({}))],
        );
        events.insert(
            window("b"),
            vec![event(2_000, 2, json!({})), mouse_move(30_000), mouse_move(41_000)],
        );
        let metadata = recording_metadata(&events).unwrap();
        let segments = &metadata.segments;

        assert_eq!(segments.first().unwrap().start_time, metadata.start_time);
        assert_eq!(segments.last().unwrap().end_time, metadata.end_time);
        for pair in segments.windows(2) {
            assert!(pair[0].start_time <= pair[1].start_time);
            assert_ne!(pair[0].end_time, pair[1].start_time);
            // No hole wider than the 1ms collision nudge.
            assert!(pair[1].start_time - pair[0].end_time <= chrono::Duration::milliseconds(1));
        }
    }

    #[test]
    fn click_and_keypress_counts_span_all_windows() {
        let mut events = BTreeMap::new();
        events.insert(
            window("a"),
            vec![
                event(0, 3, json!({"source": 2})),
                event(1_000, 3, json!({"source": 2})),
                event(2_000, 3, json!({"source": 5})),
            ],
        );
        events.insert(
            window("b"),
            vec![
                event(500, 3, json!({"source": 2})),
                event(1_500, 3, json!({"source": 5})),
            ],
        );
        let metadata = recording_metadata(&events).unwrap();
        assert_eq!(metadata.click_count, 3);
        assert_eq!(metadata.keypress_count, 2);
    }

    #[test]
    fn counts_ignore_non_snapshot_types() {
        let mut events = BTreeMap::new();
        events.insert(
            window("a"),
            vec![
                event(0, 2, json!({"source": 2})),
                event(1_000, 3, json!({"source": 2})),
            ],
        );
        let metadata = recording_metadata(&events).unwrap();
        assert_eq!(metadata.click_count, 1);
    }

    #[test]
    fn urls_are_collected_in_encounter_order() {
        let mut events = BTreeMap::new();
        events.insert(
            window("a"),
            vec![
                event(0, 4, json!({"href": "http://a/1"})),
                event(1_000, 4, json!({"href": 42})),
                event(2_000, 4, json!({"href": "http://a/2"})),
            ],
        );
        events.insert(
            window("b"),
            vec![event(500, 4, json!({"href": "http://b/1"}))],
        );
        let metadata = recording_metadata(&events).unwrap();
        assert_eq!(metadata.urls, vec!["http://a/1", "http://a/2", "http://b/1"]);
    }

    #[test]
    fn duration_truncates_subsecond_remainder() {
        let mut events = BTreeMap::new();
        events.insert(
            window("a"),
            vec![event(0, 4, json!({})), event(12_900, 4, json!({}))],
        );
        let metadata = recording_metadata(&events).unwrap();
        assert_eq!(metadata.duration_s, 12);
    }

    #[test]
    fn metadata_serde_roundtrip() {
        let mut events = BTreeMap::new();
        events.insert(window("a"), vec![mouse_move(0), mouse_move(5_000)]);
        let metadata = recording_metadata(&events).unwrap();

        let json = serde_json::to_string(&metadata).unwrap();
        let parsed: RecordingMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metadata);
    }
}

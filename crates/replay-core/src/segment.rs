//! Playback segment types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::WindowId;

/// A contiguous time range attributed to one window, labeled active or
/// inactive.
///
/// The playlist built from these drives which window the player shows at
/// any instant. Invariant: `start_time <= end_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub window_id: WindowId,
    pub is_active: bool,
}

impl Segment {
    /// Creates an active segment.
    #[must_use]
    pub const fn active(window_id: WindowId, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            window_id,
            is_active: true,
        }
    }

    /// Creates an inactive segment.
    #[must_use]
    pub const fn inactive(window_id: WindowId, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time,
            window_id,
            is_active: false,
        }
    }
}

/// Per-window recording bounds: the timestamps of the first and last
/// captured events for that window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTimeline {
    pub window_id: WindowId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn segment_constructors_set_activity() {
        let id = WindowId::new("w1").unwrap();
        let active = Segment::active(id.clone(), ts(0), ts(1000));
        assert!(active.is_active);
        let inactive = Segment::inactive(id, ts(0), ts(1000));
        assert!(!inactive.is_active);
    }

    #[test]
    fn segment_serde_roundtrip() {
        let segment = Segment::active(WindowId::new("w1").unwrap(), ts(0), ts(5000));
        let json = serde_json::to_string(&segment).unwrap();
        let parsed: Segment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, segment);
    }
}

//! Event projection: reduce raw captured events to minimal summaries.
//!
//! The capture layer ships full rrweb snapshot payloads, most of which the
//! engine never needs. Projection keeps the timestamp, the type code and a
//! small inclusion-listed slice of `data`, which is everything the
//! classifier and aggregator read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::rrweb::{EventType, IncrementalSource};

/// Top-level `data` keys retained in a summary.
const DATA_KEY_INCLUSIONS: &[&str] = &["type", "source", "tag", "plugin", "href", "width", "height"];

/// `data.payload` keys retained, addressed by their `payload.`-prefixed form.
const PAYLOAD_KEY_INCLUSIONS: &[&str] = &["payload.href", "payload.level"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// The millisecond timestamp cannot be represented as a point in time.
    #[error("timestamp out of range: {0} ms")]
    InvalidTimestamp(i64),
}

/// Minimal projection of one captured event.
///
/// Immutable after projection. `event_type` stays a raw code because
/// summaries must survive recorder codes this build does not know about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp: i64,

    /// Raw rrweb `event.type` code.
    #[serde(rename = "type")]
    pub event_type: i64,

    /// Inclusion-listed slice of the event's `data` mapping.
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl EventSummary {
    /// The capture time as an absolute point in time.
    pub fn occurred_at(&self) -> Result<DateTime<Utc>, SummaryError> {
        DateTime::from_timestamp_millis(self.timestamp)
            .ok_or(SummaryError::InvalidTimestamp(self.timestamp))
    }

    /// The raw `data.source` code, when present and integral.
    #[must_use]
    pub fn source_code(&self) -> Option<i64> {
        self.data.get("source").and_then(Value::as_i64)
    }

    /// The decoded incremental source, for incremental snapshots only.
    #[must_use]
    pub fn incremental_source(&self) -> Option<IncrementalSource> {
        if EventType::from_code(self.event_type) != Some(EventType::IncrementalSnapshot) {
            return None;
        }
        self.source_code().and_then(IncrementalSource::from_code)
    }
}

/// Projects raw captured events into time-ordered summaries.
///
/// Events missing a `timestamp` or `type` are dropped. Retained `data`
/// entries are limited to string or integer values whose keys appear in
/// the inclusion lists; `data.payload` sub-entries are kept the same way
/// under a nested `payload` key. The result is re-sorted by timestamp
/// since source ordering is not guaranteed.
#[must_use]
pub fn summarize_events(snapshot_data: &[Value]) -> Vec<EventSummary> {
    let mut summaries: Vec<EventSummary> = snapshot_data.iter().filter_map(summarize).collect();
    summaries.sort_by_key(|summary| summary.timestamp);
    summaries
}

fn summarize(event: &Value) -> Option<EventSummary> {
    let timestamp = event.get("timestamp").and_then(Value::as_i64);
    let event_type = event.get("type").and_then(Value::as_i64);
    let (Some(timestamp), Some(event_type)) = (timestamp, event_type) else {
        tracing::trace!("skipping captured event without timestamp or type");
        return None;
    };

    let mut data = Map::new();
    if let Some(Value::Object(raw)) = event.get("data") {
        for (key, value) in raw {
            if is_retained_scalar(value) && DATA_KEY_INCLUSIONS.contains(&key.as_str()) {
                data.insert(key.clone(), value.clone());
            }
        }

        // Some events carry a payload mapping, a few values of which we want.
        if let Some(Value::Object(raw_payload)) = raw.get("payload") {
            if !raw_payload.is_empty() {
                let payload: Map<String, Value> = raw_payload
                    .iter()
                    .filter(|&(key, value)| {
                        is_retained_scalar(value)
                            && PAYLOAD_KEY_INCLUSIONS.contains(&format!("payload.{key}").as_str())
                    })
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect();
                data.insert("payload".to_string(), Value::Object(payload));
            }
        }
    }

    Some(EventSummary {
        timestamp,
        event_type,
        data,
    })
}

/// Strings and integers survive projection; bools, floats and nested
/// structures do not.
fn is_retained_scalar(value: &Value) -> bool {
    value.is_string() || value.is_i64() || value.is_u64()
}

//! Segmentation engine for session replay playback.
//!
//! A recording is captured independently per browser window/tab; this
//! crate reconstructs one chronological "playlist" of playback segments
//! from those per-window event streams:
//! - Projection: reduce raw captured events to minimal summaries
//! - Classification: derive per-window active segments from the summaries
//! - Playlist: interleave active segments across windows and fill the
//!   gaps with inactive segments
//! - Metadata: drive the pipeline over a whole recording and derive
//!   summary statistics
//!
//! Every stage is a pure function over immutable inputs; nothing here
//! blocks or performs I/O.

pub mod activity;
pub mod metadata;
pub mod playlist;
pub mod rrweb;
pub mod segment;
pub mod summary;
mod types;

pub use activity::{ACTIVITY_THRESHOLD_SECONDS, active_segments};
pub use metadata::{MetadataError, RecordingMetadata, recording_metadata};
pub use playlist::build_playlist;
pub use rrweb::{EventType, IncrementalSource, MouseInteractionKind};
pub use segment::{Segment, WindowTimeline};
pub use summary::{EventSummary, SummaryError, summarize_events};
pub use types::{ValidationError, WindowId};

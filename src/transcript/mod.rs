//! Transcript module for ytdigest
//!
//! Defines the transcript data model and the source capability that fetches it.

mod source;
mod youtube;

pub use source::{parse_video_id, Transcript, TranscriptSegment, TranscriptSource};
pub use youtube::YoutubeTranscripts;

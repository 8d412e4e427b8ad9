use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{DigestError, Result};

/// One timed caption line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    /// Start offset in seconds
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
}

/// Caption track for a single video, in chronological order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub video_id: String,
    /// Human readable language name (e.g. "English (auto-generated)")
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    /// Join every segment's text in source order.
    pub fn raw_text(&self, separator: &str) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// End of the last segment in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.segments
            .last()
            .map(|segment| segment.start + segment.duration)
            .unwrap_or(0.0)
    }
}

#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the first available transcript among `languages`, in order of preference.
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript>;
}

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]{11}$").expect("valid video id regex"));

static VIDEO_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.|m\.|music\.)?(?:youtube\.com/(?:watch\?(?:.*&)?v=|shorts/|embed/|live/|v/)|youtu\.be/)([0-9A-Za-z_-]{11})(?:[?&#/].*)?$",
    )
    .expect("valid video url regex")
});

/// Accept a bare video id or a YouTube URL and return the 11-character id.
pub fn parse_video_id(input: &str) -> Result<String> {
    let input = input.trim();

    if VIDEO_ID.is_match(input) {
        return Ok(input.to_string());
    }

    VIDEO_URL
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            DigestError::Usage(format!(
                "'{}' is not a video id or a YouTube URL",
                input
            ))
        })
}

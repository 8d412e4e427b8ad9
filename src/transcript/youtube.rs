//! YouTube caption fetching via yt-transcript-rs

use async_trait::async_trait;
use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::transcript::source::{Transcript, TranscriptSegment, TranscriptSource};
use crate::{DigestError, Result};

pub struct YoutubeTranscripts {
    api: YouTubeTranscriptApi,
}

impl YoutubeTranscripts {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            DigestError::Configuration(format!("Failed to initialize transcript client: {}", e))
        })?;

        Ok(Self { api })
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscripts {
    async fn fetch(&self, video_id: &str, languages: &[String]) -> Result<Transcript> {
        let languages: Vec<&str> = languages.iter().map(String::as_str).collect();
        tracing::info!("Fetching transcript for {} ({:?})", video_id, languages);

        let fetched = self
            .api
            .fetch_transcript(video_id, &languages, false)
            .await
            .map_err(|e| DigestError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason: e.to_string(),
            })?;

        let segments: Vec<TranscriptSegment> = fetched
            .snippets
            .iter()
            .map(|snippet| TranscriptSegment {
                text: snippet.text.clone(),
                start: snippet.start,
                duration: snippet.duration,
            })
            .collect();

        tracing::info!(
            "Fetched {} segments in {} ({})",
            segments.len(),
            fetched.language,
            fetched.language_code
        );

        Ok(Transcript {
            video_id: fetched.video_id.clone(),
            language: fetched.language.clone(),
            language_code: fetched.language_code.clone(),
            is_generated: fetched.is_generated,
            segments,
        })
    }
}

//! Output module for ytdigest
//!
//! Renders a finished digest as plain text, a standalone HTML page or JSON
//! and writes it to stdout or a file.

mod html;

use std::path::Path;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::Serialize;

use crate::Result;

pub use html::{escape_html, render_html};

/// A finished summary and what it was made from
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub video_id: String,
    /// Language of the source transcript
    pub transcript_language: String,
    /// Language the summary was written in
    pub summary_language: String,
    pub summary: String,
    pub chunk_count: usize,
    pub generated_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The summary as plain text
    #[default]
    Text,
    /// A standalone HTML page
    Html,
    /// The digest with its metadata as JSON
    Json,
}

impl OutputFormat {
    pub fn render(&self, digest: &Digest) -> Result<String> {
        match self {
            Self::Text => Ok(render_text(digest)),
            Self::Html => Ok(render_html(digest)),
            Self::Json => {
                let mut json = serde_json::to_string_pretty(digest)?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

fn render_text(digest: &Digest) -> String {
    let mut output = digest.summary.trim_end().to_string();
    output.push('\n');
    output
}

/// Write rendered output to `path`, or to stdout when no path is given.
pub fn write_output(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            tracing::info!("Wrote {} bytes to {}", content.len(), path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_digest(summary: &str) -> Digest {
    use chrono::TimeZone;

    Digest {
        video_id: "dQw4w9WgXcQ".to_string(),
        transcript_language: "English".to_string(),
        summary_language: "English".to_string(),
        summary: summary.to_string(),
        chunk_count: 3,
        generated_at: Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
    }
}

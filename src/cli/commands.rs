//! CLI command implementations

use anyhow::{Context, Result};
use chrono::Local;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::{Cli, ConfigCommand, SummarizeArgs};
use crate::config::Settings;
use crate::llm::{build_provider, CompletionProvider};
use crate::output::{write_output, Digest};
use crate::summarize::{Summarizer, SummaryOptions};
use crate::text::normalize;
use crate::transcript::{parse_video_id, Transcript, TranscriptSource, YoutubeTranscripts};

/// Fetch a transcript, summarize it and write the result
pub async fn summarize_video(settings: &Settings, args: SummarizeArgs) -> Result<()> {
    let settings = apply_summarize_overrides(settings, &args)?;
    let video_id = parse_video_id(&args.video)?;
    let languages = transcript_languages(&settings, &args.transcript_langs);

    // Credentials are checked before any network work starts.
    let provider: Arc<dyn CompletionProvider> = Arc::from(build_provider(&settings)?);
    let source = YoutubeTranscripts::new()?;

    let digest = digest_video(&settings, &source, provider, &video_id, &languages).await?;
    let Some(digest) = digest else {
        eprintln!("Transcript for {} is empty, nothing to summarize", video_id);
        return Ok(());
    };

    let content = args.format.render(&digest)?;
    write_output(&content, args.output.as_deref())?;
    if let Some(path) = &args.output {
        eprintln!("Summary written to: {}", path.display());
    }

    Ok(())
}

/// Run the transcript and summarization stages for one video.
///
/// Returns `None` when the transcript holds no text.
pub async fn digest_video(
    settings: &Settings,
    source: &dyn TranscriptSource,
    provider: Arc<dyn CompletionProvider>,
    video_id: &str,
    languages: &[String],
) -> crate::Result<Option<Digest>> {
    let transcript = source.fetch(video_id, languages).await?;
    let text = transcript.raw_text(&settings.transcript.separator);
    tracing::info!(
        "Transcript has {} segments, {:.1} minutes",
        transcript.segments.len(),
        transcript.duration_secs() / 60.0
    );

    let summarizer = Summarizer::new(provider, SummaryOptions::from_settings(settings));
    let summary = summarizer.summarize(Some(&text)).await?;

    Ok(summary.map(|summary| Digest {
        video_id: transcript.video_id.clone(),
        transcript_language: transcript.language.clone(),
        summary_language: summarizer.options().language.clone(),
        summary: summary.text,
        chunk_count: summary.chunk_count,
        generated_at: Local::now(),
    }))
}

/// Fetch a transcript and print it
pub async fn print_transcript(
    settings: &Settings,
    video: &str,
    transcript_langs: &[String],
    normalized: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let video_id = parse_video_id(video)?;
    let languages = transcript_languages(settings, transcript_langs);

    let source = YoutubeTranscripts::new()?;
    let transcript = source.fetch(&video_id, &languages).await?;

    let content = format_transcript(&transcript, &settings.transcript.separator, normalized);
    write_output(&content, output.as_deref())?;
    Ok(())
}

/// Handle config subcommands
pub fn config_command(config_path: Option<&Path>, cmd: ConfigCommand) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => Settings::config_path()?,
    };

    match cmd {
        ConfigCommand::Show => {
            let settings = Settings::load(config_path)?;
            let toml = toml::to_string_pretty(&settings).context("Failed to render config")?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Write the completion script for `shell`.
pub fn print_completions(shell: Shell, out: &mut impl Write) {
    let mut cmd = Cli::command();
    let command_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, command_name, out);
}

// Helper functions

fn apply_summarize_overrides(settings: &Settings, args: &SummarizeArgs) -> crate::Result<Settings> {
    let mut settings = settings.clone();

    if let Some(lang) = args.lang.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        settings.summary.language = lang.to_string();
    }
    if let Some(detail) = args.detail {
        settings.summary.detail = detail;
    }
    settings.summary.max_words =
        parse_word_limit(args.max_words.as_deref(), settings.summary.max_words);
    if let Some(concurrency) = args.concurrency {
        settings.summary.concurrency = concurrency;
    }

    settings.validate()?;
    Ok(settings)
}

/// Parse a word limit, falling back to `default` for anything but a positive integer.
fn parse_word_limit(raw: Option<&str>, default: usize) -> usize {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => limit,
        _ => {
            tracing::warn!("Invalid word limit '{}', using {}", raw, default);
            default
        }
    }
}

/// Languages from the command line (comma separated or repeated), else from config.
fn transcript_languages(settings: &Settings, from_cli: &[String]) -> Vec<String> {
    let languages: Vec<String> = from_cli
        .iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
        .collect();

    if languages.is_empty() {
        settings.transcript.languages.clone()
    } else {
        languages
    }
}

/// Timestamped caption lines, or the joined and normalized text.
fn format_transcript(transcript: &Transcript, separator: &str, normalized: bool) -> String {
    let mut content = if normalized {
        normalize(&transcript.raw_text(separator))
    } else {
        transcript
            .segments
            .iter()
            .map(|segment| format!("[{}] {}", format_timestamp(segment.start), segment.text.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    content.push('\n');
    content
}

fn format_timestamp(secs: f64) -> String {
    let total_secs = secs as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use clap::Parser;

    use super::*;
    use crate::llm::CompletionRequest;
    use crate::output::OutputFormat;
    use crate::transcript::TranscriptSegment;
    use crate::DigestError;

    struct FixedSource {
        texts: Vec<&'static str>,
    }

    #[async_trait]
    impl TranscriptSource for FixedSource {
        async fn fetch(&self, video_id: &str, _languages: &[String]) -> crate::Result<Transcript> {
            Ok(Transcript {
                video_id: video_id.to_string(),
                language: "English".to_string(),
                language_code: "en".to_string(),
                is_generated: true,
                segments: self
                    .texts
                    .iter()
                    .enumerate()
                    .map(|(i, text)| TranscriptSegment {
                        text: text.to_string(),
                        start: i as f64,
                        duration: 1.0,
                    })
                    .collect(),
            })
        }
    }

    struct MissingSource;

    #[async_trait]
    impl TranscriptSource for MissingSource {
        async fn fetch(&self, video_id: &str, _languages: &[String]) -> crate::Result<Transcript> {
            Err(DigestError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason: "captions disabled".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct CountingProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionProvider for CountingProvider {
        async fn complete(&self, _request: CompletionRequest<'_>) -> crate::Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("- summary {}", call))
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    fn summarize_args(max_words: Option<&str>) -> SummarizeArgs {
        SummarizeArgs {
            video: "dQw4w9WgXcQ".to_string(),
            lang: Some("German".to_string()),
            output: None,
            format: OutputFormat::Text,
            detail: None,
            max_words: max_words.map(str::to_string),
            transcript_langs: Vec::new(),
            concurrency: Some(2),
        }
    }

    #[test]
    fn word_limit_falls_back_on_bad_input() {
        assert_eq!(parse_word_limit(None, 250), 250);
        assert_eq!(parse_word_limit(Some("50"), 250), 50);
        assert_eq!(parse_word_limit(Some(" 75 "), 250), 75);
        assert_eq!(parse_word_limit(Some("fifty"), 250), 250);
        assert_eq!(parse_word_limit(Some("0"), 250), 250);
        assert_eq!(parse_word_limit(Some("-3"), 250), 250);
    }

    #[test]
    fn cli_options_override_settings() {
        let settings = apply_summarize_overrides(&Settings::default(), &summarize_args(Some("50")))
            .unwrap();
        assert_eq!(settings.summary.language, "German");
        assert_eq!(settings.summary.max_words, 50);
        assert_eq!(settings.summary.concurrency, 2);

        let mut args = summarize_args(None);
        args.concurrency = Some(0);
        assert!(apply_summarize_overrides(&Settings::default(), &args).is_err());
    }

    #[test]
    fn negative_word_limit_from_cli_uses_configured_default() {
        let cli =
            Cli::try_parse_from(["ytdigest", "summarize", "dQw4w9WgXcQ", "-w", "-3"]).unwrap();
        let crate::cli::Commands::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };

        let mut defaults = Settings::default();
        defaults.summary.max_words = 120;
        let settings = apply_summarize_overrides(&defaults, &args).unwrap();
        assert_eq!(settings.summary.max_words, 120);
    }

    #[test]
    fn transcript_languages_prefer_cli() {
        let settings = Settings::default();
        assert_eq!(transcript_languages(&settings, &[]), vec!["en", "de"]);
        assert_eq!(
            transcript_languages(&settings, &["fr, es".to_string(), "it".to_string()]),
            vec!["fr", "es", "it"]
        );
    }

    #[tokio::test]
    async fn digest_video_summarizes_transcript() {
        let mut settings = Settings::default();
        settings.summary.chunk_size = Some(10);
        let source = FixedSource {
            texts: vec!["Hello", "world", "today"],
        };
        let provider = Arc::new(CountingProvider::default());

        let digest = digest_video(&settings, &source, provider.clone(), "abc", &[])
            .await
            .unwrap()
            .unwrap();

        // "Hello world today" is 17 chars with a stride of 5: offsets 0, 5, 10, 15.
        assert_eq!(digest.chunk_count, 4);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 5);
        assert_eq!(digest.summary, "- summary 4");
        assert_eq!(digest.video_id, "abc");
        assert_eq!(digest.summary_language, "English");
    }

    #[tokio::test]
    async fn empty_transcript_yields_no_digest() {
        let settings = Settings::default();
        let source = FixedSource { texts: vec![] };
        let provider = Arc::new(CountingProvider::default());

        let digest = digest_video(&settings, &source, provider.clone(), "abc", &[])
            .await
            .unwrap();

        assert!(digest.is_none());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unavailable_transcript_stops_before_completion() {
        let settings = Settings::default();
        let provider = Arc::new(CountingProvider::default());

        let err = digest_video(&settings, &MissingSource, provider.clone(), "abc", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, DigestError::TranscriptUnavailable { .. }));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn completions_mention_binary_name() {
        let mut out = Vec::new();
        print_completions(Shell::Bash, &mut out);
        assert!(String::from_utf8(out).unwrap().contains("ytdigest"));
    }

    fn captions() -> Transcript {
        let segment = |text: &str, start: f64| TranscriptSegment {
            text: text.to_string(),
            start,
            duration: 2.0,
        };

        Transcript {
            video_id: "abc".to_string(),
            language: "English".to_string(),
            language_code: "en".to_string(),
            is_generated: false,
            segments: vec![
                segment("Hello there,", 0.0),
                segment(" it's a \"demo\"!", 61.5),
                segment("goodbye\n", 3600.0),
            ],
        }
    }

    #[test]
    fn transcript_lines_carry_timestamps() {
        assert_eq!(
            format_transcript(&captions(), "-", false),
            "[00:00] Hello there,\n[01:01] it's a \"demo\"!\n[01:00:00] goodbye\n"
        );
    }

    #[test]
    fn normalized_transcript_is_one_line() {
        assert_eq!(
            format_transcript(&captions(), "-", true),
            "Hello there it s a demo goodbye\n"
        );
    }

    #[test]
    fn empty_transcript_prints_blank_line() {
        let mut transcript = captions();
        transcript.segments.clear();

        assert_eq!(format_transcript(&transcript, "-", false), "\n");
        assert_eq!(format_transcript(&transcript, "-", true), "\n");
    }

    #[test]
    fn timestamps_switch_to_hours() {
        assert_eq!(format_timestamp(75.4), "01:15");
        assert_eq!(format_timestamp(3725.0), "01:02:05");
    }
}

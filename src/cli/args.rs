//! CLI argument definitions using clap

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::output::OutputFormat;
use crate::summarize::DetailLevel;

/// ytdigest - Summarize video transcripts with an LLM
#[derive(Parser, Debug)]
#[command(name = "ytdigest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a video's transcript and summarize it
    Summarize(SummarizeArgs),

    /// Fetch and print a video's transcript
    Transcript {
        /// Video id or YouTube URL
        video: String,

        /// Transcript language to try, in order of preference (repeatable)
        #[arg(long = "transcript-lang", value_name = "LANG")]
        transcript_langs: Vec<String>,

        /// Print the normalized text instead of the raw captions
        #[arg(short, long)]
        normalized: bool,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Video id or YouTube URL
    pub video: String,

    /// Language of the summary (e.g. "English", "German")
    #[arg(short, long)]
    pub lang: Option<String>,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Level of detail
    #[arg(short, long, value_enum)]
    pub detail: Option<DetailLevel>,

    /// Maximum number of words in the summary
    #[arg(short = 'w', long, value_name = "WORDS", allow_hyphen_values = true)]
    pub max_words: Option<String>,

    /// Transcript language to try, in order of preference (repeatable)
    #[arg(long = "transcript-lang", value_name = "LANG")]
    pub transcript_langs: Vec<String>,

    /// Number of chunks summarized at the same time
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_summarize_options() {
        let cli = Cli::try_parse_from([
            "ytdigest",
            "summarize",
            "dQw4w9WgXcQ",
            "--lang",
            "German",
            "-f",
            "html",
            "-d",
            "brief",
            "-w",
            "50",
            "--transcript-lang",
            "de",
            "--transcript-lang",
            "en",
        ])
        .unwrap();

        let Commands::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        assert_eq!(args.video, "dQw4w9WgXcQ");
        assert_eq!(args.lang.as_deref(), Some("German"));
        assert_eq!(args.format, OutputFormat::Html);
        assert_eq!(args.detail, Some(DetailLevel::Brief));
        assert_eq!(args.max_words.as_deref(), Some("50"));
        assert_eq!(args.transcript_langs, vec!["de", "en"]);
    }

    #[test]
    fn negative_word_limit_reaches_the_command() {
        let cli =
            Cli::try_parse_from(["ytdigest", "summarize", "dQw4w9WgXcQ", "-w", "-3"]).unwrap();

        let Commands::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        assert_eq!(args.max_words.as_deref(), Some("-3"));
    }

    #[test]
    fn summarize_requires_a_video() {
        let err = Cli::try_parse_from(["ytdigest", "summarize"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}

//! ytdigest - Video transcript summaries powered by an LLM
//!
//! Entry point for the ytdigest CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ytdigest::cli::{Cli, Commands};
use ytdigest::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            ytdigest::cli::commands::print_completions(shell, &mut std::io::stdout());
        }
        Commands::Config(config_cmd) => {
            ytdigest::cli::commands::config_command(cli.config.as_deref(), config_cmd)?;
        }
        command => {
            // Load configuration only for runtime commands.
            let settings = Settings::load(cli.config.as_deref())?;

            match command {
                Commands::Summarize(args) => {
                    ytdigest::cli::commands::summarize_video(&settings, args).await?;
                }
                Commands::Transcript {
                    video,
                    transcript_langs,
                    normalized,
                    output,
                } => {
                    ytdigest::cli::commands::print_transcript(
                        &settings,
                        &video,
                        &transcript_langs,
                        normalized,
                        output,
                    )
                    .await?;
                }
                Commands::Completions { .. } | Commands::Config(_) => unreachable!(),
            }
        }
    }

    Ok(())
}

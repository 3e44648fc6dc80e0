use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use gramcheck::config::Config;
use gramcheck::highlight::{DelimiterMarker, Editor, Marker};
use gramcheck::output::terminal::{self, AnsiMarker};
use gramcheck::proxy::{GrammarChecker, Language};

/// gramcheck: grammar checking for Sorani Kurdish and English.
///
/// Sends text to Gemini, highlights the words it flags, and offers a fully
/// corrected version. Requests rotate across a pool of API keys.
#[derive(Parser)]
#[command(name = "gramcheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web app and JSON API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Check a piece of text from the terminal
    Check {
        /// Text to check (reads stdin when omitted)
        text: Option<String>,

        /// Language tag: "ku" for Sorani Kurdish, "en" for English
        #[arg(long, short, default_value = "ku")]
        language: String,

        /// Replace the text with the corrected version and print it
        #[arg(long)]
        apply: bool,

        /// Mark flagged words with [[brackets]] instead of colour
        #[arg(long)]
        plain: bool,
    },

    /// Show the loaded configuration (never prints keys)
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gramcheck=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let checker = GrammarChecker::from_config(&config)?;
            tracing::info!(
                model = %config.model,
                slots = config.api_keys.len(),
                "Starting web server"
            );
            gramcheck::web::run_server(checker, port, &bind).await?;
        }

        Commands::Check {
            text,
            language,
            apply,
            plain,
        } => {
            let config = Config::load()?;
            let checker = GrammarChecker::from_config(&config)?;

            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read text from stdin")?;
                    buf.trim_end_matches('\n').to_string()
                }
            };

            let delimited = DelimiterMarker::default();
            let marker: &dyn Marker = if plain { &delimited } else { &AnsiMarker };

            let mut editor = Editor::new(text);
            let language = Language::from_tag(Some(language.as_str()));
            let result = checker.check(editor.source(), language).await?;
            editor.record(&result, marker);

            terminal::display_check(&editor, &result.wrong_words, !apply);
            if apply && editor.apply_correction() {
                terminal::display_correction(editor.rendered());
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            terminal::display_status(&config);
        }
    }

    Ok(())
}

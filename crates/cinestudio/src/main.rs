//! Cinestudio CLI binary.
//!
//! Command-line access to the studio's generation flows and the saved-work
//! library. Working state persists between invocations as a session
//! snapshot in the data directory, so `scenes` and `moodboard` operate on
//! the most recently generated storyline.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{handle_command, Cli};

    // Pick up GEMINI_API_KEY from a local .env, if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    handle_command(cli).await?;

    Ok(())
}

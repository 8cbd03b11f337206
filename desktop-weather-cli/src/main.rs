//! Binary crate for the `desktop-weather` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Reporting every failure as human-readable text

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Real environment variables take precedence over .env entries.
    let dotenv = dotenvy::dotenv();

    init_tracing();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) => {
            if let Some(warning) = dotenv_warning(&err) {
                tracing::warn!("{warning}");
            }
        }
    }

    let cmd = cli::Cli::parse();
    if let Err(err) = cmd.run().await {
        cli::report_unexpected(&err);
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// A missing .env is normal; anything else would silently drop the credential.
fn dotenv_warning(err: &dotenvy::Error) -> Option<String> {
    if err.not_found() {
        None
    } else {
        Some(format!("ignoring unreadable .env file: {err}"))
    }
}

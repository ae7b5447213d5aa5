//! CLI entry point for the Zotero walkthrough.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};
use zotero_examples_core::{Library, LibraryConfig, ZoteroHttpClient, walkthrough};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env before parsing so env-backed flags see its entries too.
    // Existing environment variables take precedence over .env entries.
    let dotenv = dotenvy::dotenv();

    // Parse CLI arguments before tracing, so --help works without logs
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    debug!(?args, "CLI arguments parsed");

    match dotenv {
        Ok(path) => debug!(path = %path.display(), "Loaded .env file"),
        Err(error) if error.not_found() => debug!("No .env file found"),
        Err(error) => warn!(error = %error, "Ignoring unreadable .env file"),
    }

    let config = match LibraryConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error}");
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(library_id = %config.library_id, library_type = %config.library_type, "Zotero library configured");

    let client = ZoteroHttpClient::with_base_url(config, &args.base_url)?;
    let mut library = Library::new(client);

    let options = args.walkthrough_options();
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    walkthrough::run(&mut library, &options, &mut input, &mut out).await?;

    Ok(ExitCode::SUCCESS)
}

//! Estate Feed CLI
//!
//! Runs one full export and prints the feed, or writes it to a file.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use estate_feed::{
    error::Result,
    models::Config,
    pipeline,
    storage::{self, LocalStorage},
    utils::HttpClient,
};

/// estate-feed - Profitbase listing exporter
#[derive(Parser, Debug)]
#[command(
    name = "estate-feed",
    version,
    about = "Export normalized real-estate listings from a Profitbase catalog"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Write the feed to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    compact: bool,

    /// Log level (overrides config; RUST_LOG wins over both)
    #[arg(long)]
    log_level: Option<String>,

    /// Give up on the token after this many attempts
    #[arg(long)]
    max_auth_attempts: Option<u32>,
}

/// Initialize logging; records go to stderr so stdout stays pure JSON.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = Config::load_or_fallback(&cli.config);
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(attempts) = cli.max_auth_attempts {
        config.auth.max_attempts = Some(attempts);
    }
    if cli.compact {
        config.output.pretty = false;
    }
    if let Some(path) = cli.output {
        config.output.path = Some(path.display().to_string());
    }

    init_logging(&config.logging.level);
    if let Some(e) = load_error {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            cli.config.display(),
            e
        );
    }
    log::info!("estate-feed starting for account {}", config.api.account);

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let client = HttpClient::new(&config.api)?;
    let outcome = pipeline::run_feed(&config, &client).inspect_err(|e| {
        log::error!("Feed run aborted: {}", e);
    })?;

    match &config.output.path {
        Some(path) => LocalStorage::new(path, config.output.pretty).save(&outcome.estates)?,
        None => storage::write_estates(io::stdout().lock(), &outcome.estates, config.output.pretty)?,
    }

    log::info!("Done!");
    Ok(())
}

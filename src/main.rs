//! smartfaq CLI - Entry point
//!
//! Usage: smartfaq <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use smartfaq::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (RUST_LOG wins over --verbose)
    let default_level = if cli.global.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let global = cli.global;
    match cli.command {
        Commands::List(args) => smartfaq::cli::list::run(args, &global).await,
        Commands::Add(args) => smartfaq::cli::add::run(args, &global).await,
        Commands::Delete(args) => smartfaq::cli::delete::run(args, &global).await,
        Commands::Ask(args) => smartfaq::cli::ask::run(args, &global).await,
        Commands::Analytics(args) => smartfaq::cli::analytics::run(args, &global).await,
        Commands::Shell(args) => smartfaq::cli::shell::run(args, &global).await,
        Commands::Config(args) => smartfaq::cli::config::run(args, &global),
    }
}

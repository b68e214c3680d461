//! CLI module - Command definitions and handlers

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::core::flow::Outcome;
use crate::core::session::Session;
use crate::remote::RemoteClient;

pub mod add;
pub mod analytics;
pub mod ask;
pub mod config;
pub mod delete;
pub mod list;
pub mod render;
pub mod shell;

/// smartfaq - Smart FAQ admin client
///
/// Curate FAQ entries, test the answer endpoint, and review usage analytics.
#[derive(Parser, Debug)]
#[command(name = "smartfaq")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(long, global = true, env = "SMARTFAQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// FAQ service base URL (overrides config)
    #[arg(long, global = true, env = "SMARTFAQ_SERVER_URL")]
    pub server_url: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List FAQ entries
    List(list::ListArgs),

    /// Add a new FAQ entry
    Add(add::AddArgs),

    /// Delete a FAQ entry by ID
    Delete(delete::DeleteArgs),

    /// Ask the answer endpoint a question
    Ask(ask::AskArgs),

    /// Show feedback stats and popular queries
    Analytics(analytics::AnalyticsArgs),

    /// Interactive admin session
    Shell(shell::ShellArgs),

    /// Get or set configuration
    Config(config::ConfigArgs),
}

/// Load config and connect a fresh session
pub fn open_session(global: &GlobalArgs) -> Result<(Config, Session)> {
    let config = Config::load(global.config.as_deref())?.with_server_url(global.server_url.clone());
    let client = RemoteClient::from_config(&config.server)?;
    tracing::debug!(url = %client.base_url(), "Connecting session");
    Ok((config, Session::new(Arc::new(client))))
}

/// Turn a flow outcome into a command result, printing any banners
pub(crate) fn finish(session: &Session, outcome: Outcome) -> Result<()> {
    let banners = session.take_status();
    if !banners.is_empty() {
        eprintln!("{}", render::status(&banners));
    }

    match outcome {
        Outcome::Failed(err) => Err(err.into()),
        Outcome::Rejected => anyhow::bail!("Another request is still in flight"),
        _ => Ok(()),
    }
}

//! `smartfaq ask` command
//!
//! Sends one probe query to the answer endpoint.
//!
//! # Usage
//! ```bash
//! smartfaq ask "refund policy"
//! smartfaq ask "refund policy" --json
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{finish, open_session, render, GlobalArgs};
use crate::core::flow::Outcome;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question to ask
    pub query: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AskArgs, global: &GlobalArgs) -> Result<()> {
    let (_config, session) = open_session(global)?;

    let outcome = session.ask(&args.query).await;
    if outcome == Outcome::Skipped {
        eprintln!("{}", "Nothing asked: the query is empty.".dimmed());
        return Ok(());
    }
    finish(&session, outcome)?;

    let result = session.probe().result();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render::probe(result.as_ref()));
    }

    Ok(())
}

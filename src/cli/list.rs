//! `smartfaq list` command
//!
//! Reloads the entry store and prints it in service order.
//!
//! # Usage
//! ```bash
//! smartfaq list
//! smartfaq list --json
//! ```

use anyhow::Result;
use clap::Args;

use super::{finish, open_session, render, GlobalArgs};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show full answers
    #[arg(long)]
    pub full: bool,
}

pub async fn run(args: ListArgs, global: &GlobalArgs) -> Result<()> {
    let (config, session) = open_session(global)?;

    let outcome = session.refresh_entries().await;
    finish(&session, outcome)?;

    let entries = session.entries().entries();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        let max = if args.full {
            0
        } else {
            config.display.max_answer_chars
        };
        println!("{}", render::entries(&entries, max));
    }

    Ok(())
}

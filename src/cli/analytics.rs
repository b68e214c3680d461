//! `smartfaq analytics` command

use anyhow::Result;
use clap::Args;

use super::{finish, open_session, render, GlobalArgs};

#[derive(Args, Debug)]
pub struct AnalyticsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AnalyticsArgs, global: &GlobalArgs) -> Result<()> {
    let (_config, session) = open_session(global)?;

    let outcome = session.refresh_analytics().await;
    finish(&session, outcome)?;

    let snapshot = session.analytics().snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render::analytics(snapshot.as_ref()));
    }

    Ok(())
}

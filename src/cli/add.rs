//! `smartfaq add` command
//!
//! Fills the draft, submits it, and prints the reloaded list.
//!
//! # Usage
//! ```bash
//! smartfaq add -q "How do refunds work?" -a "Within 30 days of purchase."
//! smartfaq add -q "Shipping time?" -a "3-5 business days." -c shipping
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::{finish, open_session, render, GlobalArgs};
use crate::core::draft::DraftField;
use crate::core::flow::Outcome;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Question text
    #[arg(short, long)]
    pub question: String,

    /// Answer text
    #[arg(short, long)]
    pub answer: String,

    /// Category label
    #[arg(short, long)]
    pub category: Option<String>,
}

pub async fn run(args: AddArgs, global: &GlobalArgs) -> Result<()> {
    let (config, session) = open_session(global)?;

    session.edit_draft(DraftField::Question, args.question);
    session.edit_draft(DraftField::Answer, args.answer);
    session.edit_draft(DraftField::Category, args.category.unwrap_or_default());

    let outcome = session.submit_entry().await;
    if outcome == Outcome::Skipped {
        eprintln!("{}", "Nothing submitted: question and answer must both be set.".dimmed());
        return Ok(());
    }
    finish(&session, outcome)?;

    println!("{} FAQ added", "✓".green());
    println!();
    println!(
        "{}",
        render::entries(&session.entries().entries(), config.display.max_answer_chars)
    );

    Ok(())
}

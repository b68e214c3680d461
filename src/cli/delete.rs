//! `smartfaq delete` command
//!
//! Deletes an entry by ID and prints the reloaded list.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use super::{finish, open_session, render, GlobalArgs};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Entry ID
    pub id: String,

    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,
}

pub async fn run(args: DeleteArgs, global: &GlobalArgs) -> Result<()> {
    let (config, session) = open_session(global)?;

    if !args.force {
        // Look the entry up so the prompt can show what is being deleted
        let outcome = session.refresh_entries().await;
        finish(&session, outcome)?;

        let prompt = match session.entries().get(&args.id) {
            Some(entry) => format!("Delete \"{}\"?", entry.question),
            None => format!("No FAQ with ID {} is listed. Send the delete anyway?", args.id),
        };

        let confirmed = tokio::task::spawn_blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(false)
                .interact()
        })
        .await??;

        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let outcome = session.remove_entry(&args.id).await;
    finish(&session, outcome)?;

    if session.entries().contains(&args.id) {
        println!(
            "{} Service still lists {}",
            "!".yellow(),
            args.id.dimmed()
        );
    } else {
        println!("{} Deleted {}", "✓".green(), args.id.dimmed());
    }
    println!();
    println!(
        "{}",
        render::entries(&session.entries().entries(), config.display.max_answer_chars)
    );

    Ok(())
}

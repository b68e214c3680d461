//! `smartfaq shell` command
//!
//! Interactive admin session with three tabs: Manage FAQs, Test Search and
//! Analytics. Network actions run as background tasks, so the operator can
//! switch tabs while a request is in flight. A flow's submit control is
//! disabled until its own request resolves; other flows stay usable.
//!
//! # Usage
//! ```bash
//! smartfaq shell
//! smartfaq shell --tab test
//! ```

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use tracing::debug;

use super::{open_session, render, GlobalArgs};
use crate::core::draft::DraftField;
use crate::core::flow::{FlowKind, Outcome};
use crate::core::mode::Mode;
use crate::core::session::Session;

#[derive(Args, Debug)]
pub struct ShellArgs {
    /// Tab to open first (faqs, test, analytics)
    #[arg(long, default_value = "faqs")]
    pub tab: Mode,
}

/// One selectable control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Switch(Mode),
    Edit(DraftField),
    Submit,
    Delete,
    Reload,
    Ask,
    RefreshAnalytics,
    Redraw,
    Quit,
}

impl Action {
    fn flow(self) -> Option<FlowKind> {
        match self {
            Action::Submit | Action::Delete | Action::Reload => Some(FlowKind::Curation),
            Action::Ask => Some(FlowKind::Probe),
            Action::RefreshAnalytics => Some(FlowKind::Analytics),
            _ => None,
        }
    }

    fn label(self, session: &Session) -> String {
        let base = match self {
            Action::Switch(mode) => format!("→ {}", mode.label()),
            Action::Edit(field) => format!("Edit {}", field.label().to_lowercase()),
            Action::Submit => "Add FAQ".to_string(),
            Action::Delete => "Delete a FAQ".to_string(),
            Action::Reload => "Reload FAQs".to_string(),
            Action::Ask => "Search".to_string(),
            Action::RefreshAnalytics => "Refresh analytics".to_string(),
            Action::Redraw => "Redraw".to_string(),
            Action::Quit => "Quit".to_string(),
        };

        match self.flow() {
            Some(flow) if session.is_busy(flow) => format!("{} (busy)", base),
            _ => base,
        }
    }
}

/// Controls available on the active tab
fn actions_for(mode: Mode) -> Vec<Action> {
    let mut actions = match mode {
        Mode::Curation => vec![
            Action::Edit(DraftField::Question),
            Action::Edit(DraftField::Answer),
            Action::Edit(DraftField::Category),
            Action::Submit,
            Action::Delete,
            Action::Reload,
        ],
        Mode::Probe => vec![Action::Ask],
        Mode::Analytics => vec![Action::RefreshAnalytics],
    };

    actions.extend(
        Mode::ORDER
            .iter()
            .filter(|&&m| m != mode)
            .map(|&m| Action::Switch(m)),
    );
    actions.push(Action::Redraw);
    actions.push(Action::Quit);
    actions
}

pub async fn run(args: ShellArgs, global: &GlobalArgs) -> Result<()> {
    let (config, session) = open_session(global)?;
    let session = Arc::new(session);
    session.select_mode(args.tab);

    {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            session.start().await;
        });
    }

    let term = Term::stdout();
    loop {
        term.clear_screen()?;
        println!("{}", screen(&session, config.display.max_answer_chars));

        let actions = actions_for(session.mode());
        let labels: Vec<String> = actions.iter().map(|a| a.label(&session)).collect();
        let choice = match select("Action", labels).await? {
            Some(i) => actions[i],
            None => break,
        };
        debug!(?choice, "Shell action");

        if let Some(flow) = choice.flow() {
            if !session.can_submit(flow) {
                continue;
            }
        }

        match choice {
            Action::Switch(mode) => session.select_mode(mode),
            Action::Edit(field) => {
                let current = session.entries().draft().get(field).to_string();
                let value = input(field.label(), current).await?;
                session.edit_draft(field, value);
            }
            Action::Submit => {
                spawn(&session, |s| async move { s.submit_entry().await });
            }
            Action::Delete => {
                if let Some(id) = pick_entry(&session).await? {
                    spawn(&session, move |s| async move { s.remove_entry(&id).await });
                }
            }
            Action::Reload => {
                spawn(&session, |s| async move { s.refresh_entries().await });
            }
            Action::Ask => {
                let query = input("Enter a question", session.probe().query()).await?;
                spawn(&session, move |s| async move { s.ask(&query).await });
            }
            Action::RefreshAnalytics => {
                spawn(&session, |s| async move { s.refresh_analytics().await });
            }
            Action::Redraw => {}
            Action::Quit => break,
        }
    }

    Ok(())
}

/// Render the active panel plus any pending banners
fn screen(session: &Session, max_answer_chars: usize) -> String {
    let mode = session.mode();
    let mut parts = vec![render::tab_bar(mode, session.entries().len())];

    let banners = session.take_status();
    if !banners.is_empty() {
        parts.push(render::status(&banners));
    }

    match mode {
        Mode::Curation => {
            parts.push(render::draft(
                &session.entries().draft(),
                session.is_busy(FlowKind::Curation),
            ));
            parts.push(render::entries(
                &session.entries().entries(),
                max_answer_chars,
            ));
        }
        Mode::Probe => {
            let query = session.probe().query();
            if !query.is_empty() {
                parts.push(format!("{} {}", "Query:".dimmed(), query));
            }
            if session.is_busy(FlowKind::Probe) {
                parts.push("Searching...".blue().to_string());
            }
            parts.push(render::probe(session.probe().result().as_ref()));
        }
        Mode::Analytics => {
            // Nothing to show until the first report lands
            if let Some(snapshot) = session.analytics().snapshot() {
                parts.push(render::analytics(Some(&snapshot)));
            } else if session.is_busy(FlowKind::Analytics) {
                parts.push("Loading...".dimmed().to_string());
            }
        }
    }

    parts.join("\n\n")
}

/// Run a session action in the background; late results still land
fn spawn<F, Fut>(session: &Arc<Session>, action: F)
where
    F: FnOnce(Arc<Session>) -> Fut,
    Fut: std::future::Future<Output = Outcome> + Send + 'static,
{
    let fut = action(Arc::clone(session));
    tokio::spawn(async move {
        let outcome = fut.await;
        debug!(?outcome, "Background action finished");
    });
}

async fn pick_entry(session: &Session) -> Result<Option<String>> {
    let entries = session.entries().entries();
    if entries.is_empty() {
        return Ok(None);
    }

    let labels: Vec<String> = entries
        .iter()
        .map(|e| format!("{}  {}", e.question, e.id.dimmed()))
        .collect();
    let index = match select("Delete which FAQ?", labels).await? {
        Some(i) => i,
        None => return Ok(None),
    };

    let entry = &entries[index];
    let prompt = format!("Delete \"{}\"?", entry.question);
    let confirmed = tokio::task::spawn_blocking(move || {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
    })
    .await??;

    Ok(confirmed.then(|| entry.id.clone()))
}

async fn select(prompt: &'static str, items: Vec<String>) -> Result<Option<usize>> {
    let choice = tokio::task::spawn_blocking(move || {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact_opt()
    })
    .await??;
    Ok(choice)
}

async fn input(prompt: &'static str, initial: String) -> Result<String> {
    let value = tokio::task::spawn_blocking(move || {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()
    })
    .await??;
    Ok(value)
}

//! Panel rendering
//!
//! Every function returns a string so commands, the shell and tests can
//! share the same output.

use std::fmt::Write as _;

use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::core::analytics::{AnalyticsSnapshot, FeedbackSummary};
use crate::core::draft::{DraftEntry, DraftField};
use crate::core::entry::Entry;
use crate::core::mode::Mode;
use crate::core::probe::ProbeResult;
use crate::core::session::StatusMessage;

/// Header line with the active tab highlighted
pub fn tab_bar(active: Mode, entry_count: usize) -> String {
    let tabs: Vec<String> = Mode::ORDER
        .iter()
        .map(|&mode| {
            let label = match mode {
                Mode::Curation => format!("{} ({})", mode.label(), entry_count),
                _ => mode.label().to_string(),
            };
            if mode == active {
                format!("[{}]", label).cyan().bold().to_string()
            } else {
                format!(" {} ", label).dimmed().to_string()
            }
        })
        .collect();

    format!(
        "{}\n{}\n{}",
        "🤖 Smart FAQ Admin".bold(),
        tabs.join("  "),
        "─".repeat(60)
    )
}

/// Existing entries, in store order
pub fn entries(entries: &[Entry], max_answer_chars: usize) -> String {
    if entries.is_empty() {
        return "No FAQs yet.".dimmed().to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", "Existing FAQs".bold());
    for entry in entries {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} {}", "Q:".dimmed(), entry.question.bold());
        let _ = writeln!(
            out,
            "{} {}",
            "A:".dimmed(),
            truncate(&entry.answer, max_answer_chars)
        );
        match entry.category_label() {
            Some(category) => {
                let _ = writeln!(
                    out,
                    "   [{}]  {} {}",
                    category.yellow(),
                    "ID:".dimmed(),
                    entry.id.dimmed()
                );
            }
            None => {
                let _ = writeln!(out, "   {} {}", "ID:".dimmed(), entry.id.dimmed());
            }
        }
    }
    let _ = write!(out, "\n{} FAQ(s)", entries.len());
    out
}

/// The add-entry form
pub fn draft(draft: &DraftEntry, busy: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Add New FAQ".bold());
    for field in DraftField::ALL {
        let value = draft.get(field);
        let shown = if value.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            value.to_string()
        };
        let _ = writeln!(out, "  {:<20} {}", field.label(), shown);
    }
    let button = if busy { "Adding..." } else { "Add FAQ" };
    let _ = write!(out, "  {}", button.blue());
    out
}

/// Last probe result, if any
pub fn probe(result: Option<&ProbeResult>) -> String {
    let result = match result {
        Some(r) => r,
        None => return "No query yet.".dimmed().to_string(),
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", "AI Answer:".blue().bold());
    let _ = writeln!(out, "{}", result.answer);
    let _ = write!(
        out,
        "Confidence: {} | Response Time: {}",
        result.confidence_display(),
        result.response_time_display()
    );

    if !result.sources.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out);
        let _ = write!(out, "{}", "Matched FAQs:".bold());
        for source in &result.sources {
            let _ = writeln!(out);
            let _ = writeln!(out, "{} {}", "│".blue(), source.question.bold());
            let _ = writeln!(out, "{} {}", "│".blue(), source.answer);
            let _ = write!(
                out,
                "{} {}",
                "│".blue(),
                format!("Similarity: {}", source.similarity_display()).dimmed()
            );
        }
    }
    out
}

#[derive(Tabled)]
struct QueryRow {
    #[tabled(rename = "Query")]
    query: String,
    #[tabled(rename = "Count")]
    count: u64,
    #[tabled(rename = "Avg Time (ms)")]
    avg_time: String,
}

/// Feedback stats and the popular-query table
///
/// With no snapshot every metric shows as unavailable and the table is empty.
pub fn analytics(snapshot: Option<&AnalyticsSnapshot>) -> String {
    let summary = FeedbackSummary::from_snapshot(snapshot);

    let mut out = String::new();
    let _ = writeln!(out, "{}", "Feedback Stats".bold());
    let _ = writeln!(out, "  Avg Rating:      {}", summary.avg_rating().bold());
    let _ = writeln!(out, "  Helpful:         {}", summary.helpful().bold());
    let _ = writeln!(out, "  Total Feedback:  {}", summary.total_feedback().bold());
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Popular Queries (Last 7 Days)".bold());

    let rows: Vec<QueryRow> = snapshot
        .map(|s| s.popular_queries())
        .unwrap_or(&[])
        .iter()
        .map(|q| QueryRow {
            query: q.query.clone(),
            count: q.count,
            avg_time: q.avg_time_display(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()));
    let _ = write!(out, "{}", table);
    out
}

/// Transient failure banners
pub fn status(messages: &[StatusMessage]) -> String {
    messages
        .iter()
        .map(|m| {
            format!(
                "{} {} failed at {}: {}",
                "✗".red(),
                m.flow,
                m.at.format("%H:%M:%S"),
                m.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shorten to at most `max` characters (0 = unlimited)
pub fn truncate(text: &str, max: usize) -> String {
    if max == 0 || text.chars().count() <= max {
        return text.to_string();
    }
    let mut short: String = text.chars().take(max.saturating_sub(1)).collect();
    short.push('…');
    short
}

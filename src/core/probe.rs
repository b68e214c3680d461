//! Probe session
//!
//! Sends ad-hoc queries to the answer endpoint and keeps the last result.
//! Results are stored exactly as the service sent them: no re-sorting of
//! sources, no rescaling of confidence. A missing number is kept as missing
//! and shown as unavailable; it never costs the rest of the answer.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::analytics::UNAVAILABLE;
use super::flow::{lock, Claim, FlowState, Outcome};
use super::service::FaqService;

/// Supporting entry the service matched against the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    /// Relevance in [0, 1]
    #[serde(default)]
    pub similarity: Option<f64>,
}

impl Source {
    pub fn similarity_display(&self) -> String {
        percent(self.similarity)
    }
}

/// Answer endpoint response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    #[serde(default)]
    pub answer: String,
    /// Ordered by the service, most similar first
    #[serde(default)]
    pub sources: Vec<Source>,
    /// Reliability in [0, 1]
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Milliseconds
    #[serde(default)]
    pub response_time: Option<u64>,
}

impl ProbeResult {
    pub fn confidence_display(&self) -> String {
        percent(self.confidence)
    }

    pub fn response_time_display(&self) -> String {
        match self.response_time {
            Some(ms) => format!("{}ms", ms),
            None => UNAVAILABLE.to_string(),
        }
    }
}

/// Format a [0, 1] score as a percentage with one decimal
pub fn percent(score: Option<f64>) -> String {
    match score {
        Some(s) if s.is_finite() => format!("{:.1}%", s * 100.0),
        _ => UNAVAILABLE.to_string(),
    }
}

/// Last query, last result and probe busy state
#[derive(Debug, Default)]
pub struct ProbeSession {
    query: Mutex<String>,
    result: Mutex<Option<ProbeResult>>,
    flow: FlowState,
}

impl ProbeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last submitted query
    pub fn query(&self) -> String {
        lock(&self.query).clone()
    }

    pub fn result(&self) -> Option<ProbeResult> {
        lock(&self.result).clone()
    }

    pub fn flow(&self) -> &FlowState {
        &self.flow
    }

    pub fn is_busy(&self) -> bool {
        self.flow.is_busy()
    }

    /// Ask the service; a new result fully replaces the previous one
    pub async fn ask(&self, service: &dyn FaqService, query: &str, claim: Claim) -> Outcome {
        if query.is_empty() {
            return Outcome::Skipped;
        }

        let Some(ticket) = self.flow.claim(claim) else {
            return Outcome::Rejected;
        };
        *lock(&self.query) = query.to_string();
        debug!(query, "Probing answer endpoint");

        let outcome = match service.answer(query).await {
            Ok(result) => {
                let response_time = result.response_time;
                if self
                    .flow
                    .commit(&ticket, || *lock(&self.result) = Some(result))
                {
                    debug!(?response_time, "Probe answered");
                    Outcome::Applied
                } else {
                    Outcome::Superseded
                }
            }
            Err(err) if self.flow.is_current(&ticket) => {
                warn!(query, error = %err, "Probe failed");
                Outcome::Failed(err)
            }
            Err(_) => Outcome::Superseded,
        };

        self.flow.finish(ticket);
        outcome
    }
}

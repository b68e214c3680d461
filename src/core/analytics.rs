//! Analytics snapshot
//!
//! A point-in-time usage report. It is only ever replaced wholesale; a
//! failed refresh leaves the last good snapshot in place.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::flow::{lock, Claim, FlowState, Outcome};
use super::service::FaqService;

/// Shown wherever a metric is missing
pub const UNAVAILABLE: &str = "N/A";

/// Aggregated operator feedback
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    #[serde(default)]
    pub avg_rating: Option<f64>,
    #[serde(default)]
    pub helpful_count: Option<u64>,
    #[serde(default)]
    pub total_feedback: Option<u64>,
}

/// One row of the popular-query table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularQuery {
    pub query: String,
    #[serde(default)]
    pub count: u64,
    /// Average response time in milliseconds
    #[serde(default)]
    pub avg_time: Option<f64>,
}

impl PopularQuery {
    pub fn avg_time_display(&self) -> String {
        match self.avg_time {
            Some(ms) if ms.is_finite() => format!("{}", ms.round() as i64),
            _ => UNAVAILABLE.to_string(),
        }
    }
}

/// Analytics endpoint response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub feedback_stats: Option<FeedbackStats>,
    /// Trailing 7 days, ordered by the service
    #[serde(default)]
    pub popular_queries: Option<Vec<PopularQuery>>,
}

impl AnalyticsSnapshot {
    pub fn popular_queries(&self) -> &[PopularQuery] {
        self.popular_queries.as_deref().unwrap_or(&[])
    }
}

/// Display-ready feedback metrics
///
/// With no snapshot loaded every metric reads as unavailable. With a
/// snapshot, a missing rating is unavailable and missing counts are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackSummary {
    loaded: bool,
    stats: FeedbackStats,
}

impl FeedbackSummary {
    pub fn from_snapshot(snapshot: Option<&AnalyticsSnapshot>) -> Self {
        match snapshot {
            Some(s) => Self {
                loaded: true,
                stats: s.feedback_stats.clone().unwrap_or_default(),
            },
            None => Self {
                loaded: false,
                stats: FeedbackStats::default(),
            },
        }
    }

    pub fn avg_rating(&self) -> String {
        match self.stats.avg_rating {
            Some(r) if r.is_finite() => format!("{:.1}", r),
            _ => UNAVAILABLE.to_string(),
        }
    }

    pub fn helpful(&self) -> String {
        self.count(self.stats.helpful_count)
    }

    pub fn total_feedback(&self) -> String {
        self.count(self.stats.total_feedback)
    }

    fn count(&self, value: Option<u64>) -> String {
        if self.loaded {
            value.unwrap_or(0).to_string()
        } else {
            UNAVAILABLE.to_string()
        }
    }
}

/// Last good snapshot plus analytics busy state
#[derive(Debug, Default)]
pub struct AnalyticsPanel {
    snapshot: Mutex<Option<AnalyticsSnapshot>>,
    flow: FlowState,
}

impl AnalyticsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<AnalyticsSnapshot> {
        lock(&self.snapshot).clone()
    }

    pub fn summary(&self) -> FeedbackSummary {
        FeedbackSummary::from_snapshot(lock(&self.snapshot).as_ref())
    }

    pub fn flow(&self) -> &FlowState {
        &self.flow
    }

    pub fn is_busy(&self) -> bool {
        self.flow.is_busy()
    }

    /// Fetch a fresh report and replace the snapshot on success
    pub async fn refresh(&self, service: &dyn FaqService, claim: Claim) -> Outcome {
        let Some(ticket) = self.flow.claim(claim) else {
            return Outcome::Rejected;
        };

        let outcome = match service.analytics().await {
            Ok(snapshot) => {
                let rows = snapshot.popular_queries().len();
                if self
                    .flow
                    .commit(&ticket, || *lock(&self.snapshot) = Some(snapshot))
                {
                    debug!(rows, "Analytics snapshot replaced");
                    Outcome::Applied
                } else {
                    Outcome::Superseded
                }
            }
            Err(err) if self.flow.is_current(&ticket) => {
                warn!(error = %err, "Analytics refresh failed");
                Outcome::Failed(err)
            }
            Err(_) => Outcome::Superseded,
        };

        self.flow.finish(ticket);
        outcome
    }
}

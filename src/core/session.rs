//! Admin session
//!
//! Ties the mode controller, the three flows and the status queue together.
//! This is the control layer. Operator actions claim their flow with
//! `Claim::IfIdle`, so a busy flow refuses them; only the initial load
//! forces its way in.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::info;

use super::analytics::AnalyticsPanel;
use super::draft::DraftField;
use super::entries::EntryStore;
use super::flow::{lock, Claim, FlowKind, Outcome};
use super::mode::{Mode, ModeController};
use super::probe::ProbeSession;
use super::service::FaqService;

/// Transient banner for a failed operation
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub flow: FlowKind,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// Client-side state for one operator session
pub struct Session {
    service: Arc<dyn FaqService>,
    modes: Mutex<ModeController>,
    entries: EntryStore,
    probe: ProbeSession,
    analytics: AnalyticsPanel,
    status: Mutex<Vec<StatusMessage>>,
}

impl Session {
    pub fn new(service: Arc<dyn FaqService>) -> Self {
        Self {
            service,
            modes: Mutex::new(ModeController::new()),
            entries: EntryStore::new(),
            probe: ProbeSession::new(),
            analytics: AnalyticsPanel::new(),
            status: Mutex::new(Vec::new()),
        }
    }

    // ============== Panels ==============

    pub fn mode(&self) -> Mode {
        lock(&self.modes).current()
    }

    /// Switch panels; pending requests keep running and still land
    pub fn select_mode(&self, mode: Mode) {
        lock(&self.modes).select(mode);
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    pub fn probe(&self) -> &ProbeSession {
        &self.probe
    }

    pub fn analytics(&self) -> &AnalyticsPanel {
        &self.analytics
    }

    pub fn is_busy(&self, flow: FlowKind) -> bool {
        match flow {
            FlowKind::Curation => self.entries.is_busy(),
            FlowKind::Probe => self.probe.is_busy(),
            FlowKind::Analytics => self.analytics.is_busy(),
        }
    }

    /// Whether the submit control of `flow` is enabled
    pub fn can_submit(&self, flow: FlowKind) -> bool {
        !self.is_busy(flow)
    }

    pub fn edit_draft(&self, field: DraftField, value: impl Into<String>) {
        self.entries.edit_draft(field, value);
    }

    // ============== Actions ==============

    /// Initial load: entries and analytics side by side
    pub async fn start(&self) -> (Outcome, Outcome) {
        info!("Loading entries and analytics");
        let (entries, analytics) = futures::join!(
            self.entries.refresh(self.service.as_ref(), Claim::Force),
            self.analytics.refresh(self.service.as_ref(), Claim::Force),
        );
        (
            self.record(FlowKind::Curation, entries),
            self.record(FlowKind::Analytics, analytics),
        )
    }

    pub async fn refresh_entries(&self) -> Outcome {
        let outcome = self
            .entries
            .refresh(self.service.as_ref(), Claim::IfIdle)
            .await;
        self.record(FlowKind::Curation, outcome)
    }

    pub async fn submit_entry(&self) -> Outcome {
        let outcome = self
            .entries
            .submit(self.service.as_ref(), Claim::IfIdle)
            .await;
        self.record(FlowKind::Curation, outcome)
    }

    pub async fn remove_entry(&self, id: &str) -> Outcome {
        let outcome = self
            .entries
            .remove(self.service.as_ref(), id, Claim::IfIdle)
            .await;
        self.record(FlowKind::Curation, outcome)
    }

    pub async fn ask(&self, query: &str) -> Outcome {
        let outcome = self
            .probe
            .ask(self.service.as_ref(), query, Claim::IfIdle)
            .await;
        self.record(FlowKind::Probe, outcome)
    }

    pub async fn refresh_analytics(&self) -> Outcome {
        let outcome = self
            .analytics
            .refresh(self.service.as_ref(), Claim::IfIdle)
            .await;
        self.record(FlowKind::Analytics, outcome)
    }

    // ============== Status ==============

    /// Drain pending banners (each is shown once)
    pub fn take_status(&self) -> Vec<StatusMessage> {
        std::mem::take(&mut *lock(&self.status))
    }

    fn record(&self, flow: FlowKind, outcome: Outcome) -> Outcome {
        if let Outcome::Failed(ref err) = outcome {
            lock(&self.status).push(StatusMessage {
                flow,
                text: err.to_string(),
                at: Utc::now(),
            });
        }
        outcome
    }
}

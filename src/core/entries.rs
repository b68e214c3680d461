//! Entry store and the curation flow
//!
//! The store is a wholesale mirror of the service's entry list: every
//! mutation is followed by a full reload, and the list order is whatever
//! the service returns. There is no incremental merge.

use std::sync::Mutex;

use tracing::{debug, warn};

use super::draft::{DraftEntry, DraftField};
use super::entry::{generate_id, Entry};
use super::flow::{lock, Claim, FlowState, Outcome, Ticket};
use super::service::FaqService;

/// In-memory entry list, draft builder and curation busy state
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: Mutex<Vec<Entry>>,
    draft: Mutex<DraftEntry>,
    flow: FlowState,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current entries, in service order
    pub fn entries(&self) -> Vec<Entry> {
        lock(&self.entries).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entries).is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        lock(&self.entries).iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: &str) -> Option<Entry> {
        lock(&self.entries).iter().find(|e| e.id == id).cloned()
    }

    pub fn flow(&self) -> &FlowState {
        &self.flow
    }

    pub fn is_busy(&self) -> bool {
        self.flow.is_busy()
    }

    // ============== Draft ==============

    pub fn draft(&self) -> DraftEntry {
        lock(&self.draft).clone()
    }

    pub fn edit_draft(&self, field: DraftField, value: impl Into<String>) {
        lock(&self.draft).set(field, value);
    }

    pub fn clear_draft(&self) {
        lock(&self.draft).clear();
    }

    // ============== Operations ==============

    /// Replace the store with the service's current list
    pub async fn refresh(&self, service: &dyn FaqService, claim: Claim) -> Outcome {
        let Some(ticket) = self.flow.claim(claim) else {
            return Outcome::Rejected;
        };
        let outcome = self.reload(service, &ticket).await;
        self.flow.finish(ticket);
        outcome
    }

    /// Submit the draft as a new entry, then reload
    ///
    /// No request is issued unless question and answer are both set. The
    /// reload runs whether or not the create succeeded. The draft is reset
    /// afterwards unless the service could not be reached at all, in which
    /// case the operator keeps their text to retry.
    pub async fn submit(&self, service: &dyn FaqService, claim: Claim) -> Outcome {
        let draft = self.draft();
        if !draft.is_submittable() {
            return Outcome::Skipped;
        }

        let Some(ticket) = self.flow.claim(claim) else {
            return Outcome::Rejected;
        };
        let entry = draft.to_entry(generate_id());
        debug!(id = %entry.id, "Creating entry");

        let created = service.create_entry(&entry).await;
        if let Err(ref err) = created {
            warn!(id = %entry.id, error = %err, "Create failed");
        }

        let reloaded = self.reload(service, &ticket).await;

        let unreachable = matches!(&created, Err(err) if !err.service_responded());
        if !unreachable {
            self.clear_draft();
        }

        let current = self.flow.finish(ticket);
        match created {
            Err(err) if current => Outcome::Failed(err),
            Err(_) => Outcome::Superseded,
            Ok(()) => reloaded,
        }
    }

    /// Delete an entry by id, then reload
    pub async fn remove(&self, service: &dyn FaqService, id: &str, claim: Claim) -> Outcome {
        if id.is_empty() {
            return Outcome::Skipped;
        }

        let Some(ticket) = self.flow.claim(claim) else {
            return Outcome::Rejected;
        };
        debug!(id, "Deleting entry");

        let deleted = service.delete_entry(id).await;
        if let Err(ref err) = deleted {
            warn!(id, error = %err, "Delete failed");
        }

        let reloaded = self.reload(service, &ticket).await;

        let current = self.flow.finish(ticket);
        match deleted {
            Err(err) if current => Outcome::Failed(err),
            Err(_) => Outcome::Superseded,
            Ok(()) => reloaded,
        }
    }

    async fn reload(&self, service: &dyn FaqService, ticket: &Ticket) -> Outcome {
        match service.list_entries().await {
            Ok(entries) => {
                let count = entries.len();
                if self
                    .flow
                    .commit(ticket, || *lock(&self.entries) = entries)
                {
                    debug!(count, "Entry store reloaded");
                    Outcome::Applied
                } else {
                    debug!(generation = ticket.generation(), "Dropping stale entry list");
                    Outcome::Superseded
                }
            }
            Err(err) if self.flow.is_current(ticket) => {
                warn!(error = %err, "Entry reload failed");
                Outcome::Failed(err)
            }
            Err(_) => Outcome::Superseded,
        }
    }
}

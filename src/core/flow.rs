//! Per-flow busy state
//!
//! Each async flow (curation, probe, analytics) is a two-state machine
//! {idle, busy} with its own generation counter:
//!
//! - `claim` marks the flow busy and issues a ticket for a new generation
//! - `commit` applies a write only if the ticket is still current
//! - `finish` returns the flow to idle, but only for the current ticket
//!
//! A response carrying an older ticket is stale: its data is discarded and
//! it does not touch the busy state owned by the newer request.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::service::ServiceError;

/// Lock a mutex, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Which flow an operation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    Curation,
    Probe,
    Analytics,
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowKind::Curation => write!(f, "curation"),
            FlowKind::Probe => write!(f, "probe"),
            FlowKind::Analytics => write!(f, "analytics"),
        }
    }
}

/// How a flow operation ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// New data landed in the owning store
    Applied,
    /// Local precondition failed; no request was issued
    Skipped,
    /// The control was disabled because the flow was busy
    Rejected,
    /// A newer request on the same flow took over; this response was dropped
    Superseded,
    /// The service call failed; the owning store kept its previous value
    Failed(ServiceError),
}

impl Outcome {
    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// How an operation takes hold of its flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Claim {
    /// Refuse while a request is in flight (the operator's controls)
    IfIdle,
    /// Start a new generation regardless; an in-flight request goes stale
    Force,
}

/// Proof that a request was issued under a given generation
#[derive(Debug)]
#[must_use = "a ticket must be finished to return the flow to idle"]
pub struct Ticket {
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct FlowInner {
    busy: bool,
    generation: u64,
}

/// Busy/idle state plus generation counter for one flow
#[derive(Debug, Default)]
pub struct FlowState {
    inner: Mutex<FlowInner>,
}

impl FlowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.inner).busy
    }

    /// Current generation (number of requests begun so far)
    pub fn generation(&self) -> u64 {
        lock(&self.inner).generation
    }

    /// idle|busy → busy under a new generation
    ///
    /// `Claim::IfIdle` yields `None` when the flow is already busy.
    /// The busy check and the transition happen under one lock, so two
    /// callers racing for an idle flow cannot both get a ticket.
    pub fn claim(&self, claim: Claim) -> Option<Ticket> {
        let mut inner = lock(&self.inner);
        if claim == Claim::IfIdle && inner.busy {
            return None;
        }
        inner.busy = true;
        inner.generation += 1;
        Some(Ticket {
            generation: inner.generation,
        })
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        lock(&self.inner).generation == ticket.generation
    }

    /// Run `write` only if `ticket` is still current
    ///
    /// The flow lock is held while writing, so a newer `claim` cannot slip
    /// in between the check and the write.
    pub fn commit(&self, ticket: &Ticket, write: impl FnOnce()) -> bool {
        let inner = lock(&self.inner);
        if inner.generation != ticket.generation {
            return false;
        }
        write();
        true
    }

    /// busy → idle for the current ticket; stale tickets are ignored
    ///
    /// Returns whether the ticket was current.
    pub fn finish(&self, ticket: Ticket) -> bool {
        let mut inner = lock(&self.inner);
        if inner.generation == ticket.generation {
            inner.busy = false;
            true
        } else {
            false
        }
    }
}

//! Scripted in-memory FAQ service for flow tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::analytics::AnalyticsSnapshot;
use super::entry::Entry;
use super::flow::lock;
use super::probe::ProbeResult;
use super::service::{FaqService, ServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Create,
    Delete,
    Answer,
    Analytics,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(Entry),
    Delete(String),
    Answer(String),
    Analytics,
}

/// Behaves like a well-mannered service unless told otherwise
#[derive(Default)]
pub struct ScriptedService {
    entries: Mutex<Vec<Entry>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<Op, ServiceError>>,
    gates: Mutex<HashMap<Op, Arc<Notify>>>,
    probe: Mutex<Option<ProbeResult>>,
    analytics: Mutex<Option<AnalyticsSnapshot>>,
    ignore_deletes: Mutex<bool>,
}

impl ScriptedService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_entries(entries: Vec<Entry>) -> Arc<Self> {
        let service = Self::default();
        *lock(&service.entries) = entries;
        Arc::new(service)
    }

    pub fn set_entries(&self, entries: Vec<Entry>) {
        *lock(&self.entries) = entries;
    }

    pub fn set_probe(&self, result: ProbeResult) {
        *lock(&self.probe) = Some(result);
    }

    pub fn set_analytics(&self, snapshot: AnalyticsSnapshot) {
        *lock(&self.analytics) = Some(snapshot);
    }

    /// Accept deletes but keep the entry (a service that does not honor them)
    pub fn ignore_deletes(&self) {
        *lock(&self.ignore_deletes) = true;
    }

    /// Fail every call of `op` until `recover` is called
    pub fn fail(&self, op: Op, err: ServiceError) {
        lock(&self.failures).insert(op, err);
    }

    pub fn recover(&self, op: Op) {
        lock(&self.failures).remove(&op);
    }

    /// Hold the next call of `op` open until the returned gate is notified
    pub fn hold_next(&self, op: Op) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        lock(&self.gates).insert(op, Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn count(&self, op: Op) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| call_op(call) == op)
            .count()
    }

    /// Yield until at least `n` calls have been issued
    pub async fn wait_for_calls(&self, n: usize) {
        while lock(&self.calls).len() < n {
            tokio::task::yield_now().await;
        }
    }

    async fn enter(&self, call: Call) -> Result<(), ServiceError> {
        let op = call_op(&call);
        lock(&self.calls).push(call);
        let gate = lock(&self.gates).remove(&op);
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match lock(&self.failures).get(&op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn call_op(call: &Call) -> Op {
    match call {
        Call::List => Op::List,
        Call::Create(_) => Op::Create,
        Call::Delete(_) => Op::Delete,
        Call::Answer(_) => Op::Answer,
        Call::Analytics => Op::Analytics,
    }
}

#[async_trait]
impl FaqService for ScriptedService {
    async fn list_entries(&self) -> Result<Vec<Entry>, ServiceError> {
        // Replies are captured at issue time so a held response carries older data
        let snapshot = lock(&self.entries).clone();
        self.enter(Call::List).await?;
        Ok(snapshot)
    }

    async fn create_entry(&self, entry: &Entry) -> Result<(), ServiceError> {
        self.enter(Call::Create(entry.clone())).await?;
        lock(&self.entries).push(entry.clone());
        Ok(())
    }

    async fn delete_entry(&self, id: &str) -> Result<(), ServiceError> {
        self.enter(Call::Delete(id.to_string())).await?;
        if !*lock(&self.ignore_deletes) {
            lock(&self.entries).retain(|e| e.id != id);
        }
        Ok(())
    }

    async fn answer(&self, query: &str) -> Result<ProbeResult, ServiceError> {
        let scripted = lock(&self.probe).clone();
        self.enter(Call::Answer(query.to_string())).await?;
        scripted.ok_or_else(|| ServiceError::Malformed("no scripted answer".into()))
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, ServiceError> {
        let scripted = lock(&self.analytics).clone();
        self.enter(Call::Analytics).await?;
        scripted.ok_or_else(|| ServiceError::Malformed("no scripted analytics".into()))
    }
}

pub fn entry(id: &str, question: &str, answer: &str) -> Entry {
    Entry {
        id: id.to_string(),
        question: question.to_string(),
        answer: answer.to_string(),
        category: None,
    }
}

//! Remote API types
//!
//! Wire-only DTOs. Entries, probe results and analytics snapshots travel
//! as their core types directly.

use serde::{Deserialize, Serialize};

/// Body of POST /api/answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub query: String,
}

/// Error body some endpoints return alongside a non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl ApiErrorResponse {
    pub fn message(&self) -> String {
        match &self.details {
            Some(details) if !details.is_empty() => format!("{} ({})", self.error, details),
            _ => self.error.clone(),
        }
    }
}

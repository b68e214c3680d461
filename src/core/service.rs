//! FAQ service abstraction
//!
//! All retrieval, ranking and answer generation lives behind this trait.
//! The session only ever talks to the service through these five calls.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          FaqService          │
//! │  ┌────────────┬───────────┐  │
//! │  │RemoteClient│  (tests)  │  │
//! │  │ (HTTP API) │  scripted │  │
//! │  └────────────┴───────────┘  │
//! └──────────────────────────────┘
//! ```

use async_trait::async_trait;
use thiserror::Error;

use super::analytics::AnalyticsSnapshot;
use super::entry::Entry;
use super::probe::ProbeResult;

/// Why a service call produced no usable data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// Service unreachable, connection dropped, or request timed out
    #[error("service unreachable: {0}")]
    Transport(String),

    /// Service answered with a non-2xx status
    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body could not be parsed
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ServiceError {
    /// Whether the service actually answered (even if unhappily)
    pub fn service_responded(&self) -> bool {
        !matches!(self, ServiceError::Transport(_))
    }
}

/// Backend trait for the FAQ service endpoints
#[async_trait]
pub trait FaqService: Send + Sync {
    /// GET /api/faqs
    async fn list_entries(&self) -> Result<Vec<Entry>, ServiceError>;

    /// POST /api/faqs (response body ignored)
    async fn create_entry(&self, entry: &Entry) -> Result<(), ServiceError>;

    /// DELETE /api/faqs/{id} (response body ignored)
    async fn delete_entry(&self, id: &str) -> Result<(), ServiceError>;

    /// POST /api/answer
    async fn answer(&self, query: &str) -> Result<ProbeResult, ServiceError>;

    /// GET /api/analytics
    async fn analytics(&self) -> Result<AnalyticsSnapshot, ServiceError>;
}

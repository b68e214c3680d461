//! Remote service HTTP client
//!
//! Async client for the Smart FAQ service API.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types::*;
use crate::config::ServerConfig;
use crate::core::analytics::AnalyticsSnapshot;
use crate::core::entry::Entry;
use crate::core::probe::ProbeResult;
use crate::core::service::{FaqService, ServiceError};

/// Base address used when nothing is configured
pub const DEFAULT_SERVER_URL: &str = "https://smart-faq-worker.fpl-test.workers.dev";

/// HTTP client for the FAQ service
#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: Url,
}

impl RemoteClient {
    /// Create new client from server config
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        Self::new(config.url(), config.timeout())
    }

    /// Create new client with explicit parameters
    ///
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid server URL: {}", base_url))?;

        if base_url.cannot_be_a_base() {
            anyhow::bail!("Server URL cannot carry a path: {}", base_url);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL for an endpoint
    fn url(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|e| ServiceError::Transport(format!("invalid endpoint path {}: {}", path, e)))
    }

    /// URL of a single entry; the id is encoded as one path segment
    fn entry_url(&self, id: &str) -> Result<Url, ServiceError> {
        let mut url = self.url("/api/faqs")?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::Transport(format!("cannot address entry {}", id)))?
            .push(id);
        Ok(url)
    }

    // ============== Helpers ==============

    /// Send a request, mapping connection-level failures
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<Response, ServiceError> {
        builder
            .send()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))
    }

    /// Check status and deserialize the body
    async fn parse<T: DeserializeOwned>(&self, resp: Response) -> Result<T, ServiceError> {
        let resp = self.check(resp).await?;
        let body = resp
            .bytes()
            .await
            .map_err(|e| ServiceError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| ServiceError::Malformed(e.to_string()))
    }

    /// Check status only; the body is ignored
    async fn check(&self, resp: Response) -> Result<Response, ServiceError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        Err(ServiceError::Status {
            status: status.as_u16(),
            message: extract_error(resp).await,
        })
    }
}

/// Extract error message from response
async fn extract_error(resp: Response) -> String {
    let reason = resp
        .status()
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string();

    let text = match resp.text().await {
        Ok(text) => text,
        Err(_) => return reason,
    };

    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(&text) {
        return err.message();
    }

    let text = text.trim();
    if text.is_empty() {
        reason
    } else {
        text.chars().take(200).collect()
    }
}

#[async_trait]
impl FaqService for RemoteClient {
    async fn list_entries(&self) -> Result<Vec<Entry>, ServiceError> {
        let url = self.url("/api/faqs")?;
        debug!(%url, "GET entries");

        let resp = self.send(self.client.get(url)).await?;
        self.parse(resp).await
    }

    async fn create_entry(&self, entry: &Entry) -> Result<(), ServiceError> {
        let url = self.url("/api/faqs")?;
        debug!(%url, id = %entry.id, "POST entry");

        let resp = self.send(self.client.post(url).json(entry)).await?;
        self.check(resp).await.map(|_| ())
    }

    async fn delete_entry(&self, id: &str) -> Result<(), ServiceError> {
        let url = self.entry_url(id)?;
        debug!(%url, "DELETE entry");

        let resp = self.send(self.client.delete(url)).await?;
        self.check(resp).await.map(|_| ())
    }

    async fn answer(&self, query: &str) -> Result<ProbeResult, ServiceError> {
        let url = self.url("/api/answer")?;
        debug!(%url, query, "POST answer");

        let req = AnswerRequest {
            query: query.to_string(),
        };
        let resp = self.send(self.client.post(url).json(&req)).await?;
        self.parse(resp).await
    }

    async fn analytics(&self) -> Result<AnalyticsSnapshot, ServiceError> {
        let url = self.url("/api/analytics")?;
        debug!(%url, "GET analytics");

        let resp = self.send(self.client.get(url)).await?;
        self.parse(resp).await
    }
}
